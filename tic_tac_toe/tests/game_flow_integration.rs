//! Integration tests for the game session orchestrator against an
//! in-memory database.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use tic_tac_toe::db::queries;
use tic_tac_toe::game::board::{Cell, Position};
use tic_tac_toe::{
    BotVariant, Database, DatabaseConfig, Game, GameError, GameManager, GameStatus, MoveRecord,
    Player,
};

/// Helper to create a manager over a fresh in-memory database.
async fn setup() -> (Arc<SqlitePool>, GameManager) {
    let db = Database::new(&DatabaseConfig::in_memory())
        .await
        .expect("failed to open in-memory database");
    db.init_schema().await.expect("schema bootstrap failed");
    let pool = Arc::new(db.pool().clone());
    let manager = GameManager::new(pool.clone());
    (pool, manager)
}

/// Insert a game row directly, bypassing the orchestrator, to set up
/// specific positions.
async fn seed_game(pool: &SqlitePool, starting_player: Player, status: GameStatus) -> Game {
    let game = Game {
        id: Uuid::new_v4().to_string(),
        status,
        starting_player,
        bot_variant: BotVariant::Smart,
        created_at: Utc::now(),
    };
    queries::insert_game(pool, &game).await.expect("seed game");
    game
}

async fn seed_move(pool: &SqlitePool, game_id: &str, move_number: i64, x: i64, y: i64) {
    let record = MoveRecord {
        id: Uuid::new_v4().to_string(),
        game_id: game_id.to_string(),
        move_number,
        x,
        y,
        created_at: Utc::now(),
    };
    queries::insert_move(pool, &record).await.expect("seed move");
}

fn mark_count(board: &tic_tac_toe::Board) -> usize {
    board
        .iter()
        .flatten()
        .filter(|cell| **cell != Cell::Empty)
        .count()
}

#[tokio::test]
async fn first_game_starts_with_the_bot() {
    let (pool, manager) = setup().await;

    let created = manager.create_game().await.expect("create game");
    assert_eq!(created.game.status, GameStatus::InProgress);
    assert_eq!(created.game.starting_player, Player::O);
    assert_eq!(created.current_turn, Some(Player::X));

    let opening = created.bot_move.expect("bot starts, so it must move");
    assert_eq!(created.board[opening.y][opening.x], Cell::O);
    assert_eq!(mark_count(&created.board), 1);

    let moves = queries::moves_for_game(pool.as_ref(), &created.game.id)
        .await
        .unwrap();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].move_number, 1);
}

#[tokio::test]
async fn creating_a_second_game_abandons_the_first() {
    let (_pool, manager) = setup().await;

    let first = manager.create_game().await.unwrap();
    let second = manager.create_game().await.unwrap();

    let abandoned = manager.get_game(&first.game.id).await.unwrap();
    assert_eq!(abandoned.game.status, GameStatus::Abandoned);
    assert_eq!(abandoned.current_turn, None);

    let current = manager.current_game().await.unwrap();
    assert_eq!(current.game.id, second.game.id);

    // Second game alternates to a human start: no opening bot move.
    assert_eq!(second.game.starting_player, Player::X);
    assert_eq!(second.bot_move, None);
    assert_eq!(second.current_turn, Some(Player::X));
}

#[tokio::test]
async fn starting_player_alternates_across_creations() {
    let (_pool, manager) = setup().await;

    let starters = [
        manager.create_game().await.unwrap().game.starting_player,
        manager.create_game().await.unwrap().game.starting_player,
        manager.create_game().await.unwrap().game.starting_player,
        manager.create_game().await.unwrap().game.starting_player,
    ];
    assert_eq!(starters, [Player::O, Player::X, Player::O, Player::X]);
}

#[tokio::test]
async fn missing_games_report_not_found() {
    let (_pool, manager) = setup().await;

    assert!(matches!(
        manager.get_game("missing").await,
        Err(GameError::GameNotFound)
    ));
    assert!(matches!(
        manager.submit_move("missing", 0, 0).await,
        Err(GameError::GameNotFound)
    ));
    assert!(matches!(
        manager.list_moves("missing").await,
        Err(GameError::GameNotFound)
    ));
    assert!(matches!(
        manager.current_game().await,
        Err(GameError::NoActiveGame)
    ));
}

#[tokio::test]
async fn finished_games_reject_moves_before_any_other_check() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::X, GameStatus::XWins).await;

    // Simultaneously finished and out of bounds: finished wins.
    let err = manager.submit_move(&game.id, 7, -3).await.unwrap_err();
    match err {
        GameError::GameFinished { valid_moves } => assert_eq!(valid_moves.len(), 9),
        other => panic!("expected GameFinished, got {other:?}"),
    }
}

#[tokio::test]
async fn out_of_bounds_coordinates_are_rejected() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::X, GameStatus::InProgress).await;

    for (x, y) in [(3, 0), (0, 3), (-1, 0), (0, -1)] {
        let err = manager.submit_move(&game.id, x, y).await.unwrap_err();
        assert!(
            matches!(err, GameError::OutOfBounds { .. }),
            "({x},{y}) should be out of bounds, got {err:?}"
        );
    }
}

#[tokio::test]
async fn moving_on_the_bots_turn_is_rejected() {
    let (pool, manager) = setup().await;
    // Bot starts and has not moved yet, so it is not the human's turn.
    let game = seed_game(pool.as_ref(), Player::O, GameStatus::InProgress).await;

    let err = manager.submit_move(&game.id, 0, 0).await.unwrap_err();
    assert!(matches!(err, GameError::NotYourTurn { .. }));
}

#[tokio::test]
async fn occupied_cells_are_rejected_with_the_actual_empty_cells() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::O, GameStatus::InProgress).await;
    seed_move(pool.as_ref(), &game.id, 1, 0, 0).await; // bot took (0,0)

    let err = manager.submit_move(&game.id, 0, 0).await.unwrap_err();
    match err {
        GameError::CellOccupied { valid_moves } => {
            assert_eq!(valid_moves.len(), 8);
            assert!(!valid_moves.contains(&Position { x: 0, y: 0 }));
        }
        other => panic!("expected CellOccupied, got {other:?}"),
    }
}

#[tokio::test]
async fn winning_human_move_ends_the_game_without_a_bot_reply() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::X, GameStatus::InProgress).await;
    // X: (0,0) (1,0) — one short of the top row. O: (0,1) (1,1).
    seed_move(pool.as_ref(), &game.id, 1, 0, 0).await;
    seed_move(pool.as_ref(), &game.id, 2, 0, 1).await;
    seed_move(pool.as_ref(), &game.id, 3, 1, 0).await;
    seed_move(pool.as_ref(), &game.id, 4, 1, 1).await;

    let outcome = manager.submit_move(&game.id, 2, 0).await.unwrap();
    assert_eq!(outcome.status, GameStatus::XWins);
    assert_eq!(outcome.bot_move, None);
    assert_eq!(outcome.current_turn, None);

    let detail = manager.get_game(&game.id).await.unwrap();
    assert_eq!(detail.game.status, GameStatus::XWins);
    assert!(matches!(
        manager.current_game().await,
        Err(GameError::NoActiveGame)
    ));

    let moves = queries::moves_for_game(pool.as_ref(), &game.id).await.unwrap();
    assert_eq!(moves.len(), 5, "no bot move after the game ended");
}

#[tokio::test]
async fn filling_the_board_without_a_line_is_a_draw() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::X, GameStatus::InProgress).await;
    // Eight moves toward the drawn board  X O X / X X O / O . O,
    // X on odd move numbers, O on even.
    for (number, x, y) in [
        (1, 0, 0),
        (2, 1, 0),
        (3, 2, 0),
        (4, 2, 1),
        (5, 0, 1),
        (6, 0, 2),
        (7, 1, 1),
        (8, 2, 2),
    ] {
        seed_move(pool.as_ref(), &game.id, number, x, y).await;
    }

    let outcome = manager.submit_move(&game.id, 1, 2).await.unwrap();
    assert_eq!(outcome.status, GameStatus::Draw);
    assert_eq!(outcome.bot_move, None);
    assert_eq!(outcome.current_turn, None);
}

#[tokio::test]
async fn bot_replies_to_a_non_terminal_human_move() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::X, GameStatus::InProgress).await;

    let outcome = manager.submit_move(&game.id, 1, 1).await.unwrap();
    assert_eq!(outcome.status, GameStatus::InProgress);
    assert_eq!(outcome.current_turn, Some(Player::X));

    let reply = outcome.bot_move.expect("bot must reply");
    assert_ne!(reply, Position { x: 1, y: 1 });
    assert_eq!(outcome.board[reply.y][reply.x], Cell::O);
    assert_eq!(mark_count(&outcome.board), 2);

    let moves = queries::moves_for_game(pool.as_ref(), &game.id).await.unwrap();
    assert_eq!(moves.len(), 2);
}

#[tokio::test]
async fn smart_bot_blocks_an_imminent_human_win() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::X, GameStatus::InProgress).await;
    seed_move(pool.as_ref(), &game.id, 1, 0, 0).await; // X
    seed_move(pool.as_ref(), &game.id, 2, 2, 2).await; // O

    // X now threatens the top row at (2,0); the smart bot has no win of its
    // own and must block there.
    let outcome = manager.submit_move(&game.id, 1, 0).await.unwrap();
    assert_eq!(outcome.bot_move, Some(Position { x: 2, y: 0 }));
    assert_eq!(outcome.status, GameStatus::InProgress);
}

#[tokio::test]
async fn listing_games_reports_final_boards_only_for_settled_games() {
    let (_pool, manager) = setup().await;

    let first = manager.create_game().await.unwrap();
    let second = manager.create_game().await.unwrap();

    let summaries = manager.list_games().await.unwrap();
    assert_eq!(summaries.len(), 2);

    // Oldest first.
    assert_eq!(summaries[0].game.id, first.game.id);
    assert_eq!(summaries[1].game.id, second.game.id);

    assert_eq!(summaries[0].game.status, GameStatus::Abandoned);
    assert!(summaries[0].final_board.is_some());
    assert_eq!(summaries[0].move_count, 1);

    assert_eq!(summaries[1].game.status, GameStatus::InProgress);
    assert!(summaries[1].final_board.is_none());
    assert_eq!(summaries[1].move_count, 0);
}

#[tokio::test]
async fn move_history_derives_the_player_per_move() {
    let (pool, manager) = setup().await;
    let game = seed_game(pool.as_ref(), Player::O, GameStatus::InProgress).await;
    seed_move(pool.as_ref(), &game.id, 1, 0, 0).await;
    seed_move(pool.as_ref(), &game.id, 2, 1, 1).await;
    seed_move(pool.as_ref(), &game.id, 3, 2, 2).await;

    let moves = manager.list_moves(&game.id).await.unwrap();
    assert_eq!(moves.len(), 3);
    assert_eq!(
        moves.iter().map(|m| m.player).collect::<Vec<_>>(),
        vec![Player::O, Player::X, Player::O]
    );
    assert_eq!(
        moves.iter().map(|m| m.record.move_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}
