//! Core game entities: players, statuses, bot variants, and stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a stored enum spelling cannot be parsed back.
#[derive(Debug, Error)]
#[error("unrecognized {kind} value: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// A mark owner. X is always the human, O is always the bot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Stored/wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Player {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Player::X),
            "O" => Ok(Player::O),
            other => Err(ParseEnumError {
                kind: "player",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a game. `InProgress` is the only non-terminal state.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    XWins,
    OWins,
    Draw,
    Abandoned,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Stored/wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::XWins => "x_wins",
            GameStatus::OWins => "o_wins",
            GameStatus::Draw => "draw",
            GameStatus::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(GameStatus::InProgress),
            "x_wins" => Ok(GameStatus::XWins),
            "o_wins" => Ok(GameStatus::OWins),
            "draw" => Ok(GameStatus::Draw),
            "abandoned" => Ok(GameStatus::Abandoned),
            other => Err(ParseEnumError {
                kind: "game status",
                value: other.to_string(),
            }),
        }
    }
}

/// Behavioral mode of the automated opponent, fixed at game creation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotVariant {
    /// Takes an immediate win, otherwise blocks an immediate loss,
    /// otherwise plays randomly.
    Smart,
    /// Plays uniformly at random, ignoring wins and blocks.
    Chaos,
}

impl BotVariant {
    /// Stored/wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BotVariant::Smart => "smart",
            BotVariant::Chaos => "chaos",
        }
    }
}

impl fmt::Display for BotVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BotVariant {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart" => Ok(BotVariant::Smart),
            "chaos" => Ok(BotVariant::Chaos),
            other => Err(ParseEnumError {
                kind: "bot variant",
                value: other.to_string(),
            }),
        }
    }
}

/// A stored game. The board is never stored; it is replayed from the
/// game's move log on demand.
#[derive(Clone, Debug)]
pub struct Game {
    pub id: String,
    pub status: GameStatus,
    pub starting_player: Player,
    pub bot_variant: BotVariant,
    pub created_at: DateTime<Utc>,
}

/// A stored move. The player is not stored; it is derived from the game's
/// starting player and the 1-based `move_number`.
#[derive(Clone, Debug)]
pub struct MoveRecord {
    pub id: String,
    pub game_id: String,
    pub move_number: i64,
    pub x: i64,
    pub y: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_round_trips_through_storage_spelling() {
        for player in [Player::X, Player::O] {
            assert_eq!(player.as_str().parse::<Player>().unwrap(), player);
        }
        assert!("Z".parse::<Player>().is_err());
    }

    #[test]
    fn status_round_trips_through_storage_spelling() {
        let all = [
            GameStatus::InProgress,
            GameStatus::XWins,
            GameStatus::OWins,
            GameStatus::Draw,
            GameStatus::Abandoned,
        ];
        for status in all {
            assert_eq!(status.as_str().parse::<GameStatus>().unwrap(), status);
        }
    }

    #[test]
    fn only_in_progress_is_non_terminal() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::XWins.is_terminal());
        assert!(GameStatus::OWins.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
        assert!(GameStatus::Abandoned.is_terminal());
    }

    #[test]
    fn wire_spellings_match_the_api_contract() {
        assert_eq!(serde_json::to_string(&Player::X).unwrap(), "\"X\"");
        assert_eq!(
            serde_json::to_string(&GameStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&GameStatus::XWins).unwrap(),
            "\"x_wins\""
        );
        assert_eq!(serde_json::to_string(&BotVariant::Chaos).unwrap(), "\"chaos\"");
    }
}
