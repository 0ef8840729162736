//! Move commands and their solution-string encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Command {
    East,
    West,
    SouthEast,
    SouthWest,
    RotateClockwise,
    RotateCounterClockwise,
    /// Whitespace in a solution string; never applied.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid command character {0:?}")]
    InvalidChar(char),
}

impl Command {
    /// Every command that changes the placement, in search order.
    pub const MOVES: [Command; 6] = [
        Command::East,
        Command::West,
        Command::SouthEast,
        Command::SouthWest,
        Command::RotateClockwise,
        Command::RotateCounterClockwise,
    ];

    /// Characters that encode this command; the first is the canonical one.
    pub fn letters(self) -> &'static str {
        match self {
            Command::West => "p'!.03",
            Command::East => "bcefy2",
            Command::SouthWest => "aghij4",
            Command::SouthEast => "lmno 5",
            Command::RotateClockwise => "dqrvz1",
            Command::RotateCounterClockwise => "kstuwx",
            Command::Ignored => "\t\n\r",
        }
    }

    /// Canonical output character, `None` for [`Command::Ignored`].
    pub fn to_char(self) -> Option<char> {
        match self {
            Command::Ignored => None,
            other => other.letters().chars().next(),
        }
    }

    /// Case-insensitive decode.
    pub fn from_char(c: char) -> Result<Self, ParseError> {
        let lower = c.to_ascii_lowercase();
        Self::MOVES
            .into_iter()
            .chain(std::iter::once(Command::Ignored))
            .find(|command| command.letters().contains(lower))
            .ok_or(ParseError::InvalidChar(c))
    }

    pub fn is_rotation(self) -> bool {
        matches!(
            self,
            Command::RotateClockwise | Command::RotateCounterClockwise
        )
    }
}

pub fn parse_commands(solution: &str) -> Result<Vec<Command>, ParseError> {
    solution.chars().map(Command::from_char).collect()
}

pub fn encode_commands(commands: &[Command]) -> String {
    commands.iter().filter_map(|command| command.to_char()).collect()
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::East => "E",
            Command::West => "W",
            Command::SouthEast => "SE",
            Command::SouthWest => "SW",
            Command::RotateClockwise => "CW",
            Command::RotateCounterClockwise => "CCW",
            Command::Ignored => "IGNORED",
        };
        f.write_str(name)
    }
}
