//! Hexfall core crate - fundamental types for the hex-grid falling-block game.

mod board;
mod board_heights;
mod command;
mod hexpoint;
mod unit;

pub use board::Board;
pub use board_heights::HeightProfile;
pub use command::{encode_commands, parse_commands, Command, ParseError};
pub use hexpoint::HexPoint;
pub use unit::{Unit, UnitLocation};
