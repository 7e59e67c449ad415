//! Referee protocol handling.
//!
//! Command parsing for the text protocol, a compact row notation for the
//! board, and the JSON board projection served to viewers.

pub mod notation;
pub mod parser;
pub mod projection;

pub use notation::{board_rows, encode_board};
pub use parser::{parse_command, Command};
pub use projection::{BoardView, CellView};
