//! Compact board notation.
//!
//! Ten `/`-separated rows of ten characters, top row first:
//! `L`, `D`, `N` for cells occupied by a LIGHT, DARK or NEUTRAL piece,
//! `l`, `d` for empty cells inside a LIGHT or DARK territory, `.` for any
//! other empty cell.

use crate::board::{GameState, Owner, Player, BOARD_SIZE};

/// Notation character for a single cell.
pub fn cell_char(state: &GameState, index: usize) -> char {
    match state.owner_at(index) {
        Some(Owner::Light) => 'L',
        Some(Owner::Dark) => 'D',
        Some(Owner::Neutral) => 'N',
        None => match state.territory_owner(index) {
            Some(Player::Light) => 'l',
            Some(Player::Dark) => 'd',
            None => '.',
        },
    }
}

/// Board rows, top first.
pub fn board_rows(state: &GameState) -> Vec<String> {
    let size = BOARD_SIZE as usize;
    (0..size)
        .map(|y| (0..size).map(|x| cell_char(state, y * size + x)).collect())
        .collect()
}

/// Encodes the whole board on one line.
pub fn encode_board(state: &GameState) -> String {
    board_rows(state).join("/")
}
