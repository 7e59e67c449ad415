//! Game state representation.
//!
//! Holds the complete snapshot of a game: the board, every piece instance,
//! registered territories, move history, scores and the end-game flags.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::geometry::BOARD_CELLS;
use super::piece::{generate_initial_pieces, Owner, PieceInstance, Player};
use super::shape::ShapeId;

/// The 100-cell board.
///
/// Each occupied cell holds the instance id of its piece; the piece itself
/// lives in [`GameState::pieces`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Option<String>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Board { cells: vec![None; BOARD_CELLS] }
    }

    /// Always [`BOARD_CELLS`].
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Instance id occupying `index`, if any. Out-of-range reads are empty.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }

    pub fn is_free(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    /// Writes an instance id into a cell.
    ///
    /// Panics if `index` is not below [`BOARD_CELLS`]; callers pass indices
    /// already checked by the validator.
    pub fn occupy(&mut self, index: usize, instance: impl Into<String>) {
        self.cells[index] = Some(instance.into());
    }

    /// Empties a cell. Panics like [`Board::occupy`] on an off-board index.
    pub fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    /// Iterates `(index, occupant)` over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&str>)> {
        self.cells.iter().enumerate().map(|(i, c)| (i, c.as_deref()))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// An enclosed empty region claimed by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryRegion {
    pub id: String,
    pub owner: Player,
    /// Board cell indices, ascending.
    pub cells: Vec<usize>,
}

/// Per-player score totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Scores {
    pub light: u32,
    pub dark: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Light => self.light,
            Player::Dark => self.dark,
        }
    }

    pub fn set(&mut self, player: Player, value: u32) {
        match player {
            Player::Light => self.light = value,
            Player::Dark => self.dark = value,
        }
    }

    /// The player with the strictly higher score, or `None` on a tie.
    pub fn leader(&self) -> Option<Player> {
        match self.light.cmp(&self.dark) {
            std::cmp::Ordering::Greater => Some(Player::Light),
            std::cmp::Ordering::Less => Some(Player::Dark),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One applied placement in the game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateDelta {
    /// 1-based move number.
    pub ply: u32,
    /// Instance id of the placed piece.
    pub piece_id: String,
    pub captured_piece_ids: Vec<ShapeId>,
    pub new_territories: Vec<String>,
    pub scores: Scores,
}

/// Complete game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub id: String,
    pub turn: Player,
    pub board: Board,
    /// Piece instances keyed by unique instance id.
    pub pieces: BTreeMap<String, PieceInstance>,
    pub territories: BTreeMap<String, TerritoryRegion>,
    pub history: Vec<GameStateDelta>,
    pub finished: bool,
    pub winner: Option<Player>,
    pub scores: Scores,
    /// Next territory id number; advanced only when regions are persisted.
    pub next_territory_seq: u64,
}

impl GameState {
    /// Creates a fresh game: empty board, full piece set, LIGHT to move.
    pub fn new(id: impl Into<String>) -> Self {
        GameState {
            id: id.into(),
            turn: Player::Light,
            board: Board::new(),
            pieces: generate_initial_pieces(),
            territories: BTreeMap::new(),
            history: Vec::new(),
            finished: false,
            winner: None,
            scores: Scores::default(),
            next_territory_seq: 0,
        }
    }

    /// The piece occupying a cell, if any.
    pub fn occupant(&self, index: usize) -> Option<&PieceInstance> {
        self.board.get(index).and_then(|id| self.pieces.get(id))
    }

    /// Owner of the piece occupying a cell, if any.
    pub fn owner_at(&self, index: usize) -> Option<Owner> {
        self.occupant(index).map(|p| p.owner)
    }

    /// Every cell belonging to any registered territory.
    pub fn territory_cells(&self) -> HashSet<usize> {
        self.territories
            .values()
            .flat_map(|t| t.cells.iter().copied())
            .collect()
    }

    /// Cells of territories owned by `player`.
    pub fn territory_cells_of(&self, player: Player) -> HashSet<usize> {
        self.territories
            .values()
            .filter(|t| t.owner == player)
            .flat_map(|t| t.cells.iter().copied())
            .collect()
    }

    /// Owner of the territory containing `index`, if any.
    pub fn territory_owner(&self, index: usize) -> Option<Player> {
        self.territories
            .values()
            .find(|t| t.cells.contains(&index))
            .map(|t| t.owner)
    }
}
