//! Placement resolution.
//!
//! Validates a proposed placement, computes its territory and capture
//! consequences against the pre-placement board, and applies it to the game
//! state.

pub mod capture;
pub mod mutate;
pub mod territory;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::board::{Rotation, ShapeId, TerritoryRegion};

pub use capture::detect_captures;
pub use mutate::{apply_placement, compute_score};
pub use territory::detect_new_territories;
pub use validate::validate_placement;

/// A request to place one piece instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementIntent {
    /// Instance id, e.g. `"LIGHT_WALL3"`.
    pub piece_id: String,
    /// Board index the variant's origin is placed on. Signed so that
    /// off-board requests reach the validator and are refused there.
    pub anchor: i32,
    pub rotation: Rotation,
    pub reflected: bool,
}

impl PlacementIntent {
    pub fn new(piece_id: impl Into<String>, anchor: i32, rotation: Rotation, reflected: bool) -> Self {
        PlacementIntent { piece_id: piece_id.into(), anchor, rotation, reflected }
    }
}

/// Why a placement was refused. No state changes on any of these paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    #[error("no piece instance with that id")]
    UnknownPiece,

    #[error("piece is already placed")]
    AlreadyPlaced,

    #[error("placement leaves the board")]
    OutOfBounds,

    #[error("no catalog entry for the piece's shape")]
    ShapeNotFound,

    #[error("target cell is occupied")]
    CellOccupied,

    #[error("requested orientation is not in the catalog")]
    VariantNotFound,

    #[error("piece does not belong to the player on turn")]
    OutOfTurn,

    #[error("game is already finished")]
    GameFinished,
}

impl RejectReason {
    /// Wire reason code.
    pub const fn code(self) -> &'static str {
        match self {
            RejectReason::UnknownPiece => "UNKNOWN_PIECE",
            RejectReason::AlreadyPlaced => "ALREADY_PLACED",
            RejectReason::OutOfBounds => "OUT_OF_BOUNDS",
            RejectReason::ShapeNotFound => "SHAPE_NOT_FOUND",
            RejectReason::CellOccupied => "CELL_OCCUPIED",
            RejectReason::VariantNotFound => "VARIANT_NOT_FOUND",
            RejectReason::OutOfTurn => "OUT_OF_TURN",
            RejectReason::GameFinished => "GAME_FINISHED",
        }
    }
}

/// A legal placement and its pre-computed consequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Board cells the piece will cover, in variant cell order.
    pub cells: Vec<usize>,
    /// Shape ids of opposing pieces captured by this move.
    pub captures: Vec<ShapeId>,
    pub new_territories: Vec<TerritoryRegion>,
}

/// Serializable outcome report of a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub legal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    pub captures: Vec<ShapeId>,
    pub new_territories: Vec<TerritoryRegion>,
}

impl From<&Result<Placement, RejectReason>> for ValidationResult {
    fn from(result: &Result<Placement, RejectReason>) -> Self {
        match result {
            Ok(p) => ValidationResult {
                legal: true,
                reason: None,
                captures: p.captures.clone(),
                new_territories: p.new_territories.clone(),
            },
            Err(reason) => ValidationResult {
                legal: false,
                reason: Some(*reason),
                captures: Vec::new(),
                new_territories: Vec::new(),
            },
        }
    }
}
