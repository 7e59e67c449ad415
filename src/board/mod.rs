//! Board representation and game-state types.
//!
//! Contains the grid geometry, the base shape set, piece instances, and the
//! overall game state.

pub mod geometry;
pub mod piece;
pub mod shape;
pub mod state;

pub use geometry::{cell_xy, in_bounds, is_edge, neighbors, xy_to_index, BOARD_CELLS, BOARD_SIZE};
pub use piece::{
    generate_initial_pieces, instance_id, InvalidRotation, Owner, PieceInstance, Player, Rotation,
    ALL_PLAYERS, ALL_ROTATIONS,
};
pub use shape::{
    base_shapes, cell_signature, shape_fingerprint, Offset, PieceShape, ShapeId, ALL_SHAPES,
    SHAPE_COUNT,
};
pub use state::{Board, GameState, GameStateDelta, Scores, TerritoryRegion};
