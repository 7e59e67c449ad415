//! Cathedral rules engine library.
//!
//! A two-player territorial game on a 10x10 grid with polyomino pieces.
//! Exposes the board representation, the shape catalog, placement
//! resolution (validation, territory, capture, mutation), legal placement
//! enumeration, and the referee protocol used by the binary.

pub mod board;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod session;

pub use board::{
    base_shapes, generate_initial_pieces, GameState, Owner, PieceInstance, PieceShape, Player,
    Rotation, ShapeId, TerritoryRegion,
};
pub use catalog::{enumerate_variants, find_variant, Catalog, CatalogCache, ShapeCatalogEntry, VariantShape};
pub use config::{EngineConfig, VariantPolicy};
pub use engine::Engine;
pub use resolve::{Placement, PlacementIntent, RejectReason, ValidationResult};
