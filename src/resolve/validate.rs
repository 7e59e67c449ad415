//! Placement legality checks.

use crate::board::{cell_xy, xy_to_index, GameState, BOARD_CELLS};
use crate::catalog::{find_variant, Catalog, ShapeCatalogEntry, VariantShape};
use crate::config::{EngineConfig, VariantPolicy};

use super::capture::detect_captures;
use super::territory::detect_new_territories;
use super::{Placement, PlacementIntent, RejectReason};

/// Validates `intent` against the current state.
///
/// Checks run in order and stop at the first failure: game finished (opt-in),
/// unknown piece, already placed, out of turn (opt-in), anchor range, shape
/// in catalog, orientation, then every covered cell on the grid and empty.
///
/// On success the territory and capture consequences are computed against
/// the board *before* this piece is written, so the piece's own coverage
/// only takes effect from the next placement on.
pub fn validate_placement(
    state: &GameState,
    catalog: &Catalog,
    config: &EngineConfig,
    intent: &PlacementIntent,
) -> Result<Placement, RejectReason> {
    if config.reject_after_finish && state.finished {
        return Err(RejectReason::GameFinished);
    }

    let piece = state
        .pieces
        .get(&intent.piece_id)
        .ok_or(RejectReason::UnknownPiece)?;
    if piece.placed {
        return Err(RejectReason::AlreadyPlaced);
    }
    if config.enforce_turn {
        if let Some(owner) = piece.owner.player() {
            if owner != state.turn {
                return Err(RejectReason::OutOfTurn);
            }
        }
    }
    let anchor = usize::try_from(intent.anchor)
        .ok()
        .filter(|&a| a < BOARD_CELLS)
        .ok_or(RejectReason::OutOfBounds)?;

    let entry = catalog.get(piece.piece_id).ok_or(RejectReason::ShapeNotFound)?;
    let variant = resolve_variant(entry, intent, config.variant_policy)?;
    let cells = footprint(state, variant, anchor)?;

    let new_territories = detect_new_territories(state);
    let captures = piece
        .owner
        .player()
        .map(|mover| detect_captures(state, mover, &new_territories))
        .unwrap_or_default();

    Ok(Placement { cells, captures, new_territories })
}

/// Picks the variant for the intent's orientation, applying `policy` when it
/// is not in the catalog.
pub(crate) fn resolve_variant<'a>(
    entry: &'a ShapeCatalogEntry,
    intent: &PlacementIntent,
    policy: VariantPolicy,
) -> Result<&'a VariantShape, RejectReason> {
    match find_variant(entry, intent.rotation, intent.reflected) {
        Some(v) => Ok(v),
        None => match policy {
            VariantPolicy::Fallback => entry.variants.first().ok_or(RejectReason::VariantNotFound),
            VariantPolicy::Reject => Err(RejectReason::VariantNotFound),
        },
    }
}

/// Board cells covered by `variant` at `anchor`, if all are on the grid and
/// empty.
pub(crate) fn footprint(
    state: &GameState,
    variant: &VariantShape,
    anchor: usize,
) -> Result<Vec<usize>, RejectReason> {
    let (ax, ay) = cell_xy(anchor);
    let mut cells = Vec::with_capacity(variant.cells.len());
    for &(dx, dy) in &variant.cells {
        let idx = xy_to_index(ax + dx, ay + dy).ok_or(RejectReason::OutOfBounds)?;
        if !state.board.is_free(idx) {
            return Err(RejectReason::CellOccupied);
        }
        cells.push(idx);
    }
    Ok(cells)
}
