//! Legal placement enumeration.
//!
//! Lists every orientation and anchor at which a piece currently fits. This
//! is enumeration only; choosing among the placements is up to the caller.

use crate::board::{GameState, Owner, Player, BOARD_CELLS};
use crate::catalog::{Catalog, ShapeCatalogEntry};
use crate::config::EngineConfig;
use crate::resolve::validate::footprint;
use crate::resolve::PlacementIntent;

/// Instance ids of pieces owned by `owner` that are neither placed nor
/// captured, in map order.
pub fn unplaced_pieces(state: &GameState, owner: Owner) -> Vec<&str> {
    state
        .pieces
        .iter()
        .filter(|(_, p)| p.owner == owner && !p.placed && !p.captured)
        .map(|(id, _)| id.as_str())
        .collect()
}

/// Every placement of `instance` that the validator would accept.
///
/// One intent per distinct catalog variant and fitting anchor, ordered by
/// variant then anchor. Empty when the piece is unknown, already placed, or
/// blocked by the turn/finish guards enabled in `config`.
pub fn legal_placements(
    state: &GameState,
    catalog: &Catalog,
    config: &EngineConfig,
    instance: &str,
) -> Vec<PlacementIntent> {
    let Some(entry) = placeable_entry(state, catalog, config, instance) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for variant in &entry.variants {
        for anchor in 0..BOARD_CELLS {
            if footprint(state, variant, anchor).is_ok() {
                out.push(PlacementIntent::new(instance, anchor as i32, variant.rotation, variant.reflected));
            }
        }
    }
    out
}

/// True if `player` can place at least one of their remaining pieces under
/// the guards enabled in `config`.
pub fn has_legal_placement(
    state: &GameState,
    catalog: &Catalog,
    config: &EngineConfig,
    player: Player,
) -> bool {
    unplaced_pieces(state, Owner::from(player)).into_iter().any(|id| {
        let Some(entry) = placeable_entry(state, catalog, config, id) else {
            return false;
        };
        entry
            .variants
            .iter()
            .any(|v| (0..BOARD_CELLS).any(|anchor| footprint(state, v, anchor).is_ok()))
    })
}

/// Catalog entry of `instance` if the piece may be placed at all right now:
/// known, not yet placed, and not blocked by the turn or finish guards.
fn placeable_entry<'a>(
    state: &GameState,
    catalog: &'a Catalog,
    config: &EngineConfig,
    instance: &str,
) -> Option<&'a ShapeCatalogEntry> {
    let piece = state.pieces.get(instance)?;
    if piece.placed || (config.reject_after_finish && state.finished) {
        return None;
    }
    if config.enforce_turn && piece.owner.player().is_some_and(|p| p != state.turn) {
        return None;
    }
    catalog.get(piece.piece_id)
}
