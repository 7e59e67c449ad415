//! Capture detection.
//!
//! An opposing shape type is captured when every board cell it occupies
//! lies inside the mover's territory, counting both registered territories
//! and the regions this move is about to create. Cells are grouped by shape
//! id rather than instance id, which is exact while each player owns at most
//! one instance per shape.

use std::collections::{BTreeMap, HashSet};

use crate::board::{GameState, Owner, Player, ShapeId, TerritoryRegion};

/// Returns the shape ids of opposing pieces enclosed by `mover`'s territory.
pub fn detect_captures(
    state: &GameState,
    mover: Player,
    proposed: &[TerritoryRegion],
) -> Vec<ShapeId> {
    let mut owned: HashSet<usize> = state.territory_cells_of(mover);
    owned.extend(
        proposed
            .iter()
            .filter(|t| t.owner == mover)
            .flat_map(|t| t.cells.iter().copied()),
    );
    if owned.is_empty() {
        return Vec::new();
    }

    let opponent = Owner::from(mover.opponent());
    let mut cells_by_shape: BTreeMap<ShapeId, Vec<usize>> = BTreeMap::new();
    for (idx, occupant) in state.board.iter() {
        let Some(piece) = occupant.and_then(|id| state.pieces.get(id)) else {
            continue;
        };
        if piece.owner == opponent && !piece.captured {
            cells_by_shape.entry(piece.piece_id).or_default().push(idx);
        }
    }

    cells_by_shape
        .into_iter()
        .filter(|(_, cells)| cells.iter().all(|c| owned.contains(c)))
        .map(|(shape, _)| shape)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn territory(id: &str, owner: Player, cells: Vec<usize>) -> TerritoryRegion {
        TerritoryRegion { id: id.into(), owner, cells }
    }

    #[test]
    fn no_territory_no_captures() {
        let mut state = GameState::new("c");
        state.board.occupy(33, "DARK_SPIRE");
        assert!(detect_captures(&state, Player::Light, &[]).is_empty());
    }

    #[test]
    fn fully_enclosed_piece_is_captured() {
        let mut state = GameState::new("c");
        state.territories.insert("T0".into(), territory("T0", Player::Light, vec![33, 34, 35]));
        state.board.occupy(33, "DARK_WALL3");
        state.board.occupy(34, "DARK_WALL3");
        state.board.occupy(35, "DARK_WALL3");
        assert_eq!(detect_captures(&state, Player::Light, &[]), vec![ShapeId::Wall3]);
    }

    #[test]
    fn partially_enclosed_piece_survives() {
        let mut state = GameState::new("c");
        state.territories.insert("T0".into(), territory("T0", Player::Light, vec![33, 34]));
        for idx in [33, 34, 35] {
            state.board.occupy(idx, "DARK_WALL3");
        }
        assert!(detect_captures(&state, Player::Light, &[]).is_empty());
    }

    #[test]
    fn own_and_neutral_pieces_are_ignored() {
        let mut state = GameState::new("c");
        state.territories.insert("T0".into(), territory("T0", Player::Dark, vec![50, 51]));
        state.board.occupy(50, "DARK_SPIRE");
        state.board.occupy(51, "NEUTRAL_CATHEDRAL");
        assert!(detect_captures(&state, Player::Dark, &[]).is_empty());
    }

    #[test]
    fn opponent_territory_does_not_count() {
        let mut state = GameState::new("c");
        state.territories.insert("T0".into(), territory("T0", Player::Dark, vec![33]));
        state.board.occupy(33, "DARK_SPIRE");
        assert!(detect_captures(&state, Player::Light, &[]).is_empty());
    }

    #[test]
    fn proposed_regions_join_the_union() {
        let mut state = GameState::new("c");
        state.territories.insert("T0".into(), territory("T0", Player::Light, vec![33]));
        state.board.occupy(33, "DARK_COURTYARD");
        state.board.occupy(34, "DARK_COURTYARD");
        assert!(detect_captures(&state, Player::Light, &[]).is_empty());
        let proposed = [territory("T1", Player::Light, vec![34])];
        assert_eq!(detect_captures(&state, Player::Light, &proposed), vec![ShapeId::Courtyard]);
        let foreign = [territory("T1", Player::Dark, vec![34])];
        assert!(detect_captures(&state, Player::Light, &foreign).is_empty());
    }

    #[test]
    fn already_captured_pieces_are_skipped() {
        let mut state = GameState::new("c");
        state.territories.insert("T0".into(), territory("T0", Player::Light, vec![33]));
        state.board.occupy(33, "DARK_SPIRE");
        state.pieces.get_mut("DARK_SPIRE").unwrap().captured = true;
        assert!(detect_captures(&state, Player::Light, &[]).is_empty());
    }
}
