//! Read-only board projection for remote display.
//!
//! Exposes only what a viewer needs: per-cell owner and captured flags,
//! territories, scores and the game outcome. Internal piece references are
//! not part of the projection, and building one never mutates the game.

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Owner, Player, Scores, TerritoryRegion};

/// What a viewer sees in an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub owner: Owner,
    pub captured: bool,
}

/// Serializable snapshot of a game for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub id: String,
    pub turn: Player,
    /// One entry per board cell; `None` when empty.
    pub cells: Vec<Option<CellView>>,
    pub territories: Vec<TerritoryRegion>,
    pub scores: Scores,
    pub finished: bool,
    pub winner: Option<Player>,
    pub ply: usize,
}

impl BoardView {
    pub fn from_state(state: &GameState) -> Self {
        let cells = (0..state.board.len())
            .map(|i| {
                state.occupant(i).map(|p| CellView { owner: p.owner, captured: p.captured })
            })
            .collect();
        BoardView {
            id: state.id.clone(),
            turn: state.turn,
            cells,
            territories: state.territories.values().cloned().collect(),
            scores: state.scores,
            finished: state.finished,
            winner: state.winner,
            ply: state.history.len(),
        }
    }

    /// Encodes the projection as single-line JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_CELLS;

    #[test]
    fn projection_of_new_game() {
        let state = GameState::new("p");
        let view = BoardView::from_state(&state);
        assert_eq!(view.cells.len(), BOARD_CELLS);
        assert!(view.cells.iter().all(Option::is_none));
        assert_eq!(view.turn, Player::Light);
        assert_eq!(view.ply, 0);
    }

    #[test]
    fn projection_json_shape() {
        let mut state = GameState::new("p");
        state.board.occupy(3, "DARK_TOWER");
        let json: serde_json::Value =
            serde_json::from_str(&BoardView::from_state(&state).to_json().unwrap()).unwrap();
        assert_eq!(json["id"], "p");
        assert_eq!(json["turn"], "LIGHT");
        assert_eq!(json["cells"][3]["owner"], "DARK");
        assert_eq!(json["cells"][3]["captured"], false);
        assert!(json["cells"][0].is_null());
        assert_eq!(json["scores"]["LIGHT"], 0);
        assert!(json["winner"].is_null());
        // No piece instance ids leak into the projection.
        assert!(!json.to_string().contains("DARK_TOWER"));
    }

    #[test]
    fn json_roundtrips() {
        let mut state = GameState::new("p");
        state.board.occupy(50, "NEUTRAL_CATHEDRAL");
        let view = BoardView::from_state(&state);
        let back: BoardView = serde_json::from_str(&view.to_json().unwrap()).unwrap();
        assert_eq!(back, view);
    }
}
