//! Applying a validated placement to the game state.

use tracing::info;

use crate::board::{GameState, GameStateDelta, Owner, Player, Scores, ShapeId, ALL_PLAYERS};
use crate::catalog::Catalog;

use super::{Placement, PlacementIntent};

/// Applies a placement previously accepted by
/// [`validate_placement`](super::validate_placement) for the same state.
///
/// In order: records the piece's orientation, writes its cells, resolves
/// captures, persists the new territories, recomputes scores, checks for the
/// end of the game, appends a history entry and passes the turn.
pub fn apply_placement(
    state: &mut GameState,
    catalog: &Catalog,
    intent: &PlacementIntent,
    placement: &Placement,
) {
    let Some(piece) = state.pieces.get_mut(&intent.piece_id) else {
        return;
    };
    piece.placed = true;
    piece.anchor = usize::try_from(intent.anchor).ok();
    piece.rotation = intent.rotation;
    piece.reflected = intent.reflected;
    let mover = piece.owner;

    for &idx in &placement.cells {
        state.board.occupy(idx, intent.piece_id.as_str());
    }

    if let Some(player) = mover.player() {
        process_captures(state, player, &placement.captures);
    }

    for region in &placement.new_territories {
        state.territories.insert(region.id.clone(), region.clone());
    }
    state.next_territory_seq += placement.new_territories.len() as u64;

    state.scores = compute_scores(state, catalog);
    detect_end_game(state);

    state.history.push(GameStateDelta {
        ply: state.history.len() as u32 + 1,
        piece_id: intent.piece_id.clone(),
        captured_piece_ids: placement.captures.clone(),
        new_territories: placement.new_territories.iter().map(|t| t.id.clone()).collect(),
        scores: state.scores,
    });
    state.turn = state.turn.opponent();
}

/// Clears every cell held by a captured shape type not owned by `player`
/// and flags those pieces as captured.
fn process_captures(state: &mut GameState, player: Player, captures: &[ShapeId]) {
    if captures.is_empty() {
        return;
    }
    let mover = Owner::from(player);
    for idx in 0..state.board.len() {
        let Some(id) = state.board.get(idx) else {
            continue;
        };
        let Some(piece) = state.pieces.get_mut(id) else {
            continue;
        };
        if piece.owner != mover && captures.contains(&piece.piece_id) {
            piece.captured = true;
            state.board.clear(idx);
        }
    }
}

/// Territory cells owned by `player` plus the area of their placed,
/// uncaptured pieces.
pub fn compute_score(state: &GameState, catalog: &Catalog, player: Player) -> u32 {
    let territory: usize = state
        .territories
        .values()
        .filter(|t| t.owner == player)
        .map(|t| t.cells.len())
        .sum();
    let owner = Owner::from(player);
    let pieces: usize = state
        .pieces
        .values()
        .filter(|p| p.owner == owner && p.is_active())
        .map(|p| catalog.area(p.piece_id))
        .sum();
    (territory + pieces) as u32
}

fn compute_scores(state: &GameState, catalog: &Catalog) -> Scores {
    let mut scores = Scores::default();
    for player in ALL_PLAYERS {
        scores.set(player, compute_score(state, catalog, player));
    }
    scores
}

/// Finishes the game once no player piece is left unplaced and uncaptured.
/// The winner is the strictly higher scorer; a tie leaves no winner.
fn detect_end_game(state: &mut GameState) {
    if state.finished {
        return;
    }
    let remaining = state
        .pieces
        .values()
        .any(|p| p.owner != Owner::Neutral && !p.captured && !p.placed);
    if remaining {
        return;
    }
    state.finished = true;
    state.winner = state.scores.leader();
    info!(
        game = %state.id,
        light = state.scores.light,
        dark = state.scores.dark,
        winner = state.winner.map_or("none", |w| w.as_str()),
        "game finished"
    );
}
