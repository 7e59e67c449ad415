//! Territory detection.
//!
//! Flood-fills empty regions (4-connectivity) and reports those that are
//! enclosed by exactly one player's pieces, do not touch the board edge, and
//! share no cell with an already registered territory.

use std::collections::{BTreeSet, HashSet};

use crate::board::{is_edge, neighbors, GameState, Player, TerritoryRegion, BOARD_CELLS};

/// A connected empty region and what borders it.
struct RegionScan {
    cells: Vec<usize>,
    touches_edge: bool,
    bordering: BTreeSet<Player>,
}

/// Flood-fills the empty region containing `start`, marking it visited.
///
/// Bordering owners are recorded without entering occupied cells; neutral
/// pieces count as walls but never as owners.
fn scan_region(state: &GameState, start: usize, visited: &mut [bool; BOARD_CELLS]) -> RegionScan {
    let mut scan = RegionScan { cells: Vec::new(), touches_edge: false, bordering: BTreeSet::new() };
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(idx) = stack.pop() {
        scan.cells.push(idx);
        if is_edge(idx) {
            scan.touches_edge = true;
        }
        for n in neighbors(idx) {
            if state.board.is_free(n) {
                if !visited[n] {
                    visited[n] = true;
                    stack.push(n);
                }
            } else if let Some(owner) = state.owner_at(n).and_then(|o| o.player()) {
                scan.bordering.insert(owner);
            }
        }
    }

    scan.cells.sort_unstable();
    scan
}

/// Finds newly enclosed single-owner territories on the current board.
///
/// Region ids continue from the state's territory counter without
/// advancing it; the mutator advances it when the regions are persisted.
pub fn detect_new_territories(state: &GameState) -> Vec<TerritoryRegion> {
    let claimed: HashSet<usize> = state.territory_cells();
    let mut visited = [false; BOARD_CELLS];
    let mut regions = Vec::new();

    for start in 0..BOARD_CELLS {
        if visited[start] || !state.board.is_free(start) {
            continue;
        }
        let scan = scan_region(state, start, &mut visited);
        if scan.touches_edge || scan.bordering.len() != 1 {
            continue;
        }
        if scan.cells.iter().any(|c| claimed.contains(c)) {
            continue;
        }
        let Some(&owner) = scan.bordering.iter().next() else {
            continue;
        };
        let seq = state.next_territory_seq + regions.len() as u64;
        regions.push(TerritoryRegion { id: format!("T{}", seq), owner, cells: scan.cells });
    }

    regions
}
