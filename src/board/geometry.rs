//! Grid geometry for the 10x10 board.
//!
//! Cells are addressed by a flat index `y * 10 + x`. All helpers here are
//! pure and allocation-free.

/// Width and height of the square board.
pub const BOARD_SIZE: i32 = 10;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Orthogonal neighbour offsets (right, left, down, up).
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Converts a flat cell index into `(x, y)` coordinates.
pub const fn cell_xy(index: usize) -> (i32, i32) {
    let i = index as i32;
    (i % BOARD_SIZE, i / BOARD_SIZE)
}

/// Converts `(x, y)` into a flat cell index, or `None` if off the grid.
pub fn xy_to_index(x: i32, y: i32) -> Option<usize> {
    if in_bounds(x, y) {
        Some((y * BOARD_SIZE + x) as usize)
    } else {
        None
    }
}

/// Returns true if `(x, y)` lies on the grid.
pub const fn in_bounds(x: i32, y: i32) -> bool {
    x >= 0 && x < BOARD_SIZE && y >= 0 && y < BOARD_SIZE
}

/// Returns true if the cell lies on the outer ring of the board.
pub const fn is_edge(index: usize) -> bool {
    let (x, y) = cell_xy(index);
    x == 0 || y == 0 || x == BOARD_SIZE - 1 || y == BOARD_SIZE - 1
}

/// Iterates the on-grid orthogonal neighbours of a cell.
pub fn neighbors(index: usize) -> impl Iterator<Item = usize> {
    let (x, y) = cell_xy(index);
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter_map(move |(dx, dy)| xy_to_index(x + dx, y + dy))
}
