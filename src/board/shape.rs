//! Base shape definitions.
//!
//! Thirteen polyomino shapes make up the piece set. Twelve are owned by each
//! player; the cathedral is the single shared neutral "hub" piece. Cell
//! offsets are canonical (unrotated, unreflected) and normalized so the
//! minimum x and y are both 0.

use serde::{Deserialize, Serialize};

/// The number of distinct base shapes.
pub const SHAPE_COUNT: usize = 13;

/// A cell offset `(x, y)` relative to a shape's origin.
pub type Offset = (i32, i32);

/// Identifies a shape type.
///
/// Shared by the LIGHT and DARK copies of the same shape, so it is not a
/// unique piece key. The serde names match `as_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ShapeId {
    Cathedral = 0,
    Bishop = 1,
    Tower = 2,
    Wall4 = 3,
    Wall3 = 4,
    Courtyard = 5,
    LShape = 6,
    SBend = 7,
    ZBend = 8,
    Spire = 9,
    Wing = 10,
    Cross5 = 11,
    Hook5 = 12,
}

/// All shape ids in table order.
pub const ALL_SHAPES: [ShapeId; SHAPE_COUNT] = [
    ShapeId::Cathedral,
    ShapeId::Bishop,
    ShapeId::Tower,
    ShapeId::Wall4,
    ShapeId::Wall3,
    ShapeId::Courtyard,
    ShapeId::LShape,
    ShapeId::SBend,
    ShapeId::ZBend,
    ShapeId::Spire,
    ShapeId::Wing,
    ShapeId::Cross5,
    ShapeId::Hook5,
];

impl ShapeId {
    /// Returns the wire name, e.g. `"WALL3"` or `"L_SHAPE"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ShapeId::Cathedral => "CATHEDRAL",
            ShapeId::Bishop => "BISHOP",
            ShapeId::Tower => "TOWER",
            ShapeId::Wall4 => "WALL4",
            ShapeId::Wall3 => "WALL3",
            ShapeId::Courtyard => "COURTYARD",
            ShapeId::LShape => "L_SHAPE",
            ShapeId::SBend => "S_BEND",
            ShapeId::ZBend => "Z_BEND",
            ShapeId::Spire => "SPIRE",
            ShapeId::Wing => "WING",
            ShapeId::Cross5 => "CROSS5",
            ShapeId::Hook5 => "HOOK5",
        }
    }

    /// Parses a shape id from its wire name.
    pub fn from_name(s: &str) -> Option<ShapeId> {
        ALL_SHAPES.iter().copied().find(|id| id.as_str() == s)
    }

    /// Returns true for the shared neutral hub shape.
    pub const fn is_neutral(self) -> bool {
        matches!(self, ShapeId::Cathedral)
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical polyomino: its id, cell offsets, and area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceShape {
    pub id: ShapeId,
    pub cells: Vec<Offset>,
    /// Always equal to `cells.len()`.
    pub area: usize,
}

impl PieceShape {
    /// Builds a shape whose area is derived from its cells.
    pub fn new(id: ShapeId, cells: Vec<Offset>) -> Self {
        let area = cells.len();
        PieceShape { id, cells, area }
    }
}

/// Shape table: id, canonical cells, declared area.
const SHAPE_TABLE: [(ShapeId, &[Offset], usize); SHAPE_COUNT] = [
    (ShapeId::Cathedral, &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)], 5),
    (ShapeId::Bishop, &[(0, 0), (1, 0), (0, 1), (0, 2)], 4),
    (ShapeId::Tower, &[(0, 0), (1, 0), (2, 0), (1, 1)], 4),
    (ShapeId::Wall4, &[(0, 0), (1, 0), (2, 0), (3, 0)], 4),
    (ShapeId::Wall3, &[(0, 0), (1, 0), (2, 0)], 3),
    (ShapeId::Courtyard, &[(0, 0), (1, 0), (0, 1), (1, 1)], 4),
    (ShapeId::LShape, &[(0, 0), (0, 1), (0, 2), (1, 2)], 4),
    (ShapeId::SBend, &[(0, 0), (1, 0), (1, 1), (2, 1)], 4),
    (ShapeId::ZBend, &[(1, 0), (2, 0), (0, 1), (1, 1)], 4),
    (ShapeId::Spire, &[(0, 0), (0, 1), (1, 1)], 3),
    (ShapeId::Wing, &[(0, 0), (1, 0), (2, 0), (2, 1)], 4),
    (ShapeId::Cross5, &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)], 5),
    (ShapeId::Hook5, &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)], 5),
];

/// Returns the base shape set in table order.
///
/// Panics if a table entry's declared area disagrees with its cell count.
pub fn base_shapes() -> Vec<PieceShape> {
    SHAPE_TABLE
        .iter()
        .map(|&(id, cells, area)| {
            assert_eq!(area, cells.len(), "area mismatch for shape {}", id);
            PieceShape { id, cells: cells.to_vec(), area }
        })
        .collect()
}

/// Canonical text signature of a shape set.
///
/// Shapes are sorted by wire name with `_` ordered before digits and
/// letters (so `S_BEND` precedes `SPIRE`), and each contributes
/// `NAME:x,y|x,y|...` with its cells as sorted strings; entries are joined
/// with `;`. Any change in geometry changes the signature.
pub fn shape_fingerprint(shapes: &[PieceShape]) -> String {
    let mut sorted: Vec<&PieceShape> = shapes.iter().collect();
    sorted.sort_by_key(|s| collation_key(s.id.as_str()));
    sorted
        .iter()
        .map(|s| format!("{}:{}", s.id.as_str(), cell_signature(&s.cells)))
        .collect::<Vec<_>>()
        .join(";")
}

fn collation_key(name: &str) -> String {
    name.replace('_', " ")
}

/// Order-independent signature of a cell set.
pub fn cell_signature(cells: &[Offset]) -> String {
    let mut parts: Vec<String> = cells.iter().map(|(x, y)| format!("{},{}", x, y)).collect();
    parts.sort();
    parts.join("|")
}
