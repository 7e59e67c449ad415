//! Rotation/reflection variant enumeration.
//!
//! A quarter turn maps `(x, y) -> (y, -x)` and a reflection maps
//! `(x, y) -> (-x, y)`; both renormalize so the bounding box touches the
//! origin again. Variants are generated unreflected first, then reflected,
//! each at 0/90/180/270 degrees, keeping only the first occurrence of each
//! distinct cell set.

use serde::{Deserialize, Serialize};

use crate::board::{cell_signature, Offset, PieceShape, Rotation, ShapeId, ALL_ROTATIONS};

/// A distinct orientation of a base shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantShape {
    pub id: ShapeId,
    /// Normalized cells: minimum x and y are both 0.
    pub cells: Vec<Offset>,
    pub rotation: Rotation,
    pub reflected: bool,
}

impl VariantShape {
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Order-independent signature of the variant's cells.
    pub fn signature(&self) -> String {
        cell_signature(&self.cells)
    }
}

/// A base shape plus its distinct variants, first-generated first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCatalogEntry {
    pub shape: PieceShape,
    pub variants: Vec<VariantShape>,
}

impl ShapeCatalogEntry {
    pub fn id(&self) -> ShapeId {
        self.shape.id
    }

    pub fn area(&self) -> usize {
        self.shape.area
    }
}

/// Shifts cells so the minimum x and y are both 0.
fn normalize(cells: Vec<Offset>) -> Vec<Offset> {
    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
    cells.into_iter().map(|(x, y)| (x - min_x, y - min_y)).collect()
}

/// Rotates cells a quarter turn.
fn rotate(cells: &[Offset]) -> Vec<Offset> {
    normalize(cells.iter().map(|&(x, y)| (y, -x)).collect())
}

/// Mirrors cells across the vertical axis.
fn reflect(cells: &[Offset]) -> Vec<Offset> {
    normalize(cells.iter().map(|&(x, y)| (-x, y)).collect())
}

/// Enumerates the distinct orientations of `shape`.
///
/// Yields 1..=4 variants without reflection and 1..=8 with it. Symmetric
/// duplicates are dropped, keeping the lowest reflection-then-rotation
/// variant as canonical.
pub fn enumerate_variants(shape: &PieceShape, allow_reflection: bool) -> Vec<VariantShape> {
    let mut bases = vec![(shape.cells.clone(), false)];
    if allow_reflection {
        bases.push((reflect(&shape.cells), true));
    }

    let mut variants: Vec<VariantShape> = Vec::with_capacity(8);
    let mut seen: Vec<String> = Vec::with_capacity(8);

    for (base, reflected) in bases {
        let mut current = base;
        for rotation in ALL_ROTATIONS {
            let sig = cell_signature(&current);
            if !seen.contains(&sig) {
                seen.push(sig);
                variants.push(VariantShape {
                    id: shape.id,
                    cells: current.clone(),
                    rotation,
                    reflected,
                });
            }
            current = rotate(&current);
        }
    }

    variants
}

/// Finds the variant generated for exactly `(rotation, reflected)`.
///
/// Returns `None` when that orientation was dropped as a duplicate (or never
/// generated because reflection is disabled); callers pick the fallback.
pub fn find_variant(
    entry: &ShapeCatalogEntry,
    rotation: Rotation,
    reflected: bool,
) -> Option<&VariantShape> {
    entry
        .variants
        .iter()
        .find(|v| v.rotation == rotation && v.reflected == reflected)
}
