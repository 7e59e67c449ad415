//! Shape catalog construction and caching.
//!
//! A [`Catalog`] maps every base shape to its variants for one
//! `allow_reflection` setting. [`CatalogCache`] owns the shape list and one
//! lazily built catalog per setting; it must be invalidated after the shape
//! list is edited, otherwise the cached catalogs are stale.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use super::variant::{enumerate_variants, ShapeCatalogEntry};
use crate::board::{base_shapes, PieceShape, ShapeId};

/// All catalog entries for one reflection setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    allow_reflection: bool,
    entries: BTreeMap<ShapeId, ShapeCatalogEntry>,
}

impl Catalog {
    /// Builds a catalog from a shape list.
    ///
    /// Panics if a shape's declared area differs from its cell count.
    pub fn build(shapes: &[PieceShape], allow_reflection: bool) -> Self {
        let entries = shapes
            .iter()
            .map(|shape| {
                assert_eq!(
                    shape.area,
                    shape.cells.len(),
                    "area mismatch for shape {}",
                    shape.id
                );
                let entry = ShapeCatalogEntry {
                    shape: shape.clone(),
                    variants: enumerate_variants(shape, allow_reflection),
                };
                (shape.id, entry)
            })
            .collect();
        Catalog { allow_reflection, entries }
    }

    pub fn allow_reflection(&self) -> bool {
        self.allow_reflection
    }

    pub fn get(&self, id: ShapeId) -> Option<&ShapeCatalogEntry> {
        self.entries.get(&id)
    }

    /// Area of a shape, or 0 if the shape is not in the catalog.
    pub fn area(&self, id: ShapeId) -> usize {
        self.get(id).map_or(0, |e| e.area())
    }

    pub fn entries(&self) -> impl Iterator<Item = &ShapeCatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lazily built catalogs keyed by the reflection flag.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    shapes: Vec<PieceShape>,
    /// Index 0: reflection disallowed, index 1: allowed.
    slots: [Option<Arc<Catalog>>; 2],
}

impl CatalogCache {
    /// A cache over the standard base shapes.
    pub fn new() -> Self {
        CatalogCache::with_shapes(base_shapes())
    }

    /// A cache over a custom shape list.
    pub fn with_shapes(shapes: Vec<PieceShape>) -> Self {
        CatalogCache { shapes, slots: [None, None] }
    }

    pub fn shapes(&self) -> &[PieceShape] {
        &self.shapes
    }

    /// Mutable access to the shape list. Call [`invalidate`](Self::invalidate)
    /// afterwards or previously built catalogs keep serving old geometry.
    pub fn shapes_mut(&mut self) -> &mut Vec<PieceShape> {
        &mut self.shapes
    }

    /// Returns the catalog for `allow_reflection`, building it on first use.
    ///
    /// Repeated calls with the same flag return the same `Arc` until
    /// [`invalidate`](Self::invalidate) is called.
    pub fn build(&mut self, allow_reflection: bool) -> Arc<Catalog> {
        let shapes = &self.shapes;
        let slot = &mut self.slots[usize::from(allow_reflection)];
        Arc::clone(slot.get_or_insert_with(|| {
            trace!(allow_reflection, shapes = shapes.len(), "building shape catalog");
            Arc::new(Catalog::build(shapes, allow_reflection))
        }))
    }

    /// True if a catalog for `allow_reflection` is currently cached.
    pub fn is_cached(&self, allow_reflection: bool) -> bool {
        self.slots[usize::from(allow_reflection)].is_some()
    }

    /// Drops every cached catalog.
    pub fn invalidate(&mut self) {
        trace!("invalidating shape catalog cache");
        self.slots = [None, None];
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        CatalogCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SHAPE_COUNT;

    #[test]
    fn build_covers_every_shape() {
        let mut cache = CatalogCache::new();
        let catalog = cache.build(true);
        assert_eq!(catalog.len(), SHAPE_COUNT);
        assert!(catalog.allow_reflection());
        assert_eq!(catalog.area(ShapeId::Wall3), 3);
        assert_eq!(catalog.area(ShapeId::Cross5), 5);
    }

    #[test]
    fn repeated_build_returns_same_catalog() {
        let mut cache = CatalogCache::new();
        let a = cache.build(true);
        let b = cache.build(true);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn flags_are_cached_separately() {
        let mut cache = CatalogCache::new();
        let with = cache.build(true);
        let without = cache.build(false);
        assert!(!Arc::ptr_eq(&with, &without));
        assert!(cache.is_cached(true));
        assert!(cache.is_cached(false));
        assert!(Arc::ptr_eq(&with, &cache.build(true)));
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let mut cache = CatalogCache::new();
        let first = cache.build(true);
        cache.invalidate();
        assert!(!cache.is_cached(true));
        let second = cache.build(true);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn edited_shapes_are_stale_until_invalidated() {
        let mut cache = CatalogCache::new();
        let before = cache.build(false);
        assert_eq!(before.area(ShapeId::Wall3), 3);

        let wall = cache
            .shapes_mut()
            .iter_mut()
            .find(|s| s.id == ShapeId::Wall3)
            .unwrap();
        *wall = PieceShape::new(ShapeId::Wall3, vec![(0, 0), (1, 0)]);

        assert_eq!(cache.build(false).area(ShapeId::Wall3), 3);
        cache.invalidate();
        assert_eq!(cache.build(false).area(ShapeId::Wall3), 2);
    }

    #[test]
    fn missing_shape_has_zero_area() {
        let mut cache = CatalogCache::with_shapes(Vec::new());
        let catalog = cache.build(true);
        assert!(catalog.is_empty());
        assert!(catalog.get(ShapeId::Tower).is_none());
        assert_eq!(catalog.area(ShapeId::Tower), 0);
    }

    #[test]
    #[should_panic(expected = "area mismatch")]
    fn area_mismatch_panics_at_build() {
        let bad = PieceShape { id: ShapeId::Spire, cells: vec![(0, 0)], area: 3 };
        Catalog::build(&[bad], false);
    }
}
