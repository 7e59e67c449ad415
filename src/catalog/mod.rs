//! Variant generation and the shape catalog.
//!
//! Derives every distinct rotation/reflection of each base shape and caches
//! the resulting catalogs per reflection setting.

pub mod cache;
pub mod variant;

pub use cache::{Catalog, CatalogCache};
pub use variant::{enumerate_variants, find_variant, ShapeCatalogEntry, VariantShape};
