//! Banyan - dual-vintage administrative enrichment for facility records.
//!
//! Resolves point-located facilities against two competing boundary vintages
//! (legacy districts and reorganized wards) and derives the diacritic-folded
//! alias keys used for accent-insensitive search.

pub mod geometry;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod resolve;

pub use models::{DistrictKey, Facility, LegacyDistrict, NewWard, ProvinceConversion};
pub use pipeline::{enrich_facilities, EnrichStats};
pub use reference::ReferenceTables;
pub use resolve::Resolver;
