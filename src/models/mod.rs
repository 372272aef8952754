//! Core data models for the enrichment pipeline.

pub mod admin;
pub mod facility;

pub use admin::{DistrictKey, LegacyDistrict, NewWard, ProvinceConversion};
pub use facility::Facility;
