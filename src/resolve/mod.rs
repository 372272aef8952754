//! Dual-vintage administrative unit resolution.
//!
//! A `Resolver` borrows the loaded reference tables and classifies a
//! coordinate under both boundary systems: legacy district first, then the
//! reorganized ward constrained to the district's successor province.

mod aliases;
mod new_unit;
mod old_unit;
mod remap;

use crate::reference::ReferenceTables;

/// Default radius for the nearest-centroid fallback, in kilometres.
pub const DEFAULT_FALLBACK_RADIUS_KM: f64 = 15.0;

/// Read-only resolver over the loaded reference tables.
pub struct Resolver<'a> {
    tables: &'a ReferenceTables,
    fallback_radius_km: f64,
}

impl<'a> Resolver<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self {
            tables,
            fallback_radius_km: DEFAULT_FALLBACK_RADIUS_KM,
        }
    }

    pub fn with_fallback_radius(mut self, radius_km: f64) -> Self {
        self.fallback_radius_km = radius_km;
        self
    }
}
