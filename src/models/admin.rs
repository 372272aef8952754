//! Administrative reference records for the two boundary vintages.

use geo::{Point, Rect};
use std::fmt;

/// Composite identity of a legacy district.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistrictKey {
    pub province_code: String,
    pub district_code: String,
}

impl DistrictKey {
    pub fn new(province_code: impl Into<String>, district_code: impl Into<String>) -> Self {
        Self {
            province_code: province_code.into(),
            district_code: district_code.into(),
        }
    }
}

impl fmt::Display for DistrictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.province_code, self.district_code)
    }
}

/// Administrative district under the pre-reorganization boundary system.
#[derive(Debug, Clone)]
pub struct LegacyDistrict {
    pub key: DistrictKey,
    pub province: String,
    pub province_short: String,
    pub district: String,
    pub district_short: String,
    pub district_type: String,
    /// Representative coordinate for distance-based matching.
    pub centroid: Point<f64>,
    /// Axis-aligned extent; absent for units without published bounds.
    pub bbox: Option<Rect<f64>>,
}

/// Mapping from a legacy district to its successor province under the
/// boundary reorganization.
#[derive(Debug, Clone)]
pub struct ProvinceConversion {
    pub key: DistrictKey,
    /// Province short name before reorganization.
    pub province_short: String,
    pub new_province: String,
    pub new_province_short: String,
    /// True when the legacy province was merged or renamed.
    pub province_changed: bool,
}

/// Administrative ward under the post-reorganization boundary system.
#[derive(Debug, Clone)]
pub struct NewWard {
    pub province_code: String,
    pub province: String,
    pub province_short: String,
    pub ward_code: String,
    pub ward: String,
    pub ward_short: String,
    pub ward_type: String,
    pub centroid: Point<f64>,
    pub area_km2: f64,
}
