//! Legacy district locator: containment plus nearest-centroid fallback.

use geo::{Intersects, Point};
use tracing::debug;

use super::Resolver;
use crate::geometry::haversine_km;
use crate::models::LegacyDistrict;

impl<'a> Resolver<'a> {
    /// Classify a coordinate into a legacy district.
    ///
    /// Among districts whose bounding box contains the point, the one with
    /// the minimum centroid distance wins. Points inside no box fall back
    /// to the nearest centroid, accepted only strictly under the fallback
    /// radius; past it the locator reports no match.
    pub fn locate_old_unit(&self, point: Point<f64>) -> Option<&'a LegacyDistrict> {
        let contained = self
            .tables
            .districts
            .iter()
            .filter(|d| d.bbox.is_some_and(|bbox| bbox.intersects(&point)))
            .min_by(|a, b| {
                haversine_km(point, a.centroid).total_cmp(&haversine_km(point, b.centroid))
            });
        if contained.is_some() {
            return contained;
        }

        let (nearest, distance) = self
            .tables
            .districts
            .iter()
            .map(|d| (d, haversine_km(point, d.centroid)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;

        if distance < self.fallback_radius_km {
            Some(nearest)
        } else {
            debug!(
                "Nearest district centroid is {:.1} km away, past the {} km fallback radius",
                distance, self.fallback_radius_km
            );
            None
        }
    }
}
