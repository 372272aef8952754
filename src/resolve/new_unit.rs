//! Reorganized ward locator: bucket-constrained nearest-centroid search.

use geo::Point;

use super::Resolver;
use crate::geometry::haversine_km;
use crate::models::NewWard;

impl<'a> Resolver<'a> {
    /// Classify a coordinate into a reorganized ward.
    ///
    /// A non-empty ward bucket for the candidate province constrains the
    /// scan; otherwise every ward is considered. The nearest centroid wins
    /// with no distance cutoff, so any non-empty ward table produces a
    /// match, even an implausibly distant one. Unlike the old-unit locator
    /// there is deliberately no radius here; adding one changes the match
    /// statistics.
    pub fn locate_new_unit(
        &self,
        point: Point<f64>,
        candidate_province: Option<&str>,
    ) -> Option<&'a NewWard> {
        let bucket = candidate_province
            .map(|p| self.tables.ward_bucket(p))
            .unwrap_or(&[]);

        if !bucket.is_empty() {
            return bucket.iter().map(|&i| &self.tables.wards[i]).min_by(|a, b| {
                haversine_km(point, a.centroid).total_cmp(&haversine_km(point, b.centroid))
            });
        }

        self.tables.wards.iter().min_by(|a, b| {
            haversine_km(point, a.centroid).total_cmp(&haversine_km(point, b.centroid))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceTables;

    fn ward(province_short: &str, ward_code: &str, lat: f64, lon: f64) -> NewWard {
        NewWard {
            province_code: format!("N-{}", province_short),
            province: format!("{} Province", province_short),
            province_short: province_short.to_string(),
            ward_code: ward_code.to_string(),
            ward: format!("Ward {}", ward_code),
            ward_short: ward_code.to_string(),
            ward_type: "ward".to_string(),
            centroid: Point::new(lon, lat),
            area_km2: 10.0,
        }
    }

    #[test]
    fn test_bucket_constrains_search() {
        // The planted ward in another province is geographically closer but
        // must not be chosen while the candidate bucket is non-empty.
        let tables = ReferenceTables::new(
            vec![],
            vec![],
            vec![
                ward("New Prov", "W01", 10.5, 106.5),
                ward("Other Prov", "W99", 10.01, 106.01),
            ],
        );
        let resolver = Resolver::new(&tables);

        let matched = resolver
            .locate_new_unit(Point::new(106.0, 10.0), Some("New Prov"))
            .unwrap();
        assert_eq!(matched.ward_code, "W01");
    }

    #[test]
    fn test_nearest_within_bucket() {
        let tables = ReferenceTables::new(
            vec![],
            vec![],
            vec![
                ward("New Prov", "W01", 10.5, 106.5),
                ward("New Prov", "W02", 10.02, 106.02),
            ],
        );
        let resolver = Resolver::new(&tables);

        let matched = resolver
            .locate_new_unit(Point::new(106.0, 10.0), Some("New Prov"))
            .unwrap();
        assert_eq!(matched.ward_code, "W02");
    }

    #[test]
    fn test_empty_bucket_falls_back_to_full_scan() {
        let tables = ReferenceTables::new(
            vec![],
            vec![],
            vec![
                ward("Other Prov", "W99", 10.01, 106.01),
                ward("Far Prov", "W50", 20.0, 105.0),
            ],
        );
        let resolver = Resolver::new(&tables);

        let matched = resolver
            .locate_new_unit(Point::new(106.0, 10.0), Some("Unknown Prov"))
            .unwrap();
        assert_eq!(matched.ward_code, "W99");

        let matched = resolver.locate_new_unit(Point::new(106.0, 10.0), None).unwrap();
        assert_eq!(matched.ward_code, "W99");
    }

    #[test]
    fn test_no_distance_cutoff() {
        // A single ward hundreds of kilometres away still matches.
        let tables = ReferenceTables::new(vec![], vec![], vec![ward("Far Prov", "W50", 21.0, 105.8)]);
        let resolver = Resolver::new(&tables);

        let matched = resolver.locate_new_unit(Point::new(106.7, 10.8), None).unwrap();
        assert_eq!(matched.ward_code, "W50");
    }

    #[test]
    fn test_empty_ward_table_is_no_match() {
        let tables = ReferenceTables::new(vec![], vec![], vec![]);
        let resolver = Resolver::new(&tables);
        assert!(resolver.locate_new_unit(Point::new(106.0, 10.0), None).is_none());
    }
}
