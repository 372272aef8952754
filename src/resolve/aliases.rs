//! Alias set assembly for resolved records.

use std::collections::BTreeSet;

use super::Resolver;
use crate::models::{LegacyDistrict, NewWard};

impl<'a> Resolver<'a> {
    /// Assemble the set of names a resolved record may be searched under:
    /// old district long/short, old province short, the pre-reorganization
    /// province short when the province was merged or renamed, the
    /// successor province short, and the new ward long/short. Empty entries
    /// are removed.
    pub fn build_aliases(
        &self,
        old: Option<&LegacyDistrict>,
        new: Option<&NewWard>,
    ) -> BTreeSet<String> {
        let mut aliases = BTreeSet::new();

        if let Some(district) = old {
            aliases.insert(district.district.clone());
            aliases.insert(district.district_short.clone());
            aliases.insert(district.province_short.clone());

            // Absent conversion means no reorganization applies; the
            // original province already doubles as the successor.
            if let Some(conversion) = self.tables.conversions.get(&district.key) {
                if conversion.province_changed {
                    aliases.insert(conversion.province_short.clone());
                }
                aliases.insert(conversion.new_province_short.clone());
            }
        }

        if let Some(ward) = new {
            aliases.insert(ward.ward.clone());
            aliases.insert(ward.ward_short.clone());
        }

        aliases.retain(|alias| !alias.is_empty());
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistrictKey, ProvinceConversion};
    use crate::reference::ReferenceTables;
    use geo::Point;

    fn district() -> LegacyDistrict {
        LegacyDistrict {
            key: DistrictKey::new("P01", "D05"),
            province: "Province One".to_string(),
            province_short: "Prov 1".to_string(),
            district: "District Five".to_string(),
            district_short: "Dist 5".to_string(),
            district_type: "urban".to_string(),
            centroid: Point::new(106.0, 10.0),
            bbox: None,
        }
    }

    fn ward() -> NewWard {
        NewWard {
            province_code: "N01".to_string(),
            province: "New Province".to_string(),
            province_short: "New Prov".to_string(),
            ward_code: "W01".to_string(),
            ward: "Ward One".to_string(),
            ward_short: "W 1".to_string(),
            ward_type: "ward".to_string(),
            centroid: Point::new(106.02, 10.02),
            area_km2: 12.5,
        }
    }

    fn conversion(changed: bool) -> ProvinceConversion {
        ProvinceConversion {
            key: DistrictKey::new("P01", "D05"),
            province_short: "Prov 1".to_string(),
            new_province: "New Province".to_string(),
            new_province_short: "New Prov".to_string(),
            province_changed: changed,
        }
    }

    #[test]
    fn test_aliases_with_changed_province() {
        let tables = ReferenceTables::new(vec![district()], vec![conversion(true)], vec![ward()]);
        let resolver = Resolver::new(&tables);

        let aliases = resolver.build_aliases(Some(&tables.districts[0]), Some(&tables.wards[0]));
        let expected: BTreeSet<String> = [
            "District Five",
            "Dist 5",
            "Prov 1",
            "New Prov",
            "Ward One",
            "W 1",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(aliases, expected);
    }

    #[test]
    fn test_aliases_unchanged_province_omits_pre_reorg_name() {
        let tables = ReferenceTables::new(vec![district()], vec![conversion(false)], vec![]);
        let resolver = Resolver::new(&tables);

        let aliases = resolver.build_aliases(Some(&tables.districts[0]), None);
        assert!(aliases.contains("New Prov"));
        assert!(aliases.contains("Prov 1"));
        assert!(!aliases.contains("Province One"));
    }

    #[test]
    fn test_aliases_drop_empty_strings() {
        let mut d = district();
        d.district_short = String::new();
        let tables = ReferenceTables::new(vec![d], vec![], vec![]);
        let resolver = Resolver::new(&tables);

        let aliases = resolver.build_aliases(Some(&tables.districts[0]), None);
        assert!(!aliases.contains(""));
        assert!(aliases.contains("District Five"));
    }

    #[test]
    fn test_aliases_set_equal_regardless_of_build_order() {
        let tables = ReferenceTables::new(vec![district()], vec![conversion(true)], vec![ward()]);
        let resolver = Resolver::new(&tables);

        // Permuting which input arrives first cannot change the result set.
        let ward_first = resolver.build_aliases(None, Some(&tables.wards[0]));
        let both = resolver.build_aliases(Some(&tables.districts[0]), Some(&tables.wards[0]));
        let district_only = resolver.build_aliases(Some(&tables.districts[0]), None);

        let unioned: BTreeSet<String> = ward_first.union(&district_only).cloned().collect();
        assert_eq!(both, unioned);
    }

    #[test]
    fn test_aliases_empty_inputs() {
        let tables = ReferenceTables::new(vec![], vec![], vec![]);
        let resolver = Resolver::new(&tables);
        assert!(resolver.build_aliases(None, None).is_empty());
    }
}
