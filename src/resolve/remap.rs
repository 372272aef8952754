//! Province successor lookup under the boundary reorganization.

use super::Resolver;
use crate::models::LegacyDistrict;

impl<'a> Resolver<'a> {
    /// Successor province short name for a matched district.
    ///
    /// Districts with no conversion record keep their original province,
    /// meaning no reorganization applies to them.
    pub fn remap_province(&self, district: &'a LegacyDistrict) -> &'a str {
        self.tables
            .conversions
            .get(&district.key)
            .map(|c| c.new_province_short.as_str())
            .unwrap_or(&district.province_short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistrictKey, ProvinceConversion};
    use crate::reference::ReferenceTables;
    use geo::Point;

    fn district(province_code: &str, district_code: &str) -> LegacyDistrict {
        LegacyDistrict {
            key: DistrictKey::new(province_code, district_code),
            province: "Province One".to_string(),
            province_short: "Prov 1".to_string(),
            district: "District Five".to_string(),
            district_short: "Dist 5".to_string(),
            district_type: "urban".to_string(),
            centroid: Point::new(106.0, 10.0),
            bbox: None,
        }
    }

    #[test]
    fn test_remap_uses_conversion_record() {
        let tables = ReferenceTables::new(
            vec![district("P01", "D05")],
            vec![ProvinceConversion {
                key: DistrictKey::new("P01", "D05"),
                province_short: "Prov 1".to_string(),
                new_province: "New Province".to_string(),
                new_province_short: "New Prov".to_string(),
                province_changed: true,
            }],
            vec![],
        );
        let resolver = Resolver::new(&tables);
        assert_eq!(resolver.remap_province(&tables.districts[0]), "New Prov");
    }

    #[test]
    fn test_remap_without_conversion_keeps_province() {
        let tables = ReferenceTables::new(vec![district("P01", "D05")], vec![], vec![]);
        let resolver = Resolver::new(&tables);
        assert_eq!(resolver.remap_province(&tables.districts[0]), "Prov 1");
    }
}
