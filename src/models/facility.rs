//! Facility record being enriched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Subject record of the enrichment pass.
///
/// Pre-existing fields come from the input collection; the administrative
/// fields, alias set, and `*Ascii` search keys are written back in place.
/// Fields this pipeline does not touch round-trip through `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Map link carrying an embedded `query=<lat>,<lon>` pair, the only
    /// coordinate source consumed by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,

    /// Resolved legacy district short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_district: Option<String>,

    /// Province short name under the legacy boundary system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_province: Option<String>,

    /// Resolved reorganized ward short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_ward: Option<String>,

    /// Province short name under the reorganized boundary system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_province: Option<String>,

    /// Alternate names the facility's location may be searched under.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub aliases: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ascii: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_ascii: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_ascii: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub aliases_ascii: BTreeSet<String>,

    /// Input fields outside the enrichment contract, preserved verbatim.
    #[serde(flatten, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let input = r#"{"name":"Clinic A","mapLink":"https://example.com/?query=10.0,106.0","phone":"0123"}"#;
        let facility: Facility = serde_json::from_str(input).unwrap();
        assert_eq!(facility.name, "Clinic A");
        assert_eq!(facility.extra.get("phone").and_then(|v| v.as_str()), Some("0123"));

        let out = serde_json::to_string(&facility).unwrap();
        assert!(out.contains("\"phone\":\"0123\""));
        assert!(out.contains("\"mapLink\""));
    }

    #[test]
    fn test_computed_fields_absent_until_set() {
        let facility: Facility = serde_json::from_str(r#"{"name":"Clinic B"}"#).unwrap();
        assert!(facility.old_district.is_none());
        assert!(facility.aliases.is_empty());

        let out = serde_json::to_string(&facility).unwrap();
        assert!(!out.contains("oldDistrict"));
        assert!(!out.contains("aliases"));
    }
}
