//! Single-pass enrichment driver over the facility collection.

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::geometry::parse_map_link;
use crate::models::Facility;
use crate::normalize::normalize_facility;
use crate::reference::ReferenceTables;
use crate::resolve::Resolver;

/// Match statistics for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    /// Facilities resolved to a legacy district.
    pub matched_old: usize,
    /// Facilities resolved to a reorganized ward.
    pub matched_new: usize,
    /// Facilities without a resolvable coordinate.
    pub unmatched: usize,
}

impl EnrichStats {
    fn merge(self, other: Self) -> Self {
        Self {
            matched_old: self.matched_old + other.matched_old,
            matched_new: self.matched_new + other.matched_new,
            unmatched: self.unmatched + other.unmatched,
        }
    }
}

/// Enrich every facility in place and report match counts.
///
/// Each facility's resolution is independent and mutates only its own
/// record, so the pass runs in parallel across facilities. Data-quality
/// problems never abort the run; low match counts are the only signal.
pub fn enrich_facilities(facilities: &mut [Facility], resolver: &Resolver) -> EnrichStats {
    let pb = ProgressBar::new(facilities.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style.progress_chars("#>-"));

    let stats = facilities
        .par_iter_mut()
        .progress_with(pb)
        .map(|facility| enrich_one(facility, resolver))
        .reduce(EnrichStats::default, EnrichStats::merge);

    info!(
        "Enrichment complete: {} matched to a legacy district, {} to a reorganized ward, {} without coordinates",
        stats.matched_old, stats.matched_new, stats.unmatched
    );
    stats
}

fn enrich_one(facility: &mut Facility, resolver: &Resolver) -> EnrichStats {
    let mut stats = EnrichStats::default();

    match facility.map_link.as_deref().and_then(parse_map_link) {
        Some(point) => {
            let old = resolver.locate_old_unit(point);
            let candidate = old.map(|district| resolver.remap_province(district));
            let new = resolver.locate_new_unit(point, candidate);

            if let Some(district) = old {
                facility.old_district = Some(district.district_short.clone());
                facility.old_province = Some(district.province_short.clone());
                stats.matched_old = 1;
            }
            if let Some(ward) = new {
                facility.new_ward = Some(ward.ward_short.clone());
                facility.new_province = Some(ward.province_short.clone());
                stats.matched_new = 1;
            }
            facility.aliases = resolver.build_aliases(old, new);
        }
        None => stats.unmatched = 1,
    }

    // Search keys are derived for every record, matched or not.
    normalize_facility(facility);
    stats
}

/// One row of the district-index artifact: old/new province linkage for a
/// legacy district key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictLink {
    pub district: String,
    pub district_short: String,
    pub province: String,
    pub province_short: String,
    pub new_province: String,
    pub new_province_short: String,
    pub province_changed: bool,
}

/// Keyed projection of the loaded reference state, one entry per legacy
/// district key. External reference and debugging output only; enrichment
/// correctness does not depend on it.
pub fn build_district_index(tables: &ReferenceTables) -> BTreeMap<String, DistrictLink> {
    tables
        .districts
        .iter()
        .map(|d| {
            let conversion = tables.conversions.get(&d.key);
            let link = DistrictLink {
                district: d.district.clone(),
                district_short: d.district_short.clone(),
                province: d.province.clone(),
                province_short: d.province_short.clone(),
                new_province: conversion
                    .map(|c| c.new_province.clone())
                    .unwrap_or_else(|| d.province.clone()),
                new_province_short: conversion
                    .map(|c| c.new_province_short.clone())
                    .unwrap_or_else(|| d.province_short.clone()),
                province_changed: conversion.map(|c| c.province_changed).unwrap_or(false),
            };
            (d.key.to_string(), link)
        })
        .collect()
}
