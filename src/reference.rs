//! Loaders for the three reference tables.
//!
//! All loaders share the same tolerant posture: rows with non-numeric
//! centroids or malformed CSV are dropped with a count, never a failure.
//! Duplicate keys keep the first occurrence in file order.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use geo::Point;
use hashbrown::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::geometry::parse_bounds;
use crate::models::{DistrictKey, LegacyDistrict, NewWard, ProvinceConversion};

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Column '{}' not found", name))
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

fn parse_f64(record: &StringRecord, idx: usize) -> Option<f64> {
    record.get(idx)?.trim().parse().ok()
}

/// Load the legacy district table from a CSV file.
pub fn load_districts(path: &Path) -> Result<Vec<LegacyDistrict>> {
    info!("Loading legacy districts from {}", path.display());
    let file = File::open(path).context("Failed to open district file")?;
    read_districts(file)
}

pub fn read_districts<R: Read>(reader: R) -> Result<Vec<LegacyDistrict>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let province_code = column(&headers, "provinceCode")?;
    let province = column(&headers, "province")?;
    let province_short = column(&headers, "provinceShort")?;
    let district_code = column(&headers, "districtCode")?;
    let district = column(&headers, "district")?;
    let district_short = column(&headers, "districtShort")?;
    let district_type = column(&headers, "districtType")?;
    let lat_idx = column(&headers, "districtLat")?;
    let lon_idx = column(&headers, "districtLon")?;
    let bounds = column(&headers, "districtBounds")?;

    let mut out = Vec::new();
    let mut dropped = 0usize;

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };
        let (Some(lat), Some(lon)) = (parse_f64(&record, lat_idx), parse_f64(&record, lon_idx))
        else {
            dropped += 1;
            continue;
        };

        out.push(LegacyDistrict {
            key: DistrictKey::new(field(&record, province_code), field(&record, district_code)),
            province: field(&record, province),
            province_short: field(&record, province_short),
            district: field(&record, district),
            district_short: field(&record, district_short),
            district_type: field(&record, district_type),
            centroid: Point::new(lon, lat),
            // Malformed bounds strings are treated as an absent box.
            bbox: record.get(bounds).and_then(parse_bounds),
        });
    }

    if dropped > 0 {
        warn!("Dropped {} malformed district rows", dropped);
    }
    info!("Loaded {} legacy districts", out.len());
    Ok(out)
}

/// Load the province conversion table from a CSV file.
pub fn load_conversions(path: &Path) -> Result<Vec<ProvinceConversion>> {
    info!("Loading province conversions from {}", path.display());
    let file = File::open(path).context("Failed to open conversion file")?;
    read_conversions(file)
}

pub fn read_conversions<R: Read>(reader: R) -> Result<Vec<ProvinceConversion>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let province_code = column(&headers, "provinceCode")?;
    let district_code = column(&headers, "districtCode")?;
    let province_short = column(&headers, "provinceShort")?;
    let new_province = column(&headers, "newProvince")?;
    let new_province_short = column(&headers, "newProvinceShort")?;
    let is_merged = column(&headers, "isMergedProvince")?;

    let mut out = Vec::new();
    let mut dropped = 0usize;

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };

        out.push(ProvinceConversion {
            key: DistrictKey::new(field(&record, province_code), field(&record, district_code)),
            province_short: field(&record, province_short),
            new_province: field(&record, new_province),
            new_province_short: field(&record, new_province_short),
            province_changed: field(&record, is_merged).eq_ignore_ascii_case("true"),
        });
    }

    if dropped > 0 {
        warn!("Dropped {} malformed conversion rows", dropped);
    }
    info!("Loaded {} province conversions", out.len());
    Ok(out)
}

/// Load the reorganized ward table from a CSV file.
pub fn load_wards(path: &Path) -> Result<Vec<NewWard>> {
    info!("Loading reorganized wards from {}", path.display());
    let file = File::open(path).context("Failed to open ward file")?;
    read_wards(file)
}

pub fn read_wards<R: Read>(reader: R) -> Result<Vec<NewWard>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let province_code = column(&headers, "provinceCode")?;
    let province = column(&headers, "province")?;
    let province_short = column(&headers, "provinceShort")?;
    let ward_code = column(&headers, "wardCode")?;
    let ward = column(&headers, "ward")?;
    let ward_short = column(&headers, "wardShort")?;
    let ward_type = column(&headers, "wardType")?;
    let lat_idx = column(&headers, "wardLat")?;
    let lon_idx = column(&headers, "wardLon")?;
    let area = column(&headers, "wardAreaKm2")?;

    let mut out = Vec::new();
    let mut dropped = 0usize;

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };
        let (Some(lat), Some(lon)) = (parse_f64(&record, lat_idx), parse_f64(&record, lon_idx))
        else {
            dropped += 1;
            continue;
        };

        out.push(NewWard {
            province_code: field(&record, province_code),
            province: field(&record, province),
            province_short: field(&record, province_short),
            ward_code: field(&record, ward_code),
            ward: field(&record, ward),
            ward_short: field(&record, ward_short),
            ward_type: field(&record, ward_type),
            centroid: Point::new(lon, lat),
            area_km2: parse_f64(&record, area).unwrap_or(0.0),
        });
    }

    if dropped > 0 {
        warn!("Dropped {} malformed ward rows", dropped);
    }
    info!("Loaded {} reorganized wards", out.len());
    Ok(out)
}

/// Immutable reference collections shared read-only across all facility
/// resolutions.
#[derive(Debug)]
pub struct ReferenceTables {
    pub districts: Vec<LegacyDistrict>,
    pub conversions: HashMap<DistrictKey, ProvinceConversion>,
    pub wards: Vec<NewWard>,
    wards_by_province: HashMap<String, Vec<usize>>,
}

impl ReferenceTables {
    /// Build the keyed collections from ordered loads. Duplicate district
    /// and conversion keys keep the first occurrence.
    pub fn new(
        districts: Vec<LegacyDistrict>,
        conversions: Vec<ProvinceConversion>,
        wards: Vec<NewWard>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut unique_districts = Vec::with_capacity(districts.len());
        for district in districts {
            if seen.insert(district.key.clone()) {
                unique_districts.push(district);
            }
        }

        let mut conversion_map = HashMap::new();
        for conversion in conversions {
            conversion_map
                .entry(conversion.key.clone())
                .or_insert(conversion);
        }

        let mut wards_by_province: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, ward) in wards.iter().enumerate() {
            wards_by_province
                .entry(ward.province_short.clone())
                .or_default()
                .push(i);
        }

        Self {
            districts: unique_districts,
            conversions: conversion_map,
            wards,
            wards_by_province,
        }
    }

    /// Load all three tables from CSV files.
    pub fn load(districts: &Path, conversions: &Path, wards: &Path) -> Result<Self> {
        Ok(Self::new(
            load_districts(districts)?,
            load_conversions(conversions)?,
            load_wards(wards)?,
        ))
    }

    /// Ward indices for a province short name; empty when unknown.
    pub fn ward_bucket(&self, province_short: &str) -> &[usize] {
        self.wards_by_province
            .get(province_short)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
