//! Coordinate parsing and spherical distance.
//!
//! Points follow the geo convention of x = longitude, y = latitude.

use geo::{coord, Point, Rect};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let (lat1, lat2) = (a.y().to_radians(), b.y().to_radians());
    let dlat = (b.y() - a.y()).to_radians();
    let dlon = (b.x() - a.x()).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Parses a `"<lat>,<lon>"` pair, rejecting out-of-range coordinates.
pub fn parse_lat_lon(s: &str) -> Option<Point<f64>> {
    let (lat, lon) = s.trim().split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some(Point::new(lon, lat))
}

/// Extracts the coordinate embedded in a facility map link as a
/// `query=<lat>,<lon>` parameter.
pub fn parse_map_link(link: &str) -> Option<Point<f64>> {
    if let Ok(url) = Url::parse(link) {
        let (_, value) = url.query_pairs().find(|(key, _)| key == "query")?;
        return parse_lat_lon(&value);
    }

    // Links that fail URL parsing can still carry the pair verbatim.
    static QUERY_RE: OnceLock<Regex> = OnceLock::new();
    let re = QUERY_RE.get_or_init(|| {
        Regex::new(r"(?:^|[?&])query=(-?[0-9.]+(?:,|%2C)-?[0-9.]+)").expect("valid regex")
    });
    let caps = re.captures(link)?;
    parse_lat_lon(&caps[1].replace("%2C", ","))
}

/// Parses a `"lat1,lon1 – lat2,lon2"` bounds string into a rectangle.
///
/// Corners may come in either order; malformed strings yield `None`.
pub fn parse_bounds(s: &str) -> Option<Rect<f64>> {
    static BOUNDS_RE: OnceLock<Regex> = OnceLock::new();
    let re = BOUNDS_RE.get_or_init(|| {
        Regex::new(r"^\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*[–—-]\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*$")
            .expect("valid regex")
    });
    let caps = re.captures(s)?;
    let lat1: f64 = caps[1].parse().ok()?;
    let lon1: f64 = caps[2].parse().ok()?;
    let lat2: f64 = caps[3].parse().ok()?;
    let lon2: f64 = caps[4].parse().ok()?;

    // Rect::new orders the corners, so min <= max holds on both axes.
    Some(Rect::new(
        coord! { x: lon1, y: lat1 },
        coord! { x: lon2, y: lat2 },
    ))
}
