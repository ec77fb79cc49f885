//! Coordinate and radius resolution.
//!
//! Resolution is deterministic and never fails: unparsable coordinate
//! strings fall through to the gazetteer, unknown locations fall back to
//! the default target. The gazetteer itself is configuration owned by the
//! engine; this module only defines the matching rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::geo::GeoPoint;
use crate::params::Parameters;

/// Fallback target when nothing in the parameters resolves (central Chennai).
pub const DEFAULT_TARGET: GeoPoint = GeoPoint::new(13.0827, 80.2707);

/// Default containment radius in meters.
pub const DEFAULT_RADIUS_M: f64 = 500.0;

/// One signed-degree component: a magnitude followed by a hemisphere
/// letter, with arbitrary non-numeric separators in between.
static DEGREE_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)[^0-9NSEW]*([NSEW])").expect("degree pattern is valid")
});

/// Parse a signed-degree coordinate string such as `"13.05N 80.28E"`.
///
/// The latitude (N/S) and longitude (E/W) components may appear in either
/// order; S and W negate the magnitude. Returns `None` unless exactly one
/// of each axis is found first.
pub fn parse_coordinates(text: &str) -> Option<GeoPoint> {
    let mut lat = None;
    let mut lon = None;

    for caps in DEGREE_COMPONENT.captures_iter(text) {
        let magnitude: f64 = caps[1].parse().ok()?;
        match &caps[2] {
            "N" => lat.get_or_insert(magnitude),
            "S" => lat.get_or_insert(-magnitude),
            "E" => lon.get_or_insert(magnitude),
            "W" => lon.get_or_insert(-magnitude),
            _ => unreachable!("pattern only captures NSEW"),
        };
    }

    Some(GeoPoint::new(lat?, lon?))
}

/// Parse a radius parameter such as `"500m"` or `"2km"`.
///
/// A kilometer unit scales the magnitude by 1000; anything unparsable
/// falls back to [`DEFAULT_RADIUS_M`].
pub fn parse_radius(text: &str) -> f64 {
    let trimmed = text.trim();
    let numeric: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let Ok(value) = numeric.parse::<f64>() else {
        return DEFAULT_RADIUS_M;
    };

    if trimmed.to_lowercase().contains("km") {
        value * 1000.0
    } else {
        value
    }
}

/// Resolve a directive's location parameters to a map target.
///
/// Resolution order, first match wins:
/// 1. `coordinates` as a signed-degree string;
/// 2. `location` matched case-insensitively against the first token of
///    each gazetteer key, in table order;
/// 3. [`DEFAULT_TARGET`].
pub fn resolve_target(params: &Parameters, gazetteer: &[(&str, GeoPoint)]) -> GeoPoint {
    if let Some(text) = params.get_str("coordinates")
        && let Some(point) = parse_coordinates(text)
    {
        return point;
    }

    if let Some(location) = params.get_str("location") {
        let location = location.to_lowercase();
        for (name, point) in gazetteer {
            let first_token = name.split_whitespace().next().unwrap_or(*name);
            if location.contains(first_token) {
                return *point;
            }
        }
    }

    DEFAULT_TARGET
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAZETTEER: &[(&str, GeoPoint)] = &[
        ("marina beach", GeoPoint::new(13.05, 80.28)),
        ("cuddalore", GeoPoint::new(11.75, 79.77)),
        ("central railway station", GeoPoint::new(13.082, 80.275)),
    ];

    #[test]
    fn parses_northern_eastern_hemispheres() {
        let point = parse_coordinates("13.05N 80.28E").expect("should parse");
        assert_eq!(point, GeoPoint::new(13.05, 80.28));
    }

    #[test]
    fn southern_and_western_magnitudes_negate() {
        let point = parse_coordinates("9.28S 79.20W").expect("should parse");
        assert_eq!(point, GeoPoint::new(-9.28, -79.20));
    }

    #[test]
    fn accepts_degree_symbols_and_either_axis_order() {
        let point = parse_coordinates("80.2707°E, 13.0827°N").expect("should parse");
        assert_eq!(point, GeoPoint::new(13.0827, 80.2707));
    }

    #[test]
    fn rejects_strings_missing_an_axis() {
        assert_eq!(parse_coordinates("13.05N only"), None);
        assert_eq!(parse_coordinates("between markers 120 and 125"), None);
        assert_eq!(parse_coordinates(""), None);
    }

    #[test]
    fn radius_units() {
        assert_eq!(parse_radius("500m"), 500.0);
        assert_eq!(parse_radius("2km"), 2000.0);
        assert_eq!(parse_radius("1.5KM"), 1500.0);
        assert_eq!(parse_radius("garbage"), DEFAULT_RADIUS_M);
    }

    #[test]
    fn explicit_coordinates_win_over_location() {
        let params = Parameters::from([
            ("coordinates", "9.28S 79.20W".into()),
            ("location", "Cuddalore".into()),
        ]);
        assert_eq!(
            resolve_target(&params, GAZETTEER),
            GeoPoint::new(-9.28, -79.20)
        );
    }

    #[test]
    fn unparsable_coordinates_fall_through_to_gazetteer() {
        let params = Parameters::from([
            ("coordinates", "near the bridge".into()),
            ("location", "Marina Beach area".into()),
        ]);
        assert_eq!(resolve_target(&params, GAZETTEER), GeoPoint::new(13.05, 80.28));
    }

    #[test]
    fn location_matches_first_token_of_multiword_keys() {
        let params = Parameters::from([("location", "the central station district".into())]);
        assert_eq!(
            resolve_target(&params, GAZETTEER),
            GeoPoint::new(13.082, 80.275)
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let params = Parameters::from([("location", "marina beach area".into())]);
        let first = resolve_target(&params, GAZETTEER);
        for _ in 0..10 {
            assert_eq!(resolve_target(&params, GAZETTEER), first);
        }
    }

    #[test]
    fn everything_absent_resolves_to_default() {
        assert_eq!(resolve_target(&Parameters::new(), GAZETTEER), DEFAULT_TARGET);
    }
}
