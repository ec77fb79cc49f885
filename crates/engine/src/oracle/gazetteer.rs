//! Name-to-coordinate gazetteer.
//!
//! Table order matters: the resolver takes the first entry whose leading
//! token appears in the directive's location text.

use ops_core::GeoPoint;

pub const TABLE: &[(&str, GeoPoint)] = &[
    ("gandhi nagar", GeoPoint::new(13.007, 80.249)),
    ("cuddalore", GeoPoint::new(11.75, 79.77)),
    ("velachery", GeoPoint::new(12.978, 80.221)),
    ("marina beach", GeoPoint::new(13.05, 80.28)),
    ("ennore", GeoPoint::new(13.21, 80.32)),
    ("central railway station", GeoPoint::new(13.082, 80.275)),
    ("nagapattinam", GeoPoint::new(10.76, 79.84)),
    ("mettur dam", GeoPoint::new(11.79, 77.80)),
    ("kalpakkam", GeoPoint::new(12.56, 80.17)),
    ("nilgiris", GeoPoint::new(11.41, 76.73)),
    ("t.nagar", GeoPoint::new(13.03, 80.23)),
    ("tambaram", GeoPoint::new(12.92, 80.11)),
    ("mylapore", GeoPoint::new(13.03, 80.27)),
    ("pamban bridge", GeoPoint::new(9.28, 79.20)),
    ("sathyamangalam", GeoPoint::new(11.50, 77.24)),
    ("kudankulam", GeoPoint::new(8.16, 77.71)),
    ("neyveli", GeoPoint::new(11.60, 79.48)),
    ("rameswaram", GeoPoint::new(9.28, 79.31)),
    ("sriperumbudur", GeoPoint::new(12.96, 79.94)),
    ("ranipet", GeoPoint::new(12.93, 79.33)),
    ("manali", GeoPoint::new(13.15, 80.27)),
    ("ambattur", GeoPoint::new(13.11, 80.16)),
    ("hosur", GeoPoint::new(12.74, 77.82)),
    ("ooty", GeoPoint::new(11.41, 76.70)),
    ("vellore", GeoPoint::new(12.91, 79.13)),
    ("karaikal", GeoPoint::new(10.92, 79.83)),
    ("trichy", GeoPoint::new(10.79, 78.70)),
    ("tarapur", GeoPoint::new(19.82, 72.65)),
    ("ramanathapuram", GeoPoint::new(9.36, 78.83)),
    ("villupuram", GeoPoint::new(11.94, 79.49)),
    ("madurai", GeoPoint::new(9.92, 78.12)),
    ("thanjavur", GeoPoint::new(10.78, 79.13)),
    ("avadi", GeoPoint::new(13.11, 80.10)),
    ("pattukkottai", GeoPoint::new(10.42, 79.31)),
    ("coimbatore", GeoPoint::new(11.01, 76.95)),
    ("korukkupet", GeoPoint::new(13.12, 80.28)),
    ("poonamallee", GeoPoint::new(13.05, 80.09)),
    ("arakkonam", GeoPoint::new(13.08, 79.67)),
    ("adyar", GeoPoint::new(13.00, 80.25)),
    ("saidapet", GeoPoint::new(13.02, 80.22)),
    ("kilpauk medical college", GeoPoint::new(13.08, 80.24)),
    ("mudumalai", GeoPoint::new(11.58, 76.62)),
    ("chennai port", GeoPoint::new(13.09, 80.29)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use ops_core::resolve_target;
    use ops_core::Parameters;

    #[test]
    fn marina_beach_area_resolves_via_gazetteer() {
        let params = Parameters::from([("location", "Marina Beach area".into())]);
        assert_eq!(resolve_target(&params, TABLE), GeoPoint::new(13.05, 80.28));
    }
}
