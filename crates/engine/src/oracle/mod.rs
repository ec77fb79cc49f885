//! Static configuration tables consulted read-only by the dispatch path.
//!
//! Absent keys always fall back to defaults, never error.

pub mod gazetteer;
pub mod icons;

use ops_core::GeoPoint;

/// Fixed origin all unit movements start from (command center).
pub const COMMAND_CENTER: GeoPoint = GeoPoint::new(13.064, 80.180);
