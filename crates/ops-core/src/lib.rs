//! Domain model for the Aura command console.
//!
//! This crate holds the pure, I/O-free core of the console: the directive
//! wire model received from the interpreter, the open parameter mapping,
//! geographic primitives, and the deterministic coordinate/radius
//! resolution logic. The `engine` crate layers orchestration, timers, and
//! map-surface side effects on top of these types.
//!
//! Modules are organized by responsibility:
//! - [`directive`] — the interpreter's structured output
//! - [`params`] — permissive string/number parameter access
//! - [`geo`] — latitude/longitude points and interpolation
//! - [`resolve`] — coordinate resolution and radius parsing

pub mod directive;
pub mod error;
pub mod geo;
pub mod params;
pub mod resolve;

pub use directive::{Directive, VisualizationProfile, VizKind};
pub use error::OpsError;
pub use geo::GeoPoint;
pub use params::{ParamValue, Parameters};
pub use resolve::{parse_coordinates, parse_radius, resolve_target, DEFAULT_RADIUS_M};
