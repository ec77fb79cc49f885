//! Structured directives produced by the remote interpreter.
//!
//! Field names and aliases follow the interpreter's JSON wire form. The
//! model is deliberately lenient: unknown visualization kinds are carried
//! through as [`VizKind::Unknown`] so the router can report them instead
//! of deserialization failing the whole command.

use serde::{Deserialize, Serialize};

use crate::params::Parameters;

/// Visualization strategy selector.
///
/// Closed enumeration of the rendering strategies the router understands,
/// plus a passthrough variant preserving unrecognized wire values.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum VizKind {
    Sweep,
    DeploySupply,
    Containment,
    PathClearance,
    PathRepair,
    DeployStatic,
    PointEffect,
    DataFlow,
    EvacuationRoute,
    /// Wire value not in the fixed set; reported, never a crash.
    #[strum(default)]
    Unknown(String),
}

impl From<String> for VizKind {
    fn from(s: String) -> Self {
        // EnumString with a default variant cannot fail.
        s.parse().unwrap_or(VizKind::Unknown(s))
    }
}

impl From<VizKind> for String {
    fn from(kind: VizKind) -> Self {
        kind.to_string()
    }
}

/// Rendering instructions embedded in a directive.
///
/// Auxiliary fields are strategy-specific and optional; absent fields fall
/// back to per-strategy defaults in the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationProfile {
    #[serde(rename = "type")]
    pub kind: VizKind,
    /// Skip the unit-movement animation and render immediately.
    #[serde(default)]
    pub no_unit: bool,
    /// Unit icon for the movement animation; unknown ids use the default.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub hazard_icon: Option<String>,
    #[serde(default)]
    pub path_type: Option<String>,
    #[serde(default)]
    pub deploy_icon: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub effect: Option<String>,
    /// Free-text environment description driving hazard overlays.
    #[serde(default)]
    pub environment: Option<String>,
}

impl VisualizationProfile {
    pub fn new(kind: VizKind) -> Self {
        Self {
            kind,
            no_unit: false,
            icon: None,
            color: None,
            hazard_icon: None,
            path_type: None,
            deploy_icon: None,
            count: None,
            effect: None,
            environment: None,
        }
    }

    /// Profile color, or the console's default accent.
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or("#00ddff")
    }
}

/// One interpreted operator command.
///
/// Created per interpreter response, consumed exactly once by the
/// executor, never persisted or replayed. The wire form carries both
/// `safety_critical` (operator display) and `confirmation_required` (the
/// gate input); the two usually agree but are independent fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub intent: String,
    /// Human-readable restatement of the parsed command.
    #[serde(rename = "english", default)]
    pub english_text: String,
    #[serde(default)]
    pub safety_critical: bool,
    #[serde(default)]
    pub confirmation_required: bool,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(rename = "visualization")]
    pub visualization: VisualizationProfile,
}

impl Directive {
    /// Whether the confirmation gate must hold this directive.
    pub fn requires_confirmation(&self) -> bool {
        self.confirmation_required
    }
}
