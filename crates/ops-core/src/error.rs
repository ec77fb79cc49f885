//! Domain errors.
//!
//! Nothing in this core is fatal: every variant degrades to a logged
//! message and a safe fallback at the orchestration layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpsError {
    /// Visualization kind outside the fixed enumeration.
    #[error("unknown visualization type: {kind}")]
    UnknownVisualization { kind: String },

    /// Point-effect name absent from the effect registry.
    #[error("unknown point effect: {name}")]
    UnknownEffect { name: String },
}
