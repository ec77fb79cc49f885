//! Event types for the map topic.

use ops_core::GeoPoint;
use serde::{Deserialize, Serialize};

/// Events describing map-surface activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MapEvent {
    /// The previous command's layers were removed.
    LayersCleared { count: usize },

    /// A unit-movement animation started.
    MovementStarted {
        icon: String,
        from: GeoPoint,
        to: GeoPoint,
    },

    /// A unit-movement animation finished and its unit marker was removed.
    MovementCompleted { to: GeoPoint },
}
