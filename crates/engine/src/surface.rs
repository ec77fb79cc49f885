//! Abstract map rendering surface.
//!
//! The real map widget lives outside this system; the engine only needs a
//! handle-based mutation API: place a primitive, get back a [`LayerId`],
//! remove it later. [`RecordingSurface`] is the in-memory implementation
//! used by tests and available to any frontend that wants a layer census.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use ops_core::GeoPoint;

use crate::oracle::icons::IconDescriptor;

/// Opaque handle to a placed map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// Marker body: an icon from the asset table, or a CSS-animated pulse.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerAppearance {
    Icon(IconDescriptor),
    /// Pulsing radial-gradient sweep in the given color.
    Sweep { color: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub appearance: MarkerAppearance,
    pub label: Option<String>,
    /// Animation class applied by the widget (e.g. `power-node-off`).
    pub effect: Option<String>,
    pub z_offset: i32,
}

impl MarkerStyle {
    pub fn icon(icon: IconDescriptor) -> Self {
        Self {
            appearance: MarkerAppearance::Icon(icon),
            label: None,
            effect: None,
            z_offset: 0,
        }
    }

    pub fn sweep(color: impl Into<String>) -> Self {
        Self {
            appearance: MarkerAppearance::Sweep {
                color: color.into(),
            },
            label: None,
            effect: None,
            z_offset: 0,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub radius_m: f64,
    pub color: String,
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
    pub weight: f64,
    pub dashed: bool,
    pub effect: Option<String>,
    pub label: Option<String>,
}

impl CircleStyle {
    pub fn new(radius_m: f64, color: impl Into<String>) -> Self {
        Self {
            radius_m,
            color: color.into(),
            fill_color: None,
            fill_opacity: 0.0,
            weight: 1.0,
            dashed: false,
            effect: None,
            label: None,
        }
    }

    pub fn filled(mut self, color: impl Into<String>, opacity: f64) -> Self {
        self.fill_color = Some(color.into());
        self.fill_opacity = opacity;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub dashed: bool,
    pub effect: Option<String>,
}

impl LineStyle {
    pub fn new(color: impl Into<String>, weight: f64) -> Self {
        Self {
            color: color.into(),
            weight,
            dashed: false,
            effect: None,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Map mutation primitives consumed by the executor, router, and effects.
///
/// Implementations must be cheap and non-blocking; every operation is
/// called from the dispatch worker or a timer task. Operations on an
/// already-removed handle are silent no-ops, so fire-and-forget cleanup
/// timers stay harmless after a layer clear.
pub trait MapSurface: Send + Sync {
    fn add_marker(&self, at: GeoPoint, style: MarkerStyle) -> LayerId;
    fn move_marker(&self, id: LayerId, to: GeoPoint);
    /// Swap the marker's animation class (flicker effects).
    fn set_marker_effect(&self, id: LayerId, effect: Option<String>);
    fn add_circle(&self, center: GeoPoint, style: CircleStyle) -> LayerId;
    fn add_polyline(&self, points: Vec<GeoPoint>, style: LineStyle) -> LayerId;
    fn extend_polyline(&self, id: LayerId, point: GeoPoint);
    fn add_polygon(&self, ring: Vec<GeoPoint>, style: PolygonStyle) -> LayerId;
    fn remove(&self, id: LayerId);
}

// ============================================================================
// Recording implementation
// ============================================================================

/// Layer snapshot kept by [`RecordingSurface`].
#[derive(Debug, Clone)]
pub enum RecordedLayer {
    Marker {
        at: GeoPoint,
        style: MarkerStyle,
        moves: usize,
    },
    Circle {
        center: GeoPoint,
        style: CircleStyle,
    },
    Polyline {
        points: Vec<GeoPoint>,
        style: LineStyle,
    },
    Polygon {
        ring: Vec<GeoPoint>,
        style: PolygonStyle,
    },
}

#[derive(Default)]
struct RecordingState {
    live: HashMap<LayerId, RecordedLayer>,
    /// Layers removed since creation, in removal order.
    removed: Vec<LayerId>,
    total_moves: usize,
}

/// In-memory [`MapSurface`] with a queryable layer census.
#[derive(Default)]
pub struct RecordingSurface {
    next_id: AtomicU64,
    state: Mutex<RecordingState>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> LayerId {
        LayerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        // Mutex poisoning only happens if a panicking test held the lock.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of layers currently on the surface.
    pub fn active_count(&self) -> usize {
        self.lock().live.len()
    }

    /// Total `move_marker` calls across all markers.
    pub fn total_moves(&self) -> usize {
        self.lock().total_moves
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.lock().live.contains_key(&id)
    }

    pub fn removed_count(&self) -> usize {
        self.lock().removed.len()
    }

    /// Snapshot of live layers, in handle order.
    pub fn layers(&self) -> Vec<(LayerId, RecordedLayer)> {
        let state = self.lock();
        let mut layers: Vec<_> = state
            .live
            .iter()
            .map(|(id, layer)| (*id, layer.clone()))
            .collect();
        layers.sort_by_key(|(id, _)| *id);
        layers
    }

    /// Live circles, in handle order.
    pub fn circles(&self) -> Vec<(GeoPoint, CircleStyle)> {
        self.layers()
            .into_iter()
            .filter_map(|(_, layer)| match layer {
                RecordedLayer::Circle { center, style } => Some((center, style)),
                _ => None,
            })
            .collect()
    }

    /// Live markers, in handle order.
    pub fn markers(&self) -> Vec<(GeoPoint, MarkerStyle)> {
        self.layers()
            .into_iter()
            .filter_map(|(_, layer)| match layer {
                RecordedLayer::Marker { at, style, .. } => Some((at, style)),
                _ => None,
            })
            .collect()
    }
}

impl MapSurface for RecordingSurface {
    fn add_marker(&self, at: GeoPoint, style: MarkerStyle) -> LayerId {
        let id = self.next();
        self.lock().live.insert(
            id,
            RecordedLayer::Marker {
                at,
                style,
                moves: 0,
            },
        );
        id
    }

    fn move_marker(&self, id: LayerId, to: GeoPoint) {
        let mut state = self.lock();
        let mut moved = false;
        if let Some(RecordedLayer::Marker { at, moves, .. }) = state.live.get_mut(&id) {
            *at = to;
            *moves += 1;
            moved = true;
        }
        if moved {
            state.total_moves += 1;
        }
    }

    fn set_marker_effect(&self, id: LayerId, effect: Option<String>) {
        if let Some(RecordedLayer::Marker { style, .. }) = self.lock().live.get_mut(&id) {
            style.effect = effect;
        }
    }

    fn add_circle(&self, center: GeoPoint, style: CircleStyle) -> LayerId {
        let id = self.next();
        self.lock()
            .live
            .insert(id, RecordedLayer::Circle { center, style });
        id
    }

    fn add_polyline(&self, points: Vec<GeoPoint>, style: LineStyle) -> LayerId {
        let id = self.next();
        self.lock()
            .live
            .insert(id, RecordedLayer::Polyline { points, style });
        id
    }

    fn extend_polyline(&self, id: LayerId, point: GeoPoint) {
        if let Some(RecordedLayer::Polyline { points, .. }) = self.lock().live.get_mut(&id) {
            points.push(point);
        }
    }

    fn add_polygon(&self, ring: Vec<GeoPoint>, style: PolygonStyle) -> LayerId {
        let id = self.next();
        self.lock()
            .live
            .insert(id, RecordedLayer::Polygon { ring, style });
        id
    }

    fn remove(&self, id: LayerId) {
        let mut state = self.lock();
        if state.live.remove(&id).is_some() {
            state.removed.push(id);
        }
    }
}
