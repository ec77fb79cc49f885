//! Terminal map surface.
//!
//! Stands in for the map widget: every mutation is narrated to the
//! tracing log under the `console::map` target, keyed by layer id so an
//! operator tailing the log can follow the scene.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use engine::{CircleStyle, LayerId, LineStyle, MapSurface, MarkerAppearance, MarkerStyle, PolygonStyle};
use ops_core::GeoPoint;

pub struct TermSurface {
    next_id: AtomicU64,
    live: Mutex<HashSet<LayerId>>,
}

impl TermSurface {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            live: Mutex::new(HashSet::new()),
        }
    }

    fn place(&self, description: String) -> LayerId {
        let id = LayerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().insert(id);
        info!(target: "console::map", "[layer {}] {description}", id.0);
        id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<LayerId>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for TermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for TermSurface {
    fn add_marker(&self, at: GeoPoint, style: MarkerStyle) -> LayerId {
        let what = match &style.appearance {
            MarkerAppearance::Icon(icon) => format!("marker '{}'", icon.id),
            MarkerAppearance::Sweep { color } => format!("sweep pulse ({color})"),
        };
        let label = style
            .label
            .map(|l| format!(" \"{l}\""))
            .unwrap_or_default();
        self.place(format!("{what}{label} at {:.4}, {:.4}", at.lat, at.lon))
    }

    fn move_marker(&self, id: LayerId, to: GeoPoint) {
        // Movement steps are too chatty for info; leave them to debug.
        if self.lock().contains(&id) {
            tracing::debug!(target: "console::map", "[layer {}] -> {:.4}, {:.4}", id.0, to.lat, to.lon);
        }
    }

    fn set_marker_effect(&self, id: LayerId, effect: Option<String>) {
        if self.lock().contains(&id) {
            match effect {
                Some(effect) => {
                    info!(target: "console::map", "[layer {}] effect '{effect}'", id.0);
                }
                None => info!(target: "console::map", "[layer {}] effect cleared", id.0),
            }
        }
    }

    fn add_circle(&self, center: GeoPoint, style: CircleStyle) -> LayerId {
        self.place(format!(
            "circle r={}m ({}) at {:.4}, {:.4}",
            style.radius_m, style.color, center.lat, center.lon
        ))
    }

    fn add_polyline(&self, points: Vec<GeoPoint>, style: LineStyle) -> LayerId {
        self.place(format!(
            "polyline x{} ({}{})",
            points.len(),
            style.color,
            if style.dashed { ", dashed" } else { "" }
        ))
    }

    fn extend_polyline(&self, id: LayerId, to: GeoPoint) {
        if self.lock().contains(&id) {
            tracing::debug!(target: "console::map", "[layer {}] extend -> {:.4}, {:.4}", id.0, to.lat, to.lon);
        }
    }

    fn add_polygon(&self, ring: Vec<GeoPoint>, style: PolygonStyle) -> LayerId {
        self.place(format!(
            "polygon x{} ({})",
            ring.len(),
            style.fill_color
        ))
    }

    fn remove(&self, id: LayerId) {
        if self.lock().remove(&id) {
            info!(target: "console::map", "[layer {}] removed", id.0);
        }
    }
}
