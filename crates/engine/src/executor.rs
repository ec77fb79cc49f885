//! Action executor: clear, resolve, render hazards, move, visualize.
//!
//! Ordering within one command is fixed: environment overlays first, then
//! the unit movement (when any), then the visualization router.

use std::f64::consts::TAU;
use std::sync::Arc;

use rand::Rng;

use ops_core::{resolve_target, Directive, GeoPoint};

use crate::animator;
use crate::events::{Event, MapEvent};
use crate::log::Severity;
use crate::oracle::{gazetteer, icons, COMMAND_CENTER};
use crate::surface::{CircleStyle, PolygonStyle};
use crate::worker::DispatchWorker;

/// Meters per degree of latitude, for debris polygon sizing.
const METERS_PER_DEGREE: f64 = 111_320.0;

impl DispatchWorker {
    /// Consume one directive: the only entry point for rendering.
    pub(crate) fn execute(&mut self, directive: Directive) {
        self.note(
            Severity::Success,
            format!(
                "Executing: {} (based on \"{}\")",
                directive.intent, directive.english_text
            ),
        );

        self.clear_layers();

        let target = resolve_target(&directive.parameters, gazetteer::TABLE);

        if let Some(environment) = directive.visualization.environment.clone() {
            self.render_environment(&environment, target);
        }

        if directive.visualization.no_unit {
            self.render(&directive.visualization, target, &directive.parameters);
        } else {
            let icon = icons::unit_or_default(directive.visualization.icon.as_deref());
            self.event_bus.publish(Event::Map(MapEvent::MovementStarted {
                icon: icon.id.to_owned(),
                from: COMMAND_CENTER,
                to: target,
            }));
            animator::spawn_movement(
                Arc::clone(&self.surface),
                icon,
                COMMAND_CENTER,
                target,
                self.config.movement_duration,
                self.command_tx.clone(),
                directive,
            );
        }
    }

    /// Additive hazard overlays from the free-text environment field.
    ///
    /// Each keyword family renders independently; a description matching
    /// several families renders all of them.
    fn render_environment(&mut self, environment: &str, target: GeoPoint) {
        if ["rubble", "derailment", "earthquake"]
            .iter()
            .any(|k| environment.contains(k))
        {
            let ring = debris_ring(target, 200.0);
            let id = self.surface.add_polygon(
                ring,
                PolygonStyle {
                    color: "#666".to_owned(),
                    weight: 1.0,
                    fill_color: "#555".to_owned(),
                    fill_opacity: 0.6,
                },
            );
            self.track(id);
        }

        if environment.contains("water") || environment.contains("flood") {
            let id = self.surface.add_circle(
                target,
                CircleStyle::new(1000.0, "#0077be").filled("#0077be", 0.3),
            );
            self.track(id);
        }

        if environment.contains("fire") {
            let radius = if environment.contains("forest") {
                1500.0
            } else {
                500.0
            };
            let id = self.surface.add_circle(
                target,
                CircleStyle::new(radius, "#a52a2a").filled("#8b0000", 0.4),
            );
            self.track(id);
        }
    }
}

/// Irregular closed ring approximating a debris field.
fn debris_ring(center: GeoPoint, radius_m: f64) -> Vec<GeoPoint> {
    const POINTS: usize = 15;
    let mut rng = rand::thread_rng();

    let mut ring: Vec<GeoPoint> = (0..POINTS)
        .map(|i| {
            let angle = (i as f64 / POINTS as f64) * TAU;
            let distance = (radius_m / METERS_PER_DEGREE) * rng.gen_range(0.7..1.0);
            center.offset(angle.sin() * distance, angle.cos() * distance)
        })
        .collect();
    // Close the ring.
    ring.push(ring[0]);
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debris_ring_is_closed_and_bounded() {
        let center = GeoPoint::new(13.05, 80.28);
        let ring = debris_ring(center, 200.0);

        assert_eq!(ring.len(), 16);
        assert_eq!(ring.first(), ring.last());

        let max_degrees = 200.0 / METERS_PER_DEGREE;
        for vertex in &ring {
            assert!((vertex.lat - center.lat).abs() <= max_degrees + 1e-12);
            assert!((vertex.lon - center.lon).abs() <= max_degrees + 1e-12);
        }
    }
}
