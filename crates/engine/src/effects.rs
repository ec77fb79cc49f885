//! Point-effect registry.
//!
//! Each effect is a small scripted tableau at the target: some markers,
//! a pulse circle, sometimes a timed follow-up. Follow-ups run as
//! detached timer tasks holding the surface; removal is idempotent, so a
//! timer outliving its layers does nothing.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use ops_core::{GeoPoint, OpsError, VisualizationProfile};

use crate::oracle::icons;
use crate::surface::{CircleStyle, LayerId, MapSurface, MarkerStyle};
use crate::worker::DispatchWorker;

fn remove_after(surface: &Arc<dyn MapSurface>, id: LayerId, delay: Duration) {
    let surface = Arc::clone(surface);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        surface.remove(id);
    });
}

impl DispatchWorker {
    /// Run one named point effect at the target.
    pub(crate) fn run_effect(
        &mut self,
        name: &str,
        target: GeoPoint,
        profile: &VisualizationProfile,
    ) -> Result<(), OpsError> {
        match name {
            "power_grid" => self.effect_power_grid(target),
            "monitoring" => self.effect_monitoring(target, profile),
            "broadcast" => self.effect_pulse(target, icons::siren(), "broadcast-wave"),
            "jammer" => self.effect_pulse(target, icons::jammer(), "jammer-wave"),
            "decontamination" => self.effect_pulse(target, icons::radiation(), "cleanse-wave"),
            "debris_sorting" => self.effect_debris_sorting(target),
            "facial_recognition" => self.effect_facial_recognition(target),
            "tunnel_scan" => {
                let id = self.surface.add_circle(
                    target,
                    CircleStyle::new(20.0, "#00ddff").with_effect("monitor-pulse"),
                );
                self.track(id);
            }
            "firefighting" => {
                let id = self
                    .surface
                    .add_marker(target, MarkerStyle::icon(icons::fire()));
                self.track(id);
            }
            "water_bombing" => self.effect_water_bombing(target),
            "shield" => {
                let marker = self
                    .surface
                    .add_marker(target, MarkerStyle::icon(icons::shield()));
                let field = self.surface.add_circle(
                    target,
                    CircleStyle::new(100.0, "#26e07f").with_effect("monitor-pulse"),
                );
                self.track(marker);
                self.track(field);
            }
            "demolition" => {
                let blast = self.surface.add_circle(
                    target,
                    CircleStyle::new(10.0, "#ff5555").with_effect("demolition-effect"),
                );
                self.track(blast);
                remove_after(&self.surface, blast, Duration::from_millis(1500));
            }
            other => {
                return Err(OpsError::UnknownEffect {
                    name: other.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Five substation nodes, each flickering back on after a random delay.
    fn effect_power_grid(&mut self, target: GeoPoint) {
        let mut rng = rand::thread_rng();
        for _ in 0..5 {
            let at = target.offset(jitter(&mut rng, 0.02), jitter(&mut rng, 0.02));
            let id = self.surface.add_marker(
                at,
                MarkerStyle::icon(icons::power()).with_effect("power-node-off"),
            );
            self.track(id);

            let delay = Duration::from_millis(rng.gen_range(0..2000));
            let surface = Arc::clone(&self.surface);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                surface.set_marker_effect(id, None);
            });
        }
    }

    /// Three sensor posts, each a monitor marker plus a pulse ring.
    fn effect_monitoring(&mut self, target: GeoPoint, profile: &VisualizationProfile) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            let offset = jitter(&mut rng, 0.002);
            let at = target.offset(offset, offset);
            let marker = self
                .surface
                .add_marker(at, MarkerStyle::icon(icons::monitor()));
            let ring = self.surface.add_circle(
                at,
                CircleStyle::new(50.0, profile.color_or_default()).with_effect("monitor-pulse"),
            );
            self.track(marker);
            self.track(ring);
        }
    }

    fn effect_pulse(&mut self, target: GeoPoint, icon: icons::IconDescriptor, effect: &str) {
        let marker = self.surface.add_marker(target, MarkerStyle::icon(icon));
        let wave = self
            .surface
            .add_circle(target, CircleStyle::new(10.0, "#00ddff").with_effect(effect));
        self.track(marker);
        self.track(wave);
    }

    /// Robot arm with four transient sorting pulses around it.
    fn effect_debris_sorting(&mut self, target: GeoPoint) {
        let arm = self
            .surface
            .add_marker(target, MarkerStyle::icon(icons::robot_arm()));
        self.track(arm);

        for _ in 0..4 {
            let pulse = self.surface.add_circle(
                target,
                CircleStyle::new(10.0, "#ffaa00").with_effect("sort-pulse"),
            );
            // Transient, deliberately untracked.
            remove_after(&self.surface, pulse, Duration::from_millis(2000));
        }
    }

    fn effect_facial_recognition(&mut self, target: GeoPoint) {
        let mut rng = rand::thread_rng();
        for _ in 0..4 {
            let at = target.offset(jitter(&mut rng, 0.03), jitter(&mut rng, 0.03));
            let id = self
                .surface
                .add_marker(at, MarkerStyle::icon(icons::camera()));
            self.track(id);
        }
    }

    /// Three staggered water drops, each visible for two seconds.
    fn effect_water_bombing(&mut self, target: GeoPoint) {
        for i in 0..3u64 {
            let surface = Arc::clone(&self.surface);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(i * 1000)).await;
                let drop = surface.add_circle(
                    target,
                    CircleStyle::new(10.0, "blue").with_effect("water-drop"),
                );
                tokio::time::sleep(Duration::from_millis(2000)).await;
                surface.remove(drop);
            });
        }
    }
}

fn jitter(rng: &mut impl Rng, spread: f64) -> f64 {
    rng.gen_range(-0.5..=0.5) * spread
}
