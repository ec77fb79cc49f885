//! Data-driven visualization router.
//!
//! Pure dispatch on the profile's kind: exactly one strategy renders per
//! call, every produced layer is tracked for the next clear. Unknown
//! kinds log a critical entry and touch nothing.

use std::sync::Arc;

use rand::Rng;

use ops_core::{
    parse_radius, GeoPoint, OpsError, Parameters, VisualizationProfile, VizKind,
    DEFAULT_RADIUS_M,
};

use crate::log::Severity;
use crate::oracle::{icons, COMMAND_CENTER};
use crate::surface::{CircleStyle, LineStyle, MarkerStyle};
use crate::worker::DispatchWorker;

/// Degree span of the path-clearance work segment.
const CLEARANCE_SPAN: f64 = 0.01;
const CLEARANCE_STEPS: u32 = 100;

impl DispatchWorker {
    /// Render one visualization profile at the resolved target.
    pub(crate) fn render(
        &mut self,
        profile: &VisualizationProfile,
        target: GeoPoint,
        params: &Parameters,
    ) {
        match &profile.kind {
            VizKind::Sweep => self.render_sweep(profile, target),
            VizKind::DeploySupply => self.render_supply_drop(target, params),
            VizKind::Containment => self.render_containment(profile, target, params),
            VizKind::PathClearance => self.render_path_clearance(profile, target),
            VizKind::PathRepair => self.render_path_repair(profile, target, params),
            VizKind::DeployStatic => self.render_static_deployment(profile, target),
            VizKind::PointEffect => {
                let name = profile.effect.clone().unwrap_or_default();
                self.note(Severity::Info, format!("Initiating action: {name}"));
                if let Err(error) = self.run_effect(&name, target, profile) {
                    self.note(Severity::Critical, error.to_string());
                }
            }
            VizKind::DataFlow => self.render_data_flow(target),
            VizKind::EvacuationRoute => self.render_evacuation_route(target),
            VizKind::Unknown(kind) => {
                let error = OpsError::UnknownVisualization { kind: kind.clone() };
                self.note(Severity::Critical, error.to_string());
            }
        }
    }

    fn render_sweep(&mut self, profile: &VisualizationProfile, target: GeoPoint) {
        self.note(Severity::Info, "Commencing scan.");
        let id = self
            .surface
            .add_marker(target, MarkerStyle::sweep(profile.color_or_default()));
        self.track(id);
    }

    fn render_supply_drop(&mut self, target: GeoPoint, params: &Parameters) {
        self.note(Severity::Info, "Deploying supplies.");
        let quantity = params.get_text("quantity").unwrap_or_default();
        let supply = params
            .get_text("supply_type")
            .unwrap_or_else(|| "kits".to_owned());
        let label = format!("Supply Drop: {}", format!("{quantity} {supply}").trim());

        let id = self
            .surface
            .add_marker(target, MarkerStyle::icon(icons::supplies()).with_label(label));
        self.track(id);
    }

    fn render_containment(
        &mut self,
        profile: &VisualizationProfile,
        target: GeoPoint,
        params: &Parameters,
    ) {
        self.note(Severity::Info, "Establishing perimeter.");
        let radius = params
            .first_of(&["radius", "exclusion_zone", "evacuation_radius"])
            .map(|text| parse_radius(&text))
            .unwrap_or(DEFAULT_RADIUS_M);
        let color = profile.color_or_default().to_owned();

        let marker = self.surface.add_marker(
            target,
            MarkerStyle::icon(icons::hazard_or_default(profile.hazard_icon.as_deref())),
        );
        let zone = self.surface.add_circle(
            target,
            CircleStyle::new(radius, color.clone())
                .filled(color, 0.2)
                .weight(2.0)
                .dashed()
                .with_label(format!("Hazard Zone: {radius} m")),
        );
        self.track(marker);
        self.track(zone);
    }

    fn render_path_clearance(&mut self, profile: &VisualizationProfile, target: GeoPoint) {
        self.note(Severity::Info, "Starting clearance operation.");
        let rail = profile.path_type.as_deref() == Some("rail");
        let far_end = target.offset(CLEARANCE_SPAN, CLEARANCE_SPAN);

        let marker = self
            .surface
            .add_marker(target, MarkerStyle::icon(icons::excavator()));

        let mut uncleared_style = LineStyle::new("#ff5555", 5.0).dashed();
        let mut cleared_style = LineStyle::new("#26e07f", 5.0);
        if rail {
            uncleared_style = uncleared_style.with_effect("path-rail");
            cleared_style = cleared_style.with_effect("path-rail");
        }

        let uncleared = self
            .surface
            .add_polyline(vec![target, far_end], uncleared_style);
        let cleared = self.surface.add_polyline(vec![target], cleared_style);

        self.track(marker);
        self.track(uncleared);
        self.track(cleared);

        // Incremental extension toward the far end; extensions on a
        // cleared layer are no-ops, so a newer command cannot race it.
        let surface = Arc::clone(&self.surface);
        let step = self.config.clearance_step;
        tokio::spawn(async move {
            for i in 1..=CLEARANCE_STEPS {
                tokio::time::sleep(step).await;
                let t = f64::from(i) / f64::from(CLEARANCE_STEPS);
                surface.extend_polyline(
                    cleared,
                    target.offset(CLEARANCE_SPAN * t, CLEARANCE_SPAN * t),
                );
            }
        });
    }

    fn render_path_repair(
        &mut self,
        profile: &VisualizationProfile,
        target: GeoPoint,
        params: &Parameters,
    ) {
        let path_type = profile.path_type.as_deref().unwrap_or("structure");
        self.note(Severity::Info, format!("Beginning repairs on {path_type}."));

        let welding = params
            .get_str("technology")
            .is_some_and(|tech| tech.contains("weld"));
        let effect = if welding { "repair-spark" } else { "build-up" };

        let marker = self
            .surface
            .add_marker(target, MarkerStyle::icon(icons::repair()));
        let pulse = self.surface.add_circle(
            target,
            CircleStyle::new(10.0, "transparent")
                .filled("#FFD700", 0.8)
                .with_effect(effect),
        );
        self.track(marker);
        self.track(pulse);
    }

    fn render_static_deployment(&mut self, profile: &VisualizationProfile, target: GeoPoint) {
        let deploy_icon = profile.deploy_icon.as_deref();
        self.note(
            Severity::Info,
            format!(
                "Deploying static asset: {}.",
                deploy_icon.unwrap_or("default_unit")
            ),
        );

        let count = profile.count.unwrap_or(1).max(1);
        let spread = 0.001 * f64::from(count);
        let icon = icons::unit_or_default(deploy_icon);
        let mut rng = rand::thread_rng();

        for _ in 0..count {
            let offset = rng.gen_range(-0.5..=0.5) * spread;
            let id = self
                .surface
                .add_marker(target.offset(offset, offset), MarkerStyle::icon(icon));
            self.track(id);
        }
    }

    fn render_data_flow(&mut self, target: GeoPoint) {
        self.note(Severity::Info, "Initiating data transfer.");
        let from = self
            .surface
            .add_marker(target, MarkerStyle::icon(icons::data()));
        let to = self
            .surface
            .add_marker(COMMAND_CENTER, MarkerStyle::icon(icons::command_center()));
        let link = self.surface.add_polyline(
            vec![target, COMMAND_CENTER],
            LineStyle::new("#00ddff", 2.0).with_effect("data-flow-line"),
        );
        self.track(from);
        self.track(to);
        self.track(link);
    }

    fn render_evacuation_route(&mut self, target: GeoPoint) {
        self.note(Severity::Info, "Guiding evacuation.");
        let shelter_at = target.offset(0.02, 0.02);
        let shelter = self.surface.add_marker(
            shelter_at,
            MarkerStyle::icon(icons::medical()).with_label("Evacuation Shelter"),
        );
        let route = self.surface.add_polyline(
            vec![target, shelter_at],
            LineStyle::new("#26e07f", 3.0).dashed(),
        );
        self.track(shelter);
        self.track(route);
    }
}
