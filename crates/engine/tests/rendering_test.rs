//! Rendering, layer lifecycle, and animation behavior.

mod common;

use std::time::Duration;

use common::{directive, spawn_engine};

use engine::{Event, MapEvent, RecordedLayer, Severity, Submission, Topic};
use ops_core::{GeoPoint, ParamValue, Parameters, VizKind};

#[tokio::test]
async fn containment_parses_kilometre_radius() {
    let mut order = directive("establish_perimeter", VizKind::Containment);
    order.parameters = Parameters::from([("radius", ParamValue::from("2km"))]);
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();

    handle
        .submit_command("perimeter, 2km radius")
        .await
        .expect("submission should succeed");

    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    let (_, style) = &circles[0];
    assert_eq!(style.radius_m, 2000.0);
    assert!(style.dashed);
    assert_eq!(style.label.as_deref(), Some("Hazard Zone: 2000 m"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn each_command_clears_the_previous_layers() {
    let (engine, surface) = spawn_engine(vec![
        directive("scan_one", VizKind::Sweep),
        directive("scan_two", VizKind::Sweep),
    ]);
    let handle = engine.handle();
    let mut map_events = handle.subscribe(Topic::Map);

    handle.submit_command("first scan").await.expect("first");
    handle.submit_command("second scan").await.expect("second");

    assert_eq!(surface.active_count(), 1);
    assert_eq!(surface.removed_count(), 1);

    // First clear finds an empty registry, second removes one layer.
    let mut cleared = Vec::new();
    while let Ok(event) = map_events.try_recv() {
        if let Event::Map(MapEvent::LayersCleared { count }) = event {
            cleared.push(count);
        }
    }
    assert_eq!(cleared, vec![0, 1]);
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn unknown_visualization_renders_nothing_and_logs_critical() {
    let (engine, surface) = spawn_engine(vec![directive(
        "hologram_projection",
        VizKind::Unknown("hologram".to_owned()),
    )]);
    let handle = engine.handle();

    handle
        .submit_command("project a hologram")
        .await
        .expect("submission should succeed");

    assert_eq!(surface.active_count(), 0);
    let log = handle.command_log().await.expect("log");
    assert_eq!(log[0].severity, Severity::Critical);
    assert!(log[0].message.contains("hologram"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn unknown_point_effect_logs_critical() {
    let mut order = directive("mystery_action", VizKind::PointEffect);
    order.visualization.effect = Some("teleport".to_owned());
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();

    handle
        .submit_command("teleport the unit")
        .await
        .expect("submission should succeed");

    assert_eq!(surface.active_count(), 0);
    let log = handle.command_log().await.expect("log");
    assert_eq!(log[0].severity, Severity::Critical);
    assert!(log[0].message.contains("teleport"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn supply_drop_label_defaults_to_kits() {
    let (engine, surface) = spawn_engine(vec![directive("deploy_supplies", VizKind::DeploySupply)]);
    let handle = engine.handle();

    handle
        .submit_command("drop supplies")
        .await
        .expect("submission should succeed");

    let markers = surface.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].1.label.as_deref(), Some("Supply Drop: kits"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn supply_drop_label_includes_quantity_and_type() {
    let mut order = directive("deploy_supplies", VizKind::DeploySupply);
    order.parameters = Parameters::from([
        ("quantity", ParamValue::from(50.0)),
        ("supply_type", ParamValue::from("survival kits")),
    ]);
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();

    handle
        .submit_command("drop 50 survival kits")
        .await
        .expect("submission should succeed");

    let markers = surface.markers();
    assert_eq!(
        markers[0].1.label.as_deref(),
        Some("Supply Drop: 50 survival kits")
    );
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn flood_environment_adds_a_hazard_overlay() {
    let mut order = directive("area_scan", VizKind::Sweep);
    order.visualization.environment = Some("flood waters rising".to_owned());
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();

    handle
        .submit_command("scan the flooded area")
        .await
        .expect("submission should succeed");

    // Overlay circle plus the sweep marker.
    assert_eq!(surface.active_count(), 2);
    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].1.radius_m, 1000.0);
    assert_eq!(circles[0].1.color, "#0077be");
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn fire_overlay_widens_for_forest_fires() {
    let mut urban = directive("firefighting_op", VizKind::Sweep);
    urban.visualization.environment = Some("building fire".to_owned());
    let mut forest = directive("firefighting_op", VizKind::Sweep);
    forest.visualization.environment = Some("forest fire".to_owned());
    let (engine, surface) = spawn_engine(vec![urban, forest]);
    let handle = engine.handle();

    handle
        .submit_command("fight the building fire")
        .await
        .expect("submission should succeed");
    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].1.radius_m, 500.0);
    assert_eq!(circles[0].1.color, "#a52a2a");

    handle
        .submit_command("fight the forest fire")
        .await
        .expect("submission should succeed");
    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].1.radius_m, 1500.0);
    assert_eq!(circles[0].1.color, "#a52a2a");
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn repair_pulse_sparks_when_welders_are_mentioned() {
    let mut welded = directive("bridge_repair", VizKind::PathRepair);
    welded.parameters = Parameters::from([("technology", ParamValue::from("plasma welders"))]);
    let mut printed = directive("road_repair", VizKind::PathRepair);
    printed.parameters = Parameters::from([("technology", ParamValue::from("3D printers"))]);
    let (engine, surface) = spawn_engine(vec![welded, printed]);
    let handle = engine.handle();

    handle
        .submit_command("repair the bridge with plasma welders")
        .await
        .expect("submission should succeed");
    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].1.effect.as_deref(), Some("repair-spark"));

    handle
        .submit_command("repair the road with 3D printers")
        .await
        .expect("submission should succeed");
    let circles = surface.circles();
    assert_eq!(circles[0].1.effect.as_deref(), Some("build-up"));
    assert_eq!(circles[0].1.fill_color.as_deref(), Some("#FFD700"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn evacuation_route_offsets_the_shelter() {
    let mut order = directive("evacuate", VizKind::EvacuationRoute);
    order.parameters = Parameters::from([(
        "coordinates",
        ParamValue::from("13.05N, 80.28E"),
    )]);
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();

    handle
        .submit_command("guide evacuation")
        .await
        .expect("submission should succeed");

    let markers = surface.markers();
    assert_eq!(markers.len(), 1);
    let (at, style) = &markers[0];
    assert_eq!(style.label.as_deref(), Some("Evacuation Shelter"));
    assert!((at.lat - 13.07).abs() < 1e-9);
    assert!((at.lon - 80.30).abs() < 1e-9);
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn movement_animation_steps_then_renders() {
    let mut order = directive("area_scan", VizKind::Sweep);
    order.visualization.no_unit = false;
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();
    let mut map_events = handle.subscribe(Topic::Map);

    let submission = handle
        .submit_command("scan the area")
        .await
        .expect("submission should succeed");
    assert!(matches!(submission, Submission::Executed(_)));

    let mut saw_start = false;
    loop {
        match map_events.recv().await.expect("map event") {
            Event::Map(MapEvent::MovementStarted { from, .. }) => {
                assert_eq!(from, GeoPoint::new(13.064, 80.180));
                saw_start = true;
            }
            Event::Map(MapEvent::MovementCompleted { .. }) => break,
            _ => {}
        }
    }
    assert!(saw_start);

    // The log query drains the queue behind the completion, so the
    // visualization has rendered by the time it answers.
    handle.command_log().await.expect("log");

    assert_eq!(surface.total_moves(), 100);
    assert_eq!(surface.active_count(), 1, "unit removed, sweep remains");
    assert_eq!(surface.removed_count(), 1);
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn demolition_blast_is_removed_after_its_timer() {
    let mut order = directive("controlled_demolition", VizKind::PointEffect);
    order.visualization.effect = Some("demolition".to_owned());
    let (engine, surface) = spawn_engine(vec![order]);
    let handle = engine.handle();

    handle
        .submit_command("demolish the tower")
        .await
        .expect("submission should succeed");
    assert_eq!(surface.active_count(), 1);

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(surface.active_count(), 0);
    assert_eq!(surface.removed_count(), 1);
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn path_clearance_extends_the_cleared_line() {
    let (engine, surface) = spawn_engine(vec![directive("clear_route", VizKind::PathClearance)]);
    let handle = engine.handle();

    handle
        .submit_command("clear the route")
        .await
        .expect("submission should succeed");

    // Marker, blocked line, cleared line.
    assert_eq!(surface.active_count(), 3);

    // Default step interval is 30 ms for 100 steps.
    tokio::time::sleep(Duration::from_millis(3100)).await;

    let cleared: Vec<_> = surface
        .layers()
        .into_iter()
        .filter_map(|(_, layer)| match layer {
            RecordedLayer::Polyline { points, style } if style.color == "#26e07f" => Some(points),
            _ => None,
        })
        .collect();
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].len(), 101);
    engine.shutdown().await.expect("shutdown");
}
