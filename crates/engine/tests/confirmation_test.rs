//! Confirmation gate behavior through the public handle.

mod common;

use common::{critical, directive, spawn_engine, spawn_engine_with, ScriptedInterpreter};

use engine::{EngineError, Severity, Submission};
use ops_core::VizKind;

#[tokio::test]
async fn non_critical_directive_executes_immediately() {
    let (engine, surface) = spawn_engine(vec![directive("area_scan", VizKind::Sweep)]);
    let handle = engine.handle();

    let submission = handle
        .submit_command("scan the area")
        .await
        .expect("submission should succeed");

    assert!(matches!(submission, Submission::Executed(_)));
    assert_eq!(surface.active_count(), 1);

    // Nothing is pending afterwards.
    assert_eq!(handle.confirm().await.expect("confirm"), None);
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn critical_directive_waits_for_confirmation() {
    let (engine, surface) = spawn_engine(vec![critical(directive(
        "controlled_demolition",
        VizKind::Sweep,
    ))]);
    let handle = engine.handle();

    let submission = handle
        .submit_command("demolish the unstable tower")
        .await
        .expect("submission should succeed");

    let Submission::AwaitingConfirmation(parsed) = submission else {
        panic!("expected the confirmation gate to hold the directive");
    };
    assert!(parsed.safety_critical);
    assert_eq!(surface.active_count(), 0);

    let log = handle.command_log().await.expect("log");
    assert!(
        log[0].message.contains("Please confirm."),
        "newest entry should be the prompt, got: {}",
        log[0].message
    );

    let executed = handle.confirm().await.expect("confirm");
    assert_eq!(executed.as_deref(), Some("controlled_demolition"));
    assert_eq!(surface.active_count(), 1);
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn cancel_discards_the_pending_directive() {
    let (engine, surface) = spawn_engine(vec![critical(directive(
        "evacuate_district",
        VizKind::Sweep,
    ))]);
    let handle = engine.handle();

    handle
        .submit_command("evacuate the district")
        .await
        .expect("submission should succeed");

    let cancelled = handle.cancel().await.expect("cancel");
    assert_eq!(cancelled.as_deref(), Some("evacuate_district"));

    // A later confirm finds nothing; the map never changed.
    assert_eq!(handle.confirm().await.expect("confirm"), None);
    assert_eq!(surface.active_count(), 0);

    let log = handle.command_log().await.expect("log");
    assert!(log[0]
        .message
        .contains("Action cancelled by operator: evacuate_district"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn confirm_and_cancel_are_noops_without_a_pending_directive() {
    let (engine, surface) = spawn_engine(vec![]);
    let handle = engine.handle();

    assert_eq!(handle.confirm().await.expect("confirm"), None);
    assert_eq!(handle.cancel().await.expect("cancel"), None);
    assert_eq!(surface.active_count(), 0);
    assert!(handle.command_log().await.expect("log").is_empty());
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn newer_critical_submission_replaces_the_pending_one() {
    let (engine, _surface) = spawn_engine(vec![
        critical(directive("first_op", VizKind::Sweep)),
        critical(directive("second_op", VizKind::Sweep)),
    ]);
    let handle = engine.handle();

    handle.submit_command("first").await.expect("first");
    handle.submit_command("second").await.expect("second");

    // Only the most recent submission survives the gate.
    let executed = handle.confirm().await.expect("confirm");
    assert_eq!(executed.as_deref(), Some("second_op"));
    assert_eq!(handle.confirm().await.expect("confirm"), None);

    let log = handle.command_log().await.expect("log");
    assert!(log
        .iter()
        .any(|entry| entry.message.contains("Discarding pending confirmation: first_op")));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn interpreter_failure_surfaces_as_error_and_critical_log() {
    let (engine, surface) = spawn_engine(vec![]);
    let handle = engine.handle();

    let result = handle.submit_command("gibberish").await;
    assert!(matches!(result, Err(EngineError::Interpreter(_))));
    assert_eq!(surface.active_count(), 0);

    let log = handle.command_log().await.expect("log");
    assert_eq!(log[0].severity, Severity::Critical);
    assert!(log[0].message.starts_with("Error:"));
    engine.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn every_example_fetch_asks_the_interpreter_again() {
    let interpreter = ScriptedInterpreter::new(vec![])
        .with_example("Scan the area around Marina Beach.")
        .with_example("Deploy drones over Ennore.");
    let (engine, _surface) = spawn_engine_with(interpreter);
    let handle = engine.handle();

    // Each fetch is a fresh round-trip, so a frontend refreshing after
    // every use gets a new suggestion each time.
    let first = handle.fetch_example().await.expect("example");
    assert_eq!(first.as_deref(), Some("Scan the area around Marina Beach."));

    let second = handle.fetch_example().await.expect("example");
    assert_eq!(second.as_deref(), Some("Deploy drones over Ennore."));

    assert_eq!(handle.fetch_example().await.expect("example"), None);
    engine.shutdown().await.expect("shutdown");
}
