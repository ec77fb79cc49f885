//! Unit-movement animation.
//!
//! One spawned task per movement: place the unit at the origin, step its
//! position toward the target in equal increments, remove it, report
//! completion back to the worker exactly once. There is no mid-flight
//! cancellation; concurrent animations share no state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use ops_core::{Directive, GeoPoint};

use crate::oracle::icons::IconDescriptor;
use crate::surface::{MapSurface, MarkerStyle};
use crate::worker::Command;

/// Fixed number of interpolation steps per movement.
pub(crate) const MOVEMENT_STEPS: u32 = 100;

/// Spawn a movement animation ending in a `CompleteMovement` command.
///
/// The sender is weak: if the engine shut down mid-flight, the completion
/// is silently dropped along with the rest of the command's rendering.
pub(crate) fn spawn_movement(
    surface: Arc<dyn MapSurface>,
    icon: IconDescriptor,
    start: GeoPoint,
    end: GeoPoint,
    duration: Duration,
    command_tx: mpsc::WeakSender<Command>,
    directive: Directive,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut style = MarkerStyle::icon(icon);
        style.z_offset = 1000;
        let unit = surface.add_marker(start, style);

        let step = duration / MOVEMENT_STEPS;
        for i in 0..MOVEMENT_STEPS {
            tokio::time::sleep(step).await;
            let t = f64::from(i) / f64::from(MOVEMENT_STEPS);
            surface.move_marker(unit, start.lerp(end, t));
        }

        surface.remove(unit);

        if let Some(tx) = command_tx.upgrade() {
            let _ = tx
                .send(Command::CompleteMovement {
                    directive: Box::new(directive),
                    target: end,
                })
                .await;
        }
    })
}
