//! Engine configuration.

use std::env;
use std::time::Duration;

/// Tunables shared across the orchestrator, worker, and animation tasks.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Command-processing endpoint of the remote interpreter.
    pub interpreter_url: String,
    /// Wall-clock duration of one unit-movement animation.
    pub movement_duration: Duration,
    /// Interval between path-clearance extension steps.
    pub clearance_step: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interpreter_url: "http://127.0.0.1:5000/process_command".to_owned(),
            movement_duration: Duration::from_millis(1500),
            clearance_step: Duration::from_millis(30),
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AURA_INTERPRETER_URL` - interpreter endpoint
    /// - `AURA_MOVEMENT_MS` - movement animation duration in milliseconds
    /// - `AURA_CLEARANCE_STEP_MS` - path-clearance step interval in milliseconds
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("AURA_INTERPRETER_URL") {
            config.interpreter_url = url;
        }
        if let Some(ms) = read_env::<u64>("AURA_MOVEMENT_MS") {
            config.movement_duration = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read_env::<u64>("AURA_CLEARANCE_STEP_MS") {
            config.clearance_step = Duration::from_millis(ms.max(1));
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
