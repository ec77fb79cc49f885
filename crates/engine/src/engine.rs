//! Engine orchestrator and builder.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::events::EventBus;
use crate::handle::EngineHandle;
use crate::interpreter::{HttpInterpreter, Interpreter};
use crate::surface::MapSurface;
use crate::worker::DispatchWorker;

/// Owns the dispatch worker task and the handle that feeds it.
pub struct Engine {
    handle: EngineHandle,
    worker_handle: JoinHandle<()>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Handle for submitting commands and subscribing to events.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Drop the handle and wait for the worker to drain and exit.
    pub async fn shutdown(self) -> Result<()> {
        info!("shutting down dispatch engine");
        drop(self.handle);
        self.worker_handle.await.map_err(EngineError::WorkerJoin)
    }
}

/// Builder for [`Engine`]. A map surface is required; the interpreter
/// defaults to [`HttpInterpreter`] against the configured endpoint.
pub struct EngineBuilder {
    config: EngineConfig,
    surface: Option<Arc<dyn MapSurface>>,
    interpreter: Option<Arc<dyn Interpreter>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            surface: None,
            interpreter: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn surface(mut self, surface: Arc<dyn MapSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn interpreter(mut self, interpreter: Arc<dyn Interpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn build(self) -> Result<Engine> {
        let surface = self.surface.ok_or(EngineError::MissingSurface)?;
        let interpreter = self.interpreter.unwrap_or_else(|| {
            Arc::new(HttpInterpreter::new(self.config.interpreter_url.clone()))
        });

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = DispatchWorker::new(
            self.config,
            surface,
            interpreter,
            command_rx,
            command_tx.downgrade(),
            event_bus.clone(),
        );
        let worker_handle = tokio::spawn(worker.run());
        info!("dispatch engine started");

        Ok(Engine {
            handle: EngineHandle::new(command_tx, event_bus),
            worker_handle,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
