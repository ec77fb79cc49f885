//! Dispatch engine for the Aura command console.
//!
//! This crate wires the interpreter client, confirmation gate, action
//! executor, visualization router, and animation timers into a cohesive
//! engine API. Consumers embed [`Engine`] to submit operator commands,
//! confirm or cancel safety-critical directives, and subscribe to
//! lifecycle and map events through [`EngineHandle`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the orchestrator and builder
//! - [`handle`] exposes the cloneable client façade
//! - [`events`] provides the topic-based event bus
//! - [`surface`] defines the abstract map surface and a recording test double
//! - [`oracle`] carries the static gazetteer and icon tables
//! - [`interpreter`] talks to the remote command interpreter
//! - `worker`, `executor`, `router`, `effects`, `animator` stay internal

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod handle;
pub mod interpreter;
pub mod log;
pub mod oracle;
pub mod surface;

mod animator;
mod effects;
mod executor;
mod router;
mod worker;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, Result};
pub use events::{Event, EventBus, MapEvent, Topic};
pub use handle::EngineHandle;
pub use interpreter::{HttpInterpreter, Interpreter, InterpreterError};
pub use log::{LogEntry, Severity};
pub use surface::{
    CircleStyle, LayerId, LineStyle, MapSurface, MarkerAppearance, MarkerStyle, PolygonStyle,
    RecordedLayer, RecordingSurface,
};
pub use worker::{ParsedOutput, Submission};
