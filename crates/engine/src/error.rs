//! Unified error types surfaced by the engine API.
//!
//! Wraps failures from worker coordination and the interpreter round-trip
//! so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::interpreter::InterpreterError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine builder requires a map surface")]
    MissingSurface,

    #[error("dispatch worker command channel closed")]
    CommandChannelClosed,

    #[error("dispatch worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("dispatch worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("interpreter request failed")]
    Interpreter(#[from] InterpreterError),
}
