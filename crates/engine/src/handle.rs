//! Cloneable handle for interacting with the dispatch engine.

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::{EngineError, Result};
use crate::events::{Event, EventBus, Topic};
use crate::log::LogEntry;
use crate::worker::{Command, Submission};

/// Handle used by frontends to drive the engine.
///
/// Cheap to clone; all clones feed the same worker. Every request is a
/// command with a oneshot reply, so callers observe the worker's answer
/// rather than a local guess.
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl EngineHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Interpret and dispatch one free-text operator command.
    ///
    /// Resolves once the interpreter round-trip finishes: either the
    /// directive executed, or it is now awaiting confirmation.
    pub async fn submit_command(&self, text: impl Into<String>) -> Result<Submission> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Submit {
            text: text.into(),
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(EngineError::ReplyChannelClosed)?
    }

    /// Execute the directive held by the confirmation gate.
    ///
    /// Returns the executed intent, or `None` if nothing was pending.
    pub async fn confirm(&self) -> Result<Option<String>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Confirm { reply: reply_tx }).await?;
        reply_rx.await.map_err(EngineError::ReplyChannelClosed)
    }

    /// Discard the directive held by the confirmation gate.
    ///
    /// Returns the discarded intent, or `None` if nothing was pending.
    pub async fn cancel(&self) -> Result<Option<String>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Cancel { reply: reply_tx }).await?;
        reply_rx.await.map_err(EngineError::ReplyChannelClosed)
    }

    /// Fetch an example command text from the interpreter, if it offers one.
    pub async fn fetch_example(&self) -> Result<Option<String>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::FetchExample { reply: reply_tx }).await?;
        reply_rx.await.map_err(EngineError::ReplyChannelClosed)?
    }

    /// Snapshot of the command log, newest entry first.
    pub async fn command_log(&self) -> Result<Vec<LogEntry>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::QueryLog { reply: reply_tx }).await?;
        reply_rx.await.map_err(EngineError::ReplyChannelClosed)
    }

    /// Subscribe to a topic on the event bus.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| EngineError::CommandChannelClosed)
    }
}
