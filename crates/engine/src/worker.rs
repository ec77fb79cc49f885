//! Dispatch worker that owns all mutable console state.
//!
//! Receives commands from [`EngineHandle`], runs the interpreter
//! round-trip, gates safety-critical directives behind the single
//! pending-confirmation slot, and drives the executor. The layer
//! registry, pending slot, and command log live here and nowhere else.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use ops_core::{Directive, GeoPoint};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::{Event, EventBus, MapEvent};
use crate::interpreter::Interpreter;
use crate::log::{CommandLog, LogEntry, Severity};
use crate::surface::{LayerId, MapSurface};

/// Commands that can be sent to the dispatch worker.
pub(crate) enum Command {
    /// Interpret and dispatch one free-text operator command.
    Submit {
        text: String,
        reply: oneshot::Sender<Result<Submission>>,
    },
    /// Execute the pending directive, if any. Replies with its intent.
    Confirm {
        reply: oneshot::Sender<Option<String>>,
    },
    /// Discard the pending directive, if any. Replies with its intent.
    Cancel {
        reply: oneshot::Sender<Option<String>>,
    },
    /// Ask the interpreter for an example command text.
    FetchExample {
        reply: oneshot::Sender<Result<Option<String>>>,
    },
    /// A unit-movement animation finished; render the directive's
    /// visualization at the target.
    CompleteMovement {
        directive: Box<Directive>,
        target: GeoPoint,
    },
    /// Snapshot the command log (newest first).
    QueryLog {
        reply: oneshot::Sender<Vec<LogEntry>>,
    },
}

/// What happened to a submitted command.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Dispatched immediately (no confirmation required).
    Executed(ParsedOutput),
    /// Held by the confirmation gate; the prompt text is in the log.
    AwaitingConfirmation(ParsedOutput),
}

impl Submission {
    pub fn parsed(&self) -> &ParsedOutput {
        match self {
            Submission::Executed(parsed) | Submission::AwaitingConfirmation(parsed) => parsed,
        }
    }
}

/// Interpreter output summary for the operator-facing parsed display.
#[derive(Debug, Clone)]
pub struct ParsedOutput {
    pub intent: String,
    pub english_text: String,
    pub safety_critical: bool,
    /// Raw parameters, pretty-printed JSON.
    pub parameters: String,
}

impl From<&Directive> for ParsedOutput {
    fn from(directive: &Directive) -> Self {
        Self {
            intent: directive.intent.clone(),
            english_text: directive.english_text.clone(),
            safety_critical: directive.safety_critical,
            parameters: serde_json::to_string_pretty(&directive.parameters)
                .unwrap_or_else(|_| "{}".to_owned()),
        }
    }
}

/// Background task that processes console commands.
///
/// Interpreter round-trips are awaited inline, so at most one request is
/// in flight and later submissions queue behind it.
pub(crate) struct DispatchWorker {
    pub(crate) config: EngineConfig,
    pub(crate) surface: Arc<dyn MapSurface>,
    pub(crate) interpreter: Arc<dyn Interpreter>,
    pub(crate) command_rx: mpsc::Receiver<Command>,
    /// Weak self-sender handed to animation tasks; weak so the channel
    /// closes when every external handle is gone.
    pub(crate) command_tx: mpsc::WeakSender<Command>,
    pub(crate) event_bus: EventBus,
    pub(crate) log: CommandLog,
    /// Layers rendered by the current command; drained on clear.
    pub(crate) layers: Vec<LayerId>,
    /// The single directive awaiting operator confirmation.
    pub(crate) pending: Option<Directive>,
}

impl DispatchWorker {
    pub(crate) fn new(
        config: EngineConfig,
        surface: Arc<dyn MapSurface>,
        interpreter: Arc<dyn Interpreter>,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            config,
            surface,
            interpreter,
            command_rx,
            command_tx,
            event_bus,
            log: CommandLog::new(),
            layers: Vec::new(),
            pending: None,
        }
    }

    /// Main worker loop; ends when every handle is dropped.
    pub(crate) async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!(target: "engine::worker", "dispatch worker shutting down");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit { text, reply } => {
                let result = self.handle_submit(text).await;
                if reply.send(result).is_err() {
                    debug!(target: "engine::worker", "Submit reply channel closed (caller dropped)");
                }
            }
            Command::Confirm { reply } => {
                if reply.send(self.handle_confirm()).is_err() {
                    debug!(target: "engine::worker", "Confirm reply channel closed (caller dropped)");
                }
            }
            Command::Cancel { reply } => {
                if reply.send(self.handle_cancel()).is_err() {
                    debug!(target: "engine::worker", "Cancel reply channel closed (caller dropped)");
                }
            }
            Command::FetchExample { reply } => {
                let result = self.interpreter.example().await.map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!(target: "engine::worker", "FetchExample reply channel closed (caller dropped)");
                }
            }
            Command::CompleteMovement { directive, target } => {
                self.event_bus
                    .publish(Event::Map(MapEvent::MovementCompleted { to: target }));
                self.render(&directive.visualization, target, &directive.parameters);
            }
            Command::QueryLog { reply } => {
                if reply.send(self.log.snapshot()).is_err() {
                    debug!(target: "engine::worker", "QueryLog reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Interpreter round-trip plus the confirmation gate.
    ///
    /// Exactly one of {immediate execution, confirmation prompt} happens
    /// per submission. A new safety-critical submission replaces any
    /// directive already pending (last-submitted wins).
    async fn handle_submit(&mut self, text: String) -> Result<Submission> {
        self.note(Severity::Info, format!("Processing command: \"{text}\""));

        let directive = match self.interpreter.interpret(&text).await {
            Ok(directive) => directive,
            Err(error) => {
                self.note(Severity::Critical, format!("Error: {error}"));
                return Err(error.into());
            }
        };

        let parsed = ParsedOutput::from(&directive);

        if directive.requires_confirmation() {
            let prompt = format!(
                "Matched command: \"{}\". This is a safety-critical operation. Please confirm.",
                directive.english_text
            );
            if let Some(prior) = self.pending.replace(directive) {
                self.note(
                    Severity::Info,
                    format!("Discarding pending confirmation: {}", prior.intent),
                );
            }
            self.note(Severity::Info, prompt);
            Ok(Submission::AwaitingConfirmation(parsed))
        } else {
            self.execute(directive);
            Ok(Submission::Executed(parsed))
        }
    }

    fn handle_confirm(&mut self) -> Option<String> {
        let directive = self.pending.take()?;
        let intent = directive.intent.clone();
        self.execute(directive);
        Some(intent)
    }

    fn handle_cancel(&mut self) -> Option<String> {
        let directive = self.pending.take()?;
        self.note(
            Severity::Info,
            format!("Action cancelled by operator: {}", directive.intent),
        );
        Some(directive.intent)
    }

    /// Record a lifecycle entry and publish it on the bus.
    pub(crate) fn note(&mut self, severity: Severity, message: impl Into<String>) {
        let entry = self.log.record(severity, message);
        match severity {
            Severity::Critical => {
                tracing::error!(target: "engine::worker", "{}", entry.message);
            }
            _ => tracing::info!(target: "engine::worker", "{}", entry.message),
        }
        self.event_bus.publish(Event::Lifecycle(entry));
    }

    /// Track a layer for removal on the next clear.
    pub(crate) fn track(&mut self, id: LayerId) {
        self.layers.push(id);
    }

    /// Remove every layer from the previous command.
    ///
    /// Timers still running for those layers keep firing; their surface
    /// operations become no-ops once the handle is gone.
    pub(crate) fn clear_layers(&mut self) {
        let count = self.layers.len();
        for id in self.layers.drain(..) {
            self.surface.remove(id);
        }
        self.event_bus
            .publish(Event::Map(MapEvent::LayersCleared { count }));
    }
}
