//! Client for the remote command interpreter.
//!
//! The interpreter is an external collaborator: free text in, structured
//! [`Directive`] out. A non-success response is terminal for that command
//! (logged upstream, never retried). The trait seam lets tests script
//! directives without a server.

use async_trait::async_trait;
use ops_core::Directive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel input that asks the interpreter for an example command.
pub const EXAMPLE_SENTINEL: &str = "get_example";

#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("interpreter transport failed")]
    Transport(#[from] reqwest::Error),

    #[error("interpreter returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// Used by scripted test interpreters that run out of directives.
    #[error("no directive available for input {input:?}")]
    NoDirective { input: String },
}

#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Interpret one free-text operator command.
    async fn interpret(&self, text: &str) -> Result<Directive, InterpreterError>;

    /// Fetch an example command text, if the interpreter offers one.
    async fn example(&self) -> Result<Option<String>, InterpreterError>;
}

#[derive(Serialize)]
struct CommandRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ExampleReply {
    #[serde(default)]
    english: Option<String>,
}

/// HTTP [`Interpreter`] speaking the `/process_command` JSON protocol.
pub struct HttpInterpreter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInterpreter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, text: &str) -> Result<reqwest::Response, InterpreterError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CommandRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InterpreterError::Status { status });
        }
        Ok(response)
    }
}

#[async_trait]
impl Interpreter for HttpInterpreter {
    async fn interpret(&self, text: &str) -> Result<Directive, InterpreterError> {
        let directive = self.post(text).await?.json::<Directive>().await?;
        Ok(directive)
    }

    async fn example(&self) -> Result<Option<String>, InterpreterError> {
        let reply = self.post(EXAMPLE_SENTINEL).await?.json::<ExampleReply>().await?;
        Ok(reply.english)
    }
}
