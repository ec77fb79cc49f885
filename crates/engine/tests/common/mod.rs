#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use engine::{Engine, Interpreter, InterpreterError, RecordingSurface};
use ops_core::{Directive, VisualizationProfile, VizKind};

/// Interpreter double that replays scripted directive and example queues.
pub struct ScriptedInterpreter {
    directives: Mutex<VecDeque<Directive>>,
    examples: Mutex<VecDeque<String>>,
}

impl ScriptedInterpreter {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self {
            directives: Mutex::new(directives.into()),
            examples: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_example(self, example: impl Into<String>) -> Self {
        self.examples.lock().expect("script lock").push_back(example.into());
        self
    }
}

#[async_trait]
impl Interpreter for ScriptedInterpreter {
    async fn interpret(&self, text: &str) -> Result<Directive, InterpreterError> {
        self.directives
            .lock()
            .expect("script lock")
            .pop_front()
            .ok_or_else(|| InterpreterError::NoDirective {
                input: text.to_owned(),
            })
    }

    async fn example(&self) -> Result<Option<String>, InterpreterError> {
        Ok(self.examples.lock().expect("script lock").pop_front())
    }
}

/// Directive that renders immediately, without a movement animation.
pub fn directive(intent: &str, kind: VizKind) -> Directive {
    let mut visualization = VisualizationProfile::new(kind);
    visualization.no_unit = true;
    Directive {
        intent: intent.to_owned(),
        english_text: format!("Test order: {intent}."),
        safety_critical: false,
        confirmation_required: false,
        parameters: Default::default(),
        visualization,
    }
}

pub fn critical(mut directive: Directive) -> Directive {
    directive.safety_critical = true;
    directive.confirmation_required = true;
    directive
}

/// Engine over a [`RecordingSurface`] and a scripted interpreter.
pub fn spawn_engine(directives: Vec<Directive>) -> (Engine, Arc<RecordingSurface>) {
    spawn_engine_with(ScriptedInterpreter::new(directives))
}

pub fn spawn_engine_with(interpreter: ScriptedInterpreter) -> (Engine, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::new());
    let engine = Engine::builder()
        .surface(surface.clone())
        .interpreter(Arc::new(interpreter))
        .build()
        .expect("engine should build");
    (engine, surface)
}
