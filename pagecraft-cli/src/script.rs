//! Scripted editor sessions.
//!
//! A script is a JSON list of steps replayed through a [`CanvasEngine`],
//! standing in for the browser UI that normally feeds the engine.

use pagecraft_core::{CanvasEngine, EventOutcome, Field, InputEvent, Mutation, Point, ViewportMode};
use serde::{Deserialize, Serialize};

/// One scripted host action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Add a component from the palette by kind name.
    Add {
        /// Kind name, e.g. `"hero-block"`.
        kind: String,
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
    },
    /// Deliver a raw input event.
    Input {
        /// The event.
        event: InputEvent,
    },
    /// Press at a point, hit-testing for the target component.
    Press {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// Edit a property of the selected component.
    Edit {
        /// Field name (`x`, `content`, `background-color`, `style.width`, ...).
        field: String,
        /// New value.
        value: String,
    },
    /// Apply a mutation directly.
    Mutate {
        /// The mutation.
        mutation: Mutation,
    },
    /// Switch the preview width.
    Viewport {
        /// New mode.
        mode: ViewportMode,
    },
    /// Undo the last change.
    Undo,
    /// Redo the last undone change.
    Redo,
}

/// A replayable session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Steps in order.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a script.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Tally of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Steps executed.
    pub steps: usize,
    /// Steps that committed a new document.
    pub document_changes: usize,
    /// Steps that had no effect.
    pub ignored: usize,
}

impl ReplayReport {
    fn record(&mut self, outcome: EventOutcome) {
        self.steps += 1;
        match outcome {
            EventOutcome::DocumentChanged => self.document_changes += 1,
            EventOutcome::Ignored => self.ignored += 1,
            EventOutcome::InteractionChanged => {}
        }
    }
}

/// Run every step of `script` against `engine`.
pub fn replay(engine: &mut CanvasEngine, script: &Script) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (index, step) in script.steps.iter().enumerate() {
        let outcome = run_step(engine, step);
        tracing::debug!("Step {index}: {step:?} -> {outcome:?}");
        report.record(outcome);
    }
    tracing::info!(
        "Replayed {} steps ({} document changes, {} ignored)",
        report.steps,
        report.document_changes,
        report.ignored
    );
    report
}

fn run_step(engine: &mut CanvasEngine, step: &ScriptStep) -> EventOutcome {
    match step {
        ScriptStep::Add { kind, x, y } => match engine.add_named(kind, Point::new(*x, *y)) {
            Some(_) => EventOutcome::DocumentChanged,
            None => EventOutcome::Ignored,
        },
        ScriptStep::Input { event } => engine.handle(event),
        ScriptStep::Press { x, y } => engine.press_at(Point::new(*x, *y)),
        ScriptStep::Edit { field, value } => engine.edit(&Field::from(field.as_str()), value),
        ScriptStep::Mutate { mutation } => engine.apply(mutation),
        ScriptStep::Viewport { mode } => {
            if engine.set_viewport_mode(*mode) {
                EventOutcome::InteractionChanged
            } else {
                EventOutcome::Ignored
            }
        }
        ScriptStep::Undo => engine.undo(),
        ScriptStep::Redo => engine.redo(),
    }
}
