use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    algorithm::Algorithm,
    input::Dataset,
    render::Presenter,
    step::{Step, Trace},
    Result,
};

/// Input as it was handed to [`Presenter::render_initial`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedInput {
    Array(Vec<i64>),
    Graph { nodes: usize },
}

/// One call made through the presenter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum PresenterEvent {
    RenderInitial { input: RecordedInput },
    ApplyStep { step: Step, silent: bool },
    ResetVisualState,
    Status { text: String },
    Progress { cursor: usize, total: usize },
}

/// Presenter that keeps an ordered log of every notification it receives.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<PresenterEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Steps applied in the order they reached the presenter.
    pub fn applied_steps(&self) -> impl Iterator<Item = (&Step, bool)> {
        self.events.iter().filter_map(|event| match event {
            PresenterEvent::ApplyStep { step, silent } => Some((step, *silent)),
            _ => None,
        })
    }

    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Status { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Presenter for Recorder {
    fn render_initial(&mut self, input: Dataset<'_>) {
        let input = match input {
            Dataset::Array(values) => RecordedInput::Array(values.to_vec()),
            Dataset::Graph(graph) => RecordedInput::Graph {
                nodes: graph.node_count(),
            },
        };
        self.events.push(PresenterEvent::RenderInitial { input });
    }

    fn apply_step(&mut self, step: &Step, silent: bool) {
        self.events.push(PresenterEvent::ApplyStep {
            step: step.clone(),
            silent,
        });
    }

    fn reset_visual_state(&mut self) {
        self.events.push(PresenterEvent::ResetVisualState);
    }

    fn report_status(&mut self, text: &str) {
        self.events.push(PresenterEvent::Status {
            text: text.to_string(),
        });
    }

    fn report_progress(&mut self, cursor: usize, total: usize) {
        self.events.push(PresenterEvent::Progress { cursor, total });
    }
}

/// Self-describing dump of one generated trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceExport {
    pub algorithm: Algorithm,
    /// Array the trace was generated from (after any binary-search sort).
    pub input: Vec<i64>,
    pub target: Option<i64>,
    pub steps: Trace,
}

impl TraceExport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
