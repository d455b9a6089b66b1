use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node in the demonstration graph.
pub type NodeId = usize;

/// Closed set of tags a generator can attach to a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Compare,
    Swap,
    Select,
    Pivot,
    Sorted,
    Merge,
    Search,
    Found,
    NotFound,
    Eliminate,
    Start,
    Visit,
    Discover,
    Complete,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Select => "select",
            StepKind::Pivot => "pivot",
            StepKind::Sorted => "sorted",
            StepKind::Merge => "merge",
            StepKind::Search => "search",
            StepKind::Found => "found",
            StepKind::NotFound => "not_found",
            StepKind::Eliminate => "eliminate",
            StepKind::Start => "start",
            StepKind::Visit => "visit",
            StepKind::Discover => "discover",
            StepKind::Complete => "complete",
        }
    }

    /// Read-only steps describe an instant without changing the array, so
    /// their snapshot equals the one carried by the preceding step.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            StepKind::Compare
                | StepKind::Search
                | StepKind::Select
                | StepKind::Pivot
                | StepKind::Eliminate
                | StepKind::Found
                | StepKind::NotFound
        )
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step is about: array positions, one graph node, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subjects {
    Indices(Vec<usize>),
    Node(NodeId),
    None,
}

impl Subjects {
    pub fn indices(&self) -> &[usize] {
        match self {
            Subjects::Indices(indices) => indices,
            _ => &[],
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match self {
            Subjects::Node(node) => Some(*node),
            _ => None,
        }
    }
}

/// One observable instant of an algorithm's execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub subjects: Subjects,
    /// Full array contents at this instant. `None` for graph steps.
    pub snapshot: Option<Vec<i64>>,
    pub message: String,
}

impl Step {
    /// Array step over the given positions. The snapshot is copied so later
    /// mutations of `values` never leak into this step.
    pub fn array(
        kind: StepKind,
        indices: Vec<usize>,
        values: &[i64],
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subjects: Subjects::Indices(indices),
            snapshot: Some(values.to_vec()),
            message: message.into(),
        }
    }

    /// Terminal array step with no subjects (e.g. `not_found`).
    pub fn array_terminal(kind: StepKind, values: &[i64], message: impl Into<String>) -> Self {
        Self {
            kind,
            subjects: Subjects::None,
            snapshot: Some(values.to_vec()),
            message: message.into(),
        }
    }

    pub fn node(kind: StepKind, node: NodeId, message: impl Into<String>) -> Self {
        Self {
            kind,
            subjects: Subjects::Node(node),
            snapshot: None,
            message: message.into(),
        }
    }

    pub fn terminal(kind: StepKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            subjects: Subjects::None,
            snapshot: None,
            message: message.into(),
        }
    }
}

/// Ordered, immutable sequence of steps for one (algorithm, input) run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|step| step.kind).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only builder used by the generators.
#[derive(Debug, Default)]
pub(crate) struct TraceBuilder {
    steps: Vec<Step>,
}

impl TraceBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn finish(self) -> Trace {
        Trace::new(self.steps)
    }
}
