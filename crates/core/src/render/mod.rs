//! Presentation boundary.
//!
//! The playback engine only ever pushes notifications through [`Presenter`];
//! it never reads anything back. [`RenderModel`] is a headless presenter that
//! keeps the visual state in memory, which is what the terminal front-end
//! draws and what the tests inspect.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{
    graph::GraphEdge,
    input::Dataset,
    step::{NodeId, Step, StepKind},
};

/// Height of the tallest bar in the reference layout (container minus padding).
pub const BAR_AREA_HEIGHT: f32 = 200.0;

const TEXT_BAR_WIDTH: usize = 40;

/// Sink for everything the playback engine wants to show.
pub trait Presenter {
    /// Draws the un-stepped visualisation for a fresh input.
    fn render_initial(&mut self, input: Dataset<'_>);
    /// Reflects one step. `silent` suppresses the status message.
    fn apply_step(&mut self, step: &Step, silent: bool);
    /// Removes step-induced markers without touching the data.
    fn reset_visual_state(&mut self);
    fn report_status(&mut self, text: &str);
    fn report_progress(&mut self, cursor: usize, total: usize);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn render_initial(&mut self, input: Dataset<'_>) {
        (**self).render_initial(input);
    }

    fn apply_step(&mut self, step: &Step, silent: bool) {
        (**self).apply_step(step, silent);
    }

    fn reset_visual_state(&mut self) {
        (**self).reset_visual_state();
    }

    fn report_status(&mut self, text: &str) {
        (**self).report_status(text);
    }

    fn report_progress(&mut self, cursor: usize, total: usize) {
        (**self).report_progress(cursor, total);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMarker {
    Comparing,
    Active,
    Sorted,
    Searching,
    Found,
    Eliminated,
}

impl BarMarker {
    fn for_step(kind: StepKind) -> Option<Self> {
        match kind {
            StepKind::Compare => Some(BarMarker::Comparing),
            StepKind::Swap | StepKind::Pivot | StepKind::Select => Some(BarMarker::Active),
            StepKind::Sorted | StepKind::Merge => Some(BarMarker::Sorted),
            StepKind::Search => Some(BarMarker::Searching),
            StepKind::Found => Some(BarMarker::Found),
            StepKind::Eliminate => Some(BarMarker::Eliminated),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            BarMarker::Comparing => '?',
            BarMarker::Active => '*',
            BarMarker::Sorted => '=',
            BarMarker::Searching => '>',
            BarMarker::Found => '!',
            BarMarker::Eliminated => 'x',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub value: i64,
    pub marker: Option<BarMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub current: bool,
    pub visited: bool,
}

/// What is currently drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    #[default]
    Empty,
    Bars(Vec<Bar>),
    Graph {
        nodes: Vec<NodeView>,
        edges: Vec<GraphEdge>,
    },
}

/// Headless presenter holding the full visual state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    scene: Scene,
    status: String,
    cursor: usize,
    total: usize,
}

impl RenderModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.total)
    }

    /// Values currently shown by the bars, in position order.
    pub fn values(&self) -> Vec<i64> {
        match &self.scene {
            Scene::Bars(bars) => bars.iter().map(|bar| bar.value).collect(),
            _ => Vec::new(),
        }
    }

    /// Bar heights in layout units, proportional to the largest value.
    pub fn bar_heights(&self) -> Vec<f32> {
        let values = self.values();
        let max = values.iter().copied().max().unwrap_or(0);
        values
            .iter()
            .map(|value| bar_height(*value, max, BAR_AREA_HEIGHT))
            .collect()
    }

    /// Plain-text rendering of the current frame.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        match &self.scene {
            Scene::Empty => out.push_str("(nothing to show)\n"),
            Scene::Bars(bars) => {
                let max = bars.iter().map(|bar| bar.value).max().unwrap_or(0);
                for (index, bar) in bars.iter().enumerate() {
                    let height = bar_height(bar.value, max, TEXT_BAR_WIDTH as f32);
                    let marker = bar.marker.map(BarMarker::symbol).unwrap_or(' ');
                    let _ = writeln!(
                        out,
                        "{index:>3} {marker} {:<width$} {}",
                        "#".repeat(height.round() as usize),
                        bar.value,
                        width = TEXT_BAR_WIDTH,
                    );
                }
            }
            Scene::Graph { nodes, edges } => {
                for node in nodes {
                    let state = match (node.current, node.visited) {
                        (true, _) => "current",
                        (false, true) => "visited",
                        (false, false) => "unvisited",
                    };
                    let _ = writeln!(out, "  node {} [{state}]", node.id);
                }
                let edges: Vec<String> = edges
                    .iter()
                    .map(|edge| format!("{}-{}", edge.from, edge.to))
                    .collect();
                let _ = writeln!(out, "  edges: {}", edges.join(", "));
            }
        }

        let _ = writeln!(out, "Step: {} / {}", self.cursor, self.total);
        if !self.status.is_empty() {
            let _ = writeln!(out, "{}", self.status);
        }
        out
    }
}

impl Presenter for RenderModel {
    fn render_initial(&mut self, input: Dataset<'_>) {
        self.scene = match input {
            Dataset::Array(values) => Scene::Bars(
                values
                    .iter()
                    .map(|&value| Bar {
                        value,
                        marker: None,
                    })
                    .collect(),
            ),
            Dataset::Graph(graph) => Scene::Graph {
                nodes: graph
                    .nodes
                    .iter()
                    .map(|node| NodeView {
                        id: node.id,
                        x: node.x,
                        y: node.y,
                        current: false,
                        visited: false,
                    })
                    .collect(),
                edges: graph.edges.clone(),
            },
        };
    }

    fn apply_step(&mut self, step: &Step, silent: bool) {
        match &mut self.scene {
            Scene::Bars(bars) => {
                for bar in bars.iter_mut() {
                    bar.marker = None;
                }
                if let Some(snapshot) = &step.snapshot {
                    for (bar, value) in bars.iter_mut().zip(snapshot) {
                        bar.value = *value;
                    }
                }
                if let Some(marker) = BarMarker::for_step(step.kind) {
                    for &index in step.subjects.indices() {
                        if let Some(bar) = bars.get_mut(index) {
                            bar.marker = Some(marker);
                        }
                    }
                }
            }
            Scene::Graph { nodes, .. } => {
                let target = step
                    .subjects
                    .node()
                    .and_then(|id| nodes.iter_mut().find(|node| node.id == id));
                if let Some(node) = target {
                    match step.kind {
                        StepKind::Start | StepKind::Visit => node.current = true,
                        StepKind::Discover => node.visited = true,
                        _ => {}
                    }
                }
            }
            Scene::Empty => {}
        }

        if !silent {
            self.status = step.message.clone();
        }
    }

    fn reset_visual_state(&mut self) {
        match &mut self.scene {
            Scene::Bars(bars) => {
                for bar in bars.iter_mut() {
                    bar.marker = None;
                }
            }
            Scene::Graph { nodes, .. } => {
                for node in nodes.iter_mut() {
                    node.current = false;
                    node.visited = false;
                }
            }
            Scene::Empty => {}
        }
    }

    fn report_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn report_progress(&mut self, cursor: usize, total: usize) {
        self.cursor = cursor;
        self.total = total;
    }
}

/// Height of a bar scaled so that `max` fills `area`.
pub fn bar_height(value: i64, max: i64, area: f32) -> f32 {
    if max <= 0 || value <= 0 {
        return 0.0;
    }
    value as f32 / max as f32 * area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn bars(model: &RenderModel) -> Vec<Bar> {
        match model.scene() {
            Scene::Bars(bars) => bars.clone(),
            other => panic!("expected bars, got {other:?}"),
        }
    }

    #[test]
    fn array_step_replaces_values_and_markers() {
        let mut model = RenderModel::new();
        model.render_initial(Dataset::Array(&[3, 1, 2]));

        model.apply_step(&Step::array(StepKind::Swap, vec![0, 1], &[1, 3, 2], "swapped"), false);
        assert_eq!(model.values(), vec![1, 3, 2]);
        assert_eq!(bars(&model)[0].marker, Some(BarMarker::Active));
        assert_eq!(model.status(), "swapped");

        model.apply_step(&Step::array(StepKind::Compare, vec![1, 2], &[1, 3, 2], "cmp"), true);
        let bars = bars(&model);
        assert_eq!(bars[0].marker, None);
        assert_eq!(bars[2].marker, Some(BarMarker::Comparing));
        assert_eq!(model.status(), "swapped");
    }

    #[test]
    fn graph_markers_accumulate_until_reset() {
        let graph = Graph::demo();
        let mut model = RenderModel::new();
        model.render_initial(Dataset::Graph(&graph));

        model.apply_step(&Step::node(StepKind::Visit, 0, "visit"), false);
        model.apply_step(&Step::node(StepKind::Discover, 1, "discover"), false);
        let Scene::Graph { nodes, .. } = model.scene() else {
            panic!("expected graph scene");
        };
        assert!(nodes[0].current);
        assert!(nodes[1].visited);

        model.reset_visual_state();
        let Scene::Graph { nodes, .. } = model.scene() else {
            panic!("expected graph scene");
        };
        assert!(nodes.iter().all(|node| !node.current && !node.visited));
    }

    #[test]
    fn heights_are_proportional_to_max() {
        let mut model = RenderModel::new();
        model.render_initial(Dataset::Array(&[50, 100, 0]));

        assert_eq!(model.bar_heights(), vec![100.0, 200.0, 0.0]);
    }

    #[test]
    fn text_frame_includes_counter_and_status() {
        let mut model = RenderModel::new();
        model.render_initial(Dataset::Array(&[1, 2]));
        model.apply_step(&Step::array(StepKind::Found, vec![1], &[1, 2], "Target 2 found"), false);
        model.report_progress(2, 2);

        let text = model.render_text();
        assert!(text.contains("  1 !"));
        assert!(text.contains("Step: 2 / 2"));
        assert!(text.contains("Target 2 found"));
    }
}
