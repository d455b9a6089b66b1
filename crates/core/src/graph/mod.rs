use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::step::{NodeId, Step, StepKind, Trace, TraceBuilder};

/// Node position in the visualiser's 300x300 graph canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
}

/// Undirected edge as drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Small graph with a fixed layout and explicit neighbour order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Neighbour lists indexed by node id. Traversal follows this order.
    pub adjacency: Vec<Vec<NodeId>>,
}

impl Graph {
    /// The four-node graph used by the breadth-first search demo.
    pub fn demo() -> Self {
        let nodes = vec![
            GraphNode { id: 0, x: 150.0, y: 50.0 },
            GraphNode { id: 1, x: 50.0, y: 150.0 },
            GraphNode { id: 2, x: 250.0, y: 150.0 },
            GraphNode { id: 3, x: 150.0, y: 250.0 },
        ];
        let edges = [(0, 1), (0, 2), (1, 2), (2, 3)]
            .into_iter()
            .map(|(from, to)| GraphEdge { from, to })
            .collect();
        let adjacency = vec![vec![1, 2], vec![0, 2], vec![0, 1, 3], vec![2]];

        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::demo()
    }
}

/// Breadth-first traversal from `origin`.
pub fn breadth_first_search(graph: &Graph, origin: NodeId) -> Trace {
    let mut trace = TraceBuilder::new();
    let mut visited = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    trace.push(Step::node(
        StepKind::Start,
        origin,
        format!("Starting BFS from node {origin}"),
    ));

    while let Some(current) = queue.pop_front() {
        trace.push(Step::node(
            StepKind::Visit,
            current,
            format!("Visiting node {current}"),
        ));

        for &neighbour in graph.neighbours(current) {
            if visited.insert(neighbour) {
                queue.push_back(neighbour);
                trace.push(Step::node(
                    StepKind::Discover,
                    neighbour,
                    format!("Discovered node {neighbour}, added to queue"),
                ));
            }
        }
    }

    trace.push(Step::terminal(StepKind::Complete, "BFS traversal completed!"));
    trace.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(trace: &Trace) -> Vec<(StepKind, Option<NodeId>)> {
        trace
            .iter()
            .map(|step| (step.kind, step.subjects.node()))
            .collect()
    }

    #[test]
    fn demo_graph_traversal_order() {
        let trace = breadth_first_search(&Graph::demo(), 0);

        assert_eq!(
            summary(&trace),
            vec![
                (StepKind::Start, Some(0)),
                (StepKind::Visit, Some(0)),
                (StepKind::Discover, Some(1)),
                (StepKind::Discover, Some(2)),
                (StepKind::Visit, Some(1)),
                (StepKind::Visit, Some(2)),
                (StepKind::Discover, Some(3)),
                (StepKind::Visit, Some(3)),
                (StepKind::Complete, None),
            ]
        );
        assert!(trace.iter().all(|step| step.snapshot.is_none()));
    }

    #[test]
    fn isolated_origin_only_visits_itself() {
        let graph = Graph {
            nodes: vec![GraphNode { id: 0, x: 0.0, y: 0.0 }],
            edges: Vec::new(),
            adjacency: vec![Vec::new()],
        };

        assert_eq!(
            breadth_first_search(&graph, 0).kinds(),
            vec![StepKind::Start, StepKind::Visit, StepKind::Complete]
        );
    }

    #[test]
    fn unknown_node_has_no_neighbours() {
        assert!(Graph::demo().neighbours(42).is_empty());
    }
}
