use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    graph::{self, Graph},
    searching, sorting,
    step::Trace,
    VisualiserError,
};

/// Node every breadth-first traversal starts from.
pub const BFS_ORIGIN: usize = 0;

/// Closed set of instrumented algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
    BreadthFirstSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sorting,
    Searching,
    Graph,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Graph => "graph",
        })
    }
}

/// Asymptotic time classes for the best, average and worst case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeComplexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
}

/// Catalog entry shown alongside a visualisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub time: TimeComplexity,
    pub space: &'static str,
}

/// Output of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub trace: Trace,
    /// New array input the session must adopt (binary search sorts first).
    pub replaced_input: Option<Vec<i64>>,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BreadthFirstSearch,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble-sort",
            Algorithm::SelectionSort => "selection-sort",
            Algorithm::MergeSort => "merge-sort",
            Algorithm::QuickSort => "quick-sort",
            Algorithm::LinearSearch => "linear-search",
            Algorithm::BinarySearch => "binary-search",
            Algorithm::BreadthFirstSearch => "breadth-first-search",
        }
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn category(&self) -> Category {
        self.info().category
    }

    /// Whether the algorithm runs over the array input (as opposed to the graph).
    pub fn uses_array(&self) -> bool {
        self.category() != Category::Graph
    }

    pub fn info(&self) -> AlgorithmInfo {
        const QUADRATIC: TimeComplexity = TimeComplexity {
            best: "O(n²)",
            average: "O(n²)",
            worst: "O(n²)",
        };

        match self {
            Algorithm::BubbleSort => AlgorithmInfo {
                name: "Bubble Sort",
                category: Category::Sorting,
                description: "Simple comparison-based sorting algorithm",
                time: TimeComplexity {
                    best: "O(n)",
                    ..QUADRATIC
                },
                space: "O(1)",
            },
            Algorithm::SelectionSort => AlgorithmInfo {
                name: "Selection Sort",
                category: Category::Sorting,
                description: "Finds minimum element and places it at the beginning",
                time: QUADRATIC,
                space: "O(1)",
            },
            Algorithm::MergeSort => AlgorithmInfo {
                name: "Merge Sort",
                category: Category::Sorting,
                description:
                    "Divide and conquer algorithm that splits array and merges sorted halves",
                time: TimeComplexity {
                    best: "O(n log n)",
                    average: "O(n log n)",
                    worst: "O(n log n)",
                },
                space: "O(n)",
            },
            Algorithm::QuickSort => AlgorithmInfo {
                name: "Quick Sort",
                category: Category::Sorting,
                description: "Efficient divide-and-conquer algorithm using pivot partitioning",
                time: TimeComplexity {
                    best: "O(n log n)",
                    average: "O(n log n)",
                    worst: "O(n²)",
                },
                space: "O(log n)",
            },
            Algorithm::LinearSearch => AlgorithmInfo {
                name: "Linear Search",
                category: Category::Searching,
                description: "Sequential search through each element until target is found",
                time: TimeComplexity {
                    best: "O(1)",
                    average: "O(n)",
                    worst: "O(n)",
                },
                space: "O(1)",
            },
            Algorithm::BinarySearch => AlgorithmInfo {
                name: "Binary Search",
                category: Category::Searching,
                description: "Efficient search on sorted arrays using divide and conquer",
                time: TimeComplexity {
                    best: "O(1)",
                    average: "O(log n)",
                    worst: "O(log n)",
                },
                space: "O(1)",
            },
            Algorithm::BreadthFirstSearch => AlgorithmInfo {
                name: "Breadth-First Search",
                category: Category::Graph,
                description: "Graph traversal algorithm that explores vertices level by level",
                time: TimeComplexity {
                    best: "O(V + E)",
                    average: "O(V + E)",
                    worst: "O(V + E)",
                },
                space: "O(V)",
            },
        }
    }

    /// Runs the matching generator over the current input.
    pub fn generate(&self, values: &[i64], target: i64, graph: &Graph) -> Generated {
        let trace = match self {
            Algorithm::BubbleSort => sorting::bubble_sort(values),
            Algorithm::SelectionSort => sorting::selection_sort(values),
            Algorithm::MergeSort => sorting::merge_sort(values),
            Algorithm::QuickSort => sorting::quick_sort(values),
            Algorithm::LinearSearch => searching::linear_search(values, target),
            Algorithm::BinarySearch => {
                let run = searching::binary_search(values, target);
                let replaced_input = (run.sorted != values).then_some(run.sorted);
                return Generated {
                    trace: run.trace,
                    replaced_input,
                };
            }
            Algorithm::BreadthFirstSearch => graph::breadth_first_search(graph, BFS_ORIGIN),
        };

        Generated {
            trace,
            replaced_input: None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VisualiserError;

    /// Accepts the slug (`quick-sort`), the display name (`Quick Sort`) or
    /// `bfs`, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        if normalised == "bfs" {
            return Ok(Algorithm::BreadthFirstSearch);
        }

        Algorithm::ALL
            .into_iter()
            .find(|algorithm| {
                algorithm.slug() == normalised
                    || algorithm.name().to_ascii_lowercase().replace(' ', "-") == normalised
            })
            .ok_or_else(|| VisualiserError::UnknownAlgorithm(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn parses_slugs_names_and_aliases() {
        assert_eq!("quick-sort".parse::<Algorithm>().unwrap(), Algorithm::QuickSort);
        assert_eq!("Binary Search".parse::<Algorithm>().unwrap(), Algorithm::BinarySearch);
        assert_eq!(
            "breadth_first_search".parse::<Algorithm>().unwrap(),
            Algorithm::BreadthFirstSearch
        );
        assert_eq!("BFS".parse::<Algorithm>().unwrap(), Algorithm::BreadthFirstSearch);
    }

    #[test]
    fn unknown_names_fail_loudly() {
        let err = "bogo-sort".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, VisualiserError::UnknownAlgorithm(ref name) if name == "bogo-sort"));
    }

    #[test]
    fn every_slug_round_trips() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.slug().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn binary_search_reports_replaced_input_only_when_unsorted() {
        let graph = Graph::demo();
        let generated = Algorithm::BinarySearch.generate(&[5, 3, 8], 8, &graph);
        assert_eq!(generated.replaced_input, Some(vec![3, 5, 8]));

        let generated = Algorithm::BinarySearch.generate(&[3, 5, 8], 8, &graph);
        assert_eq!(generated.replaced_input, None);
    }

    #[test]
    fn graph_algorithm_ignores_array_input() {
        let generated = Algorithm::BreadthFirstSearch.generate(&[9, 9], 1, &Graph::demo());
        assert_eq!(generated.trace.last().unwrap().kind, StepKind::Complete);
        assert!(!Algorithm::BreadthFirstSearch.uses_array());
    }
}
