//! Instrumented search algorithms.

use crate::step::{Step, StepKind, Trace, TraceBuilder};

pub fn linear_search(values: &[i64], target: i64) -> Trace {
    let mut trace = TraceBuilder::new();

    for (index, value) in values.iter().enumerate() {
        trace.push(Step::array(
            StepKind::Search,
            vec![index],
            values,
            format!("Checking element at position {index}: {value}"),
        ));

        if *value == target {
            trace.push(Step::array(
                StepKind::Found,
                vec![index],
                values,
                format!("Target {target} found at position {index}!"),
            ));
            return trace.finish();
        }
    }

    trace.push(not_found(values, target));
    trace.finish()
}

/// Result of preparing and tracing a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySearchRun {
    /// Ascending copy of the input. Callers adopt it as the new input.
    pub sorted: Vec<i64>,
    pub trace: Trace,
}

/// Sorts the input ascending, then traces a binary search over it.
pub fn binary_search(input: &[i64], target: i64) -> BinarySearchRun {
    let mut sorted = input.to_vec();
    sorted.sort_unstable();
    let trace = binary_search_sorted(&sorted, target);
    BinarySearchRun { sorted, trace }
}

/// Traces a binary search over an already ascending slice.
pub fn binary_search_sorted(values: &[i64], target: i64) -> Trace {
    let mut trace = TraceBuilder::new();
    let (mut left, mut right) = (0usize, values.len());

    // Half-open window `left..right`.
    while left < right {
        let mid = (left + right - 1) / 2;
        let probe = values[mid];

        trace.push(Step::array(
            StepKind::Search,
            vec![mid],
            values,
            format!("Checking middle element at position {mid}: {probe}"),
        ));

        if probe == target {
            trace.push(Step::array(
                StepKind::Found,
                vec![mid],
                values,
                format!("Target {target} found at position {mid}!"),
            ));
            return trace.finish();
        }

        if probe < target {
            left = mid + 1;
            trace.push(Step::array(
                StepKind::Eliminate,
                (0..=mid).collect(),
                values,
                "Target is greater, searching right half",
            ));
        } else {
            right = mid;
            trace.push(Step::array(
                StepKind::Eliminate,
                (mid..values.len()).collect(),
                values,
                "Target is smaller, searching left half",
            ));
        }
    }

    trace.push(not_found(values, target));
    trace.finish()
}

fn not_found(values: &[i64], target: i64) -> Step {
    Step::array_terminal(
        StepKind::NotFound,
        values,
        format!("Target {target} not found in the array"),
    )
}
