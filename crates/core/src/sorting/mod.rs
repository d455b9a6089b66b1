//! Instrumented sorting algorithms.
//!
//! Each generator sorts a private copy of its input and records a [`Step`]
//! at every point the visualiser can show. The emitted sequence is part of
//! the observable output, so the loop structure follows the textbook
//! formulation of each algorithm exactly.

use crate::step::{Step, StepKind, Trace, TraceBuilder};

pub fn bubble_sort(input: &[i64]) -> Trace {
    let mut values = input.to_vec();
    let n = values.len();
    let mut trace = TraceBuilder::new();

    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - pass - 1 {
            trace.push(Step::array(
                StepKind::Compare,
                vec![j, j + 1],
                &values,
                format!("Comparing elements at positions {j} and {}", j + 1),
            ));

            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                trace.push(Step::array(
                    StepKind::Swap,
                    vec![j, j + 1],
                    &values,
                    format!("Swapped elements at positions {j} and {}", j + 1),
                ));
            }
        }

        let fixed = n - pass - 1;
        trace.push(Step::array(
            StepKind::Sorted,
            vec![fixed],
            &values,
            format!("Element at position {fixed} is now in correct position"),
        ));
    }

    if n > 0 {
        trace.push(Step::array(
            StepKind::Sorted,
            vec![0],
            &values,
            "Sorting completed! All elements are in correct positions",
        ));
    }

    trace.finish()
}

pub fn selection_sort(input: &[i64]) -> Trace {
    let mut values = input.to_vec();
    let n = values.len();
    let mut trace = TraceBuilder::new();

    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;
        trace.push(Step::array(
            StepKind::Select,
            vec![i],
            &values,
            format!("Finding minimum element from position {i}"),
        ));

        for j in i + 1..n {
            trace.push(Step::array(
                StepKind::Compare,
                vec![j, min_index],
                &values,
                format!("Comparing elements at positions {j} and {min_index}"),
            ));
            if values[j] < values[min_index] {
                min_index = j;
            }
        }

        if min_index != i {
            values.swap(i, min_index);
            trace.push(Step::array(
                StepKind::Swap,
                vec![i, min_index],
                &values,
                format!("Swapped minimum element to position {i}"),
            ));
        }

        trace.push(Step::array(
            StepKind::Sorted,
            vec![i],
            &values,
            format!("Element at position {i} is now in correct position"),
        ));
    }

    if n > 0 {
        trace.push(Step::array(
            StepKind::Sorted,
            vec![n - 1],
            &values,
            "Sorting completed! All elements are in correct positions",
        ));
    }

    trace.finish()
}

pub fn merge_sort(input: &[i64]) -> Trace {
    let mut values = input.to_vec();
    let mut trace = TraceBuilder::new();

    if values.len() > 1 {
        let right = values.len() - 1;
        merge_sort_range(&mut values, 0, right, &mut trace);
    }

    trace.finish()
}

fn merge_sort_range(values: &mut [i64], left: usize, right: usize, trace: &mut TraceBuilder) {
    if left < right {
        let mid = (left + right) / 2;
        merge_sort_range(values, left, mid, trace);
        merge_sort_range(values, mid + 1, right, trace);
        merge(values, left, mid, right, trace);
    }
}

fn merge(values: &mut [i64], left: usize, mid: usize, right: usize, trace: &mut TraceBuilder) {
    let mut merged = Vec::with_capacity(right - left + 1);
    let (mut i, mut j) = (left, mid + 1);

    while i <= mid && j <= right {
        trace.push(Step::array(
            StepKind::Compare,
            vec![i, j],
            values,
            format!("Comparing elements at positions {i} and {j}"),
        ));

        // `<=` keeps equal elements in their original order.
        if values[i] <= values[j] {
            merged.push(values[i]);
            i += 1;
        } else {
            merged.push(values[j]);
            j += 1;
        }
    }

    merged.extend_from_slice(&values[i..=mid]);
    merged.extend_from_slice(&values[j..=right]);
    values[left..=right].copy_from_slice(&merged);

    trace.push(Step::array(
        StepKind::Merge,
        (left..=right).collect(),
        values,
        "Merged sorted subarrays",
    ));
}

pub fn quick_sort(input: &[i64]) -> Trace {
    let mut values = input.to_vec();
    let mut trace = TraceBuilder::new();

    if values.len() > 1 {
        let high = values.len() - 1;
        quick_sort_range(&mut values, 0, high, &mut trace);
    }

    trace.finish()
}

fn quick_sort_range(values: &mut [i64], low: usize, high: usize, trace: &mut TraceBuilder) {
    if low < high {
        let pivot_index = partition(values, low, high, trace);
        if pivot_index > low {
            quick_sort_range(values, low, pivot_index - 1, trace);
        }
        quick_sort_range(values, pivot_index + 1, high, trace);
    }
}

/// Lomuto partition around the last element of `low..=high`.
fn partition(values: &mut [i64], low: usize, high: usize, trace: &mut TraceBuilder) -> usize {
    let pivot = values[high];
    trace.push(Step::array(
        StepKind::Pivot,
        vec![high],
        values,
        format!("Selected pivot: {pivot} at position {high}"),
    ));

    // Next slot for an element smaller than the pivot.
    let mut store = low;
    for j in low..high {
        trace.push(Step::array(
            StepKind::Compare,
            vec![j, high],
            values,
            format!("Comparing {} with pivot {pivot}", values[j]),
        ));

        if values[j] < pivot {
            values.swap(store, j);
            trace.push(Step::array(
                StepKind::Swap,
                vec![store, j],
                values,
                format!("Swapped elements at positions {store} and {j}"),
            ));
            store += 1;
        }
    }

    values.swap(store, high);
    trace.push(Step::array(
        StepKind::Swap,
        vec![store, high],
        values,
        "Placed pivot in correct position",
    ));

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Subjects;

    fn summary(trace: &Trace) -> Vec<(StepKind, Vec<usize>)> {
        trace
            .iter()
            .map(|step| (step.kind, step.subjects.indices().to_vec()))
            .collect()
    }

    fn final_snapshot(trace: &Trace) -> Vec<i64> {
        trace
            .last()
            .and_then(|step| step.snapshot.clone())
            .expect("sort traces end with a snapshot")
    }

    #[test]
    fn bubble_sort_three_elements() {
        let trace = bubble_sort(&[3, 1, 2]);

        assert_eq!(
            summary(&trace),
            vec![
                (StepKind::Compare, vec![0, 1]),
                (StepKind::Swap, vec![0, 1]),
                (StepKind::Compare, vec![1, 2]),
                (StepKind::Swap, vec![1, 2]),
                (StepKind::Sorted, vec![2]),
                (StepKind::Compare, vec![0, 1]),
                (StepKind::Sorted, vec![1]),
                (StepKind::Sorted, vec![0]),
            ]
        );
        assert_eq!(trace.get(1).unwrap().snapshot, Some(vec![1, 3, 2]));
        assert_eq!(trace.get(3).unwrap().snapshot, Some(vec![1, 2, 3]));
        assert_eq!(final_snapshot(&trace), vec![1, 2, 3]);
    }

    #[test]
    fn compare_steps_carry_unchanged_array() {
        let trace = bubble_sort(&[3, 1, 2]);
        assert_eq!(trace.get(0).unwrap().snapshot, Some(vec![3, 1, 2]));
    }

    #[test]
    fn empty_input_produces_empty_traces() {
        assert!(bubble_sort(&[]).is_empty());
        assert!(selection_sort(&[]).is_empty());
        assert!(merge_sort(&[]).is_empty());
        assert!(quick_sort(&[]).is_empty());
    }

    #[test]
    fn single_element_minimal_traces() {
        assert_eq!(summary(&bubble_sort(&[7])), vec![(StepKind::Sorted, vec![0])]);
        assert_eq!(summary(&selection_sort(&[7])), vec![(StepKind::Sorted, vec![0])]);
        assert!(merge_sort(&[7]).is_empty());
        assert!(quick_sort(&[7]).is_empty());
    }

    #[test]
    fn selection_sort_marks_each_pass() {
        let trace = selection_sort(&[2, 1]);

        assert_eq!(
            summary(&trace),
            vec![
                (StepKind::Select, vec![0]),
                (StepKind::Compare, vec![1, 0]),
                (StepKind::Swap, vec![0, 1]),
                (StepKind::Sorted, vec![0]),
                (StepKind::Sorted, vec![1]),
            ]
        );
        assert_eq!(final_snapshot(&trace), vec![1, 2]);
    }

    #[test]
    fn selection_sort_skips_swap_when_minimum_in_place() {
        let trace = selection_sort(&[1, 2]);
        assert!(!trace.kinds().contains(&StepKind::Swap));
    }

    #[test]
    fn merge_sort_emits_merge_ranges() {
        let trace = merge_sort(&[4, 3, 2, 1]);

        let merges: Vec<Vec<usize>> = trace
            .iter()
            .filter(|step| step.kind == StepKind::Merge)
            .map(|step| step.subjects.indices().to_vec())
            .collect();
        assert_eq!(merges, vec![vec![0, 1], vec![2, 3], vec![0, 1, 2, 3]]);
        assert_eq!(final_snapshot(&trace), vec![1, 2, 3, 4]);
    }

    #[test]
    fn quick_sort_places_pivot_last() {
        let trace = quick_sort(&[3, 1, 2]);

        assert_eq!(
            summary(&trace),
            vec![
                (StepKind::Pivot, vec![2]),
                (StepKind::Compare, vec![0, 2]),
                (StepKind::Compare, vec![1, 2]),
                (StepKind::Swap, vec![0, 1]),
                (StepKind::Swap, vec![1, 2]),
            ]
        );
        assert_eq!(final_snapshot(&trace), vec![1, 2, 3]);
    }

    #[test]
    fn sorts_handle_duplicates_and_negatives() {
        let input = [5, -1, 5, 0, -1, 3];
        let mut expected = input.to_vec();
        expected.sort();

        for trace in [
            bubble_sort(&input),
            selection_sort(&input),
            merge_sort(&input),
            quick_sort(&input),
        ] {
            assert_eq!(final_snapshot(&trace), expected);
            assert!(trace
                .iter()
                .all(|step| step.snapshot.as_ref().map(Vec::len) == Some(input.len())));
            assert!(trace
                .iter()
                .all(|step| matches!(step.subjects, Subjects::Indices(_))));
        }
    }
}
