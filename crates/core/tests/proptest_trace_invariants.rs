//! Property-based invariant tests for trace generation and playback.
//!
//! 1. Generation is deterministic for every algorithm
//! 2. Sort traces end on the ascending permutation of the input
//! 3. Array snapshots always have the input's length
//! 4. Forward N then backward N restores the initial view
//! 5. Auto-play applies exactly the trace, in order

use std::time::Duration;

use algorithm_visualiser_core::{
    Algorithm, AppConfig, Category, Graph, Recorder, RenderModel, Session, StepKind,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-50i64..150, 0..24)
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn session_for(algorithm: Algorithm, values: Vec<i64>, target: i64) -> (Session, RenderModel) {
    let mut config = AppConfig::default();
    config.input.search_target = target;
    let mut session = Session::with_values(config, values).unwrap();
    let mut model = RenderModel::new();
    session.select_algorithm(algorithm, &mut model);
    (session, model)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn generation_is_deterministic(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
        target in -50i64..150,
    ) {
        let graph = Graph::demo();
        let first = algorithm.generate(&values, target, &graph);
        let second = algorithm.generate(&values, target, &graph);

        prop_assert_eq!(
            serde_json::to_string(&first.trace).unwrap(),
            serde_json::to_string(&second.trace).unwrap()
        );
        prop_assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2-3. Sorted output and snapshot length
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sorts_end_on_sorted_permutation(
        algorithm in prop::sample::select(vec![
            Algorithm::BubbleSort,
            Algorithm::SelectionSort,
            Algorithm::MergeSort,
            Algorithm::QuickSort,
        ]),
        values in prop::collection::vec(-50i64..150, 1..24),
    ) {
        let generated = algorithm.generate(&values, 0, &Graph::demo());
        let mut expected = values.clone();
        expected.sort();

        match generated.trace.last() {
            Some(last) => prop_assert_eq!(last.snapshot.as_ref(), Some(&expected)),
            // Merge and quick sort have nothing to split or partition.
            None => prop_assert!(values.len() <= 1, "{} gave no steps for {:?}", algorithm, values),
        }
    }

    #[test]
    fn snapshots_keep_input_length(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
        target in -50i64..150,
    ) {
        prop_assume!(algorithm.category() != Category::Graph);
        let generated = algorithm.generate(&values, target, &Graph::demo());

        for step in generated.trace.iter() {
            let snapshot = step.snapshot.as_ref().expect("array steps carry snapshots");
            prop_assert_eq!(snapshot.len(), values.len());
        }
    }

    #[test]
    fn read_only_steps_do_not_change_the_array(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        prop_assume!(algorithm.category() != Category::Graph);
        let generated = algorithm.generate(&values, 1, &Graph::demo());
        let mut previous = generated.replaced_input.clone().unwrap_or(values);

        for step in generated.trace.iter() {
            let snapshot = step.snapshot.clone().unwrap();
            if step.kind.is_read_only() {
                prop_assert_eq!(&snapshot, &previous, "{} changed the array", step.kind);
            }
            previous = snapshot;
        }
    }

    #[test]
    fn search_traces_end_on_a_terminal_step(
        algorithm in prop::sample::select(vec![Algorithm::LinearSearch, Algorithm::BinarySearch]),
        values in values_strategy(),
        target in -50i64..150,
    ) {
        let generated = algorithm.generate(&values, target, &Graph::demo());
        let last = generated.trace.last().unwrap();
        let expected = if values.contains(&target) { StepKind::Found } else { StepKind::NotFound };
        prop_assert_eq!(last.kind, expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Round trip through the playback controller
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn forward_then_backward_restores_initial_view(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
        target in -50i64..150,
        steps in 0usize..64,
    ) {
        let (mut session, mut model) = session_for(algorithm, values, target);
        session.ensure_trace(&mut model);
        let initial = model.scene().clone();
        let steps = steps.min(session.trace().unwrap().len());

        for _ in 0..steps {
            session.step_forward(&mut model);
        }
        prop_assert_eq!(session.cursor(), steps);
        for _ in 0..steps {
            session.step_backward(&mut model);
        }

        prop_assert_eq!(session.cursor(), 0);
        prop_assert_eq!(model.scene(), &initial);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Auto-play
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn auto_play_applies_whole_trace_in_order(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
        speed in 0.25f32..4.0,
    ) {
        let mut session = Session::with_values(AppConfig::default(), values).unwrap();
        let mut recorder = Recorder::new();
        session.select_algorithm(algorithm, &mut recorder);
        session.set_speed(speed).unwrap();
        session.play(&mut recorder);

        let mut ticks = 0;
        while session.is_playing() {
            session.tick(Duration::from_millis(250), &mut recorder);
            ticks += 1;
            prop_assert!(ticks < 100_000);
        }

        let applied: Vec<StepKind> = recorder.applied_steps().map(|(step, _)| step.kind).collect();
        prop_assert_eq!(applied, session.trace().unwrap().kinds());
        prop_assert!(session.pending_advance().is_none());
    }
}

#[test]
fn single_element_sorts_play_to_completion() {
    for algorithm in [Algorithm::MergeSort, Algorithm::QuickSort] {
        let mut session = Session::with_values(AppConfig::default(), vec![0]).unwrap();
        let mut recorder = Recorder::new();
        session.select_algorithm(algorithm, &mut recorder);
        session.play(&mut recorder);

        while session.is_playing() {
            session.tick(Duration::from_millis(250), &mut recorder);
        }

        assert!(session.trace().unwrap().is_empty());
        assert_eq!(recorder.applied_steps().count(), 0);
        assert_eq!(session.values(), &[0]);
    }
}
