// Integration tests for the sort schedules

use algotty::step::StepKind;
use algotty::stepper::engine::{SortAlgorithm, Stepper, StepperOptions};
use algotty::stepper::errors::EngineError;
use rustc_hash::FxHashMap;

fn completed_sort(values: Vec<i64>, algorithm: SortAlgorithm) -> Stepper<i64> {
    let mut stepper =
        Stepper::sort(values, algorithm, StepperOptions::default()).expect("construction failed");
    stepper.start(0, 0);
    stepper
}

fn multiset(values: &[i64]) -> FxHashMap<i64, usize> {
    let mut counts = FxHashMap::default();
    for &v in values {
        *counts.entry(v).or_insert(0usize) += 1;
    }
    counts
}

#[test]
fn test_every_algorithm_sorts_a_shuffled_input() {
    let input = vec![9, -2, 7, 7, 0, 31, 4, -2, 18, 1];
    let mut expected = input.clone();
    expected.sort();

    for algorithm in SortAlgorithm::ALL {
        let stepper = completed_sort(input.clone(), algorithm);
        assert!(stepper.is_complete(), "{} did not complete", algorithm.name());
        let last = stepper.last_emitted().expect("no steps emitted");
        assert_eq!(
            last.snapshot,
            expected,
            "{} final snapshot is not the sorted input",
            algorithm.name()
        );
    }
}

#[test]
fn test_swap_based_sorts_keep_every_snapshot_a_permutation() {
    // Swap-only schedules never hold an element in flight, so each
    // snapshot they record carries the full multiset. (Shift-based ones
    // legitimately duplicate values mid-shift.)
    let input = vec![5, 1, 5, 3, 1, 5];
    let expected = multiset(&input);
    for algorithm in [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ] {
        let stepper = completed_sort(input.clone(), algorithm);
        for step in stepper.emitted() {
            assert_eq!(
                multiset(&step.snapshot),
                expected,
                "{} step #{} broke the multiset",
                algorithm.name(),
                step.seq
            );
        }
    }
}

#[test]
fn test_trivial_inputs_complete_with_zero_steps() {
    for algorithm in SortAlgorithm::ALL {
        for input in [Vec::new(), vec![42]] {
            let mut stepper = Stepper::sort(input.clone(), algorithm, StepperOptions::default())
                .expect("construction failed");
            // Non-zero delay: completion must not wait for pacing.
            stepper.start(250, 0);
            assert!(
                stepper.is_complete(),
                "{} on {:?} should complete immediately",
                algorithm.name(),
                input
            );
            assert_eq!(stepper.emitted_len(), 0);
            let summary = stepper.summary().expect("terminal run has a summary");
            assert_eq!(summary.total_steps, 0);
            assert_eq!(summary.final_snapshot, input);
        }
    }
}

#[test]
fn test_sorted_input_costs_bubble_only_compares() {
    let stepper = completed_sort(vec![1, 2, 3, 4], SortAlgorithm::Bubble);
    let compares = stepper
        .emitted()
        .iter()
        .filter(|s| matches!(s.kind, StepKind::Compare { .. }))
        .count();
    let swaps = stepper
        .emitted()
        .iter()
        .filter(|s| matches!(s.kind, StepKind::Swap { .. }))
        .count();
    assert_eq!(compares, 6, "n=4 bubble does 3+2+1 comparisons");
    assert_eq!(swaps, 0);
}

#[test]
fn test_bubble_first_step_and_sequence_numbers() {
    let stepper = completed_sort(vec![5, 3, 8, 1], SortAlgorithm::Bubble);
    let steps = stepper.emitted();

    assert_eq!(steps[0].seq, 0);
    assert_eq!(steps[0].kind, StepKind::Compare { a: 0, b: 1 });
    assert_eq!(
        steps[0].snapshot,
        vec![5, 3, 8, 1],
        "compares leave the data untouched"
    );
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.seq, i, "sequence numbers must be contiguous from zero");
    }
    assert_eq!(
        stepper.last_emitted().expect("steps").snapshot,
        vec![1, 3, 5, 8]
    );
}

#[test]
fn test_pacing_never_changes_step_content() {
    let input = vec![12, 4, 9, 1, 30, 2];
    for algorithm in SortAlgorithm::ALL {
        let drained = completed_sort(input.clone(), algorithm);

        let mut paced = Stepper::sort(input.clone(), algorithm, StepperOptions::default())
            .expect("construction failed");
        paced.start(100, 0);
        let mut now = 0;
        while !paced.is_complete() {
            now += 100;
            paced.tick(now);
        }

        assert_eq!(
            paced.emitted(),
            drained.emitted(),
            "{} steps depend on pacing",
            algorithm.name()
        );
    }
}

#[test]
fn test_selection_noop_swap_marker_is_opt_in() {
    // The minimum of the first pass is already in place at index 0.
    let input = vec![1, 3, 2];

    let default_run = completed_sort(input.clone(), SortAlgorithm::Selection);
    assert!(
        !default_run
            .emitted()
            .iter()
            .any(|s| matches!(s.kind, StepKind::Swap { a, b } if a == b)),
        "no-op swaps must be elided by default"
    );

    let mut options = StepperOptions::default();
    options.noop_selection_swap = true;
    let mut marked =
        Stepper::sort(input, SortAlgorithm::Selection, options).expect("construction failed");
    marked.start(0, 0);
    assert!(
        marked
            .emitted()
            .iter()
            .any(|s| matches!(s.kind, StepKind::Swap { a, b } if a == b)),
        "the flag records the in-place minimum as a self-swap"
    );
}

#[test]
fn test_merge_emits_writes_only() {
    let stepper = completed_sort(vec![4, 3, 2, 1], SortAlgorithm::Merge);
    assert_eq!(stepper.emitted_len(), 8, "two 2-merges plus one 4-merge");
    assert!(stepper
        .emitted()
        .iter()
        .all(|s| matches!(s.kind, StepKind::Write { .. })));
    assert_eq!(
        stepper.last_emitted().expect("steps").snapshot,
        vec![1, 2, 3, 4]
    );
}

#[test]
fn test_step_kind_grammar_per_algorithm() {
    let input = vec![7, 2, 9, 4, 1, 8];
    for algorithm in SortAlgorithm::ALL {
        let stepper = completed_sort(input.clone(), algorithm);
        for step in stepper.emitted() {
            let ok = match (algorithm, step.kind) {
                (SortAlgorithm::Merge, StepKind::Write { .. }) => true,
                (SortAlgorithm::Merge, _) => false,
                (SortAlgorithm::Heap, StepKind::Swap { .. }) => true,
                (SortAlgorithm::Heap, _) => false,
                (
                    SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Quick,
                    StepKind::Compare { .. } | StepKind::Swap { .. },
                ) => true,
                (
                    SortAlgorithm::Insertion | SortAlgorithm::Shell,
                    StepKind::Write { .. },
                ) => true,
                _ => false,
            };
            assert!(
                ok,
                "{} emitted unexpected {:?}",
                algorithm.name(),
                step.kind
            );
        }
    }
}

#[test]
fn test_oversized_input_is_rejected_up_front() {
    let values: Vec<i64> = (0..65).collect();
    let result = Stepper::sort(values, SortAlgorithm::Quick, StepperOptions::default());
    assert!(matches!(result, Err(EngineError::InvalidInput { .. })));

    // A raised cap accepts the same input.
    let mut options = StepperOptions::default();
    options.max_items = 100;
    let stepper = Stepper::sort((0..65).rev().collect(), SortAlgorithm::Quick, options)
        .expect("raised limit should accept 65 values");
    assert!(!stepper.is_complete());
}
