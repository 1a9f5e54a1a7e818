// Integration tests for run lifecycle, pacing, and cancellation

use algotty::stepper::engine::{
    Algorithm, RunState, SortAlgorithm, Stepper, StepperOptions, TraversalOrder,
};
use algotty::stepper::errors::EngineError;

#[test]
fn test_lifecycle_idle_running_completed() {
    let mut stepper = Stepper::sort(vec![3, 1, 2], SortAlgorithm::Insertion, StepperOptions::default())
        .expect("construction failed");
    assert_eq!(stepper.state(), RunState::Idle);
    assert_eq!(
        stepper.total_scheduled(),
        None,
        "no schedule exists before start"
    );
    assert_eq!(stepper.emitted_len(), 0);

    stepper.start(100, 0);
    assert_eq!(stepper.state(), RunState::Running);
    let total = stepper.total_scheduled().expect("schedule exists once started");
    assert!(total > 1);
    assert_eq!(stepper.emitted_len(), 1, "the first step is delivered at start");

    let mut now = 0;
    while !stepper.is_complete() {
        now += 100;
        stepper.tick(now);
    }
    assert_eq!(stepper.state(), RunState::Completed);
    assert_eq!(stepper.emitted_len(), total);
}

#[test]
fn test_tick_before_due_delivers_nothing() {
    let mut stepper = Stepper::sort(vec![2, 1], SortAlgorithm::Bubble, StepperOptions::default())
        .expect("construction failed");
    stepper.start(100, 0);
    assert_eq!(stepper.emitted_len(), 1);

    assert_eq!(stepper.tick(50), None);
    assert_eq!(stepper.tick(99), None);
    assert_eq!(stepper.tick(100), Some(1));
    assert!(
        stepper.is_complete(),
        "bubble over two inverted values is compare + swap"
    );
}

#[test]
fn test_cancel_freezes_the_emitted_prefix() {
    let mut stepper = Stepper::sort(vec![9, 8, 7, 6], SortAlgorithm::Bubble, StepperOptions::default())
        .expect("construction failed");
    stepper.start(100, 0);
    stepper.tick(100);
    let before = stepper.emitted().to_vec();

    stepper.cancel();
    assert_eq!(stepper.state(), RunState::Cancelled);
    assert_eq!(
        stepper.tick(10_000),
        None,
        "a cancelled run never delivers again"
    );
    assert_eq!(stepper.emitted(), before.as_slice());

    // Idempotent
    stepper.cancel();
    assert_eq!(stepper.state(), RunState::Cancelled);

    let summary = stepper.summary().expect("cancelled runs have summaries");
    assert_eq!(summary.state, RunState::Cancelled);
    assert_eq!(summary.total_steps, 2);
}

#[test]
fn test_unknown_algorithm_name() {
    match Algorithm::from_name("bogo") {
        Err(EngineError::UnknownAlgorithm { name }) => assert_eq!(name, "bogo"),
        other => panic!("expected UnknownAlgorithm, got {other:?}"),
    }
    assert!(matches!(
        Algorithm::from_name("  QuIcK "),
        Ok(Algorithm::Sort(SortAlgorithm::Quick))
    ));
    assert!(matches!(
        Algorithm::from_name("postorder"),
        Ok(Algorithm::Traversal(TraversalOrder::Post))
    ));
}

#[test]
fn test_with_algorithm_builds_a_bst_for_traversal_names() {
    let mut stepper = Stepper::with_algorithm(
        vec![2, 1, 3],
        Algorithm::Traversal(TraversalOrder::In),
        StepperOptions::default(),
    )
    .expect("construction failed");
    stepper.start(0, 0);

    assert!(stepper.tree().is_some());
    assert!(
        stepper.input().is_empty(),
        "traversal output starts from an empty visited list"
    );
    assert_eq!(
        stepper.last_emitted().expect("three visits").snapshot,
        vec![1, 2, 3]
    );
}

#[test]
fn test_unbounded_delay_never_becomes_due() {
    let mut stepper = Stepper::sort(vec![4, 3, 2, 1], SortAlgorithm::Selection, StepperOptions::default())
        .expect("construction failed");
    stepper.start(u64::MAX, 0);
    assert_eq!(stepper.emitted_len(), 1);
    assert_eq!(
        stepper.tick(u64::MAX - 1),
        None,
        "the saturated due time keeps the run paused"
    );
    assert_eq!(stepper.state(), RunState::Running);
}

#[test]
fn test_mid_run_delay_change_affects_only_future_gaps() {
    let mut stepper = Stepper::sort(vec![5, 4, 3, 2, 1], SortAlgorithm::Bubble, StepperOptions::default())
        .expect("construction failed");
    stepper.start(100, 0); // step 0 delivered, next due at 100

    assert_eq!(stepper.tick(50), None);
    stepper.set_delay(10);
    assert_eq!(stepper.tick(99), None, "the pending gap keeps its anchor");
    assert_eq!(stepper.tick(100), Some(1));
    assert_eq!(stepper.tick(105), None);
    assert_eq!(stepper.tick(110), Some(2), "the new gap applies after that");
}

#[test]
fn test_set_delay_zero_drains_on_the_next_tick() {
    let mut stepper = Stepper::sort(vec![5, 4, 3, 2, 1], SortAlgorithm::Heap, StepperOptions::default())
        .expect("construction failed");
    stepper.start(1_000, 0);
    assert_eq!(stepper.emitted_len(), 1);

    stepper.set_delay(0);
    let last = stepper.tick(1);
    assert!(stepper.is_complete());
    assert_eq!(last, stepper.total_scheduled().map(|t| t - 1));
    assert_eq!(
        stepper.emitted_len(),
        stepper.total_scheduled().expect("started")
    );
}

#[test]
fn test_run_to_completion_delivers_in_order() {
    let mut seen = Vec::new();
    let mut stepper = Stepper::sort(vec![3, 2, 1], SortAlgorithm::Quick, StepperOptions::default())
        .expect("construction failed");
    stepper.run_to_completion(|step| seen.push(step.seq));
    assert!(stepper.is_complete());
    assert_eq!(seen, (0..stepper.emitted_len()).collect::<Vec<_>>());
}

#[test]
fn test_run_to_completion_skips_already_delivered_steps() {
    let mut stepper = Stepper::sort(vec![6, 5, 4, 3], SortAlgorithm::Bubble, StepperOptions::default())
        .expect("construction failed");
    stepper.start(100, 0); // delivers step 0

    let mut seen = Vec::new();
    stepper.run_to_completion(|step| seen.push(step.seq));
    assert_eq!(
        seen.first(),
        Some(&1),
        "already-delivered steps are not replayed"
    );
    assert!(stepper.is_complete());
}

#[test]
fn test_summary_reports_final_snapshot() {
    let mut stepper = Stepper::sort(vec![2, 3, 1], SortAlgorithm::Shell, StepperOptions::default())
        .expect("construction failed");
    assert!(stepper.summary().is_none(), "no summary while idle");

    stepper.start(0, 0);
    let summary = stepper.summary().expect("completed");
    assert_eq!(summary.state, RunState::Completed);
    assert_eq!(summary.final_snapshot, vec![1, 2, 3]);
    assert_eq!(summary.total_steps, stepper.emitted_len());
}
