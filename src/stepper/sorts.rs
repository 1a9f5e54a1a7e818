//! Sort schedules: the exact operation order each algorithm emits.
//!
//! Every algorithm body is the textbook loop written against a
//! [`SortContext`], which owns the working slice and records a step (with
//! a deep snapshot) at each observable operation. What counts as
//! observable per algorithm:
//!
//! - **bubble** — a compare step per adjacent comparison, a swap step per
//!   exchange; no early-exit flag
//! - **selection** — a compare step per scanned comparison, a swap step
//!   per real exchange (`Swap {i, i}` markers only when
//!   [`StepperOptions::noop_selection_swap`] is set)
//! - **insertion** — a write step per shift, one final write placing the
//!   key; inner comparisons are silent
//! - **merge** — a write step per element placed during a merge; splits
//!   are silent
//! - **quick** — Lomuto with the last element as pivot; a compare step
//!   per partition test, one swap step for the pivot placement;
//!   in-partition exchanges are silent and show up in later snapshots
//! - **heap** — a swap step per exchange during sift-down and extraction
//! - **shell** — gaps `n/2, n/4, …, 1`; a write step per element shift,
//!   plus the placement write when the held element moved; inner
//!   comparisons are silent
//!
//! [`CompareSteps::MutationsOnly`] suppresses the compare steps of
//! bubble, selection, and quick while leaving mutations untouched,
//! matching the screens that only highlight on change.

use crate::step::{StepKind, StepLog};
use crate::stepper::engine::{CompareSteps, SortAlgorithm, StepperOptions};

/// Run one algorithm over `items`, recording its steps into `log`.
pub(crate) fn execute<T: Ord + Clone>(
    algorithm: SortAlgorithm,
    items: &mut [T],
    options: &StepperOptions,
    log: &mut StepLog<T>,
) {
    if items.len() < 2 {
        // Nothing to compare; the run completes with zero steps.
        return;
    }
    let mut ctx = SortContext::new(items, log, options);
    match algorithm {
        SortAlgorithm::Bubble => bubble(&mut ctx),
        SortAlgorithm::Selection => selection(&mut ctx),
        SortAlgorithm::Insertion => insertion(&mut ctx),
        SortAlgorithm::Merge => merge(&mut ctx),
        SortAlgorithm::Quick => quick(&mut ctx),
        SortAlgorithm::Heap => heap(&mut ctx),
        SortAlgorithm::Shell => shell(&mut ctx),
    }
}

/// Working state plus the recording rules for one sort run.
///
/// Mutating helpers snapshot the slice immediately after applying their
/// change, so every recorded step satisfies "snapshot is the state after
/// this step".
struct SortContext<'a, T> {
    items: &'a mut [T],
    log: &'a mut StepLog<T>,
    compare_steps: CompareSteps,
    noop_selection_swap: bool,
}

impl<'a, T: Ord + Clone> SortContext<'a, T> {
    fn new(items: &'a mut [T], log: &'a mut StepLog<T>, options: &StepperOptions) -> Self {
        SortContext {
            items,
            log,
            compare_steps: options.compare_steps,
            noop_selection_swap: options.noop_selection_swap,
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn value(&self, index: usize) -> T {
        self.items[index].clone()
    }

    fn record(&mut self, kind: StepKind) {
        self.log.record(kind, self.items.to_vec());
    }

    fn record_compare(&mut self, a: usize, b: usize) {
        if self.compare_steps == CompareSteps::Every {
            self.record(StepKind::Compare { a, b });
        }
    }

    /// `items[a] > items[b]`, recorded as a compare step.
    fn greater(&mut self, a: usize, b: usize) -> bool {
        let result = self.items[a] > self.items[b];
        self.record_compare(a, b);
        result
    }

    /// `items[a] < items[b]`, recorded as a compare step.
    fn less(&mut self, a: usize, b: usize) -> bool {
        let result = self.items[a] < self.items[b];
        self.record_compare(a, b);
        result
    }

    /// `items[a] < items[b]` with no step; used where the schedule is
    /// defined by its mutations only (heap).
    fn less_silent(&self, a: usize, b: usize) -> bool {
        self.items[a] < self.items[b]
    }

    /// `items[idx] > key` with no step; shift-based schedules are defined
    /// by their writes alone.
    fn greater_than_key(&self, idx: usize, key: &T) -> bool {
        self.items[idx] > *key
    }

    /// Exchange two positions and record a swap step. `a == b` records a
    /// no-op marker without touching the slice.
    fn swap(&mut self, a: usize, b: usize) {
        if a != b {
            self.items.swap(a, b);
        }
        self.record(StepKind::Swap { a, b });
    }

    /// Exchange without recording; the change surfaces in the snapshot of
    /// the next recorded step.
    fn swap_silent(&mut self, a: usize, b: usize) {
        if a != b {
            self.items.swap(a, b);
        }
    }

    /// Copy `items[from]` into `items[to]` and record the write.
    fn shift(&mut self, from: usize, to: usize) {
        self.items[to] = self.items[from].clone();
        self.record(StepKind::Write { index: to });
    }

    /// Place a held value and record the write.
    fn write(&mut self, index: usize, value: T) {
        self.items[index] = value;
        self.record(StepKind::Write { index });
    }
}

fn bubble<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    for i in 0..n {
        for j in 0..n - 1 - i {
            if ctx.greater(j, j + 1) {
                ctx.swap(j, j + 1);
            }
        }
    }
}

fn selection<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    for i in 0..n - 1 {
        let mut min = i;
        for j in i + 1..n {
            if ctx.less(j, min) {
                min = j;
            }
        }
        if min != i {
            ctx.swap(i, min);
        } else if ctx.noop_selection_swap {
            ctx.swap(i, i);
        }
    }
}

fn insertion<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    for i in 1..n {
        let key = ctx.value(i);
        let mut j = i;
        while j > 0 && ctx.greater_than_key(j - 1, &key) {
            ctx.shift(j - 1, j);
            j -= 1;
        }
        ctx.write(j, key);
    }
}

fn merge<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    merge_sort(ctx, 0, n);
}

fn merge_sort<T: Ord + Clone>(ctx: &mut SortContext<'_, T>, lo: usize, hi: usize) {
    if hi - lo < 2 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort(ctx, lo, mid);
    merge_sort(ctx, mid, hi);
    merge_halves(ctx, lo, mid, hi);
}

fn merge_halves<T: Ord + Clone>(ctx: &mut SortContext<'_, T>, lo: usize, mid: usize, hi: usize) {
    let left: Vec<T> = ctx.items[lo..mid].to_vec();
    let right: Vec<T> = ctx.items[mid..hi].to_vec();
    let (mut i, mut j) = (0, 0);
    let mut k = lo;
    while i < left.len() && j < right.len() {
        // Ties take from the left half, keeping the merge stable.
        if right[j] < left[i] {
            ctx.write(k, right[j].clone());
            j += 1;
        } else {
            ctx.write(k, left[i].clone());
            i += 1;
        }
        k += 1;
    }
    while i < left.len() {
        ctx.write(k, left[i].clone());
        i += 1;
        k += 1;
    }
    while j < right.len() {
        ctx.write(k, right[j].clone());
        j += 1;
        k += 1;
    }
}

fn quick<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    quick_sort(ctx, 0, n);
}

fn quick_sort<T: Ord + Clone>(ctx: &mut SortContext<'_, T>, lo: usize, hi: usize) {
    if hi - lo < 2 {
        return;
    }
    let p = partition(ctx, lo, hi);
    quick_sort(ctx, lo, p);
    quick_sort(ctx, p + 1, hi);
}

/// Lomuto partition over `lo..hi` with the pivot at `hi - 1`. Returns the
/// pivot's final position.
fn partition<T: Ord + Clone>(ctx: &mut SortContext<'_, T>, lo: usize, hi: usize) -> usize {
    let pivot = hi - 1;
    let mut boundary = lo;
    for j in lo..pivot {
        if ctx.less(j, pivot) {
            ctx.swap_silent(j, boundary);
            boundary += 1;
        }
    }
    ctx.swap(boundary, pivot);
    boundary
}

fn heap<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    for i in (0..n / 2).rev() {
        sift_down(ctx, i, n);
    }
    for end in (1..n).rev() {
        ctx.swap(0, end);
        sift_down(ctx, 0, end);
    }
}

fn sift_down<T: Ord + Clone>(ctx: &mut SortContext<'_, T>, mut root: usize, end: usize) {
    loop {
        let child = 2 * root + 1;
        if child >= end {
            break;
        }
        let mut larger = child;
        if child + 1 < end && ctx.less_silent(child, child + 1) {
            larger = child + 1;
        }
        if ctx.less_silent(root, larger) {
            ctx.swap(root, larger);
            root = larger;
        } else {
            break;
        }
    }
}

fn shell<T: Ord + Clone>(ctx: &mut SortContext<'_, T>) {
    let n = ctx.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let held = ctx.value(i);
            let mut j = i;
            while j >= gap && ctx.greater_than_key(j - gap, &held) {
                ctx.shift(j - gap, j);
                j -= gap;
            }
            if j != i {
                ctx.write(j, held);
            }
        }
        gap /= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(algorithm: SortAlgorithm, input: &[i64], options: &StepperOptions) -> StepLog<i64> {
        let mut items = input.to_vec();
        let mut log = StepLog::new();
        execute(algorithm, &mut items, options, &mut log);
        log
    }

    #[test]
    fn mutations_only_policy_drops_compare_steps() {
        let every = run(
            SortAlgorithm::Bubble,
            &[3, 1, 2],
            &StepperOptions::default(),
        );
        let muted = run(
            SortAlgorithm::Bubble,
            &[3, 1, 2],
            &StepperOptions {
                compare_steps: CompareSteps::MutationsOnly,
                ..StepperOptions::default()
            },
        );
        assert!(every
            .steps()
            .iter()
            .any(|s| matches!(s.kind, StepKind::Compare { .. })));
        assert!(muted
            .steps()
            .iter()
            .all(|s| !matches!(s.kind, StepKind::Compare { .. })));
        // Same mutations either way.
        assert_eq!(
            every.last().map(|s| s.snapshot.clone()),
            muted.last().map(|s| s.snapshot.clone())
        );
    }

    #[test]
    fn merge_is_stable_on_ties() {
        // Equal keys keep their relative order: the left half wins ties.
        let log = run(
            SortAlgorithm::Merge,
            &[2, 1, 2, 1],
            &StepperOptions::default(),
        );
        assert_eq!(log.last().expect("steps").snapshot, vec![1, 1, 2, 2]);
    }

    #[test]
    fn sub_two_element_input_emits_nothing() {
        for algorithm in SortAlgorithm::ALL {
            assert!(run(algorithm, &[], &StepperOptions::default()).is_empty());
            assert!(run(algorithm, &[42], &StepperOptions::default()).is_empty());
        }
    }
}
