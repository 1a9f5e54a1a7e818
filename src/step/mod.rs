//! Immutable step records and the per-run step log.
//!
//! A [`Step`] is the unit of observable algorithm progress: what happened
//! (compare, swap, write, or visit), where it happened, and a deep snapshot
//! of the working state taken right after it applied. Consumers render from
//! snapshots rather than deltas, so a skipped render never drifts out of
//! sync with the run.
//!
//! Steps are appended to a [`StepLog`] by the active run only. Once
//! recorded they are never mutated; readers only ever get shared
//! references.

use crate::tree::NodeId;

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Two positions were compared; no mutation.
    Compare { a: usize, b: usize },
    /// The values at two positions were exchanged.
    Swap { a: usize, b: usize },
    /// One position was overwritten (a shift or a placement).
    Write { index: usize },
    /// A tree node was visited.
    Visit { node: NodeId },
}

impl StepKind {
    /// Short lowercase tag used by the trace pane and headless output.
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Compare { .. } => "compare",
            StepKind::Swap { .. } => "swap",
            StepKind::Write { .. } => "write",
            StepKind::Visit { .. } => "visit",
        }
    }
}

/// One immutable unit of observable algorithm progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    /// Position in the run's total order: starts at 0, contiguous, unique
    /// within the run.
    pub seq: usize,

    /// What happened.
    pub kind: StepKind,

    /// Full working state right after this step applied — the sequence for
    /// sorts, the visited-values prefix for traversals.
    pub snapshot: Vec<T>,
}

/// Append-only list of the steps recorded by one run.
///
/// Sequence numbers are assigned at [`record`](StepLog::record) time and
/// re-checked by [`push`](StepLog::push). A gap or repeat means an emitter
/// bug; the log aborts rather than continue with a broken total order.
#[derive(Debug, Clone)]
pub struct StepLog<T> {
    steps: Vec<Step<T>>,
}

impl<T> StepLog<T> {
    /// Create an empty log.
    pub fn new() -> Self {
        StepLog { steps: Vec::new() }
    }

    /// Record a step, assigning the next sequence number. Returns the
    /// assigned number.
    pub fn record(&mut self, kind: StepKind, snapshot: Vec<T>) -> usize {
        let seq = self.steps.len();
        self.push(Step {
            seq,
            kind,
            snapshot,
        });
        seq
    }

    /// Append a fully-formed step.
    ///
    /// Panics if the step's sequence number is not the next one in line —
    /// emitted steps are immutable facts and their order is total.
    pub fn push(&mut self, step: Step<T>) {
        assert!(
            step.seq == self.steps.len(),
            "non-contiguous step sequence: got {}, expected {}",
            step.seq,
            self.steps.len()
        );
        self.steps.push(step);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Look up a step by sequence number.
    pub fn get(&self, seq: usize) -> Option<&Step<T>> {
        self.steps.get(seq)
    }

    /// All recorded steps, in order.
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// The most recently recorded step.
    pub fn last(&self) -> Option<&Step<T>> {
        self.steps.last()
    }
}

impl<T> Default for StepLog<T> {
    fn default() -> Self {
        StepLog::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_assigns_contiguous_sequence_numbers() {
        let mut log: StepLog<i64> = StepLog::new();
        assert_eq!(log.record(StepKind::Compare { a: 0, b: 1 }, vec![2, 1]), 0);
        assert_eq!(log.record(StepKind::Swap { a: 0, b: 1 }, vec![1, 2]), 1);
        assert_eq!(log.len(), 2);
        for (i, step) in log.steps().iter().enumerate() {
            assert_eq!(step.seq, i);
        }
    }

    #[test]
    #[should_panic(expected = "non-contiguous step sequence")]
    fn push_rejects_out_of_order_steps() {
        let mut log: StepLog<i64> = StepLog::new();
        log.push(Step {
            seq: 3,
            kind: StepKind::Write { index: 0 },
            snapshot: vec![7],
        });
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let mut log: StepLog<i64> = StepLog::new();
        let mut working = vec![4, 2];
        log.record(StepKind::Compare { a: 0, b: 1 }, working.clone());
        working.swap(0, 1);
        assert_eq!(log.get(0).expect("step 0").snapshot, vec![4, 2]);
    }
}
