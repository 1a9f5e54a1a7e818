// Execution engine: one run of one algorithm, paced step by step

use crate::step::{Step, StepLog};
use crate::stepper::errors::EngineError;
use crate::stepper::{sorts, traversals};
use crate::tree::Tree;

/// Default cap on sequence length at construction. Every step stores a
/// full snapshot, so the cap bounds a run's memory; callers that want
/// bigger inputs raise it through [`StepperOptions`].
pub const DEFAULT_MAX_ITEMS: usize = 64;

/// The seven sort schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Shell,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 7] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
        SortAlgorithm::Shell,
    ];

    /// The name accepted by [`Algorithm::from_name`] and shown in the UI.
    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Heap => "heap",
            SortAlgorithm::Shell => "shell",
        }
    }
}

/// The three traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Pre,
    In,
    Post,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 3] =
        [TraversalOrder::Pre, TraversalOrder::In, TraversalOrder::Post];

    pub fn name(self) -> &'static str {
        match self {
            TraversalOrder::Pre => "preorder",
            TraversalOrder::In => "inorder",
            TraversalOrder::Post => "postorder",
        }
    }
}

/// Either family, as selected by name at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sort(SortAlgorithm),
    Traversal(TraversalOrder),
}

impl Algorithm {
    /// Resolve a user-supplied name. Matching is case-insensitive and
    /// ignores surrounding whitespace; anything outside the fixed set is
    /// [`EngineError::UnknownAlgorithm`].
    pub fn from_name(name: &str) -> Result<Algorithm, EngineError> {
        let wanted = name.trim().to_ascii_lowercase();
        for algorithm in SortAlgorithm::ALL {
            if algorithm.name() == wanted {
                return Ok(Algorithm::Sort(algorithm));
            }
        }
        for order in TraversalOrder::ALL {
            if order.name() == wanted {
                return Ok(Algorithm::Traversal(order));
            }
        }
        Err(EngineError::UnknownAlgorithm {
            name: name.to_string(),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sort(algorithm) => algorithm.name(),
            Algorithm::Traversal(order) => order.name(),
        }
    }
}

/// Whether comparisons that mutate nothing still record a step.
///
/// `Every` highlights each comparison (the default); `MutationsOnly`
/// records swaps and writes only. Pure-mutation schedules (merge, heap)
/// are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareSteps {
    Every,
    MutationsOnly,
}

/// Tunables captured at construction and fixed for the run.
#[derive(Debug, Clone)]
pub struct StepperOptions {
    /// Most sequence elements accepted; exceeding it is `InvalidInput`.
    pub max_items: usize,

    /// Compare-step granularity.
    pub compare_steps: CompareSteps,

    /// Record a `Swap {i, i}` marker when selection sort finds its
    /// minimum already in place.
    pub noop_selection_swap: bool,
}

impl Default for StepperOptions {
    fn default() -> Self {
        StepperOptions {
            max_items: DEFAULT_MAX_ITEMS,
            compare_steps: CompareSteps::Every,
            noop_selection_swap: false,
        }
    }
}

/// Lifecycle of a run. Terminal states are final; a new run means a new
/// [`Stepper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Cancelled)
    }
}

/// Terminal notification: how the run ended, how many steps it emitted,
/// and the state it ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary<T> {
    pub state: RunState,
    pub total_steps: usize,
    pub final_snapshot: Vec<T>,
}

/// What the run executes over.
#[derive(Debug, Clone)]
enum Plan<T> {
    Sort {
        algorithm: SortAlgorithm,
        values: Vec<T>,
    },
    Traverse {
        order: TraversalOrder,
        tree: Tree<T>,
    },
}

/// One run of one algorithm.
///
/// `start` materializes the whole schedule into a private log (the input
/// copy is consumed there; pacing can never change step content), then
/// delivery advances a cursor over it: immediately and fully for a zero
/// delay, one due step per [`tick`](Stepper::tick) otherwise. Only the
/// delivered prefix is observable.
#[derive(Debug)]
pub struct Stepper<T> {
    /// Schedule input, fixed at construction.
    plan: Plan<T>,

    /// Options captured at construction.
    options: StepperOptions,

    /// Materialized schedule; empty until start.
    log: StepLog<T>,

    /// Steps delivered so far; `log.steps()[..cursor]` is the visible
    /// prefix.
    cursor: usize,

    state: RunState,

    /// Gap between deliveries. Mutable mid-run via `set_delay`.
    delay_ms: u64,

    /// Caller-clock instant the next step is due; meaningful while
    /// running with a non-zero delay.
    next_due_ms: u64,
}

impl<T: Ord + Clone> Stepper<T> {
    /// Construct a sort run. Fails with [`EngineError::InvalidInput`]
    /// when the sequence exceeds `options.max_items`; no run exists on
    /// error.
    pub fn sort(
        values: Vec<T>,
        algorithm: SortAlgorithm,
        options: StepperOptions,
    ) -> Result<Self, EngineError> {
        if values.len() > options.max_items {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "sequence has {} elements (limit is {})",
                    values.len(),
                    options.max_items
                ),
            });
        }
        atrace!("sort stepper constructed: {} ({} items)", algorithm.name(), values.len());
        Ok(Stepper::with_plan(Plan::Sort { algorithm, values }, options))
    }

    /// Construct a traversal run over an already-built tree. Input
    /// validation lives in the tree builders, so this cannot fail.
    pub fn traversal(tree: Tree<T>, order: TraversalOrder, options: StepperOptions) -> Self {
        atrace!("traversal stepper constructed: {} ({} nodes)", order.name(), tree.len());
        Stepper::with_plan(Plan::Traverse { order, tree }, options)
    }

    /// Name-driven construction: sort names run over the values directly,
    /// traversal names build a search tree from them first.
    pub fn with_algorithm(
        values: Vec<T>,
        algorithm: Algorithm,
        options: StepperOptions,
    ) -> Result<Self, EngineError> {
        match algorithm {
            Algorithm::Sort(algorithm) => Stepper::sort(values, algorithm, options),
            Algorithm::Traversal(order) => {
                let tree = Tree::bst(values)?;
                Ok(Stepper::traversal(tree, order, options))
            }
        }
    }

    fn with_plan(plan: Plan<T>, options: StepperOptions) -> Self {
        Stepper {
            plan,
            options,
            log: StepLog::new(),
            cursor: 0,
            state: RunState::Idle,
            delay_ms: 0,
            next_due_ms: 0,
        }
    }

    /// Begin the run: build the schedule, then deliver.
    ///
    /// With `delay_ms == 0` every step is delivered synchronously before
    /// this returns. Otherwise the first step is delivered immediately
    /// and each later one becomes due `delay_ms` after the previous, on
    /// the caller's clock (`now_ms`). A schedule with nothing to do
    /// completes on the spot.
    ///
    /// Only an idle run can start; anywhere else this is a no-op (the
    /// playback layer is the gatekeeper for restarts).
    pub fn start(&mut self, delay_ms: u64, now_ms: u64) {
        debug_assert!(
            self.state == RunState::Idle,
            "start on a run that already ran"
        );
        if self.state != RunState::Idle {
            return;
        }
        adebug!("run start: algorithm={} delay_ms={}", self.algorithm().name(), delay_ms);
        self.delay_ms = delay_ms;
        self.materialize();
        self.state = RunState::Running;
        if self.log.is_empty() {
            self.finish();
            return;
        }
        if self.delay_ms == 0 {
            self.drain();
        } else {
            self.advance(now_ms);
        }
    }

    fn materialize(&mut self) {
        match &self.plan {
            Plan::Sort { algorithm, values } => {
                let mut working = values.clone();
                sorts::execute(*algorithm, &mut working, &self.options, &mut self.log);
            }
            Plan::Traverse { order, tree } => {
                traversals::execute(tree, *order, &mut self.log);
            }
        }
    }

    /// Deliver the next step if it is due. Returns the delivered sequence
    /// number, or `None` when nothing was due (not running, or the gap
    /// has not elapsed). With a zero delay the remainder drains at once
    /// and the last sequence number comes back.
    pub fn tick(&mut self, now_ms: u64) -> Option<usize> {
        if self.state != RunState::Running {
            return None;
        }
        if self.delay_ms == 0 {
            return self.drain();
        }
        if now_ms < self.next_due_ms {
            return None;
        }
        Some(self.advance(now_ms))
    }

    /// Deliver every remaining step synchronously, invoking the callback
    /// per step in sequence order. Starts the run if it is still idle;
    /// does nothing on a terminal run.
    pub fn run_to_completion<F: FnMut(&Step<T>)>(&mut self, mut on_step: F) {
        if self.state == RunState::Idle {
            self.delay_ms = 0;
            self.materialize();
            self.state = RunState::Running;
        }
        if self.state != RunState::Running {
            return;
        }
        while self.cursor < self.log.len() {
            on_step(&self.log.steps()[self.cursor]);
            self.cursor += 1;
        }
        self.finish();
    }

    /// Stop at the current step boundary. Nothing further is ever
    /// delivered; the already-delivered prefix stays as it is. Idempotent,
    /// and a no-op on a run that is not running.
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Cancelled;
            adebug!("run cancelled after {} steps", self.cursor);
        }
    }

    /// Change the pacing gap. Applies from the next delivery; the gap
    /// already scheduled keeps its anchor, except that a zero delay
    /// drains on the next tick. Delivered steps are untouched.
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    // Precondition: running, cursor < log.len().
    fn advance(&mut self, now_ms: u64) -> usize {
        let seq = self.cursor;
        self.cursor += 1;
        self.next_due_ms = now_ms.saturating_add(self.delay_ms);
        atrace!("step {} delivered", seq);
        if self.cursor == self.log.len() {
            self.finish();
        }
        seq
    }

    fn drain(&mut self) -> Option<usize> {
        if self.cursor >= self.log.len() {
            return None;
        }
        let last = self.log.len() - 1;
        self.cursor = self.log.len();
        self.finish();
        Some(last)
    }

    fn finish(&mut self) {
        self.state = RunState::Completed;
        debug_assert!(
            self.final_state_upholds_contract(),
            "completed run's final snapshot violates the schedule contract"
        );
        adebug!("run complete: {} steps", self.cursor);
    }

    // The engine's core correctness contract: a completed sort ends
    // sorted, a completed traversal visited every node.
    fn final_state_upholds_contract(&self) -> bool {
        match (&self.plan, self.log.last()) {
            // A zero-step sort is only legal when the input needed no work
            // (trivial, or already sorted under MutationsOnly).
            (Plan::Sort { values, .. }, None) => values.windows(2).all(|w| w[0] <= w[1]),
            (Plan::Sort { .. }, Some(step)) => {
                step.snapshot.windows(2).all(|w| w[0] <= w[1])
            }
            (Plan::Traverse { tree, .. }, None) => tree.is_empty(),
            (Plan::Traverse { tree, .. }, Some(step)) => step.snapshot.len() == tree.len(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// True once the last scheduled step has been delivered.
    pub fn is_complete(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn algorithm(&self) -> Algorithm {
        match &self.plan {
            Plan::Sort { algorithm, .. } => Algorithm::Sort(*algorithm),
            Plan::Traverse { order, .. } => Algorithm::Traversal(*order),
        }
    }

    /// The delivered prefix, in sequence order. This is the only view of
    /// the schedule a consumer gets.
    pub fn emitted(&self) -> &[Step<T>] {
        &self.log.steps()[..self.cursor]
    }

    /// Number of steps delivered so far.
    pub fn emitted_len(&self) -> usize {
        self.cursor
    }

    /// The most recently delivered step.
    pub fn last_emitted(&self) -> Option<&Step<T>> {
        self.cursor.checked_sub(1).and_then(|i| self.log.get(i))
    }

    /// Total number of scheduled steps; `None` until the run has started
    /// (the schedule does not exist yet).
    pub fn total_scheduled(&self) -> Option<usize> {
        if self.state == RunState::Idle {
            None
        } else {
            Some(self.log.len())
        }
    }

    /// The input sequence for a sort run; empty for traversals (their
    /// observable output is the visited list, which starts empty).
    pub fn input(&self) -> &[T] {
        match &self.plan {
            Plan::Sort { values, .. } => values,
            Plan::Traverse { .. } => &[],
        }
    }

    /// The tree under traversal, for rendering. `None` for sort runs.
    pub fn tree(&self) -> Option<&Tree<T>> {
        match &self.plan {
            Plan::Traverse { tree, .. } => Some(tree),
            Plan::Sort { .. } => None,
        }
    }

    fn initial_snapshot(&self) -> Vec<T> {
        match &self.plan {
            Plan::Sort { values, .. } => values.clone(),
            Plan::Traverse { .. } => Vec::new(),
        }
    }

    /// Terminal notification. `None` while the run has not ended; after
    /// that, the final snapshot (last delivered, or the initial state of
    /// a zero-step run) and the delivered step count.
    pub fn summary(&self) -> Option<RunSummary<T>> {
        if !self.state.is_terminal() {
            return None;
        }
        let final_snapshot = self
            .last_emitted()
            .map(|step| step.snapshot.clone())
            .unwrap_or_else(|| self.initial_snapshot());
        Some(RunSummary {
            state: self.state,
            total_steps: self.cursor,
            final_snapshot,
        })
    }
}
