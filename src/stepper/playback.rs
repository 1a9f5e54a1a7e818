//! Playback controller: one view's input values and its single run.
//!
//! The controller is the re-entrancy gatekeeper between UI triggers and
//! the engine. It owns the current input, at most one [`Stepper`], the
//! pacing delay, and a [`StartPolicy`] deciding what a start means while
//! a run is active. Input mutation (reverse, replace) is only legal
//! while no run is active.
//!
//! Independent views hold independent controllers; they share nothing.

use crate::stepper::engine::{
    Algorithm, RunState, SortAlgorithm, Stepper, StepperOptions, TraversalOrder,
};
use crate::stepper::errors::EngineError;
use crate::tree::Tree;

/// What a play call does when a run is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    /// Surface [`EngineError::AlreadyRunning`]; the active run keeps
    /// going.
    Reject,
    /// Cancel the active run first, then start the new one.
    CancelAndReplace,
}

/// Tree input shapes for traversal runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeShape {
    /// Search tree built from the controller's values by repeated
    /// insertion.
    Bst,
    /// Complete tree of the given number of levels, level-order values.
    Complete { levels: usize },
}

/// Mediates between a view and its runs.
pub struct Playback<T> {
    /// Current input; the working copy every new run clones.
    values: Vec<T>,

    /// Pacing for the next start, and live for the active run.
    delay_ms: u64,

    policy: StartPolicy,

    /// Options passed to every run this controller constructs.
    options: StepperOptions,

    /// The current run, in whatever state it ended up. Replaced on the
    /// next successful play.
    run: Option<Stepper<T>>,
}

impl<T: Ord + Clone> Playback<T> {
    pub fn new(
        values: Vec<T>,
        delay_ms: u64,
        policy: StartPolicy,
        options: StepperOptions,
    ) -> Self {
        Playback {
            values,
            delay_ms,
            policy,
            options,
            run: None,
        }
    }

    /// The controller's current input values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// True while the current run is running.
    pub fn is_active(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.state() == RunState::Running)
    }

    /// Start a sort run over the current values.
    ///
    /// While a run is active, [`StartPolicy::Reject`] surfaces
    /// [`EngineError::AlreadyRunning`]; [`StartPolicy::CancelAndReplace`]
    /// cancels the active run before the new one is validated.
    pub fn play_sort(&mut self, algorithm: SortAlgorithm, now_ms: u64) -> Result<(), EngineError> {
        self.ensure_startable()?;
        let mut run = Stepper::sort(self.values.clone(), algorithm, self.options.clone())?;
        run.start(self.delay_ms, now_ms);
        self.run = Some(run);
        Ok(())
    }

    /// Start a traversal run over a search tree built from the current
    /// values.
    pub fn play_bst(&mut self, order: TraversalOrder, now_ms: u64) -> Result<(), EngineError> {
        self.ensure_startable()?;
        let tree = Tree::bst(self.values.clone())?;
        let mut run = Stepper::traversal(tree, order, self.options.clone());
        run.start(self.delay_ms, now_ms);
        self.run = Some(run);
        Ok(())
    }

    /// Name-driven start: sort algorithms run over the values, traversal
    /// orders run over a search tree built from them.
    pub fn play(&mut self, algorithm: Algorithm, now_ms: u64) -> Result<(), EngineError> {
        match algorithm {
            Algorithm::Sort(algorithm) => self.play_sort(algorithm, now_ms),
            Algorithm::Traversal(order) => self.play_bst(order, now_ms),
        }
    }

    /// Forward the caller's clock to the active run.
    pub fn tick(&mut self, now_ms: u64) -> Option<usize> {
        self.run.as_mut()?.tick(now_ms)
    }

    /// Cancel the current run, if one is running. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.cancel();
        }
    }

    /// Change pacing for future deliveries; the active run picks it up
    /// live, already-delivered steps are untouched.
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
        if let Some(run) = self.run.as_mut() {
            run.set_delay(delay_ms);
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replace the input values. Fails with
    /// [`EngineError::RunInProgress`] while a run is active. A finished
    /// run is dropped: its snapshots describe input that no longer
    /// exists.
    pub fn set_values(&mut self, values: Vec<T>) -> Result<(), EngineError> {
        self.guard_input_change()?;
        self.values = values;
        self.run = None;
        Ok(())
    }

    /// Reverse the input values in place. Fails with
    /// [`EngineError::RunInProgress`] while a run is active. Drops a
    /// finished run like [`set_values`](Playback::set_values).
    pub fn reverse_values(&mut self) -> Result<(), EngineError> {
        self.guard_input_change()?;
        self.values.reverse();
        self.run = None;
        Ok(())
    }

    /// The current run (running or finished), for rendering.
    pub fn run(&self) -> Option<&Stepper<T>> {
        self.run.as_ref()
    }

    fn ensure_startable(&mut self) -> Result<(), EngineError> {
        if self.is_active() {
            match self.policy {
                StartPolicy::Reject => {
                    awarn!("start rejected: a run is active");
                    return Err(EngineError::AlreadyRunning);
                }
                StartPolicy::CancelAndReplace => self.cancel(),
            }
        }
        Ok(())
    }

    fn guard_input_change(&self) -> Result<(), EngineError> {
        if self.is_active() {
            awarn!("input change rejected: a run is active");
            return Err(EngineError::RunInProgress);
        }
        Ok(())
    }
}

impl Playback<i64> {
    /// Start a traversal run over the chosen tree shape.
    pub fn play_traversal(
        &mut self,
        shape: TreeShape,
        order: TraversalOrder,
        now_ms: u64,
    ) -> Result<(), EngineError> {
        match shape {
            TreeShape::Bst => self.play_bst(order, now_ms),
            TreeShape::Complete { levels } => {
                self.ensure_startable()?;
                let tree = Tree::complete(levels)?;
                let mut run = Stepper::traversal(tree, order, self.options.clone());
                run.start(self.delay_ms, now_ms);
                self.run = Some(run);
                Ok(())
            }
        }
    }
}
