//! # Introduction
//!
//! Algotty runs classic sorting algorithms and binary-tree traversals as
//! precomputed step schedules, then replays them at a configurable pace.  Each
//! step carries a deep snapshot of the data after it was applied, so the whole
//! run can be scrubbed forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Values → Schedule (steps + snapshots) → Paced replay → TUI / stdout
//! ```
//!
//! 1. [`input`] — parses comma-separated values and generates random ones.
//! 2. [`tree`] — arena-backed binary trees: BSTs built by insertion and
//!    complete trees built level by level.
//! 3. [`step`] — the [`step::Step`] record (kind + snapshot + sequence number)
//!    and the append-only [`step::StepLog`].
//! 4. [`stepper`] — materializes schedules, paces their delivery
//!    ([`stepper::engine::Stepper`]), and serializes runs
//!    ([`stepper::playback::Playback`]).
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorts: bubble, selection, insertion, merge, quick, heap, shell.
//! Traversals: preorder, inorder, postorder over a BST or a complete tree.

#[macro_use]
mod macros;

pub mod input;
pub mod step;
pub mod stepper;
pub mod tree;
pub mod ui;
