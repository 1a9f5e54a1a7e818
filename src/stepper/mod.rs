//! The step engine: algorithm schedules, run execution, and playback
//! control.
//!
//! This module is organized into:
//!
//! - [`engine`] — the [`Stepper`](engine::Stepper) run abstraction:
//!   construction and validation, schedule materialization, paced
//!   delivery, cancellation, completion
//! - [`errors`] — the caller-facing error taxonomy
//! - [`playback`] — the per-view controller enforcing the re-entrancy
//!   rules
//! - `sorts` / `traversals` — the schedules themselves, private to the
//!   engine
//!
//! # Execution model
//!
//! A run materializes its entire schedule at start into an append-only
//! step log, then pacing is pure delivery: a cursor advanced by the
//! caller's clock. Two runs with different delays therefore deliver
//! byte-identical step sequences, and cancellation simply freezes the
//! delivered prefix.

pub mod engine;
pub mod errors;
pub mod playback;

mod sorts;
mod traversals;
