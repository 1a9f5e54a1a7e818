//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`bars`]: Bar chart of the sequence with per-step highlights
//! - [`tree`]: Two-dimensional tree layout with visited/current markers
//! - [`trace`]: Scrollable log of emitted steps
//! - [`status`]: Status bar with keybindings and run state
//!
//! Each pane module exports a single `render_*` function that takes the frame,
//! its area, and the data it draws. Panes never touch application state beyond
//! their own scroll offset, which keeps the layout code in `app.rs` short.

pub mod bars;
pub mod status;
pub mod trace;
pub mod tree;

// Re-export render functions for convenience
pub use bars::render_bars_pane;
pub use status::render_status_bar;
pub use trace::render_trace_pane;
pub use tree::render_tree_pane;
