//! Main TUI application state and logic

use crate::input;
use crate::step::{Step, StepKind};
use crate::stepper::engine::{RunState, SortAlgorithm, Stepper, TraversalOrder};
use crate::stepper::playback::{Playback, TreeShape};
use crate::tree::{NodeId, Tree};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::{Duration, Instant};

/// Levels used when toggling to the complete-tree shape with `m`.
pub const DEFAULT_COMPLETE_LEVELS: usize = 4;

/// Which of the two visualizations is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Sort,
    Tree,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Sort => View::Tree,
            View::Tree => View::Sort,
        }
    }
}

/// The main application state
pub struct App {
    /// Playback for the sorting view
    pub sort: Playback<i64>,

    /// Playback for the traversal view
    pub tree: Playback<i64>,

    /// Which view is on screen
    pub view: View,

    /// Sort algorithm the next run will use
    pub sort_algorithm: SortAlgorithm,

    /// Traversal order the next run will use
    pub order: TraversalOrder,

    /// Tree shape the next traversal run will use
    pub shape: TreeShape,

    /// Levels to use when `m` toggles back to the complete shape
    pub complete_levels: usize,

    /// Step being viewed; `None` follows the newest emitted step
    pub view_cursor: Option<usize>,

    /// Scroll offset for the step log (usize::MAX pins to the bottom)
    pub trace_scroll: usize,

    /// Whether runs are being ticked forward
    pub playing: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message shown at the bottom
    pub status_message: String,

    /// Wall-clock origin for the millisecond timeline handed to the engine
    pub started_at: Instant,

    /// Last space press, for debouncing play/pause toggles
    pub last_space_press: Instant,
}

impl App {
    pub fn new(
        sort: Playback<i64>,
        tree: Playback<i64>,
        view: View,
        sort_algorithm: SortAlgorithm,
        order: TraversalOrder,
        shape: TreeShape,
    ) -> Self {
        let complete_levels = match shape {
            TreeShape::Complete { levels } => levels,
            TreeShape::Bst => DEFAULT_COMPLETE_LEVELS,
        };
        App {
            sort,
            tree,
            view,
            sort_algorithm,
            order,
            shape,
            complete_levels,
            view_cursor: None,
            trace_scroll: usize::MAX,
            playing: false,
            should_quit: false,
            status_message: String::from("Press s to start"),
            started_at: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Milliseconds since the app started; the timeline both playbacks share.
    fn now_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    fn active(&self) -> &Playback<i64> {
        match self.view {
            View::Sort => &self.sort,
            View::Tree => &self.tree,
        }
    }

    fn active_mut(&mut self) -> &mut Playback<i64> {
        match self.view {
            View::Sort => &mut self.sort,
            View::Tree => &mut self.tree,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Both runs keep advancing even when the other view is on screen.
            if self.playing {
                let now = self.now_ms();
                let sort_stepped = self.sort.tick(now).is_some();
                let tree_stepped = self.tree.tick(now).is_some();
                let stepped_in_view = match self.view {
                    View::Sort => sort_stepped,
                    View::Tree => tree_stepped,
                };
                if stepped_in_view && self.view_cursor.is_none() {
                    self.trace_scroll = usize::MAX;
                }
            }

            // Use poll with timeout so pacing works without key events
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_chunks[0]);

        match self.view {
            View::Sort => self.render_sort_view(frame, columns[0], columns[1]),
            View::Tree => self.render_tree_view(frame, columns[0], columns[1]),
        }
        self.render_status(frame, main_chunks[1]);
    }

    fn render_sort_view(&mut self, frame: &mut Frame, main_area: Rect, trace_area: Rect) {
        let run = self.sort.run();
        let emitted: &[Step<i64>] = run.map_or(&[], |r| r.emitted());
        let viewed = match self.view_cursor {
            Some(i) => emitted.get(i),
            None => emitted.last(),
        };
        let at_latest = match self.view_cursor {
            None => true,
            Some(i) => i + 1 >= emitted.len(),
        };

        let bars: &[i64] = match viewed {
            Some(step) => &step.snapshot,
            None => match run {
                Some(r) => r.input(),
                None => self.sort.values(),
            },
        };
        let done = at_latest && run.is_some_and(|r| r.state() == RunState::Completed);
        let active = if done { None } else { viewed.map(|s| s.kind) };
        let selected = viewed.map(|s| s.seq);
        let following = self.view_cursor.is_none();

        super::panes::render_bars_pane(frame, main_area, bars, active, done, following);
        super::panes::render_trace_pane(
            frame,
            trace_area,
            emitted,
            selected,
            !following,
            &mut self.trace_scroll,
        );
    }

    fn render_tree_view(&mut self, frame: &mut Frame, main_area: Rect, trace_area: Rect) {
        let run = self.tree.run();
        let emitted: &[Step<i64>] = run.map_or(&[], |r| r.emitted());
        let viewed = match self.view_cursor {
            Some(i) => emitted.get(i),
            None => emitted.last(),
        };
        let selected = viewed.map(|s| s.seq);
        let following = self.view_cursor.is_none();

        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut current = None;
        if let Some(step) = viewed {
            for s in &emitted[..=step.seq] {
                if let StepKind::Visit { node } = s.kind {
                    visited.insert(node);
                }
            }
            if let StepKind::Visit { node } = step.kind {
                current = Some(node);
            }
        }

        // Before a run exists, show the tree the next run would traverse.
        let preview;
        let tree_ref: Option<&Tree<i64>> = match run.and_then(|r| r.tree()) {
            Some(t) => Some(t),
            None => {
                preview = self.preview_tree();
                preview.as_ref()
            }
        };

        super::panes::render_tree_pane(frame, main_area, tree_ref, &visited, current, following);
        super::panes::render_trace_pane(
            frame,
            trace_area,
            emitted,
            selected,
            !following,
            &mut self.trace_scroll,
        );
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect) {
        let (run, algorithm_label) = match self.view {
            View::Sort => (self.sort.run(), self.sort_algorithm.name().to_string()),
            View::Tree => (
                self.tree.run(),
                match self.shape {
                    TreeShape::Bst => format!("{} / bst", self.order.name()),
                    TreeShape::Complete { levels } => {
                        format!("{} / complete({levels})", self.order.name())
                    }
                },
            ),
        };
        let delay_ms = self.active().delay_ms();
        let state = run.map(Stepper::state);
        let total = run.and_then(Stepper::total_scheduled);
        let shown = match run {
            None => 0,
            Some(r) => match self.view_cursor {
                Some(i) => (i + 1).min(r.emitted_len()),
                None => r.emitted_len(),
            },
        };

        super::panes::render_status_bar(
            frame,
            area,
            &self.status_message,
            &algorithm_label,
            shown,
            total,
            delay_ms,
            state,
            self.playing,
        );
    }

    fn preview_tree(&self) -> Option<Tree<i64>> {
        match self.shape {
            TreeShape::Bst => Tree::bst(self.tree.values().to_vec()).ok(),
            TreeShape::Complete { levels } => Tree::complete(levels).ok(),
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.view = self.view.next();
                self.view_cursor = None;
                self.trace_scroll = usize::MAX;
                self.status_message = match self.view {
                    View::Sort => "Sorting view".to_string(),
                    View::Tree => "Traversal view".to_string(),
                };
            }
            KeyCode::Char('s') => self.start_run(),
            KeyCode::Char(' ') => {
                // Debounce space to avoid double-toggles from key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_playing();
                }
            }
            KeyCode::Char('c') => {
                if self.active().is_active() {
                    self.active_mut().cancel();
                    self.status_message = "Run cancelled".to_string();
                } else {
                    self.status_message = "No active run to cancel".to_string();
                }
            }
            KeyCode::Char('r') => self.regenerate(),
            KeyCode::Char('v') => self.reverse(),
            KeyCode::Char('a') => {
                if self.view == View::Sort {
                    let all = SortAlgorithm::ALL;
                    let idx = all
                        .iter()
                        .position(|&a| a == self.sort_algorithm)
                        .unwrap_or(0);
                    self.sort_algorithm = all[(idx + 1) % all.len()];
                    self.status_message = format!("Algorithm: {}", self.sort_algorithm.name());
                }
            }
            KeyCode::Char('o') => {
                if self.view == View::Tree {
                    let all = TraversalOrder::ALL;
                    let idx = all.iter().position(|&o| o == self.order).unwrap_or(0);
                    self.order = all[(idx + 1) % all.len()];
                    self.status_message = format!("Order: {}", self.order.name());
                }
            }
            KeyCode::Char('m') => {
                if self.view == View::Tree {
                    self.shape = match self.shape {
                        TreeShape::Bst => TreeShape::Complete {
                            levels: self.complete_levels,
                        },
                        TreeShape::Complete { .. } => TreeShape::Bst,
                    };
                    self.status_message = match self.shape {
                        TreeShape::Bst => "Shape: bst from values".to_string(),
                        TreeShape::Complete { levels } => {
                            format!("Shape: complete tree, {levels} levels")
                        }
                    };
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_delay(50),
            KeyCode::Char('-') => self.adjust_delay(-50),
            KeyCode::Left => self.scrub_back(1),
            KeyCode::Right => self.scrub_forward(1),
            KeyCode::Char(c @ '1'..='9') => {
                self.scrub_forward(c as usize - '0' as usize);
            }
            KeyCode::Enter => {
                self.view_cursor = None;
                self.trace_scroll = usize::MAX;
                self.status_message = "Following latest step".to_string();
            }
            KeyCode::Backspace => {
                if self.active().run().is_some_and(|r| r.emitted_len() > 0) {
                    self.view_cursor = Some(0);
                }
            }
            KeyCode::Up => {
                self.trace_scroll = self.trace_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.trace_scroll = self.trace_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn describe_selection(&self) -> String {
        match self.view {
            View::Sort => format!("{} sort", self.sort_algorithm.name()),
            View::Tree => match self.shape {
                TreeShape::Bst => format!("{} over bst", self.order.name()),
                TreeShape::Complete { levels } => {
                    format!("{} over complete({levels})", self.order.name())
                }
            },
        }
    }

    fn start_run(&mut self) {
        let now = self.now_ms();
        let result = match self.view {
            View::Sort => self.sort.play_sort(self.sort_algorithm, now),
            View::Tree => self.tree.play_traversal(self.shape, self.order, now),
        };
        match result {
            Ok(()) => {
                self.playing = true;
                self.view_cursor = None;
                self.trace_scroll = usize::MAX;
                self.status_message = format!("Running {}", self.describe_selection());
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    fn toggle_playing(&mut self) {
        if self.active().is_active() {
            self.playing = !self.playing;
            self.status_message = if self.playing {
                "Resumed".to_string()
            } else {
                "Paused".to_string()
            };
        } else {
            self.status_message = "No active run (press s to start)".to_string();
        }
    }

    fn regenerate(&mut self) {
        let count = self.active().values().len().max(2);
        let fresh = input::random_values(count, None);
        match self.active_mut().set_values(fresh) {
            Ok(()) => {
                self.view_cursor = None;
                self.trace_scroll = usize::MAX;
                self.status_message = "New random values".to_string();
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    fn reverse(&mut self) {
        match self.active_mut().reverse_values() {
            Ok(()) => {
                self.view_cursor = None;
                self.trace_scroll = usize::MAX;
                self.status_message = "Values reversed".to_string();
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    fn adjust_delay(&mut self, delta: i64) {
        let next = self.active().delay_ms().saturating_add_signed(delta);
        self.active_mut().set_delay(next);
        self.status_message = if next == 0 {
            "Delay 0 ms (runs finish instantly)".to_string()
        } else {
            format!("Delay {next} ms")
        };
    }

    fn scrub_back(&mut self, n: usize) {
        let emitted = self.active().run().map_or(0, Stepper::emitted_len);
        if emitted == 0 {
            self.status_message = "No steps yet".to_string();
            return;
        }
        let pos = self.view_cursor.unwrap_or(emitted - 1);
        self.view_cursor = Some(pos.saturating_sub(n));
    }

    fn scrub_forward(&mut self, n: usize) {
        let emitted = self.active().run().map_or(0, Stepper::emitted_len);
        if emitted == 0 {
            self.status_message = "No steps yet".to_string();
            return;
        }
        let pos = self.view_cursor.unwrap_or(emitted - 1);
        self.view_cursor = Some((pos + n).min(emitted - 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::engine::StepperOptions;
    use crate::stepper::playback::StartPolicy;

    fn test_app() -> App {
        let options = StepperOptions::default();
        let sort = Playback::new(
            vec![5, 3, 8, 1],
            0,
            StartPolicy::Reject,
            options.clone(),
        );
        let tree = Playback::new(vec![5, 3, 8, 1], 0, StartPolicy::Reject, options);
        App::new(
            sort,
            tree,
            View::Sort,
            SortAlgorithm::Bubble,
            TraversalOrder::In,
            TreeShape::Bst,
        )
    }

    #[test]
    fn tab_switches_view_and_resets_cursor() {
        let mut app = test_app();
        app.view_cursor = Some(3);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.view, View::Tree);
        assert_eq!(app.view_cursor, None);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.view, View::Sort);
    }

    #[test]
    fn starting_twice_reports_the_conflict() {
        let mut app = test_app();
        // Slow the run down so it is still active for the second press.
        app.sort.set_delay(60_000);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('s')));
        assert!(app.sort.is_active());
        app.handle_key_event(KeyEvent::from(KeyCode::Char('s')));
        assert_eq!(app.status_message, "A run is already in progress");
    }

    #[test]
    fn regenerate_during_run_reports_the_conflict() {
        let mut app = test_app();
        app.sort.set_delay(60_000);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('s')));
        let before = app.sort.values().to_vec();
        app.handle_key_event(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(app.sort.values(), before.as_slice());
        assert_eq!(
            app.status_message,
            "Input cannot change while a run is in progress"
        );
    }

    #[test]
    fn scrubbing_clamps_to_emitted_steps() {
        let mut app = test_app();
        // Delay 0 completes the run at start, so every step is emitted.
        app.handle_key_event(KeyEvent::from(KeyCode::Char('s')));
        let emitted = app.sort.run().unwrap().emitted_len();
        assert!(emitted > 0);

        app.handle_key_event(KeyEvent::from(KeyCode::Left));
        assert_eq!(app.view_cursor, Some(emitted - 2));
        app.handle_key_event(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.view_cursor, Some(0));
        app.handle_key_event(KeyEvent::from(KeyCode::Char('9')));
        assert_eq!(app.view_cursor, Some(9.min(emitted - 1)));
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.view_cursor, None);
    }

    #[test]
    fn algorithm_cycles_only_in_sort_view() {
        let mut app = test_app();
        app.handle_key_event(KeyEvent::from(KeyCode::Char('a')));
        assert_eq!(app.sort_algorithm, SortAlgorithm::Selection);

        app.view = View::Tree;
        app.handle_key_event(KeyEvent::from(KeyCode::Char('a')));
        assert_eq!(app.sort_algorithm, SortAlgorithm::Selection);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('o')));
        assert_eq!(app.order, TraversalOrder::Post);
    }

    #[test]
    fn delay_adjustment_never_goes_negative() {
        let mut app = test_app();
        app.handle_key_event(KeyEvent::from(KeyCode::Char('-')));
        assert_eq!(app.sort.delay_ms(), 0);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('+')));
        assert_eq!(app.sort.delay_ms(), 50);
    }

    #[test]
    fn delay_adjustment_saturates_instead_of_wrapping() {
        let mut app = test_app();
        app.sort.set_delay(u64::MAX);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('+')));
        assert_eq!(app.sort.delay_ms(), u64::MAX);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('-')));
        assert_eq!(app.sort.delay_ms(), u64::MAX - 50);
    }
}
