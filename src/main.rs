// Algotty: step-paced sorting and tree-traversal visualizer

#[macro_use]
mod macros;

mod input;
mod step;
mod stepper;
mod tree;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use step::{Step, StepKind};
use stepper::engine::{Algorithm, SortAlgorithm, Stepper, StepperOptions, TraversalOrder};
use stepper::playback::{Playback, StartPolicy, TreeShape};
use ui::App;
use ui::app::View;

const DEFAULT_SORT_DELAY_MS: u64 = 300;
const DEFAULT_TRAVERSAL_DELAY_MS: u64 = 600;
const DEFAULT_RANDOM_COUNT: usize = 24;

struct CliOptions {
    values: Option<Vec<i64>>,
    random: Option<usize>,
    seed: Option<u64>,
    algorithm: Option<Algorithm>,
    delay: Option<u64>,
    levels: Option<usize>,
    order: Option<TraversalOrder>,
    policy: StartPolicy,
    headless: bool,
    help: bool,
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {program_name} [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --values LIST      Comma-separated integers to sort or build the BST from");
    eprintln!("  --random N         Generate N random values instead (default {DEFAULT_RANDOM_COUNT})");
    eprintln!("  --seed N           Seed the random generator for reproducible values");
    eprintln!("  --algorithm NAME   bubble, selection, insertion, merge, quick, heap, shell,");
    eprintln!("                     preorder, inorder, postorder (traversals open the tree view)");
    eprintln!("  --order NAME       Traversal order for the tree view (preorder, inorder, postorder)");
    eprintln!("  --levels N         Traverse a complete tree with N levels instead of a BST");
    eprintln!("  --delay MS         Milliseconds between steps (0 finishes instantly)");
    eprintln!("  --restart POLICY   reject (default) or cancel: what starting over a live run does");
    eprintln!("  --headless         Print steps to stdout instead of opening the TUI");
    eprintln!("  -h, --help         Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program_name}                               # random values, bubble sort, TUI");
    eprintln!("  {program_name} --algorithm quick --delay 100");
    eprintln!("  {program_name} --values 15,10,20,8,12 --algorithm inorder");
    eprintln!("  {program_name} --headless --algorithm heap --random 10 --seed 7 --delay 0");
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions {
        values: None,
        random: None,
        seed: None,
        algorithm: None,
        delay: None,
        levels: None,
        order: None,
        policy: StartPolicy::Reject,
        headless: false,
        help: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--values" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--values requires a comma-separated list".to_string())?;
                opts.values = Some(input::parse_values(raw).map_err(|e| e.to_string())?);
            }
            "--random" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--random requires a count".to_string())?;
                opts.random =
                    Some(raw.parse().map_err(|_| format!("'{raw}' is not a count"))?);
            }
            "--seed" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--seed requires a number".to_string())?;
                opts.seed = Some(raw.parse().map_err(|_| format!("'{raw}' is not a seed"))?);
            }
            "--algorithm" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--algorithm requires a name".to_string())?;
                opts.algorithm = Some(Algorithm::from_name(raw).map_err(|e| e.to_string())?);
            }
            "--delay" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--delay requires milliseconds".to_string())?;
                opts.delay =
                    Some(raw.parse().map_err(|_| format!("'{raw}' is not a delay"))?);
            }
            "--levels" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--levels requires a number".to_string())?;
                opts.levels =
                    Some(raw.parse().map_err(|_| format!("'{raw}' is not a level count"))?);
            }
            "--order" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--order requires a name".to_string())?;
                let name = raw.trim().to_ascii_lowercase();
                opts.order = Some(
                    TraversalOrder::ALL
                        .into_iter()
                        .find(|o| o.name() == name)
                        .ok_or_else(|| {
                            format!("'{raw}' is not a traversal order (preorder, inorder, postorder)")
                        })?,
                );
            }
            "--restart" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "--restart requires a policy".to_string())?;
                opts.policy = match raw.as_str() {
                    "reject" => StartPolicy::Reject,
                    "cancel" => StartPolicy::CancelAndReplace,
                    _ => return Err(format!("'{raw}' is not a restart policy (reject or cancel)")),
                };
            }
            "--headless" => opts.headless = true,
            "-h" | "--help" => opts.help = true,
            other => return Err(format!("Unknown argument '{other}'")),
        }
        i += 1;
    }

    if opts.values.is_some() && opts.random.is_some() {
        return Err("--values and --random are mutually exclusive".to_string());
    }

    Ok(opts)
}

fn step_line(step: &Step<i64>) -> String {
    let detail = match step.kind {
        StepKind::Compare { a, b } => format!("[{a}] vs [{b}]"),
        StepKind::Swap { a, b } => format!("[{a}] <-> [{b}]"),
        StepKind::Write { index } => match step.snapshot.get(index) {
            Some(value) => format!("[{index}] = {value}"),
            None => format!("[{index}] = ?"),
        },
        StepKind::Visit { .. } => step
            .snapshot
            .last()
            .map_or_else(|| "?".to_string(), ToString::to_string),
    };
    format!("#{:>3} {:<8} {}", step.seq, step.kind.label(), detail)
}

/// Runs one schedule without the TUI, printing each step to stdout.
///
/// Drives a [`Playback`] like the TUI does; a zero delay completes inside
/// the play call and the loop just prints the log.
fn run_headless(
    values: Vec<i64>,
    view: View,
    sort_algorithm: SortAlgorithm,
    order: TraversalOrder,
    shape: TreeShape,
    delay_ms: u64,
    options: StepperOptions,
) {
    let mut playback = Playback::new(values, delay_ms, StartPolicy::Reject, options);
    let clock = Instant::now();
    let started = match view {
        View::Sort => playback.play(Algorithm::Sort(sort_algorithm), 0),
        View::Tree => playback.play_traversal(shape, order, 0),
    };
    if let Err(e) = started {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut printed = 0;
    loop {
        while let Some(step) = playback.run().and_then(|run| run.emitted().get(printed)) {
            println!("{}", step_line(step));
            printed += 1;
        }
        if playback.run().map_or(true, |run| run.is_complete()) {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
        playback.tick(clock.elapsed().as_millis() as u64);
    }

    if let Some(summary) = playback.run().and_then(Stepper::summary) {
        println!(
            "{} steps, final state {:?}",
            summary.total_steps, summary.final_snapshot
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("algotty")
        .to_string();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!();
            print_usage(&program_name);
            std::process::exit(1);
        }
    };
    if cli.help {
        print_usage(&program_name);
        return Ok(());
    }

    let values = match (&cli.values, cli.random) {
        (Some(values), _) => values.clone(),
        (None, Some(count)) => input::random_values(count, cli.seed),
        (None, None) => input::random_values(DEFAULT_RANDOM_COUNT, cli.seed),
    };

    // Pick the starting view and selections from the flags
    let mut view = View::Sort;
    let mut sort_algorithm = SortAlgorithm::Bubble;
    let mut order = TraversalOrder::In;
    match cli.algorithm {
        Some(Algorithm::Sort(algorithm)) => {
            sort_algorithm = algorithm;
        }
        Some(Algorithm::Traversal(traversal_order)) => {
            view = View::Tree;
            order = traversal_order;
        }
        None => {}
    }
    if let Some(cli_order) = cli.order {
        order = cli_order;
        view = View::Tree;
    }
    let shape = match cli.levels {
        Some(levels) => TreeShape::Complete { levels },
        None => TreeShape::Bst,
    };

    let options = StepperOptions::default();

    if cli.headless {
        let delay_ms = cli.delay.unwrap_or(0);
        run_headless(values, view, sort_algorithm, order, shape, delay_ms, options);
        return Ok(());
    }

    let sort_delay = cli.delay.unwrap_or(DEFAULT_SORT_DELAY_MS);
    let traversal_delay = cli.delay.unwrap_or(DEFAULT_TRAVERSAL_DELAY_MS);
    let sort_playback = Playback::new(values.clone(), sort_delay, cli.policy, options.clone());
    let tree_playback = Playback::new(values, traversal_delay, cli.policy, options);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(sort_playback, tree_playback, view, sort_algorithm, order, shape);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
