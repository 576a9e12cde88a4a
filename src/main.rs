//! Brickfall - headless demo
//!
//! Runs the simulation with the autopilot at the wheel and reports the HUD
//! through the logger. Rendering is left to whatever embeds the library.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use brickfall::Settings;
use brickfall::audio::{Notifier, Silent, TerminalBell};
use brickfall::platform::{Clock, ManualClock, Runner, SystemClock};
use brickfall::sim::{Command, GameState, Mode};
use brickfall::ui::{Hud, leaderboard_lines};
use clap::Parser;

/// Log the HUD every this many ticks
const REPORT_EVERY: u64 = 600;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Brickfall demo driven by the autopilot", long_about = None)]
struct Args {
    /// JSON tuning file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Print the final session as JSON on stdout
    #[arg(long)]
    dump_state: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load(args.settings.as_deref());
    settings.seed = args.seed.or(settings.seed);
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    let settings = settings.sanitized();

    let seed = settings.seed.unwrap_or_else(seed_from_time);
    log::info!(
        "Brickfall starting: seed {}, {}x{}, {} ticks",
        seed,
        settings.width,
        settings.height,
        args.ticks
    );

    let state = GameState::with_rules(seed, settings.viewport(), settings.rules());
    let notifier: Box<dyn Notifier> = if settings.sound {
        Box::new(TerminalBell::stderr())
    } else {
        Box::new(Silent)
    };
    let step = settings.tick_secs();

    let state = if args.realtime {
        let runner = Runner::new(state, SystemClock::new(), notifier, step);
        drive(runner, args.ticks, |_| std::thread::sleep(Duration::from_secs_f64(step)))
    } else {
        let runner = Runner::new(state, ManualClock::new(), notifier, step);
        drive(runner, args.ticks, |clock| clock.advance(step))
    };

    log::info!("Final: {}", Hud::from_state(&state));
    for line in leaderboard_lines(&state.leaderboard, state.high_score) {
        log::info!("{line}");
    }

    if args.dump_state {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Failed to serialize state: {err}"),
        }
    }
}

/// Run the autopilot for `ticks` ticks, starting a new game whenever one ends
fn drive<C: Clock, N: Notifier>(
    mut runner: Runner<C, N>,
    ticks: u64,
    mut pace: impl FnMut(&mut C),
) -> GameState {
    runner.set_autopilot(true);
    runner.push_command(Command::StartGame);

    let mut next_report = REPORT_EVERY;
    while runner.ticks() < ticks && !runner.should_quit() {
        pace(runner.clock_mut());
        runner.frame();

        let state = runner.state();
        if state.mode == Mode::Menu && !state.game_started {
            log::info!("Game over at {}, starting another", Hud::from_state(state));
            runner.push_command(Command::StartGame);
        }
        if runner.ticks() >= next_report {
            log::info!("{}", Hud::from_state(runner.state()));
            next_report += REPORT_EVERY;
        }
    }

    runner.into_state()
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
