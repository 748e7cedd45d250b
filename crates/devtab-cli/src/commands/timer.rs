use std::time::Duration;

use clap::Subcommand;
use devtab_core::timer::{dispatch, ADVANCE_DELAY};
use devtab_core::{Config, Effect, Event, TimerEngine, TimerMode};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use crate::terminal::{BellPlayer, StatusLine, StderrNotifier};

/// Upper bound on simulated periods, so a bad setting cannot spin forever.
const MAX_SIMULATED_PERIODS: u32 = 10_000;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the terminal
    ///
    /// Reads commands from stdin: `s` or enter start/pause, `r` reset,
    /// `f`/`b`/`l` switch to focus/short break/long break, `c` reload the
    /// config, `q` quit.
    Run {
        /// Mode to begin in
        #[arg(long, default_value = "focus")]
        mode: TimerMode,
        /// Start counting immediately
        #[arg(long)]
        start: bool,
        /// Exit after the first mode change that follows a completion
        #[arg(long)]
        once: bool,
    },
    /// Run whole cycles on virtual time and print the mode sequence as JSON
    Simulate {
        /// Number of focus periods to complete
        #[arg(long, default_value = "4")]
        completions: u32,
    },
    /// Print the timer state for the current settings as JSON
    Status {
        #[arg(long, default_value = "focus")]
        mode: TimerMode,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { mode, start, once } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_live(mode, start, once))?;
        }
        TimerAction::Simulate { completions } => {
            let config = Config::load_or_default();
            let steps = simulate(TimerEngine::new(config.timer_settings()), completions);
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        TimerAction::Status { mode } => {
            let config = Config::load_or_default();
            let mut engine = TimerEngine::new(config.timer_settings());
            engine.set_mode(mode);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}

// ── Live loop ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Toggle,
    Reset,
    Mode(TimerMode),
    Reload,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "p" | "space" => Some(Command::Toggle),
        "r" | "reset" => Some(Command::Reset),
        "f" | "focus" => Some(Command::Mode(TimerMode::Focus)),
        "b" | "break" => Some(Command::Mode(TimerMode::ShortBreak)),
        "l" | "long" => Some(Command::Mode(TimerMode::LongBreak)),
        "c" | "config" => Some(Command::Reload),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn has_advanced(effects: &[Effect]) -> bool {
    effects
        .iter()
        .any(|e| matches!(e, Effect::Emit(Event::ModeAdvanced { .. })))
}

async fn run_live(mode: TimerMode, start: bool, once: bool) -> std::io::Result<()> {
    let config = Config::load_or_default();
    let mut engine = TimerEngine::new(config.timer_settings());
    let mut cues = BellPlayer;
    let mut notifier = StderrNotifier::new(config.notifications);
    let mut view = StatusLine::new();

    let mut effects = if mode == engine.mode() {
        vec![Effect::Render(engine.snapshot())]
    } else {
        engine.set_mode(mode)
    };
    if start {
        effects.extend(engine.start());
    }
    dispatch(effects, &mut cues, &mut notifier, &mut view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut last = Instant::now();

    loop {
        let deadline = engine.next_deadline().map(|d| last + d);
        if !stdin_open && deadline.is_none() {
            tracing::debug!("input closed and nothing scheduled");
            break;
        }

        let mut command = None;
        tokio::select! {
            _ = tokio::time::sleep_until(deadline.unwrap_or(last)), if deadline.is_some() => {}
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match parse_command(&line) {
                    Some(c) => command = Some(c),
                    None => tracing::warn!(input = %line.trim(), "unknown command"),
                },
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }

        // Catch the engine up to the wall clock before applying input.
        let elapsed = Duration::from_millis(last.elapsed().as_millis() as u64);
        last += elapsed;
        let mut effects = engine.advance(elapsed);

        match command {
            Some(Command::Toggle) => effects.extend(engine.toggle()),
            Some(Command::Reset) => effects.extend(engine.reset()),
            Some(Command::Mode(m)) => effects.extend(engine.set_mode(m)),
            Some(Command::Reload) => {
                let config = Config::load_or_default();
                notifier = StderrNotifier::new(config.notifications);
                effects.extend(engine.update_settings(config.timer_settings()));
            }
            Some(Command::Quit) => {
                dispatch(effects, &mut cues, &mut notifier, &mut view);
                break;
            }
            None => {}
        }

        let advanced = has_advanced(&effects);
        dispatch(effects, &mut cues, &mut notifier, &mut view);
        if once && advanced {
            break;
        }
    }
    println!();
    Ok(())
}

// ── Simulation ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Step {
    from: TimerMode,
    to: TimerMode,
    completed_focus_sessions: u32,
}

fn simulate(mut engine: TimerEngine, completions: u32) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut periods = 0;

    while engine.completed_focus_sessions() < completions && periods < MAX_SIMULATED_PERIODS {
        periods += 1;
        let mut effects = engine.start();
        effects.extend(engine.advance(Duration::from_secs(engine.time_left_secs())));
        effects.extend(engine.advance(ADVANCE_DELAY));

        steps.extend(effects.into_iter().filter_map(|e| match e {
            Effect::Emit(Event::ModeAdvanced {
                from,
                to,
                completed_focus_sessions,
                ..
            }) => Some(Step {
                from,
                to,
                completed_focus_sessions,
            }),
            _ => None,
        }));
    }
    steps
}
