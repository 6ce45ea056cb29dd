//! Interactive session playback.
//!
//! Events are printed to stdout as JSON lines. Commands are read from stdin,
//! one per line; see [`HELP`].

use std::io::BufRead;
use std::time::Duration;

use clap::Subcommand;
use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use vitaharmony_core::content::catalog;
use vitaharmony_core::events::Event;
use vitaharmony_core::feedback;
use vitaharmony_core::profile::{local_today, ProfileStore};
use vitaharmony_core::session::{
    MeditationPlayer, PlayerAction, SessionDriver, SessionHandle, SessionKind, SessionPlayer,
    WorkoutPlayer,
};
use vitaharmony_core::storage::HistoryStore;
use vitaharmony_core::Config;

const HELP: &str = "commands: pause | resume | skip | good | poor | yes | no | status | cancel";

#[derive(Subcommand)]
pub enum PlayAction {
    /// Play a workout by name
    Workout {
        name: String,
        /// Adjust exercise lengths to the last recorded performance
        #[arg(long)]
        adapt: bool,
        /// Also print per-second progress events
        #[arg(long)]
        progress: bool,
    },
    /// Play a meditation session by title
    Meditation {
        title: String,
        /// Adjust difficulty to the last recorded focus score
        #[arg(long)]
        adapt: bool,
        /// Also print per-second progress events
        #[arg(long)]
        progress: bool,
    },
}

enum Input {
    Action(PlayerAction),
    Pause,
    Resume,
    Status,
    Cancel,
}

fn parse_input(line: &str) -> Option<Input> {
    let input = match line.trim().to_ascii_lowercase().as_str() {
        "pause" | "p" => Input::Pause,
        "resume" | "r" => Input::Resume,
        "skip" | "s" => Input::Action(PlayerAction::Skip),
        "good" | "good-form" => Input::Action(PlayerAction::GoodForm),
        "poor" | "poor-form" => Input::Action(PlayerAction::PoorForm),
        "yes" | "y" => Input::Action(PlayerAction::Respond(true)),
        "no" | "n" => Input::Action(PlayerAction::Respond(false)),
        "status" => Input::Status,
        "cancel" | "quit" | "q" => Input::Cancel,
        _ => return None,
    };
    Some(input)
}

/// Forward stdin lines from a blocking thread.
fn spawn_stdin() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(action: PlayAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let shared = super::open_store()?;
    let mut profiles = ProfileStore::load(shared.clone());
    let history = HistoryStore::new(shared);
    let tick = config.session.tick_period();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match action {
        PlayAction::Workout { name, adapt, progress } => {
            let mut workout = catalog::find_workout(profiles.profile(), &name)
                .ok_or_else(|| format!("no workout named '{name}' for this fitness level"))?;
            if adapt {
                if let Some(perf) = history.workouts().iter().rev().find_map(|w| w.performance) {
                    workout = catalog::adapt_workout(&workout, perf);
                }
            }
            let player = WorkoutPlayer::new(config.session.clone()).with_weight(profiles.profile().weight);
            runtime.block_on(play(player, workout, tick, history, &mut profiles, progress))
        }
        PlayAction::Meditation { title, adapt, progress } => {
            let mut session = catalog::find_meditation(profiles.profile(), &title)
                .ok_or_else(|| format!("no meditation session titled '{title}'"))?;
            if adapt {
                if let Some(focus) = history.meditations().iter().rev().find_map(|s| s.focus_score) {
                    session = catalog::adapt_session(&session, focus);
                }
            }
            let player = MeditationPlayer::new(config.session.clone());
            runtime.block_on(play(player, session, tick, history, &mut profiles, progress))
        }
    }
}

async fn play<P: SessionPlayer>(
    player: P,
    item: P::Item,
    tick: Duration,
    history: HistoryStore,
    profiles: &mut ProfileStore,
    show_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let handle = SessionDriver::spawn(player, tick, Some(history));
    let mut events = handle.subscribe();
    let mut input = spawn_stdin();
    let mut stdin_open = true;
    eprintln!("{HELP}");
    handle.start(item).await?;

    loop {
        tokio::select! {
            line = input.recv(), if stdin_open => match line {
                Some(line) => dispatch(&handle, &line).await?,
                None => stdin_open = false,
            },
            event = events.recv() => match event {
                Ok(event) => {
                    if show_progress || !event.is_progress() {
                        print_event(&event)?;
                    }
                    if let Event::SessionCompleted { kind, duration_secs, .. } = &event {
                        print_event(&record_completion(profiles, *kind, *duration_secs))?;
                    }
                    if matches!(event, Event::SessionReset { .. } | Event::SessionCancelled { .. }) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event output fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    handle.shutdown().await?;
    Ok(())
}

async fn dispatch<I: Send + 'static>(
    handle: &SessionHandle<I>,
    line: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if line.trim().is_empty() {
        return Ok(());
    }
    match parse_input(line) {
        Some(Input::Action(PlayerAction::Skip)) => handle.skip().await?,
        Some(Input::Action(PlayerAction::GoodForm)) => handle.good_form().await?,
        Some(Input::Action(PlayerAction::PoorForm)) => handle.poor_form().await?,
        Some(Input::Action(PlayerAction::Respond(success))) => handle.respond(success).await?,
        Some(Input::Pause) => handle.pause().await?,
        Some(Input::Resume) => handle.resume().await?,
        Some(Input::Cancel) => handle.cancel().await?,
        // The driver also broadcasts the snapshot as an event.
        Some(Input::Status) => {
            handle.snapshot().await?;
        }
        None => eprintln!("unknown command '{}'; {HELP}", line.trim()),
    }
    Ok(())
}

fn record_completion(profiles: &mut ProfileStore, kind: SessionKind, duration_secs: u32) -> Event {
    let today = local_today();
    let update = match kind {
        SessionKind::Workout => profiles.record_workout(today),
        SessionKind::Meditation => profiles.record_meditation(duration_secs / 60, today),
    };
    Event::StreakUpdated {
        streak: update.streak,
        message: feedback::streak_message(update.streak),
        at: Utc::now(),
    }
}
