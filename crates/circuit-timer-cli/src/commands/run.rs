use std::io::{BufRead, Write};

use circuit_timer_core::{
    load_settings, Command, Control, HttpConfigProvider, IntervalTicker, LocalSettingsProvider,
    Phase, SettingsStore, Snapshot, TimerEngine, WorkoutSession,
};
use clap::Args;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use super::Overrides;
use crate::cues;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    overrides: Overrides,
    /// Wait for `start` instead of starting immediately
    #[arg(long)]
    manual_start: bool,
    /// No terminal bell
    #[arg(long)]
    quiet: bool,
}

const HELP: &str = "keys: [enter]/s start  p pause  r resume  n skip  x reset  q quit";

fn parse_input(line: &str) -> Option<Control> {
    let control = match line.trim() {
        "" | "s" | "start" => Command::Start.into(),
        "p" | "pause" => Command::Pause.into(),
        "r" | "resume" => Command::Resume.into(),
        "n" | "skip" => Command::Skip.into(),
        "x" | "reset" => Command::Reset.into(),
        "q" | "quit" => Control::Quit,
        _ => return None,
    };
    Some(control)
}

fn render(snapshot: &Snapshot) -> String {
    let exercise = snapshot
        .exercise
        .as_ref()
        .map(|e| e.name.as_str())
        .unwrap_or("-");
    format!(
        "{:<18} {:>5}  {:<18} {}",
        snapshot.status,
        snapshot.display,
        exercise,
        snapshot.progress_label()
    )
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let local = LocalSettingsProvider::new(SettingsStore::open_default()?);
    let remote = HttpConfigProvider::from_env();
    let mut settings = load_settings(&local, remote.as_ref()).await;

    args.overrides.apply(&mut settings);

    let config = settings.workout_config();
    config.validate()?;
    if config.exercises.is_empty() {
        return Err("no active exercises; enable one with `circuit-timer exercise toggle <id>`".into());
    }

    let engine = TimerEngine::new(config);
    let (session, snapshots) =
        WorkoutSession::new(engine, IntervalTicker::every_second(), cues::terminal(args.quiet));
    let (tx, rx) = mpsc::channel(16);
    let session = tokio::spawn(session.run(rx));

    println!("{HELP}");
    if !args.manual_start {
        tx.send(Command::Start.into()).await?;
    }

    let input_tx = tx.clone();
    std::thread::spawn(move || forward_input(input_tx));
    render_until_done(snapshots, tx).await;

    let engine = session.await?;
    debug!(phase = ?engine.phase(), "run finished");
    Ok(())
}

/// Reads stdin on a plain thread; a blocked read must not hold up runtime
/// shutdown once the workout is over.
fn forward_input(tx: mpsc::Sender<Control>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        match parse_input(&line) {
            Some(control) => {
                let quit = control == Control::Quit;
                if tx.blocking_send(control).is_err() || quit {
                    break;
                }
            }
            None => println!("{HELP}"),
        }
    }
}

/// Print every snapshot change. Ends the session once the workout finishes
/// or the session goes away.
async fn render_until_done(mut snapshots: watch::Receiver<Snapshot>, tx: mpsc::Sender<Control>) {
    let mut last: Option<Snapshot> = None;
    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        if last.as_ref() != Some(&snapshot) {
            // each phase gets its own line
            if last.as_ref().is_some_and(|l| l.progress.phase != snapshot.progress.phase) {
                println!();
            }
            print!("\r{}\x1b[K", render(&snapshot));
            let _ = std::io::stdout().flush();
        }
        if snapshot.progress.phase == Phase::Finished {
            let _ = tx.send(Control::Quit).await;
            break;
        }
        last = Some(snapshot);
        if snapshots.changed().await.is_err() {
            break;
        }
    }
    println!();
}
