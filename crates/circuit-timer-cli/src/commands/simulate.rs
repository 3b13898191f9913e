use circuit_timer_core::{Command, Effect, Interval, Phase, SettingsStore, TimerEngine};
use clap::Args;
use serde::Serialize;

use super::Overrides;

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    overrides: Overrides,
    /// Print the full effect timeline as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TimelineEntry {
    /// Seconds since start.
    second: u64,
    #[serde(flatten)]
    effect: Effect,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    total_seconds: u64,
    work_intervals: u32,
    rest_intervals: u32,
    countdown_cues: u32,
    final_cues: u32,
    completed: bool,
    timeline: Vec<TimelineEntry>,
}

/// Tick the engine to the end of the workout with no real clock.
fn simulate(mut engine: TimerEngine) -> Report {
    let mut report = Report::default();
    engine.apply(Command::Start);
    if engine.phase() == Phase::Ready {
        return report;
    }

    while engine.phase() != Phase::Finished {
        let effects = engine.tick();
        report.total_seconds += 1;
        for effect in effects {
            match effect {
                Effect::Countdown { .. } => report.countdown_cues += 1,
                Effect::PhaseComplete { interval } => {
                    report.final_cues += 1;
                    match interval {
                        Interval::Work => report.work_intervals += 1,
                        Interval::Rest => report.rest_intervals += 1,
                    }
                }
                Effect::WorkoutComplete => report.completed = true,
            }
            report.timeline.push(TimelineEntry {
                second: report.total_seconds,
                effect,
            });
        }
    }
    report
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = SettingsStore::open_default()?.load_or_default();
    args.overrides.apply(&mut settings);
    let config = settings.workout_config();
    config.validate()?;

    let report = simulate(TimerEngine::new(config));
    if !report.completed {
        return Err("no active exercises to simulate".into());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} work and {} rest intervals in {}s ({} countdown cues)",
            report.work_intervals, report.rest_intervals, report.total_seconds, report.countdown_cues
        );
        println!("{}", Phase::Finished.status_text());
    }
    Ok(())
}
