//! Terminal stand-ins for the audio, haptic and notification collaborators.

use std::io::Write;

use circuit_timer_core::{CueError, CueSink, Effect, FanOut};
use tracing::debug;

const BEL: &str = "\x07";

/// Terminal bell. Rings once per countdown second, twice when an interval ends.
pub struct Bell;

impl CueSink for Bell {
    fn name(&self) -> &'static str {
        "bell"
    }

    fn dispatch(&self, effect: &Effect) -> Result<(), CueError> {
        let rings = match effect {
            Effect::Countdown { .. } => 1,
            Effect::PhaseComplete { .. } => 2,
            Effect::WorkoutComplete => return Ok(()),
        };
        let mut out = std::io::stderr().lock();
        out.write_all(BEL.repeat(rings).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| CueError::new("audio", e.to_string()))
    }
}

/// Terminals cannot vibrate; the request is only logged.
pub struct Haptics;

impl CueSink for Haptics {
    fn name(&self) -> &'static str {
        "haptics"
    }

    fn dispatch(&self, effect: &Effect) -> Result<(), CueError> {
        if matches!(effect, Effect::PhaseComplete { .. }) {
            debug!("haptic impact requested");
        }
        Ok(())
    }
}

pub struct CompletionNotice;

impl CueSink for CompletionNotice {
    fn name(&self) -> &'static str {
        "notice"
    }

    fn dispatch(&self, effect: &Effect) -> Result<(), CueError> {
        if *effect == Effect::WorkoutComplete {
            let mut out = std::io::stdout().lock();
            writeln!(out, "\nWorkout Complete! Great job! You finished your workout.")
                .map_err(|e| CueError::new("notice", e.to_string()))?;
        }
        Ok(())
    }
}

pub fn terminal(quiet: bool) -> FanOut {
    let sinks = FanOut::new().with(Haptics).with(CompletionNotice);
    if quiet {
        sinks
    } else {
        sinks.with(Bell)
    }
}
