//! Interval timer engine.
//!
//! A tick-driven state machine. It owns no clock: the caller feeds it one
//! `tick()` per elapsed second while the phase is active, plus user
//! commands. Every transition returns the side effects it wants performed;
//! the engine never performs them itself.
//!
//! ## State Transitions
//!
//! ```text
//! Ready -> Work <-> Rest -> Finished
//!           \     /
//!           Paused
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(config);
//! engine.apply(Command::Start);
//! // once per second:
//! let effects = engine.tick();
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::WorkoutConfig;
use super::progress::{format_countdown, Interval, Phase, WorkoutProgress};
use crate::events::{CueTone, Effect};
use crate::exercise::Exercise;

/// Seconds left at which the countdown cue starts.
const COUNTDOWN_FROM: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Start,
    Pause,
    Resume,
    Skip,
    Reset,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: WorkoutConfig,
    progress: WorkoutProgress,
    /// Configuration received mid-workout, applied on the next reset.
    pending_config: Option<WorkoutConfig>,
}

impl TimerEngine {
    /// Create an engine in the `Ready` phase.
    pub fn new(config: WorkoutConfig) -> Self {
        let progress = WorkoutProgress::initial(&config);
        Self {
            config,
            progress,
            pending_config: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn progress(&self) -> &WorkoutProgress {
        &self.progress
    }

    pub fn phase(&self) -> Phase {
        self.progress.phase
    }

    pub fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    pub fn has_pending_config(&self) -> bool {
        self.pending_config.is_some()
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        if self.progress.phase == Phase::Finished {
            return None;
        }
        self.config.exercises.get(self.progress.exercise_index)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            progress: self.progress,
            exercise: self.current_exercise().cloned(),
            exercise_count: self.config.exercises.len(),
            sets_per_exercise: self.config.sets_per_exercise,
            circuit_count: self.config.circuit_count,
            display: format_countdown(self.progress.time_remaining),
            status: self.progress.phase.status_text().to_string(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a user command. Commands whose precondition does not hold are
    /// no-ops and return no effects.
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Start => {
                self.start();
                Vec::new()
            }
            Command::Pause => {
                self.pause();
                Vec::new()
            }
            Command::Resume => {
                self.resume();
                Vec::new()
            }
            Command::Skip => self.skip(),
            Command::Reset => {
                self.reset();
                Vec::new()
            }
        }
    }

    pub fn start(&mut self) {
        if self.progress.phase != Phase::Ready {
            return;
        }
        if self.config.exercises.is_empty() {
            warn!("start ignored: no active exercises");
            return;
        }
        self.progress.phase = Phase::Work;
        self.progress.time_remaining = self.config.work_duration;
        info!(
            exercises = self.config.exercises.len(),
            sets = self.config.sets_per_exercise,
            circuits = self.config.circuit_count,
            "workout started"
        );
    }

    pub fn pause(&mut self) {
        if let Some(interval) = Interval::from_phase(self.progress.phase) {
            self.progress.resume_to = Some(interval);
            self.progress.phase = Phase::Paused;
            debug!(?interval, remaining = self.progress.time_remaining, "paused");
        }
    }

    pub fn resume(&mut self) {
        if self.progress.phase != Phase::Paused {
            return;
        }
        if let Some(interval) = self.progress.resume_to.take() {
            self.progress.phase = interval.into();
            debug!(?interval, remaining = self.progress.time_remaining, "resumed");
        }
    }

    /// Jump to the end of the current interval without the countdown or
    /// phase-complete cues.
    pub fn skip(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(interval) = Interval::from_phase(self.progress.phase) {
            debug!(?interval, "skipped");
            self.complete(interval, &mut effects);
        }
        effects
    }

    pub fn reset(&mut self) {
        if let Some(config) = self.pending_config.take() {
            debug!("applying staged configuration");
            self.config = config;
        }
        self.progress = WorkoutProgress::initial(&self.config);
    }

    /// Replace the configuration.
    ///
    /// Takes effect immediately while `Ready`; otherwise it is staged until
    /// the next reset. Returns whether it was applied now.
    pub fn set_config(&mut self, config: WorkoutConfig) -> bool {
        if self.progress.phase == Phase::Ready {
            self.config = config;
            self.pending_config = None;
            self.progress = WorkoutProgress::initial(&self.config);
            true
        } else {
            self.pending_config = Some(config);
            false
        }
    }

    /// Advance by one elapsed second. Does nothing outside work/rest.
    pub fn tick(&mut self) -> Vec<Effect> {
        let Some(interval) = Interval::from_phase(self.progress.phase) else {
            return Vec::new();
        };

        let mut effects = Vec::new();
        if self.progress.time_remaining > 1 {
            self.progress.time_remaining -= 1;
            let remaining = self.progress.time_remaining;
            if (1..=COUNTDOWN_FROM).contains(&remaining) {
                effects.push(Effect::Countdown {
                    remaining,
                    tone: CueTone::for_remaining(remaining),
                });
            }
            return effects;
        }

        effects.push(Effect::PhaseComplete { interval });
        self.progress.time_remaining = 0;
        self.complete(interval, &mut effects);
        effects
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, interval: Interval, effects: &mut Vec<Effect>) {
        match interval {
            Interval::Work => {
                self.progress.phase = Phase::Rest;
                self.progress.time_remaining = self.config.rest_duration;
            }
            Interval::Rest => self.advance(effects),
        }
    }

    /// Sets nest inside exercises, exercises inside circuits. The order of
    /// these checks defines that nesting.
    fn advance(&mut self, effects: &mut Vec<Effect>) {
        let last_exercise = self.config.last_exercise_index().unwrap_or(0);
        let p = &mut self.progress;

        if p.set_number < self.config.sets_per_exercise {
            p.set_number += 1;
        } else if p.exercise_index < last_exercise {
            p.exercise_index += 1;
            p.set_number = 1;
        } else if p.circuit_number < self.config.circuit_count {
            p.circuit_number += 1;
            p.exercise_index = 0;
            p.set_number = 1;
        } else {
            p.phase = Phase::Finished;
            p.time_remaining = 0;
            effects.push(Effect::WorkoutComplete);
            info!("workout complete");
            return;
        }

        p.phase = Phase::Work;
        p.time_remaining = self.config.work_duration;
        debug!(
            circuit = p.circuit_number,
            exercise = p.exercise_index,
            set = p.set_number,
            "next set"
        );
    }
}

/// Read-only view of the engine for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub progress: WorkoutProgress,
    pub exercise: Option<Exercise>,
    pub exercise_count: usize,
    pub sets_per_exercise: u32,
    pub circuit_count: u32,
    /// `m:ss`
    pub display: String,
    pub status: String,
}

impl Snapshot {
    pub fn progress_label(&self) -> String {
        format!(
            "Circuit {} of {} \u{2022} Exercise {} of {} \u{2022} Set {} of {}",
            self.progress.circuit_number,
            self.circuit_count,
            self.progress.exercise_index + 1,
            self.exercise_count,
            self.progress.set_number,
            self.sets_per_exercise,
        )
    }
}
