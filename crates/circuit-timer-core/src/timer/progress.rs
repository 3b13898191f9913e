use serde::{Deserialize, Serialize};

use super::config::WorkoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ready,
    Work,
    Rest,
    Paused,
    Finished,
}

impl Phase {
    /// Work and rest are the only phases that consume ticks.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Work | Phase::Rest)
    }

    pub fn status_text(self) -> &'static str {
        match self {
            Phase::Ready => "Ready to start!",
            Phase::Work => "WORK TIME!",
            Phase::Rest => "Rest Time",
            Phase::Paused => "Paused",
            Phase::Finished => "Workout Complete!",
        }
    }
}

/// The active half of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Work,
    Rest,
}

impl From<Interval> for Phase {
    fn from(interval: Interval) -> Self {
        match interval {
            Interval::Work => Phase::Work,
            Interval::Rest => Phase::Rest,
        }
    }
}

impl Interval {
    pub fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Work => Some(Interval::Work),
            Phase::Rest => Some(Interval::Rest),
            _ => None,
        }
    }
}

/// Where the user is in the workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutProgress {
    pub phase: Phase,
    pub exercise_index: usize,
    /// 1-based.
    pub set_number: u32,
    /// 1-based.
    pub circuit_number: u32,
    pub time_remaining: u32,
    /// Interval to return to on resume. Only set while paused.
    #[serde(default)]
    pub resume_to: Option<Interval>,
}

impl WorkoutProgress {
    pub fn initial(config: &WorkoutConfig) -> Self {
        Self {
            phase: Phase::Ready,
            exercise_index: 0,
            set_number: 1,
            circuit_number: 1,
            time_remaining: config.work_duration,
            resume_to: None,
        }
    }
}

/// Countdown display, `m:ss`.
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
