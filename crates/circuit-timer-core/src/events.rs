use serde::{Deserialize, Serialize};

use crate::timer::Interval;

/// Side-effect requests produced by timer transitions.
///
/// The engine returns these instead of performing them; a [`CueSink`]
/// carries them out.
///
/// [`CueSink`]: crate::cue::CueSink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Emitted on the last three seconds of an interval.
    Countdown { remaining: u32, tone: CueTone },
    /// An interval ran out naturally.
    PhaseComplete { interval: Interval },
    WorkoutComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueTone {
    /// 3 and 2 seconds left
    Tick,
    /// 1 second left
    Last,
}

impl CueTone {
    pub fn for_remaining(remaining: u32) -> Self {
        if remaining == 1 {
            CueTone::Last
        } else {
            CueTone::Tick
        }
    }
}
