//! Effect dispatch.
//!
//! Cues are fire-and-forget. A sink may fail; the failure is logged and
//! dropped, and never reaches the timer.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::warn;

use crate::events::Effect;

#[derive(Error, Debug)]
#[error("cue '{cue}' failed: {message}")]
pub struct CueError {
    pub cue: &'static str,
    pub message: String,
}

impl CueError {
    pub fn new(cue: &'static str, message: impl Into<String>) -> Self {
        Self {
            cue,
            message: message.into(),
        }
    }
}

/// Carries out effect requests (sound, vibration, completion notice).
pub trait CueSink: Send {
    fn name(&self) -> &'static str;

    fn dispatch(&self, effect: &Effect) -> Result<(), CueError>;
}

/// Dispatch every effect, logging and swallowing failures.
pub fn dispatch_all<S: CueSink + ?Sized>(sink: &S, effects: &[Effect]) {
    for effect in effects {
        if let Err(e) = sink.dispatch(effect) {
            warn!(sink = sink.name(), ?effect, error = %e, "cue dispatch failed");
        }
    }
}

/// Sends each effect to every inner sink. One sink failing does not stop
/// the others.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn CueSink>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl CueSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl CueSink for FanOut {
    fn name(&self) -> &'static str {
        "fan-out"
    }

    fn dispatch(&self, effect: &Effect) -> Result<(), CueError> {
        for sink in &self.sinks {
            dispatch_all(sink.as_ref(), std::slice::from_ref(effect));
        }
        Ok(())
    }
}

/// Keeps every dispatched effect in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    effects: Arc<Mutex<Vec<Effect>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }
}

impl CueSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn dispatch(&self, effect: &Effect) -> Result<(), CueError> {
        self.effects
            .lock()
            .map_err(|_| CueError::new("record", "recording sink poisoned"))?
            .push(*effect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CueTone;

    struct Broken;

    impl CueSink for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn dispatch(&self, _effect: &Effect) -> Result<(), CueError> {
            Err(CueError::new("audio", "device unavailable"))
        }
    }

    #[test]
    fn fan_out_keeps_going_after_a_failure() {
        let recorder = RecordingSink::new();
        let sinks = FanOut::new().with(Broken).with(recorder.clone());
        assert_eq!(sinks.len(), 2);

        let effects = [
            Effect::Countdown { remaining: 2, tone: CueTone::Tick },
            Effect::WorkoutComplete,
        ];
        dispatch_all(&sinks, &effects);
        assert_eq!(recorder.effects(), effects.to_vec());
    }

    #[test]
    fn dispatch_all_swallows_errors() {
        dispatch_all(&Broken, &[Effect::WorkoutComplete]);
    }
}
