//! # circuit-timer core library
//!
//! Business logic for a workout interval timer: work and rest intervals,
//! repeated in sets per exercise, over a list of exercises, for a number of
//! circuits. The CLI binary is a thin front end over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine. It owns the workout
//!   progress and returns side-effect requests instead of performing them
//! - **Session**: runs the engine against a [`Ticker`] and a command
//!   channel, publishing snapshots for renderers
//! - **Cues**: sinks that carry out effect requests; failures are dropped
//! - **Storage**: TOML settings record plus the exercise catalog
//! - **Providers**: startup configuration from the local record or a
//!   remote backend, falling back to defaults
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`WorkoutSession`]: async driver for the engine
//! - [`Settings`]: persisted configuration
//! - [`CueSink`]: trait for audio, haptic and notification collaborators

pub mod cue;
pub mod error;
pub mod events;
pub mod exercise;
pub mod provider;
pub mod session;
pub mod storage;
pub mod timer;

pub use cue::{dispatch_all, CueError, CueSink, FanOut, RecordingSink};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{CueTone, Effect};
pub use exercise::{Exercise, ExerciseCatalog};
pub use provider::{load_settings, ConfigProvider, HttpConfigProvider, LocalSettingsProvider};
pub use session::{Control, WorkoutSession};
pub use storage::{AdjustField, Settings, SettingsStore};
pub use timer::{
    Command, Interval, IntervalTicker, ManualTicker, Phase, Snapshot, Ticker, TimerEngine,
    WorkoutConfig, WorkoutProgress,
};
