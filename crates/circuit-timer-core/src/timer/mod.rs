pub mod config;
mod engine;
mod progress;
mod ticker;

pub use config::{WorkoutConfig, WorkoutSummary};
pub use engine::{Command, Snapshot, TimerEngine};
pub use progress::{format_countdown, Interval, Phase, WorkoutProgress};
pub use ticker::{IntervalTicker, ManualTicker, TickHandle, Ticker};
