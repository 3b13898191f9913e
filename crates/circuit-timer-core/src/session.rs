//! Drives a [`TimerEngine`] from a ticker and a command channel.
//!
//! The session is the engine's only writer. Readers watch [`Snapshot`]s.
//! Ticks are only awaited while the phase is work or rest, so pausing,
//! resetting and finishing all stop the tick source.

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::cue::{dispatch_all, CueSink};
use crate::timer::{Command, Snapshot, Ticker, TimerEngine, WorkoutConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Command(Command),
    /// New configuration; see [`TimerEngine::set_config`].
    Configure(WorkoutConfig),
    Quit,
}

impl From<Command> for Control {
    fn from(command: Command) -> Self {
        Control::Command(command)
    }
}

pub struct WorkoutSession<T, S> {
    engine: TimerEngine,
    ticker: T,
    sink: S,
    snapshots: watch::Sender<Snapshot>,
}

impl<T: Ticker, S: CueSink> WorkoutSession<T, S> {
    pub fn new(engine: TimerEngine, ticker: T, sink: S) -> (Self, watch::Receiver<Snapshot>) {
        let (snapshots, rx) = watch::channel(engine.snapshot());
        let session = Self {
            engine,
            ticker,
            sink,
            snapshots,
        };
        (session, rx)
    }

    /// Run until `Quit` or until every control sender is dropped.
    /// Returns the engine in its final state.
    pub async fn run(mut self, mut controls: mpsc::Receiver<Control>) -> TimerEngine {
        loop {
            let ticking = self.engine.phase().is_active();
            tokio::select! {
                control = controls.recv() => {
                    let Some(control) = control else { break };
                    if !self.handle(control) {
                        break;
                    }
                }
                _ = self.ticker.tick(), if ticking => {
                    let effects = self.engine.tick();
                    dispatch_all(&self.sink, &effects);
                }
            }
            self.snapshots.send_replace(self.engine.snapshot());
        }
        debug!(phase = ?self.engine.phase(), "session ended");
        self.engine
    }

    fn handle(&mut self, control: Control) -> bool {
        match control {
            Control::Command(command) => {
                let before = *self.engine.progress();
                let effects = self.engine.apply(command);
                dispatch_all(&self.sink, &effects);
                // a fresh interval gets a full first second
                if self.engine.phase().is_active() && *self.engine.progress() != before {
                    self.ticker.reset();
                }
            }
            Control::Configure(config) => {
                let applied = self.engine.set_config(config);
                debug!(applied, "configuration received");
            }
            Control::Quit => return false,
        }
        true
    }
}
