//! Tick sources.
//!
//! The engine counts seconds it is told about; a [`Ticker`] decides when a
//! second has elapsed. Production code uses [`IntervalTicker`], tests drive
//! a [`ManualTicker`] by hand.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

pub trait Ticker: Send {
    /// Resolves when the next time unit has elapsed.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;

    /// Restart the period so the next tick is a full unit away.
    fn reset(&mut self);
}

/// Wall-clock ticker backed by `tokio::time::Interval`.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    inner: time::Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        // interval_at so the first tick is one period out, not immediate
        let mut inner = time::interval_at(Instant::now() + period, period);
        inner.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self { period, inner }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Ticker for IntervalTicker {
    fn tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            self.inner.tick().await;
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// Ticker fired explicitly through a [`TickHandle`].
#[derive(Debug)]
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

#[derive(Debug, Clone)]
pub struct TickHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualTicker {
    pub fn channel() -> (Self, TickHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, TickHandle { tx })
    }
}

impl TickHandle {
    /// Queue one tick. Returns false once the ticker is gone.
    pub fn tick(&self) -> bool {
        self.tx.send(()).is_ok()
    }

    pub fn tick_n(&self, n: usize) -> bool {
        (0..n).all(|_| self.tick())
    }
}

impl Ticker for ManualTicker {
    fn tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            if self.rx.recv().await.is_none() {
                // all handles dropped: never tick again
                std::future::pending::<()>().await;
            }
        }
    }

    /// Drops ticks queued before the reset.
    fn reset(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}
