pub mod exercise;
pub mod plan;
pub mod run;
pub mod settings;
pub mod simulate;

use circuit_timer_core::{HttpConfigProvider, Settings, SettingsStore};
use clap::Args;
use tracing::warn;

/// One-off overrides on top of the saved settings. Never persisted.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Work seconds
    #[arg(long)]
    work: Option<u32>,
    /// Rest seconds
    #[arg(long)]
    rest: Option<u32>,
    /// Sets per exercise
    #[arg(long)]
    sets: Option<u32>,
    /// Circuit count
    #[arg(long)]
    circuits: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(work) = self.work {
            settings.work_time = work;
        }
        if let Some(rest) = self.rest {
            settings.rest_time = rest;
        }
        if let Some(sets) = self.sets {
            settings.sets_per_exercise = sets;
        }
        if let Some(circuits) = self.circuits {
            settings.circuits = circuits;
        }
    }
}

/// Persist locally, then mirror to the backend if one is configured.
/// A backend failure is logged, not returned.
pub(crate) async fn save(store: &SettingsStore, settings: &mut Settings) -> Result<(), Box<dyn std::error::Error>> {
    store.save(settings)?;
    if let Some(remote) = HttpConfigProvider::from_env() {
        if let Err(e) = remote.push_settings(settings).await {
            warn!(backend = %remote.base(), error = %e, "backend not available, saved locally only");
        }
    }
    Ok(())
}
