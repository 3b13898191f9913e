//! Configuration providers.
//!
//! Startup reads the local settings record first. Only when there is none
//! does it ask the remote backend (if one is configured). Any failure along
//! the way falls back to defaults; loading never surfaces an error.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Result;
use crate::exercise::{Exercise, ExerciseCatalog};
use crate::storage::{Settings, SettingsStore};

/// Base URL of the settings backend, e.g. `http://localhost:8001`.
pub const BACKEND_URL_ENV: &str = "CIRCUIT_TIMER_BACKEND_URL";

pub trait ConfigProvider {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the provider has no record.
    fn fetch(&self) -> impl Future<Output = Result<Option<Settings>>> + Send;
}

/// The settings file on this machine.
#[derive(Debug, Clone)]
pub struct LocalSettingsProvider {
    store: SettingsStore,
}

impl LocalSettingsProvider {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }
}

impl ConfigProvider for LocalSettingsProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    fn fetch(&self) -> impl Future<Output = Result<Option<Settings>>> + Send {
        let result = self.store.load();
        async move { result }
    }
}

/// Settings as the backend sends and accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSettings {
    pub work_time: u32,
    pub rest_time: u32,
    pub sets_per_exercise: u32,
    pub circuits: u32,
    #[serde(default)]
    pub exercise_order: Vec<String>,
}

impl From<&Settings> for RemoteSettings {
    fn from(s: &Settings) -> Self {
        Self {
            work_time: s.work_time,
            rest_time: s.rest_time,
            sets_per_exercise: s.sets_per_exercise,
            circuits: s.circuits,
            exercise_order: s.exercise_order.clone(),
        }
    }
}

/// Client for the settings backend (`/api/settings`, `/api/exercises`).
#[derive(Debug, Clone)]
pub struct HttpConfigProvider {
    base: Url,
    http_client: Client,
}

impl HttpConfigProvider {
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid absolute URL.
    pub fn new(base: &str) -> Result<Self> {
        let mut base = base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base: Url::parse(&base)?,
            http_client: Client::new(),
        })
    }

    /// Provider for `$CIRCUIT_TIMER_BACKEND_URL`, if set and valid.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var(BACKEND_URL_ENV).ok().filter(|v| !v.trim().is_empty())?;
        match Self::new(&raw) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!(url = %raw, error = %e, "ignoring invalid backend URL");
                None
            }
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    pub async fn fetch_settings(&self) -> Result<RemoteSettings> {
        let resp = self
            .http_client
            .get(self.endpoint("api/settings")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn fetch_exercises(&self) -> Result<Vec<Exercise>> {
        let resp = self
            .http_client
            .get(self.endpoint("api/exercises")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Upload the durations, counts and order.
    pub async fn push_settings(&self, settings: &Settings) -> Result<()> {
        self.http_client
            .post(self.endpoint("api/settings")?)
            .json(&RemoteSettings::from(settings))
            .send()
            .await?
            .error_for_status()?;
        debug!(backend = %self.base, "settings pushed");
        Ok(())
    }
}

impl ConfigProvider for HttpConfigProvider {
    fn name(&self) -> &'static str {
        "backend"
    }

    fn fetch(&self) -> impl Future<Output = Result<Option<Settings>>> + Send {
        async move {
            let remote = self.fetch_settings().await?;
            let exercises = match self.fetch_exercises().await {
                Ok(list) if !list.is_empty() => ExerciseCatalog::new(list),
                Ok(_) => ExerciseCatalog::default(),
                Err(e) => {
                    warn!(error = %e, "backend exercises unavailable, using defaults");
                    ExerciseCatalog::default()
                }
            };
            let settings = Settings {
                work_time: remote.work_time,
                rest_time: remote.rest_time,
                sets_per_exercise: remote.sets_per_exercise,
                circuits: remote.circuits,
                exercise_order: remote.exercise_order,
                updated_at: None,
                exercises,
            };
            settings.validate()?;
            Ok(Some(settings))
        }
    }
}

/// Resolve startup settings: local record, then the backend, then defaults.
pub async fn load_settings<L, R>(local: &L, remote: Option<&R>) -> Settings
where
    L: ConfigProvider,
    R: ConfigProvider,
{
    match local.fetch().await {
        Ok(Some(settings)) => {
            debug!(provider = local.name(), "settings resolved");
            return settings;
        }
        Ok(None) => {}
        Err(e) => warn!(provider = local.name(), error = %e, "settings unavailable"),
    }

    if let Some(remote) = remote {
        match remote.fetch().await {
            Ok(Some(settings)) => {
                info!(provider = remote.name(), "settings resolved");
                return settings;
            }
            Ok(None) => {}
            Err(e) => warn!(provider = remote.name(), error = %e, "settings unavailable"),
        }
    }

    debug!("using default settings");
    Settings::default()
}
