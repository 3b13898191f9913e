//! Persisted workout settings.
//!
//! A single flat record, written when the user saves and read at startup:
//! - interval durations and counts
//! - the exercise catalog and its display order
//!
//! Stored as TOML at `<data_dir>/settings.toml`. A missing file means
//! defaults; so does a file that cannot be parsed or holds zero values.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::exercise::{move_entry, ExerciseCatalog};
use crate::timer::config::{
    WorkoutConfig, DEFAULT_CIRCUITS, DEFAULT_REST_SECS, DEFAULT_SETS, DEFAULT_WORK_SECS,
};

const FILE_NAME: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Seconds.
    #[serde(default = "default_work_time")]
    pub work_time: u32,
    /// Seconds.
    #[serde(default = "default_rest_time")]
    pub rest_time: u32,
    #[serde(default = "default_sets")]
    pub sets_per_exercise: u32,
    #[serde(default = "default_circuits")]
    pub circuits: u32,
    /// Exercise ids in workout order.
    #[serde(default)]
    pub exercise_order: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exercises: ExerciseCatalog,
}

fn default_work_time() -> u32 {
    DEFAULT_WORK_SECS
}
fn default_rest_time() -> u32 {
    DEFAULT_REST_SECS
}
fn default_sets() -> u32 {
    DEFAULT_SETS
}
fn default_circuits() -> u32 {
    DEFAULT_CIRCUITS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_time: DEFAULT_WORK_SECS,
            rest_time: DEFAULT_REST_SECS,
            sets_per_exercise: DEFAULT_SETS,
            circuits: DEFAULT_CIRCUITS,
            exercise_order: Vec::new(),
            updated_at: None,
            exercises: ExerciseCatalog::default(),
        }
    }
}

/// The settings screen steppers and their bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustField {
    WorkTime,
    RestTime,
    Sets,
    Circuits,
}

impl AdjustField {
    pub fn bounds(self) -> (u32, u32) {
        match self {
            AdjustField::WorkTime => (10, 300),
            AdjustField::RestTime => (5, 180),
            AdjustField::Sets => (1, 10),
            AdjustField::Circuits => (1, 5),
        }
    }
}

impl FromStr for AdjustField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" | "workTime" => Ok(AdjustField::WorkTime),
            "rest" | "restTime" => Ok(AdjustField::RestTime),
            "sets" | "setsPerExercise" => Ok(AdjustField::Sets),
            "circuits" => Ok(AdjustField::Circuits),
            other => Err(ValidationError::InvalidValue {
                field: "field".into(),
                message: format!("expected work, rest, sets or circuits, got '{other}'"),
            }),
        }
    }
}

impl Settings {
    /// The configuration the timer runs with: active exercises in the
    /// persisted order.
    pub fn workout_config(&self) -> WorkoutConfig {
        WorkoutConfig::new(
            self.work_time,
            self.rest_time,
            self.sets_per_exercise,
            self.circuits,
            self.exercises.ordered(&self.exercise_order),
        )
    }

    /// # Errors
    ///
    /// Returns an error if a duration or count is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.workout_config().validate()
    }

    /// Step a duration or count by `delta`, clamped to the field's bounds.
    /// Returns the new value.
    pub fn adjust(&mut self, field: AdjustField, delta: i64) -> u32 {
        let (min, max) = field.bounds();
        let slot = match field {
            AdjustField::WorkTime => &mut self.work_time,
            AdjustField::RestTime => &mut self.rest_time,
            AdjustField::Sets => &mut self.sets_per_exercise,
            AdjustField::Circuits => &mut self.circuits,
        };
        let next = (*slot as i64).saturating_add(delta).clamp(min as i64, max as i64);
        *slot = next as u32;
        *slot
    }

    /// Move an exercise within the workout order. Indices refer to the
    /// resolved order, which is then persisted in full.
    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        let mut order: Vec<String> = self
            .exercises
            .ordered(&self.exercise_order)
            .into_iter()
            .map(|e| e.id)
            .collect();
        move_entry(&mut order, from, to)?;
        self.exercise_order = order;
        Ok(())
    }

    /// Remove an exercise from the catalog and from the order.
    pub fn remove_exercise(&mut self, id: &str) -> Result<(), ValidationError> {
        self.exercises.remove(id)?;
        self.exercise_order.retain(|e| e != id);
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u32>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Get a value as string by dot-separated camelCase key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by key. The result must still validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the updated settings are invalid. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/settings.toml`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. `Ok(None)` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// holds invalid values.
    pub fn load(&self) -> Result<Option<Settings>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        debug!(path = %self.path.display(), "settings loaded");
        Ok(Some(settings))
    }

    /// Load from disk, returning defaults when absent or malformed.
    /// This is a convenience method that never fails.
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable settings");
                Settings::default()
            }
        }
    }

    /// Persist, stamping `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or cannot be written.
    pub fn save(&self, settings: &mut Settings) -> Result<()> {
        settings.validate()?;
        settings.updated_at = Some(Utc::now());
        let content = toml::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.save_failed(e))?;
        }
        std::fs::write(&self.path, content).map_err(|e| self.save_failed(e))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn save_failed(&self, e: std::io::Error) -> CoreError {
        ConfigError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SettingsStore) {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join(FILE_NAME));
        (dir, store)
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn save_then_load_keeps_edits() {
        let (_dir, store) = store();
        let mut settings = Settings::default();
        settings.work_time = 45;
        settings.exercises.toggle("2").unwrap();
        settings.exercise_order = vec!["4".into(), "1".into()];
        store.save(&mut settings).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, settings);
        assert!(loaded.updated_at.is_some());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "workTime = \"forty\"").unwrap();
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn zero_values_count_as_malformed() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "circuits = 0").unwrap();
        assert_eq!(store.load_or_default().circuits, DEFAULT_CIRCUITS);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "restTime = 15\n").unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.rest_time, 15);
        assert_eq!(loaded.work_time, DEFAULT_WORK_SECS);
        assert_eq!(loaded.exercises.len(), 4);
    }

    #[test]
    fn get_uses_camel_case_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("workTime").as_deref(), Some("40"));
        assert_eq!(settings.get("setsPerExercise").as_deref(), Some("3"));
        assert!(settings.get("work_time").is_none());
    }

    #[test]
    fn set_updates_numbers_and_arrays() {
        let mut settings = Settings::default();
        settings.set("restTime", "25").unwrap();
        assert_eq!(settings.rest_time, 25);
        settings.set("exerciseOrder", r#"["3","2"]"#).unwrap();
        assert_eq!(settings.exercise_order, vec!["3", "2"]);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("volume", "3").is_err());
        assert!(settings.set("workTime", "fast").is_err());
        assert!(settings.set("circuits", "0").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn adjust_clamps_to_bounds() {
        let mut settings = Settings::default();
        assert_eq!(settings.adjust(AdjustField::WorkTime, 5), 45);
        assert_eq!(settings.adjust(AdjustField::WorkTime, 1000), 300);
        assert_eq!(settings.adjust(AdjustField::RestTime, -100), 5);
        assert_eq!(settings.adjust(AdjustField::Sets, 20), 10);
        assert_eq!(settings.adjust(AdjustField::Circuits, -3), 1);
    }

    #[test]
    fn move_exercise_persists_resolved_order() {
        let mut settings = Settings::default();
        settings.move_exercise(3, 0).unwrap();
        assert_eq!(settings.exercise_order, vec!["4", "1", "2", "3"]);
        let names: Vec<_> = settings
            .workout_config()
            .exercises
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names[0], "Mountain Climbers");
    }

    #[test]
    fn remove_exercise_drops_it_from_order() {
        let mut settings = Settings::default();
        settings.exercise_order = vec!["2".into(), "1".into()];
        settings.remove_exercise("2").unwrap();
        assert_eq!(settings.exercise_order, vec!["1"]);
        assert_eq!(settings.exercises.len(), 3);
    }

    #[test]
    fn adjust_field_parses_short_and_record_names() {
        assert_eq!("work".parse::<AdjustField>(), Ok(AdjustField::WorkTime));
        assert_eq!("setsPerExercise".parse::<AdjustField>(), Ok(AdjustField::Sets));
        assert!("volume".parse::<AdjustField>().is_err());
    }
}
