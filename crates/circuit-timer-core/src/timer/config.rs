use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::exercise::Exercise;

pub const DEFAULT_WORK_SECS: u32 = 40;
pub const DEFAULT_REST_SECS: u32 = 20;
pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_CIRCUITS: u32 = 2;

/// Everything the state machine reads at startup.
///
/// `exercises` holds only the participating (active) exercises, already in
/// workout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub work_duration: u32,
    pub rest_duration: u32,
    pub sets_per_exercise: u32,
    pub circuit_count: u32,
    pub exercises: Vec<Exercise>,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        crate::storage::Settings::default().workout_config()
    }
}

impl WorkoutConfig {
    /// Build a config, keeping only active exercises.
    pub fn new(
        work_duration: u32,
        rest_duration: u32,
        sets_per_exercise: u32,
        circuit_count: u32,
        exercises: impl IntoIterator<Item = Exercise>,
    ) -> Self {
        Self {
            work_duration,
            rest_duration,
            sets_per_exercise,
            circuit_count,
            exercises: exercises.into_iter().filter(|e| e.is_active).collect(),
        }
    }

    /// # Errors
    ///
    /// Returns the first zero-valued duration or count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("workTime", self.work_duration),
            ("restTime", self.rest_duration),
            ("setsPerExercise", self.sets_per_exercise),
            ("circuits", self.circuit_count),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ValidationError::NotPositive { field });
            }
        }
        Ok(())
    }

    pub fn last_exercise_index(&self) -> Option<usize> {
        self.exercises.len().checked_sub(1)
    }

    pub fn summary(&self) -> WorkoutSummary {
        let active = self.exercises.len() as u64;
        let total_sets = active * self.sets_per_exercise as u64 * self.circuit_count as u64;
        let total_secs = total_sets * (self.work_duration as u64 + self.rest_duration as u64);
        WorkoutSummary {
            active_exercises: active as usize,
            total_sets,
            total_secs,
            // round half up, matching the settings screen
            estimated_minutes: (total_secs + 30) / 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub active_exercises: usize,
    pub total_sets: u64,
    pub total_secs: u64,
    pub estimated_minutes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::ExerciseCatalog;

    #[test]
    fn new_drops_inactive_exercises() {
        let mut catalog = ExerciseCatalog::default();
        catalog.set_active("2", false).unwrap();
        let cfg = WorkoutConfig::new(40, 20, 3, 2, catalog.ordered(&[]));
        let names: Vec<_> = cfg.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Push-ups", "Jumping Jacks", "Mountain Climbers"]);
    }

    #[test]
    fn validate_rejects_zero_values() {
        let cfg = WorkoutConfig::new(40, 0, 3, 2, ExerciseCatalog::default().ordered(&[]));
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::NotPositive { field: "restTime" })
        );
        assert!(WorkoutConfig::default().validate().is_ok());
    }

    #[test]
    fn summary_matches_settings_screen() {
        let cfg = WorkoutConfig::default();
        let summary = cfg.summary();
        assert_eq!(summary.active_exercises, 4);
        assert_eq!(summary.total_sets, 24);
        // 24 sets * 60s = 24 min
        assert_eq!(summary.estimated_minutes, 24);

        let cfg = WorkoutConfig::new(45, 20, 1, 1, ExerciseCatalog::default().ordered(&[]));
        // 4 * 65s = 260s = 4.33 min
        assert_eq!(cfg.summary().estimated_minutes, 4);
    }
}
