//! Exercise catalog.
//!
//! The catalog holds every known exercise, active or not. The workout only
//! sees the active ones, in the order resolved by [`ExerciseCatalog::ordered`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Exercise {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl Default for ExerciseCatalog {
    /// The fallback list used when nothing else is available.
    fn default() -> Self {
        Self {
            exercises: vec![
                Exercise::new("1", "Push-ups", "Standard push-ups"),
                Exercise::new("2", "Squats", "Bodyweight squats"),
                Exercise::new("3", "Jumping Jacks", "Full body cardio"),
                Exercise::new("4", "Mountain Climbers", "Core and cardio"),
            ],
        }
    }
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.is_active).count()
    }

    /// Add a new active exercise with a fresh id. Returns the id.
    pub fn add(&mut self, name: &str, description: &str) -> Result<String, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "exercise name cannot be empty".into(),
            });
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.exercises.push(Exercise::new(id.clone(), name, description));
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Exercise, ValidationError> {
        let pos = self.position(id)?;
        Ok(self.exercises.remove(pos))
    }

    /// Set the active flag. Returns the new value.
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<bool, ValidationError> {
        let pos = self.position(id)?;
        self.exercises[pos].is_active = active;
        Ok(active)
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool, ValidationError> {
        let pos = self.position(id)?;
        let ex = &mut self.exercises[pos];
        ex.is_active = !ex.is_active;
        Ok(ex.is_active)
    }

    /// Resolve the catalog against a persisted id order.
    ///
    /// Ids from `order` come first, in that order; unknown and repeated ids
    /// are skipped. Exercises not named in `order` follow in catalog order.
    pub fn ordered(&self, order: &[String]) -> Vec<Exercise> {
        let mut out: Vec<Exercise> = Vec::with_capacity(self.exercises.len());
        for id in order {
            if out.iter().any(|e| &e.id == id) {
                continue;
            }
            if let Some(ex) = self.get(id) {
                out.push(ex.clone());
            }
        }
        for ex in &self.exercises {
            if !out.iter().any(|e| e.id == ex.id) {
                out.push(ex.clone());
            }
        }
        out
    }

    fn position(&self, id: &str) -> Result<usize, ValidationError> {
        self.exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ValidationError::UnknownExercise(id.to_string()))
    }
}

/// Move the entry at `from` to `to` (remove then insert).
pub fn move_entry<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), ValidationError> {
    let len = items.len();
    if from >= len {
        return Err(ValidationError::OutOfBounds {
            collection: "exercise order",
            index: from,
            len,
        });
    }
    if to >= len {
        return Err(ValidationError::OutOfBounds {
            collection: "exercise order",
            index: to,
            len,
        });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
