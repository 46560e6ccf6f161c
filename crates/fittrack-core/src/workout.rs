use serde::{Deserialize, Serialize};

/// A workout that passed validation and is ready to be stored.
///
/// Storage assigns `id` and `created_at`; everything else is fixed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
    /// `None` means a bodyweight exercise
    #[serde(default)]
    pub weight: Option<f64>,
    /// Calendar date as entered, e.g. `2024-12-15`
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl NewWorkout {
    /// Create a bodyweight workout with empty notes
    pub fn new(
        exercise_name: impl Into<String>,
        sets: i64,
        reps: i64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            sets,
            reps,
            weight: None,
            date: date.into(),
            notes: String::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
