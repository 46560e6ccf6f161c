use chrono::NaiveDateTime;
use fittrack_core::NewWorkout;
use serde::{Deserialize, Serialize};

/// Workout database model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
    pub id: i64,
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub date: String,
    pub notes: String,
    #[serde(with = "sqlite_timestamp")]
    pub created_at: NaiveDateTime,
}

impl From<Workout> for NewWorkout {
    fn from(w: Workout) -> Self {
        Self {
            exercise_name: w.exercise_name,
            sets: w.sets,
            reps: w.reps,
            weight: w.weight,
            date: w.date,
            notes: w.notes,
        }
    }
}

/// `CURRENT_TIMESTAMP` text form, e.g. `2024-12-15 08:30:00`
mod sqlite_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
