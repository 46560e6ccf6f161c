pub mod models;

use std::path::Path;

use fittrack_core::NewWorkout;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;
use models::Workout;

const CREATE_WORKOUTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exercise_name TEXT NOT NULL,
    sets INTEGER NOT NULL,
    reps INTEGER NOT NULL,
    weight REAL,
    date TEXT NOT NULL,
    notes TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Database connection wrapper
///
/// Holds a pool with a single SQLite connection shared by every request.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file, creating it and its directory if missing
    pub async fn connect(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to SQLite database at {}", path.display());
        Ok(Self { pool })
    }

    /// Create the workouts table if it does not exist yet
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_WORKOUTS_TABLE).execute(&self.pool).await?;
        tracing::debug!("Workouts table ready");
        Ok(())
    }

    /// List all workouts, most recent date first
    pub async fn list_all(&self) -> Result<Vec<Workout>, AppError> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"SELECT id, exercise_name, sets, reps, weight, date, COALESCE(notes, '') AS notes, created_at
            FROM workouts ORDER BY date DESC, created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    /// Get a workout by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Workout>, AppError> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"SELECT id, exercise_name, sets, reps, weight, date, COALESCE(notes, '') AS notes, created_at
            FROM workouts WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workout)
    }

    /// Insert a workout and return its assigned ID
    pub async fn create(&self, workout: &NewWorkout) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO workouts (exercise_name, sets, reps, weight, date, notes)
            VALUES (?, ?, ?, ?, ?, ?) RETURNING id"#,
        )
        .bind(&workout.exercise_name)
        .bind(workout.sets)
        .bind(workout.reps)
        .bind(workout.weight)
        .bind(&workout.date)
        .bind(&workout.notes)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created workout {}", id);
        Ok(id)
    }

    /// Delete a workout, returning the number of rows removed (0 or 1)
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Close the connection; later queries fail with a pool-closed error
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection closed");
    }
}
