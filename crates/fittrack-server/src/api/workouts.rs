use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fittrack_core::validate_new_workout;
use serde::Serialize;
use serde_json::Value;

use crate::db::models::Workout;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WorkoutListResponse {
    pub workouts: Vec<Workout>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub workout: Workout,
}

/// Response for a newly created workout
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn invalid_id() -> AppError {
    AppError::BadRequest("Invalid workout ID".to_string())
}

/// Read the leading integer of a path segment.
///
/// Leading whitespace and an optional sign are accepted and anything after
/// the digits is ignored, so `"12abc"` and `"4.5"` address workouts 12 and 4.
/// A segment with no leading digits is rejected.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(invalid_id());
    }
    trimmed[..sign_len + digits_len]
        .parse()
        .map_err(|_| invalid_id())
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(raw)) => parse_id(&raw),
        Err(rejection) => {
            tracing::debug!("Rejected workout id: {}", rejection.body_text());
            Err(invalid_id())
        }
    }
}

fn workout_not_found() -> AppError {
    AppError::NotFound("Workout not found".to_string())
}

/// List all workouts
async fn list_workouts(
    State(state): State<AppState>,
) -> Result<Json<WorkoutListResponse>, AppError> {
    let workouts = state.db.list_all().await?;
    Ok(Json(WorkoutListResponse { workouts }))
}

/// Get a workout by ID
async fn get_workout(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<WorkoutResponse>, AppError> {
    let id = path_id(path)?;
    let workout = state
        .db
        .get_by_id(id)
        .await?
        .ok_or_else(workout_not_found)?;
    Ok(Json(WorkoutResponse { workout }))
}

/// Create a new workout
///
/// A request without a JSON content type is treated as an empty payload, so
/// it fails validation like any other request missing its fields.
async fn create_workout(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let payload = match payload {
        Ok(Json(value)) => value,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) => {
            tracing::debug!("Rejected workout body: {}", rejection.body_text());
            return Err(AppError::BadRequest("Invalid JSON body".to_string()));
        }
    };

    let workout = validate_new_workout(&payload)?;
    let id = state.db.create(&workout).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Workout created successfully",
        }),
    ))
}

/// Delete a workout
async fn delete_workout(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = path_id(path)?;
    if state.db.delete_by_id(id).await? == 0 {
        return Err(workout_not_found());
    }
    Ok(Json(MessageResponse {
        message: "Workout deleted successfully",
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            get(get_workout).delete(delete_workout),
        )
}
