mod health;
mod workouts;

use axum::Router;

use crate::error::AppError;
use crate::AppState;

/// Create the API router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(workouts::router())
}

/// Fallback for any path no route or static file matched
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
