use thiserror::Error;

/// Reasons a workout payload is rejected before it reaches storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of exercise_name, sets, reps, date is absent or falsy
    #[error("Missing required fields: exercise_name, sets, reps, date")]
    MissingRequiredFields,
    /// Sets or reps is below one, or is not a number at all
    #[error("Sets and reps must be positive numbers")]
    NonPositiveSetsOrReps,
    /// Weight was supplied but is negative or not a number
    #[error("Weight must be a non-negative number")]
    InvalidWeight,
}
