pub mod error;
pub mod validation;
pub mod workout;

pub use error::ValidationError;
pub use validation::{is_truthy, validate_new_workout};
pub use workout::NewWorkout;
