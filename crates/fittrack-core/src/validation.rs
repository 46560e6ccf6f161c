//! Validation of workout payloads submitted by clients.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. `exercise_name`, `sets`, `reps` and `date` must all be present and
//!    truthy. A zero is falsy, so `sets: 0` is reported as a missing field.
//! 2. `sets` and `reps` must be numbers no smaller than one.
//! 3. A truthy `weight` must be a non-negative number.
//!
//! Payloads arrive as loosely typed JSON: numbers may be sent as strings and
//! optional fields may be `null`, so everything is read from a
//! [`serde_json::Value`] rather than a typed struct.

use serde_json::Value;

use crate::error::ValidationError;
use crate::workout::NewWorkout;

/// Presence test for a payload field.
///
/// Absent, `null`, `false`, `0` and `""` are falsy; every other value,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Numeric reading of a field: numbers as-is, numeric strings parsed, `true` as one
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(true) => 1.0,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn positive_count(value: &Value) -> Result<i64, ValidationError> {
    match as_number(value) {
        Some(n) if n >= 1.0 => Ok(n.trunc() as i64),
        _ => Err(ValidationError::NonPositiveSetsOrReps),
    }
}

/// Validate a create-workout payload and coerce it into a [`NewWorkout`].
///
/// A payload that is not a JSON object is treated as having no fields.
pub fn validate_new_workout(payload: &Value) -> Result<NewWorkout, ValidationError> {
    let field = |name: &str| payload.as_object().and_then(|fields| fields.get(name));

    let (Some(exercise_name), Some(sets), Some(reps), Some(date)) =
        (field("exercise_name"), field("sets"), field("reps"), field("date"))
    else {
        return Err(ValidationError::MissingRequiredFields);
    };
    if ![exercise_name, sets, reps, date]
        .into_iter()
        .all(|value| is_truthy(Some(value)))
    {
        return Err(ValidationError::MissingRequiredFields);
    }

    let sets = positive_count(sets)?;
    let reps = positive_count(reps)?;

    let weight = match field("weight") {
        Some(w) if is_truthy(Some(w)) => match as_number(w) {
            Some(n) if n >= 0.0 => Some(n),
            _ => return Err(ValidationError::InvalidWeight),
        },
        _ => None,
    };

    let notes = match field("notes") {
        Some(n) if is_truthy(Some(n)) => as_text(n),
        _ => String::new(),
    };

    Ok(NewWorkout {
        exercise_name: as_text(exercise_name),
        sets,
        reps,
        weight,
        date: as_text(date),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(0.0))));
        assert!(!is_truthy(Some(&json!(""))));

        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(-5))));
        assert!(is_truthy(Some(&json!("0"))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn test_valid_full_payload() {
        let w = validate_new_workout(&json!({
            "exercise_name": "Bench Press",
            "sets": 3,
            "reps": 10,
            "weight": 135,
            "date": "2024-12-15",
            "notes": "Felt strong"
        }))
        .unwrap();

        assert_eq!(
            w,
            NewWorkout::new("Bench Press", 3, 10, "2024-12-15")
                .with_weight(135.0)
                .with_notes("Felt strong")
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let w = validate_new_workout(&json!({
            "exercise_name": "Push-ups",
            "sets": 3,
            "reps": 15,
            "date": "2024-12-15"
        }))
        .unwrap();
        assert_eq!(w.weight, None);
        assert_eq!(w.notes, "");

        let w = validate_new_workout(&json!({
            "exercise_name": "Push-ups",
            "sets": 3,
            "reps": 15,
            "date": "2024-12-15",
            "weight": null,
            "notes": null
        }))
        .unwrap();
        assert_eq!(w.weight, None);
        assert_eq!(w.notes, "");
    }

    #[test]
    fn test_missing_fields() {
        let err = validate_new_workout(&json!({ "exercise_name": "Squats", "sets": 3 }));
        assert_eq!(err, Err(ValidationError::MissingRequiredFields));

        let err = validate_new_workout(&json!({
            "exercise_name": "",
            "sets": 3,
            "reps": 10,
            "date": "2024-12-15"
        }));
        assert_eq!(err, Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn test_zero_sets_reported_as_missing() {
        // Zero is falsy, so the presence check fires before the range check.
        let err = validate_new_workout(&json!({
            "exercise_name": "Deadlift",
            "sets": 0,
            "reps": -5,
            "date": "2024-12-15"
        }));
        assert_eq!(err, Err(ValidationError::MissingRequiredFields));
    }

    #[test]
    fn test_negative_reps_reported_as_non_positive() {
        let err = validate_new_workout(&json!({
            "exercise_name": "Deadlift",
            "sets": 3,
            "reps": -5,
            "date": "2024-12-15"
        }));
        assert_eq!(err, Err(ValidationError::NonPositiveSetsOrReps));

        let err = validate_new_workout(&json!({
            "exercise_name": "Deadlift",
            "sets": 0.5,
            "reps": 5,
            "date": "2024-12-15"
        }));
        assert_eq!(err, Err(ValidationError::NonPositiveSetsOrReps));
    }

    #[test]
    fn test_non_numeric_sets_rejected() {
        let err = validate_new_workout(&json!({
            "exercise_name": "Curls",
            "sets": "three",
            "reps": 10,
            "date": "2024-12-15"
        }));
        assert_eq!(err, Err(ValidationError::NonPositiveSetsOrReps));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let w = validate_new_workout(&json!({
            "exercise_name": "Lunges",
            "sets": "4",
            "reps": 12.9,
            "weight": "22.5",
            "date": "2024-12-15"
        }))
        .unwrap();
        assert_eq!(w.sets, 4);
        assert_eq!(w.reps, 12);
        assert_eq!(w.weight, Some(22.5));
    }

    #[test]
    fn test_zero_weight_is_bodyweight() {
        let w = validate_new_workout(&json!({
            "exercise_name": "Pull-ups",
            "sets": 3,
            "reps": 8,
            "weight": 0,
            "date": "2024-12-15"
        }))
        .unwrap();
        assert_eq!(w.weight, None);
    }

    #[test]
    fn test_invalid_weight() {
        for weight in [json!(-10), json!("heavy"), json!([1])] {
            let err = validate_new_workout(&json!({
                "exercise_name": "Squats",
                "sets": 3,
                "reps": 5,
                "weight": weight,
                "date": "2024-12-15"
            }));
            assert_eq!(err, Err(ValidationError::InvalidWeight));
        }
    }

    #[test]
    fn test_non_object_payload() {
        assert_eq!(
            validate_new_workout(&json!([1, 2, 3])),
            Err(ValidationError::MissingRequiredFields)
        );
        assert_eq!(
            validate_new_workout(&Value::Null),
            Err(ValidationError::MissingRequiredFields)
        );
    }
}
