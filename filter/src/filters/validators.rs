//! Ready-made validators for common declarations

use super::validation::Validator;
use crate::error::ValidationError;

/// String value must be one of `allowed`
pub fn one_of<I, S>(allowed: I) -> Validator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    Validator::string(move |value| {
        if allowed.iter().any(|a| a == value) {
            Ok(())
        } else {
            Err(ValidationError::new(format!("{}: not in scope", value)))
        }
    })
}

/// Integer value must be one of `allowed`
pub fn int_one_of<I>(allowed: I) -> Validator
where
    I: IntoIterator<Item = i64>,
{
    let allowed: Vec<i64> = allowed.into_iter().collect();
    Validator::int(move |value| {
        if allowed.contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::new(format!("{}: not in scope", value)))
        }
    })
}

/// Integer value must be at least `min`
pub fn min(min: i64) -> Validator {
    Validator::int(move |value| {
        if value >= min {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "{}: must be greater than or equal to {}",
                value, min
            )))
        }
    })
}

/// Integer value must be at most `max`
pub fn max(max: i64) -> Validator {
    Validator::int(move |value| {
        if value <= max {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "{}: must be less than or equal to {}",
                value, max
            )))
        }
    })
}

/// Integer value must lie in `min..=max`
pub fn min_max(min: i64, max: i64) -> Validator {
    Validator::int(move |value| {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "{}: must be between {} and {}",
                value, min, max
            )))
        }
    })
}

/// String value must not be empty
pub fn not_empty() -> Validator {
    Validator::string(|value| {
        if value.is_empty() {
            Err(ValidationError::new("value must not be empty"))
        } else {
            Ok(())
        }
    })
}
