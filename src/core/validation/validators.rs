//! Reusable field validators
//!
//! Validators see the already-filtered form value and return a message on
//! failure. They never look at other fields.

/// Validator: field must not be empty
pub fn required() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.is_empty() {
            Err(format!("{} is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: field must parse as a whole number
pub fn integer() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        value
            .parse::<i64>()
            .map(|_| ())
            .map_err(|_| format!("{} must be a whole number (got '{}')", field, value))
    }
}

/// Validator: number must not be negative
pub fn non_negative() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| match value.parse::<i64>() {
        Ok(n) if n < 0 => Err(format!("{} must not be negative (got {})", field, n)),
        // non-numbers are integer()'s concern
        _ => Ok(()),
    }
}

/// Validator: string length must not exceed maximum
pub fn max_length(max: usize) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        let len = value.chars().count();
        if len > max {
            Err(format!(
                "{} must be at most {} characters (currently {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}
