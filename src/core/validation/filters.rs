//! Reusable field filters
//!
//! These filters normalise raw form input before validation

/// Filter: trim whitespace from both ends
pub fn trim() -> impl Fn(&str, &str) -> String + Send + Sync + Clone {
    |_: &str, value: &str| value.trim().to_string()
}

/// Filter: collapse internal runs of whitespace into a single space
pub fn collapse_whitespace() -> impl Fn(&str, &str) -> String + Send + Sync + Clone {
    |_: &str, value: &str| value.split_whitespace().collect::<Vec<_>>().join(" ")
}
