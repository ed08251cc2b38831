//! Field-level checks shared by the entity constructors and the service
//! layer's patch handling. Every helper returns the trimmed value.

use crate::errors::ModelError;

/// Required free-text field: trimmed, non-empty, bounded length.
pub fn required(field: &str, value: &str, max_len: usize) -> Result<String, ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    if v.chars().count() > max_len {
        return Err(ModelError::Validation(format!("{field} must be at most {max_len} characters")));
    }
    Ok(v.to_string())
}

/// Optional free-text field; blank input collapses to `None`.
pub fn optional(field: &str, value: Option<&str>, max_len: usize) -> Result<Option<String>, ModelError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required(field, v, max_len).map(Some),
    }
}

pub fn price(value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(value)
}
