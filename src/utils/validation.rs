use crate::utils::error::{ExpiryError, Result};
use regex::Regex;
use std::sync::LazyLock;

static RUST_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$").expect("valid path pattern")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_marker_path(field_name: &str, marker: &str) -> Result<()> {
    if !RUST_PATH.is_match(marker) {
        return Err(ExpiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: marker.to_string(),
            reason: "Marker must be an attribute path like `expiry` or `my_crate::expiry`"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExpiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExpiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Exclude entries match single file or directory names, never paths.
pub fn validate_bare_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;
    if name.contains(['/', '\\']) {
        return Err(ExpiryError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("\"{}\" contains a path separator and can never match a file name", name),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(ExpiryError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ExpiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
