//! Validation helpers for configuration values

use validator::ValidationError;

/// Validate log level
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Activity thresholds must be positive and strictly increasing
pub fn validate_thresholds(thresholds: &[u64]) -> Result<(), ValidationError> {
    if thresholds.first().is_some_and(|first| *first == 0) {
        return Err(ValidationError::new("zero_activity_threshold"));
    }
    if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ValidationError::new("unordered_activity_thresholds"));
    }
    Ok(())
}

/// Positions that must appear top to bottom in the given order
pub fn validate_vertical_order(positions: &[f64]) -> Result<(), ValidationError> {
    if positions.iter().any(|y| !y.is_finite() || *y < 0.0) {
        return Err(ValidationError::new("invalid_position"));
    }
    if positions.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ValidationError::new("positions_out_of_order"));
    }
    Ok(())
}

/// Table columns must be increasing and lie within the ruled area
pub fn validate_columns(columns: &[f64], left_x: f64, right_x: f64) -> Result<(), ValidationError> {
    if columns.iter().any(|x| *x < left_x || *x >= right_x) {
        return Err(ValidationError::new("column_outside_table"));
    }
    if columns.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ValidationError::new("columns_out_of_order"));
    }
    Ok(())
}
