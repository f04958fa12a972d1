//! Utility functions used across learnboard

use crate::{EntityId, Result, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a new unique entity ID
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Get the current timestamp
pub fn now() -> Timestamp {
    Utc::now()
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(crate::LearnboardError::validation_field(
            format!("{} cannot be empty", field_name),
            field_name,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &value[..byte_index],
        None => value,
    }
}

/// Hours and minutes of learning time.
///
/// Seconds are truncated, never rounded: 3599 seconds is 0 h 59 min.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyTime {
    pub hours: u64,
    pub minutes: u64,
}

impl StudyTime {
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            hours: seconds / 3600,
            minutes: (seconds % 3600) / 60,
        }
    }

    /// Back to seconds at minute granularity
    pub fn to_seconds(self) -> u64 {
        self.hours * 3600 + self.minutes * 60
    }
}
