//! Common types used across learnboard
//!
//! Every entity here is a read-only input to the analytics core. Field names
//! serialize in camelCase so snapshots exported by the dashboard front end can
//! be loaded without a mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for employees, content items, invitations and logs
pub type EntityId = String;

/// Timestamp type used throughout the application
pub type Timestamp = DateTime<Utc>;

/// Learning status of a (user, content) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Progress of one user on one content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: EntityId,
    pub content_id: EntityId,
    pub status: ProgressStatus,
    /// 0-100
    pub progress_percentage: u8,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub last_accessed_at: Option<Timestamp>,
    /// Cumulative, never decreases over the record's life
    #[serde(alias = "timeSpent")]
    pub time_spent_seconds: u64,
    pub attempts: u32,
    pub best_score: Option<u8>,
}

impl ProgressRecord {
    /// A fresh record for `user_id` on `content_id` that has not been opened yet
    pub fn not_started(user_id: impl Into<EntityId>, content_id: impl Into<EntityId>) -> Self {
        Self {
            user_id: user_id.into(),
            content_id: content_id.into(),
            status: ProgressStatus::NotStarted,
            progress_percentage: 0,
            started_at: None,
            completed_at: None,
            last_accessed_at: None,
            time_spent_seconds: 0,
            attempts: 1,
            best_score: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == ProgressStatus::InProgress
    }

    /// Whether the record honours the completion invariants.
    ///
    /// The core never rejects inconsistent records; this is only used to
    /// surface data-quality diagnostics.
    pub fn is_consistent(&self) -> bool {
        let completed = self.is_completed();
        completed == self.completed_at.is_some()
            && completed == (self.progress_percentage == 100)
            && self.progress_percentage <= 100
            && self.attempts > 0
    }
}

/// Kind of learning unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Video,
    Text,
    Quiz,
    Interactive,
    #[serde(other)]
    Other,
}

impl ContentType {
    /// All known content types in display order
    pub const ALL: [ContentType; 5] = [
        ContentType::Video,
        ContentType::Text,
        ContentType::Quiz,
        ContentType::Interactive,
        ContentType::Other,
    ];

    /// Stable identifier used for message lookups
    pub fn key(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Text => "text",
            Self::Quiz => "quiz",
            Self::Interactive => "interactive",
            Self::Other => "other",
        }
    }
}

/// A learning unit in the content catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: EntityId,
    pub title: String,
    pub content_type: ContentType,
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

/// A company employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: EmployeeStatus,
    pub joined_at: Timestamp,
}

impl Employee {
    /// Family name first, separated by a space
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Stored invitation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
}

/// An invitation e-mail sent to a prospective employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: EntityId,
    pub email: String,
    pub status: InvitationStatus,
    pub sent_at: Timestamp,
    pub expires_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
}

/// A single learning activity event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningLog {
    pub id: EntityId,
    pub user_id: EntityId,
    pub content_id: EntityId,
    pub action: String,
    pub timestamp: Timestamp,
}

/// Kind of signed-in account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    CompanyAdmin,
    CompanyEmployee,
}

/// The signed-in user, consumed as an opaque value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: EntityId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,
    pub company_name: Option<String>,
    pub company_code: Option<String>,
}
