//! Error types for catalog loading and schedule edits.

use serde::Serialize;
use thiserror::Error;

use super::models::ScheduledCourse;

/// Errors that leave the planner without a catalog. Never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Catalog file could not be read
    #[error("Failed to read catalog from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog URL could not be fetched
    #[error("Failed to fetch catalog from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Input is not JSON or an entry lacks a required field
    #[error("Malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An entry parsed but violates a catalog rule
    #[error("Invalid course {id}: {reason}")]
    InvalidCourse { id: String, reason: String },

    #[error("Course id {id} appears more than once")]
    DuplicateId { id: String },

    #[error("Slot catalog is empty, courses cannot be bound to a time")]
    EmptySlotCatalog,
}

/// Reasons an add is refused. The schedule is left untouched in every case.
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddError {
    #[error("Course {id} is already in the schedule")]
    AlreadyScheduled { id: String },

    #[error("Missing prerequisites: {}", .missing.join(", "))]
    PrerequisitesNotMet { missing: Vec<String> },

    #[error("Time conflict with {} ({})", .with.course.course_code, .with.slot)]
    TimeConflict { with: Box<ScheduledCourse> },
}

impl AddError {
    /// Course code of the scheduled course blocking the add, if any.
    pub fn conflicting_code(&self) -> Option<&str> {
        match self {
            AddError::TimeConflict { with } => Some(with.code()),
            _ => None,
        }
    }
}
