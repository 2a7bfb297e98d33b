//! Roster error types.
//!
//! Every fallible operation in this crate returns one of these variants so
//! the console can tell a bad input apart from a broken data file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when operating on a roster or its data file.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A student with this name is already on the roster.
    #[error("student already exists: {0}")]
    DuplicateName(String),

    /// No student with this name is on the roster.
    #[error("student not found: {0}")]
    NotFound(String),

    /// The student exists but has no score for this subject.
    #[error("no {subject} score recorded for {name}")]
    SubjectNotFound { name: String, subject: String },

    /// The score is not a finite number in 0..=100.
    #[error("score must be between 0 and 100, got {0}")]
    InvalidScore(f64),

    /// A student or subject name was blank.
    #[error("{0} must not be blank")]
    InvalidName(&'static str),

    /// Grade thresholds are out of range or not strictly descending.
    #[error("invalid grade scale: {0}")]
    InvalidGradeScale(String),

    /// The data file exists but does not have the expected shape.
    #[error("malformed data in {}: {source}", path.display())]
    MalformedData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The data file does not exist.
    #[error("data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading or writing the data file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(
            RosterError::DuplicateName("Alice".into()).to_string(),
            "student already exists: Alice"
        );
        assert_eq!(
            RosterError::InvalidScore(150.0).to_string(),
            "score must be between 0 and 100, got 150"
        );
        assert_eq!(
            RosterError::InvalidName("subject").to_string(),
            "subject must not be blank"
        );
    }

    #[test]
    fn file_errors_carry_the_path() {
        let err = RosterError::FileNotFound(PathBuf::from("grades.json"));
        assert_eq!(err.to_string(), "data file not found: grades.json");
    }
}
