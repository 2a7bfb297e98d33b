//! gradebook-core — Student roster, grading and persistence.
//!
//! This crate holds the in-memory record store, the score-to-grade
//! computation and the JSON load/save that the `gradebook` console builds on.

pub mod config;
pub mod error;
pub mod grading;
pub mod model;
pub mod roster;
pub mod storage;

pub use error::RosterError;
pub use grading::{Grade, GradeScale, Report};
pub use model::{Score, Student};
pub use roster::Roster;
