//! The in-memory record store.
//!
//! A [`Roster`] owns every [`Student`] for the lifetime of the program.
//! Every mutation validates its input before touching the map, so a failed
//! call never leaves the roster half-updated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RosterError;
use crate::grading::{GradeScale, Report};
use crate::model::{normalize, Score, Student};

/// All students, keyed by name.
///
/// Backed by a `BTreeMap`, so listing order is lexicographic by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    students: BTreeMap<String, Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a student with no scores.
    pub fn add_student(&mut self, name: &str) -> Result<&mut Student, RosterError> {
        self.add_student_with_scores(name, std::iter::empty::<(&str, f64)>())
    }

    /// Add a student together with an initial set of scores.
    ///
    /// Every score is checked before the student is inserted; on error the
    /// roster is unchanged.
    pub fn add_student_with_scores<I, S>(
        &mut self,
        name: &str,
        scores: I,
    ) -> Result<&mut Student, RosterError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let name = normalize(name, "student name")?;
        if self.students.contains_key(name) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }

        let mut student = Student::new();
        for (subject, value) in scores {
            student.set_score(subject.as_ref(), Score::new(value)?)?;
        }

        debug!(name, subjects = student.subject_count(), "added student");
        Ok(self.students.entry(name.to_string()).or_insert(student))
    }

    /// Insert or overwrite one subject's score. Returns the previous score.
    pub fn record_score(
        &mut self,
        name: &str,
        subject: &str,
        value: f64,
    ) -> Result<Option<Score>, RosterError> {
        let score = Score::new(value)?;
        let student = self.student_mut(name)?;
        let previous = student.set_score(subject, score)?;
        debug!(name = name.trim(), subject = subject.trim(), %score, "recorded score");
        Ok(previous)
    }

    /// Remove one subject's score from a student.
    pub fn remove_score(&mut self, name: &str, subject: &str) -> Result<Score, RosterError> {
        let student = self.student_mut(name)?;
        student
            .remove_score(subject)
            .ok_or_else(|| RosterError::SubjectNotFound {
                name: name.trim().to_string(),
                subject: subject.trim().to_string(),
            })
    }

    /// Remove a student and all of their scores.
    pub fn delete_student(&mut self, name: &str) -> Result<Student, RosterError> {
        let key = name.trim();
        let removed = self
            .students
            .remove(key)
            .ok_or_else(|| RosterError::NotFound(key.to_string()))?;
        debug!(name = key, "deleted student");
        Ok(removed)
    }

    pub fn report(&self, name: &str, scale: &GradeScale) -> Result<Report, RosterError> {
        let key = name.trim();
        let student = self
            .students
            .get(key)
            .ok_or_else(|| RosterError::NotFound(key.to_string()))?;
        Ok(Report::compute(key, student, scale))
    }

    /// Reports for every student, in name order.
    pub fn reports(&self, scale: &GradeScale) -> Vec<Report> {
        self.students
            .iter()
            .map(|(name, student)| Report::compute(name, student, scale))
            .collect()
    }

    pub fn list_students(&self) -> Vec<&str> {
        self.students.keys().map(String::as_str).collect()
    }

    pub fn student(&self, name: &str) -> Option<&Student> {
        self.students.get(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.students.contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Reject keys that serde accepted but lookups could never reach:
    /// blank names and names with surrounding whitespace.
    pub(crate) fn check_names(&self) -> Result<(), String> {
        for (name, student) in &self.students {
            check_key(name, "student name")?;
            for (subject, _) in student.scores() {
                check_key(subject, "subject")?;
            }
        }
        Ok(())
    }

    fn student_mut(&mut self, name: &str) -> Result<&mut Student, RosterError> {
        let key = name.trim();
        self.students
            .get_mut(key)
            .ok_or_else(|| RosterError::NotFound(key.to_string()))
    }
}

fn check_key(key: &str, what: &str) -> Result<(), String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        Err(format!("{what} must not be blank"))
    } else if trimmed != key {
        Err(format!("{what} {key:?} has surrounding whitespace"))
    } else {
        Ok(())
    }
}
