//! Core data model types for gradebook.
//!
//! A [`Student`] is a subject → [`Score`] map; the student's name lives in
//! the roster key, so the on-disk shape is simply
//! `{"Alice": {"Math": 92, "Science": 81}}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted score.
pub const MAX_SCORE: f64 = 100.0;

/// A validated score in `0..=100`.
///
/// The only way to build one is through [`Score::new`] (or `TryFrom<f64>`),
/// so every `Score` held by a roster is in range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, RosterError> {
        if value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RosterError::InvalidScore(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = RosterError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One student's recorded scores, keyed by subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Student {
    scores: BTreeMap<String, Score>,
}

impl Student {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a subject's score. Returns the previous score.
    pub fn set_score(&mut self, subject: &str, score: Score) -> Result<Option<Score>, RosterError> {
        let subject = normalize(subject, "subject")?;
        Ok(self.scores.insert(subject.to_string(), score))
    }

    /// Remove a subject's score, returning it if present.
    pub fn remove_score(&mut self, subject: &str) -> Option<Score> {
        self.scores.remove(subject.trim())
    }

    pub fn score(&self, subject: &str) -> Option<Score> {
        self.scores.get(subject.trim()).copied()
    }

    /// Subjects and scores in subject order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, Score)> {
        self.scores.iter().map(|(s, v)| (s.as_str(), *v))
    }

    pub fn subject_count(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Trim a student or subject name, rejecting it if nothing is left.
pub(crate) fn normalize<'a>(raw: &'a str, what: &'static str) -> Result<&'a str, RosterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(RosterError::InvalidName(what))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_inclusive_bounds() {
        assert_eq!(Score::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Score::new(100.0).unwrap().value(), 100.0);
        assert_eq!(Score::new(72.5).unwrap().value(), 72.5);
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert!(matches!(Score::new(-0.5), Err(RosterError::InvalidScore(_))));
        assert!(matches!(Score::new(100.01), Err(RosterError::InvalidScore(_))));
        assert!(matches!(Score::new(f64::NAN), Err(RosterError::InvalidScore(_))));
        assert!(matches!(
            Score::new(f64::INFINITY),
            Err(RosterError::InvalidScore(_))
        ));
    }

    #[test]
    fn score_deserialization_is_validated() {
        let ok: Score = serde_json::from_str("81").unwrap();
        assert_eq!(ok.value(), 81.0);
        assert!(serde_json::from_str::<Score>("150").is_err());
        assert!(serde_json::from_str::<Score>("\"90\"").is_err());
    }

    #[test]
    fn student_overwrites_existing_subject() {
        let mut student = Student::new();
        assert_eq!(student.set_score("Math", Score::new(70.0).unwrap()).unwrap(), None);
        let previous = student.set_score(" Math ", Score::new(92.0).unwrap()).unwrap();
        assert_eq!(previous.map(Score::value), Some(70.0));
        assert_eq!(student.subject_count(), 1);
        assert_eq!(student.score("Math").map(Score::value), Some(92.0));
    }

    #[test]
    fn student_rejects_blank_subject() {
        let mut student = Student::new();
        let err = student.set_score("   ", Score::new(50.0).unwrap()).unwrap_err();
        assert!(matches!(err, RosterError::InvalidName("subject")));
        assert!(student.is_empty());
    }

    #[test]
    fn student_serializes_as_plain_map() {
        let mut student = Student::new();
        student.set_score("Science", Score::new(81.0).unwrap()).unwrap();
        student.set_score("Math", Score::new(92.0).unwrap()).unwrap();
        let json = serde_json::to_string(&student).unwrap();
        assert_eq!(json, r#"{"Math":92.0,"Science":81.0}"#);
    }
}
