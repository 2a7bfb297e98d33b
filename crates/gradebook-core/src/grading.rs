//! Averages and letter grades.
//!
//! A [`GradeScale`] is four descending thresholds; an average maps to the
//! highest band whose threshold it reaches. A student with no scores has
//! no average and no grade, so nothing here ever divides by zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::model::{Score, Student, MAX_SCORE, MIN_SCORE};

/// Letter grades, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Minimum average for each passing grade. Anything below `d` is an F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    #[serde(default = "default_a")]
    pub a: f64,
    #[serde(default = "default_b")]
    pub b: f64,
    #[serde(default = "default_c")]
    pub c: f64,
    #[serde(default = "default_d")]
    pub d: f64,
}

fn default_a() -> f64 {
    90.0
}
fn default_b() -> f64 {
    80.0
}
fn default_c() -> f64 {
    70.0
}
fn default_d() -> f64 {
    60.0
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
            c: default_c(),
            d: default_d(),
        }
    }
}

impl GradeScale {
    /// Check that every threshold is a score and that they strictly descend.
    pub fn validate(&self) -> Result<(), RosterError> {
        let bands = [("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d)];
        for (band, threshold) in bands {
            if !threshold.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&threshold) {
                return Err(RosterError::InvalidGradeScale(format!(
                    "threshold {band} = {threshold} is outside 0..=100"
                )));
            }
        }
        for pair in bands.windows(2) {
            let (upper, hi) = pair[0];
            let (lower, lo) = pair[1];
            if hi <= lo {
                return Err(RosterError::InvalidGradeScale(format!(
                    "threshold {upper} ({hi}) must be above {lower} ({lo})"
                )));
            }
        }
        Ok(())
    }

    pub fn grade(&self, average: f64) -> Grade {
        if average >= self.a {
            Grade::A
        } else if average >= self.b {
            Grade::B
        } else if average >= self.c {
            Grade::C
        } else if average >= self.d {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Arithmetic mean of the scores, or `None` if there are none.
pub fn average<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = Score>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, n), s| (sum + s.value(), n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Computed summary for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    /// Recorded scores in subject order.
    pub subjects: Vec<(String, f64)>,
    /// `None` when the student has no scores yet.
    pub average: Option<f64>,
    pub grade: Option<Grade>,
}

impl Report {
    pub fn compute(name: &str, student: &Student, scale: &GradeScale) -> Self {
        let average = average(student.scores().map(|(_, s)| s));
        Self {
            name: name.to_string(),
            subjects: student
                .scores()
                .map(|(subject, score)| (subject.to_string(), score.value()))
                .collect(),
            average,
            grade: average.map(|avg| scale.grade(avg)),
        }
    }
}
