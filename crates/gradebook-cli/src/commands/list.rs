//! The `gradebook list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::grading::GradeScale;
use gradebook_core::roster::Roster;

use super::Settings;

pub fn execute(settings: &Settings) -> Result<()> {
    let roster = settings.load_roster()?;
    println!("{}", render(&roster, &settings.grade_scale));
    Ok(())
}

/// Render the roster as a name / subjects / average / grade table.
pub fn render(roster: &Roster, scale: &GradeScale) -> String {
    if roster.is_empty() {
        return "No students yet.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Subjects", "Average", "Grade"]);

    for report in roster.reports(scale) {
        let average = report
            .average
            .map(|a| format!("{a:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let grade = report
            .grade
            .map(|g| g.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&report.name),
            Cell::new(report.subjects.len()),
            Cell::new(average),
            Cell::new(grade),
        ]);
    }

    format!("{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roster() {
        assert_eq!(render(&Roster::new(), &GradeScale::default()), "No students yet.");
    }

    #[test]
    fn lists_every_student() {
        let mut roster = Roster::new();
        roster
            .add_student_with_scores("Alice", [("Math", 92.0), ("Science", 81.0)])
            .unwrap();
        roster.add_student("Bob").unwrap();

        let text = render(&roster, &GradeScale::default());
        assert!(text.contains("Alice"));
        assert!(text.contains("86.50"));
        assert!(text.contains("Bob"));
        assert!(text.find("Alice").unwrap() < text.find("Bob").unwrap());
    }
}
