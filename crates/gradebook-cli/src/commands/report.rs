//! The `gradebook report` command and report rendering.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::grading::Report;

use super::Settings;

pub fn execute(settings: &Settings, name: Option<&str>, format: &str) -> Result<()> {
    let roster = settings.load_roster()?;

    let reports = match name {
        Some(name) => vec![roster.report(name, &settings.grade_scale)?],
        None => roster.reports(&settings.grade_scale),
    };

    match format {
        "json" => {
            if name.is_some() {
                println!("{}", serde_json::to_string_pretty(&reports[0])?);
            } else {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
        _ => {
            if reports.is_empty() {
                println!("No students yet.");
            }
            for report in &reports {
                println!("{}", render(report));
            }
        }
    }

    Ok(())
}

/// Render one student's report as a subject table plus average and grade.
pub fn render(report: &Report) -> String {
    let mut out = format!("Report for {}\n", report.name);

    if report.subjects.is_empty() {
        out.push_str("  No subjects recorded yet.\n");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Subject", "Score"]);
        for (subject, score) in &report.subjects {
            table.add_row(vec![Cell::new(subject), Cell::new(format!("{score:.2}"))]);
        }
        out.push_str(&format!("{table}\n"));
    }

    match (report.average, report.grade) {
        (Some(average), Some(grade)) => {
            out.push_str(&format!("  Average: {average:.2}\n"));
            out.push_str(&format!("  Grade  : {grade}\n"));
        }
        _ => {
            out.push_str("  Average: no scores yet\n");
            out.push_str("  Grade  : -\n");
        }
    }

    out
}
