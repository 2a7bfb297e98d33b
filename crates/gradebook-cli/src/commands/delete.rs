//! The `gradebook delete` command.

use anyhow::Result;

use super::Settings;

pub fn execute(settings: &Settings, name: &str) -> Result<()> {
    let mut roster = settings.load_roster()?;

    let removed = roster.delete_student(name)?;
    settings.save_roster(&roster)?;

    println!(
        "Deleted {} ({} subject(s))",
        name.trim(),
        removed.subject_count()
    );
    Ok(())
}
