//! The `gradebook score` and `gradebook unscore` commands.

use anyhow::Result;

use super::Settings;

pub fn execute(settings: &Settings, name: &str, subject: &str, score: f64) -> Result<()> {
    let mut roster = settings.load_roster()?;

    let previous = roster.record_score(name, subject, score)?;
    settings.save_roster(&roster)?;

    match previous {
        Some(old) => println!(
            "Updated {} for {}: {old} -> {score}",
            subject.trim(),
            name.trim()
        ),
        None => println!("Recorded {} = {score} for {}", subject.trim(), name.trim()),
    }
    Ok(())
}

pub fn remove(settings: &Settings, name: &str, subject: &str) -> Result<()> {
    let mut roster = settings.load_roster()?;

    let removed = roster.remove_score(name, subject)?;
    settings.save_roster(&roster)?;

    println!("Removed {} ({removed}) from {}", subject.trim(), name.trim());
    Ok(())
}
