//! The `gradebook init` command.

use anyhow::Result;

use gradebook_core::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    if std::path::Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to pick a data file and grade thresholds");
    println!("  2. Run: gradebook add Alice --score Math=92");
    println!("  3. Run: gradebook");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

data_file = "grades.json"
autosave_on_exit = true

# Minimum average for each letter grade; anything below `d` is an F.
[grade_scale]
a = 90.0
b = 80.0
c = 70.0
d = 60.0
"#;
