//! The `gradebook add` command.

use anyhow::Result;

use super::Settings;

pub fn execute(settings: &Settings, name: &str, scores: Vec<(String, f64)>) -> Result<()> {
    let mut roster = settings.load_roster()?;

    let subjects = roster.add_student_with_scores(name, scores)?.subject_count();
    settings.save_roster(&roster)?;

    println!("Added {} with {subjects} subject(s)", name.trim());
    Ok(())
}

/// Parse a `SUBJECT=SCORE` pair from the command line.
pub fn parse_subject_score(s: &str) -> Result<(String, f64), String> {
    let (subject, score) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SUBJECT=SCORE, got `{s}`"))?;
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(format!("missing subject in `{s}`"));
    }
    let score: f64 = score
        .trim()
        .parse()
        .map_err(|_| format!("score must be a number, got `{}`", score.trim()))?;
    Ok((subject.to_string(), score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        assert_eq!(
            parse_subject_score("Math=92").unwrap(),
            ("Math".to_string(), 92.0)
        );
        assert_eq!(
            parse_subject_score("Computer Science = 81.5").unwrap(),
            ("Computer Science".to_string(), 81.5)
        );
    }

    #[test]
    fn rejects_bad_pairs() {
        assert!(parse_subject_score("Math").is_err());
        assert!(parse_subject_score("=90").is_err());
        assert!(parse_subject_score("Math=ninety").is_err());
    }
}
