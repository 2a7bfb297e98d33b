//! Whole-file JSON persistence for a [`Roster`].
//!
//! The file is a single object, `{"Alice": {"Math": 92, "Science": 81}}`.
//! Saves go to a temp file in the same directory which is synced and then
//! renamed over the destination, so an interrupted save never leaves a
//! truncated data file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::RosterError;
use crate::roster::Roster;

/// Default data file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "grades.json";

/// Write the roster to `path`, replacing any previous file atomically.
pub fn save(roster: &Roster, path: &Path) -> Result<(), RosterError> {
    let io_err = |source: io::Error| RosterError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(roster).map_err(|e| io_err(e.into()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.write_all(b"\n").map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    info!(
        "saved {} student(s) to {}",
        roster.len(),
        path.display()
    );
    Ok(())
}

/// Read a roster from `path`.
///
/// A missing file is [`RosterError::FileNotFound`]; anything that is not an
/// object of objects of in-range numbers is [`RosterError::MalformedData`].
pub fn load(path: &Path) -> Result<Roster, RosterError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RosterError::FileNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(RosterError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let roster: Roster =
        serde_json::from_str(&content).map_err(|source| RosterError::MalformedData {
            path: path.to_path_buf(),
            source,
        })?;
    roster.check_names().map_err(|msg| RosterError::MalformedData {
        path: path.to_path_buf(),
        source: serde::de::Error::custom(msg),
    })?;

    info!(
        "loaded {} student(s) from {}",
        roster.len(),
        path.display()
    );
    Ok(roster)
}

/// Like [`load`], but a missing file is an empty roster.
pub fn load_or_default(path: &Path) -> Result<Roster, RosterError> {
    match load(path) {
        Err(RosterError::FileNotFound(_)) => {
            info!("no saved data at {}, starting fresh", path.display());
            Ok(Roster::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roster {
        let mut roster = Roster::new();
        roster
            .add_student_with_scores("Alice", [("Math", 92.0), ("Science", 81.0)])
            .unwrap();
        roster.add_student_with_scores("Bob", [("Math", 70.0)]).unwrap();
        roster.add_student("Carol").unwrap();
        roster.record_score("Bob", "Art", 66.5).unwrap();
        roster
    }

    #[test]
    fn save_then_load_reproduces_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        let roster = sample();

        save(&roster, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn reads_documented_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        fs::write(
            &path,
            r#"{"Alice": {"Math": 92, "Science": 81}, "Bob": {"Math": 70}}"#,
        )
        .unwrap();

        let roster = load(&path).unwrap();
        assert_eq!(roster.list_students(), vec!["Alice", "Bob"]);
        let alice = roster.student("Alice").unwrap();
        assert_eq!(alice.score("Science").map(|s| s.value()), Some(81.0));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load(&path), Err(RosterError::FileNotFound(_))));
        assert!(load_or_default(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        let bad = [
            "[]",
            r#"[{"id": 1, "name": "Alice", "subjects": {}}]"#,
            r#"{"Alice": [92, 81]}"#,
            r#"{"Alice": {"Math": "ninety"}}"#,
            r#"{"Alice": {"Math": 150}}"#,
            r#"{"Alice": {"Math": -1}}"#,
            r#"{"  ": {"Math": 50}}"#,
            r#"{"Alice": {"": 50}}"#,
            r#"{" Alice ": {"Math": 92}}"#,
            r#"{"Alice": {" Math ": 92}}"#,
            r#"{"Alice\t": {}}"#,
            "{not json",
        ];
        for content in bad {
            fs::write(&path, content).unwrap();
            let err = load(&path).unwrap_err();
            assert!(
                matches!(err, RosterError::MalformedData { .. }),
                "{content} gave {err:?}"
            );
        }
    }

    #[test]
    fn save_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        save(&sample(), &path).unwrap();

        let mut smaller = Roster::new();
        smaller.add_student("Zoe").unwrap();
        save(&smaller, &path).unwrap();

        assert_eq!(load(&path).unwrap(), smaller);
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn padded_keys_are_not_loaded_next_to_trimmed_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        fs::write(&path, r#"{" Alice ": {" Math ": 92}}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("surrounding whitespace"), "{err}");
        assert!(matches!(load_or_default(&path), Err(RosterError::MalformedData { .. })));
    }

    #[test]
    fn duplicate_keys_keep_last_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        fs::write(
            &path,
            r#"{"Alice": {"Math": 50, "Math": 92}, "Bob": {"Art": 10}, "Bob": {"Music": 70}}"#,
        )
        .unwrap();

        let roster = load(&path).unwrap();
        let alice = roster.student("Alice").unwrap();
        assert_eq!(alice.score("Math").map(|s| s.value()), Some(92.0));
        let bob = roster.student("Bob").unwrap();
        assert_eq!(bob.score("Art"), None);
        assert_eq!(bob.score("Music").map(|s| s.value()), Some(70.0));
    }

    #[test]
    fn failed_save_leaves_target_and_siblings_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.json");
        save(&sample(), &path).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory cannot be the target of the final rename.
        let blocked = dir.path().join("blocked");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();
        assert!(matches!(
            save(&Roster::new(), &blocked),
            Err(RosterError::Io { .. })
        ));

        assert!(blocked.is_dir());
        assert!(blocked.join("keep").exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        // The temp file from the failed save is cleaned up.
        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["blocked", "grades.json"]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/grades.json");
        save(&sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }
}
