//! The interactive menu loop.
//!
//! Every roster or storage error is reported and the loop carries on; only a
//! broken console (stdin/stdout I/O failure) ends the session early. End of
//! input is treated like choosing "Exit". Ctrl-C saves the last committed
//! menu state when autosave is on and exits with status 130.

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use gradebook_core::error::RosterError;
use gradebook_core::model::Score;
use gradebook_core::roster::Roster;
use gradebook_core::storage;

use super::{list, report, Settings};

const MENU: &str = "
--- Student Report Card Manager ---
1. Add student
2. Record / update a score
3. View a student's report
4. View all reports
5. Delete a student
6. Save data
7. Load data
8. List students
0. Exit
";

pub fn execute(settings: &Settings) -> Result<()> {
    let roster = settings.load_roster()?;

    let checkpoint = Checkpoint::default();
    let handler_checkpoint = checkpoint.clone();
    let handler_settings = settings.clone();
    // stdout stays locked by the menu, so the handler reports on stderr.
    ctrlc::set_handler(move || {
        let _ = on_interrupt(&handler_checkpoint, &handler_settings, &mut io::stderr());
        process::exit(130);
    })
    .context("failed to install Ctrl-C handler")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(roster, settings, stdin.lock(), stdout.lock())
        .with_checkpoint(checkpoint)
        .run()?;
    Ok(())
}

/// The roster as of the last completed menu action, shared with the
/// Ctrl-C handler.
#[derive(Clone, Default)]
pub struct Checkpoint(Arc<Mutex<Option<Roster>>>);

impl Checkpoint {
    fn store(&self, roster: &Roster) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(roster.clone());
        }
    }

    fn snapshot(&self) -> Option<Roster> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }
}

/// Ctrl-C: save the checkpointed roster if autosave is on.
pub fn on_interrupt(
    checkpoint: &Checkpoint,
    settings: &Settings,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "\nInterrupted, exiting.")?;
    if settings.autosave_on_exit {
        if let Some(roster) = checkpoint.snapshot() {
            let path = &settings.data_file;
            match storage::save(&roster, path) {
                Ok(()) => writeln!(out, "Data saved to {}", path.display())?,
                Err(e) => writeln!(out, "Error: {e}")?,
            }
        }
    }
    out.flush()
}

enum Flow {
    Continue,
    Exit,
}

/// Menu state: the roster it owns plus the console it talks to.
pub struct Menu<'a, R, W> {
    roster: Roster,
    settings: &'a Settings,
    input: R,
    output: W,
    checkpoint: Option<Checkpoint>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(roster: Roster, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            roster,
            settings,
            input,
            output,
            checkpoint: None,
        }
    }

    /// Mirror the roster into `checkpoint` after every action.
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Run until the user exits or input ends, returning the final roster.
    pub fn run(mut self) -> io::Result<Roster> {
        loop {
            if let Some(checkpoint) = &self.checkpoint {
                checkpoint.store(&self.roster);
            }
            write!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.record_score()?,
                "3" => self.show_report()?,
                "4" => self.show_all_reports()?,
                "5" => self.delete_student()?,
                "6" => {
                    self.save()?;
                    Flow::Continue
                }
                "7" => {
                    self.load()?;
                    Flow::Continue
                }
                "8" => {
                    writeln!(
                        self.output,
                        "{}",
                        list::render(&self.roster, &self.settings.grade_scale)
                    )?;
                    Flow::Continue
                }
                "0" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Please choose a valid option (0-8).")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        if self.settings.autosave_on_exit {
            self.save()?;
        }
        writeln!(self.output, "Good-bye!")?;
        self.output.flush()?;
        Ok(self.roster)
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a score until a valid one is typed. `None` at end of input.
    fn prompt_score(&mut self, label: &str) -> io::Result<Option<Score>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            match raw.parse::<f64>() {
                Ok(value) => match Score::new(value) {
                    Ok(score) => return Ok(Some(score)),
                    Err(e) => writeln!(self.output, "Error: {e}")?,
                },
                Err(_) => writeln!(self.output, "Enter a number between 0 and 100.")?,
            }
        }
    }

    fn report_error(&mut self, e: &RosterError) -> io::Result<Flow> {
        writeln!(self.output, "Error: {e}")?;
        Ok(Flow::Continue)
    }

    fn add_student(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Student name: ")? else {
            return Ok(Flow::Exit);
        };
        if name.is_empty() {
            return self.report_error(&RosterError::InvalidName("student name"));
        }
        if self.roster.contains(&name) {
            return self.report_error(&RosterError::DuplicateName(name));
        }

        let mut scores = Vec::new();
        loop {
            let Some(subject) = self.prompt("Subject name (or press Enter to finish): ")? else {
                return Ok(Flow::Exit);
            };
            if subject.is_empty() {
                break;
            }
            let Some(score) = self.prompt_score(&format!("Score for {subject}: "))? else {
                return Ok(Flow::Exit);
            };
            scores.push((subject, score.value()));
        }

        let added = self
            .roster
            .add_student_with_scores(&name, scores)
            .map(|student| student.subject_count());
        match added {
            Ok(count) => {
                writeln!(self.output, "Added {name} with {count} subject(s).")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn record_score(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Student name: ")? else {
            return Ok(Flow::Exit);
        };
        if !self.roster.contains(&name) {
            return self.report_error(&RosterError::NotFound(name));
        }
        let Some(subject) = self.prompt("Subject to change/add: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("New score: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(value) = raw.parse::<f64>() else {
            writeln!(self.output, "Invalid input: `{raw}` is not a number.")?;
            return Ok(Flow::Continue);
        };

        match self.roster.record_score(&name, &subject, value) {
            Ok(_) => {
                writeln!(self.output, "Score updated.")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn show_report(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Student name: ")? else {
            return Ok(Flow::Exit);
        };
        match self.roster.report(&name, &self.settings.grade_scale) {
            Ok(r) => {
                writeln!(self.output, "\n{}", report::render(&r))?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn show_all_reports(&mut self) -> io::Result<Flow> {
        let reports = self.roster.reports(&self.settings.grade_scale);
        if reports.is_empty() {
            writeln!(self.output, "No students yet.")?;
        }
        for r in &reports {
            writeln!(self.output, "\n{}", report::render(r))?;
        }
        Ok(Flow::Continue)
    }

    fn delete_student(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Student name: ")? else {
            return Ok(Flow::Exit);
        };
        match self.roster.delete_student(&name) {
            Ok(_) => {
                writeln!(self.output, "Student deleted.")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn save(&mut self) -> io::Result<()> {
        let settings = self.settings;
        let path = &settings.data_file;
        match storage::save(&self.roster, path) {
            Ok(()) => writeln!(self.output, "Data saved to {}", path.display()),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    /// Replace the roster with the file's contents; on any failure the
    /// current roster is kept as-is.
    fn load(&mut self) -> io::Result<()> {
        let settings = self.settings;
        let path = &settings.data_file;
        match storage::load(path) {
            Ok(roster) => {
                self.roster = roster;
                writeln!(
                    self.output,
                    "Loaded {} student(s) from {}",
                    self.roster.len(),
                    path.display()
                )
            }
            Err(RosterError::FileNotFound(_)) => writeln!(
                self.output,
                "No saved data found at {}; keeping current roster.",
                path.display()
            ),
            Err(e) => writeln!(self.output, "Error: {e}; keeping current roster."),
        }
    }
}
