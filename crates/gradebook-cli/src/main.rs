//! gradebook CLI — the student report card manager console.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::Settings;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Student report card manager")]
struct Cli {
    /// JSON data file (overrides the config file)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Starts the interactive menu when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Shell,

    /// Add a student, optionally with initial scores
    Add {
        /// Student name
        name: String,

        /// Initial score as SUBJECT=SCORE (repeatable)
        #[arg(long = "score", value_parser = commands::add::parse_subject_score)]
        scores: Vec<(String, f64)>,
    },

    /// Record or update one subject's score
    Score {
        /// Student name
        name: String,

        /// Subject name
        subject: String,

        /// Score between 0 and 100
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },

    /// Remove one subject's score
    Unscore {
        /// Student name
        name: String,

        /// Subject name
        subject: String,
    },

    /// Show the report for one student, or for everyone
    Report {
        /// Student name (all students when omitted)
        name: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a student and all of their scores
    Delete {
        /// Student name
        name: String,
    },

    /// List all students
    List,

    /// Create a starter gradebook.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let result = run(cli);

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = || Settings::resolve(cli.config.as_deref(), cli.data_file.clone());

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => commands::shell::execute(&settings()?),
        Commands::Add { name, scores } => commands::add::execute(&settings()?, &name, scores),
        Commands::Score {
            name,
            subject,
            score,
        } => commands::score::execute(&settings()?, &name, &subject, score),
        Commands::Unscore { name, subject } => {
            commands::score::remove(&settings()?, &name, &subject)
        }
        Commands::Report { name, format } => {
            commands::report::execute(&settings()?, name.as_deref(), &format)
        }
        Commands::Delete { name } => commands::delete::execute(&settings()?, &name),
        Commands::List => commands::list::execute(&settings()?),
        Commands::Init => commands::init::execute(),
    }
}
