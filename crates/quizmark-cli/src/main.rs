//! quizmark CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizmark",
    version,
    about = "Quiz grading and tutoring analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a student's answers against a quiz
    Grade {
        /// Quiz definition (.json or .toml)
        #[arg(long)]
        quiz: PathBuf,

        /// Answers JSON file
        #[arg(long)]
        answers: PathBuf,

        /// Directory to save the attempt report in (default: config output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Do not save an attempt report
        #[arg(long)]
        no_save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz definitions before publishing
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show per-topic mastery
    Mastery {
        /// Directory of attempt reports (default: config output_dir)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show overall progress across attempts
    Progress {
        /// Directory of attempt reports (default: config output_dir)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List incorrectly answered questions
    Mistakes {
        /// Directory of attempt reports (default: config output_dir)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Only show mistakes for this topic code
        #[arg(long)]
        topic: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Suggest a plan for the next tutoring session
    Plan {
        /// Directory of attempt reports (default: config output_dir)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show assigned quizzes and their due dates
    Due {
        /// Path to a quiz file or directory
        #[arg(long)]
        quizzes: PathBuf,

        /// Directory of attempt reports (default: config output_dir)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            quiz,
            answers,
            output,
            format,
            no_save,
            config,
        } => commands::grade::execute(quiz, answers, output, format, no_save, config),
        Commands::Validate { quiz, config } => commands::validate::execute(quiz, config),
        Commands::Mastery {
            history,
            format,
            config,
        } => commands::mastery::execute(history, format, config),
        Commands::Progress {
            history,
            format,
            config,
        } => commands::progress::execute(history, format, config),
        Commands::Mistakes {
            history,
            topic,
            format,
            config,
        } => commands::mistakes::execute(history, topic, format, config),
        Commands::Plan {
            history,
            format,
            config,
        } => commands::plan::execute(history, format, config),
        Commands::Due {
            quizzes,
            history,
            format,
            config,
        } => commands::due::execute(quizzes, history, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
