pub mod due;
pub mod grade;
pub mod init;
pub mod mastery;
pub mod mistakes;
pub mod plan;
pub mod progress;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::config::QuizmarkConfig;
use quizmark_core::report::{load_report_directory, AttemptReport};

/// Load attempt history from `history`, or from the configured output
/// directory. A missing default directory means no attempts yet.
pub fn load_history(
    history: Option<PathBuf>,
    config: &QuizmarkConfig,
) -> Result<Vec<AttemptReport>> {
    match history {
        Some(dir) => load_report_directory(&dir),
        None if !config.output_dir.exists() => {
            tracing::debug!(
                "no attempts directory at {}",
                config.output_dir.display()
            );
            Ok(Vec::new())
        }
        None => load_report_directory(&config.output_dir),
    }
}
