//! The `quizmark validate` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use quizmark_core::config::load_config_from;

pub fn execute(quiz_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let quizzes = if quiz_path.is_dir() {
        quizmark_core::parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![quizmark_core::parser::parse_quiz(&quiz_path)?]
    };

    let now = Utc::now();
    let mut total_issues = 0;

    for quiz in &quizzes {
        println!(
            "Quiz: {} ({} questions, {} marks)",
            quiz.title,
            quiz.questions.len(),
            quiz.total_marks()
        );

        let issues = quizmark_core::parser::validate_quiz(quiz, now, &config.topics);
        for issue in &issues {
            println!("  [{}] ERROR: {}", issue.path, issue.message);
        }
        total_issues += issues.len();
    }

    if total_issues > 0 {
        anyhow::bail!("{total_issues} validation issue(s) found");
    }

    println!("All quizzes valid.");
    Ok(())
}
