//! The `quizmark grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use quizmark_core::config::load_config_from;
use quizmark_core::grading::grade_quiz;
use quizmark_core::model::Quiz;
use quizmark_core::parser::{parse_answers, parse_quiz};
use quizmark_core::report::AttemptReport;
use quizmark_core::timing::{format_time_taken, is_overdue};

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    no_save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quiz = parse_quiz(&quiz_path)?;
    let sheet = parse_answers(&answers_path)?;

    let grading = grade_quiz(&quiz.questions, &sheet.answers, &quiz.topic)
        .with_context(|| format!("failed to grade {}", quiz_path.display()))?;

    let submitted_at = Utc::now();
    if is_overdue(quiz.due_date, submitted_at) {
        tracing::warn!(
            "'{}' was due {}, grading a late submission",
            quiz.title,
            quiz.due_date
        );
    }

    let report = AttemptReport::new(
        &quiz,
        sheet.answers,
        grading,
        sheet.time_taken_seconds,
        submitted_at,
    );

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_summary(&quiz, &report),
    }

    if !no_save {
        let dir = output.unwrap_or(config.output_dir);
        let path = dir.join(report.file_name());
        report.save_json(&path)?;
        eprintln!("Attempt saved to {}", path.display());
    }

    Ok(())
}

fn print_summary(quiz: &Quiz, report: &AttemptReport) {
    use comfy_table::{Cell, Table};

    println!("Quiz: {} ({}, week {})", quiz.title, quiz.topic, quiz.week);

    let mut table = Table::new();
    table.set_header(vec!["#", "Type", "Your answer", "Correct", "Marks", "Result"]);

    for r in &report.grading.question_results {
        let result = if r.is_correct {
            "correct"
        } else if r.marks_awarded > 0 {
            "partial"
        } else {
            "incorrect"
        };
        table.add_row(vec![
            Cell::new(r.question_index + 1),
            Cell::new(r.question_type),
            Cell::new(&r.student_answer),
            Cell::new(&r.correct_answer),
            Cell::new(format!("{}/{}", r.marks_awarded, r.marks_possible)),
            Cell::new(result),
        ]);
    }
    println!("{table}");

    println!(
        "\nScore: {}/{} ({}%)  Grade: {}",
        report.grading.score, report.grading.total_marks, report.percentage, report.grade
    );
    println!(
        "Correct: {}/{}",
        report.grading.correct_count(),
        report.grading.question_results.len()
    );

    if let Some(secs) = report.time_taken_seconds {
        let limit = u64::from(quiz.time_limit_minutes) * 60;
        let over = if secs > limit { " (over time limit)" } else { "" };
        println!(
            "Time taken: {} of {}{over}",
            format_time_taken(secs),
            format_time_taken(limit)
        );
    }

    let explanations: Vec<(usize, &str)> = report
        .grading
        .question_results
        .iter()
        .filter(|r| !r.is_correct)
        .filter_map(|r| {
            quiz.questions
                .get(r.question_index)
                .and_then(|q| q.explanation())
                .map(|e| (r.question_index + 1, e))
        })
        .collect();
    if !explanations.is_empty() {
        println!("\nExplanations:");
        for (number, text) in explanations {
            println!("  Q{number}: {text}");
        }
    }
}
