//! The `quizmark due` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use quizmark_core::config::load_config_from;
use quizmark_core::homework::{homework_summary, HomeworkSummary};
use quizmark_core::parser::{load_quiz_directory, parse_quiz};

use super::load_history;

pub fn execute(
    quizzes: PathBuf,
    history: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quizzes = if quizzes.is_dir() {
        load_quiz_directory(&quizzes)?
    } else {
        vec![parse_quiz(&quizzes)?]
    };
    let reports = load_history(history, &config)?;
    let summary = homework_summary(&quizzes, &reports, Utc::now());

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &HomeworkSummary) {
    use comfy_table::{Cell, Table};

    if summary.total_assigned == 0 {
        println!("No published quizzes found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Topic", "Week", "Due", "Left", "Status", "Best"]);
    for a in &summary.assignments {
        let status = if a.due_soon {
            format!("{} (due soon)", a.status)
        } else {
            a.status.to_string()
        };
        table.add_row(vec![
            Cell::new(&a.title),
            Cell::new(&a.topic),
            Cell::new(a.week),
            Cell::new(a.due_date.format("%Y-%m-%d %H:%M")),
            Cell::new(&a.time_remaining),
            Cell::new(status),
            Cell::new(
                a.best_percentage
                    .map(|p| format!("{p}%"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!("{table}");

    println!(
        "\nCompleted {}/{} ({}%)  Pending: {}  Overdue: {}  Due this week: {}",
        summary.total_completed,
        summary.total_assigned,
        summary.completion_rate,
        summary.pending,
        summary.overdue,
        summary.due_soon
    );
}
