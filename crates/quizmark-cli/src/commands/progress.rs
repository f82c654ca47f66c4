//! The `quizmark progress` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::config::load_config_from;
use quizmark_core::statistics::{progress_overview, ProgressOverview};

use super::load_history;

pub fn execute(
    history: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let reports = load_history(history, &config)?;
    let overview = progress_overview(&reports);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&overview)?),
        _ => match overview {
            Some(overview) => print_overview(&overview),
            None => println!("No graded attempts found."),
        },
    }

    Ok(())
}

fn print_overview(overview: &ProgressOverview) {
    use comfy_table::{Cell, Table};

    println!(
        "Quizzes completed: {}  Average score: {}% ({}/{})",
        overview.total_quizzes,
        overview.average_score,
        overview.total_score,
        overview.total_possible
    );
    if let Some(efficiency) = overview.avg_time_efficiency {
        println!("Average time used: {efficiency}% of the limit");
    }
    if let Some(trend) = overview.improvement_trend {
        println!("Improvement (last 5 vs first 5): {trend:+}%");
    }
    println!(
        "Best: {} ({}%)  Worst: {} ({}%)",
        overview.best.quiz_title,
        overview.best.percentage,
        overview.worst.quiz_title,
        overview.worst.percentage
    );

    let mut difficulty = Table::new();
    difficulty.set_header(vec!["Difficulty", "Quizzes", "Average"]);
    for d in &overview.difficulty_breakdown {
        difficulty.add_row(vec![
            Cell::new(d.difficulty),
            Cell::new(d.quizzes_taken),
            Cell::new(format!("{}%", d.average)),
        ]);
    }
    println!("\n{difficulty}");

    let mut trend = Table::new();
    trend.set_header(vec!["#", "Quiz", "Topic", "Score", "Date"]);
    for point in &overview.score_trend {
        let a = &point.attempt;
        trend.add_row(vec![
            Cell::new(point.quiz_number),
            Cell::new(&a.quiz_title),
            Cell::new(&a.topic),
            Cell::new(format!("{}/{} ({}%)", a.score, a.total_marks, a.percentage)),
            Cell::new(a.submitted_at.format("%Y-%m-%d")),
        ]);
    }
    println!("\n{trend}");
}
