//! The `quizmark mistakes` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::config::load_config_from;
use quizmark_core::statistics::{mistakes_summary, MistakesSummary};

use super::load_history;

pub fn execute(
    history: Option<PathBuf>,
    topic: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    if let Some(code) = &topic {
        if !config.topics.contains(code) {
            tracing::warn!("topic '{code}' is not in the catalog");
        }
    }

    let reports = load_history(history, &config)?;
    let summary = mistakes_summary(&reports, &config.topics, topic.as_deref());

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &MistakesSummary) {
    if summary.total_mistakes == 0 {
        println!("No mistakes recorded.");
        return;
    }

    println!(
        "Mistakes: {} across {} topic(s) ({} single choice, {} multi-select)",
        summary.total_mistakes,
        summary.topics_covered,
        summary.single_choice_mistakes,
        summary.multi_select_mistakes
    );
    println!(
        "Marks lost: {} ({:.1} per mistake)",
        summary.total_marks_lost, summary.avg_marks_lost_per_mistake
    );

    for group in &summary.by_topic {
        println!(
            "\n{} {} ({} mistake(s), latest {})",
            group.topic,
            group.topic_name,
            group.mistake_count,
            group.latest_mistake.format("%Y-%m-%d")
        );
        for m in &group.mistakes {
            println!(
                "  {} Q{}: answered {}, correct {} ({}/{} marks)",
                m.quiz_title,
                m.question_index + 1,
                m.student_answer,
                m.correct_answer,
                m.marks_awarded,
                m.marks_possible
            );
        }
    }
}
