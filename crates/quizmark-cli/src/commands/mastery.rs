//! The `quizmark mastery` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::config::load_config_from;
use quizmark_core::statistics::{topic_mastery, MasteryReport, TopicMastery};

use super::load_history;

pub fn execute(
    history: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let reports = load_history(history, &config)?;
    let mastery = topic_mastery(&reports, &config.topics, &config.mastery);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&mastery)?),
        _ => print_mastery(&mastery),
    }

    Ok(())
}

fn print_mastery(mastery: &MasteryReport) {
    use comfy_table::{Cell, Table};

    if !mastery.has_data {
        println!("No graded attempts found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Topic",
        "Name",
        "Questions",
        "Accuracy",
        "Marks",
        "Quizzes",
        "Level",
    ]);
    for t in &mastery.topics {
        table.add_row(vec![
            Cell::new(&t.topic),
            Cell::new(&t.topic_name),
            Cell::new(t.total_questions),
            Cell::new(format!("{}%", t.accuracy)),
            Cell::new(format!("{}%", t.average_score)),
            Cell::new(t.quizzes_completed),
            Cell::new(t.mastery_level),
        ]);
    }
    println!("{table}");

    let o = &mastery.overview;
    println!(
        "\nTopics attempted: {}  Mastered: {}  Proficient: {}  Average accuracy: {}%",
        o.topics_attempted, o.topics_mastered, o.topics_proficient, o.average_accuracy
    );

    print_highlights("Strengths", &mastery.strengths);
    print_highlights("Needs work", &mastery.weaknesses);
}

fn print_highlights(heading: &str, topics: &[TopicMastery]) {
    if topics.is_empty() {
        return;
    }
    println!("\n{heading}:");
    for t in topics {
        println!(
            "  {} {} ({}% over {} questions)",
            t.topic, t.topic_name, t.accuracy, t.total_questions
        );
    }
}
