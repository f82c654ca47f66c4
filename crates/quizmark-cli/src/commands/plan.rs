//! The `quizmark plan` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use quizmark_core::config::load_config_from;
use quizmark_core::planner::{plan_session, SessionPlan, SessionSegment};

use super::load_history;

pub fn execute(
    history: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let reports = load_history(history, &config)?;
    let plan = plan_session(&reports, Utc::now(), &config.topics, &config.planner);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&plan)?),
        _ => print_plan(&plan, config.planner.window_days),
    }

    Ok(())
}

fn print_plan(plan: &SessionPlan, window_days: i64) {
    let week = &plan.week_summary;
    if plan.has_data {
        println!(
            "Last {window_days} days: {} quiz(zes), {} questions, {}% correct, {} topic(s)",
            week.quizzes_completed, week.total_questions, week.average_score, week.topics_practiced
        );
    } else {
        println!("No attempts in the last {window_days} days.");
    }

    if !plan.priority_topics.is_empty() {
        println!("\nNeeds attention:");
        for t in &plan.priority_topics {
            println!("  {} {} ({}%)", t.topic, t.topic_name, t.accuracy);
        }
    }

    if !plan.recommendations.is_empty() {
        println!("\nRecommendations:");
        for r in &plan.recommendations {
            println!(
                "  [{}] {} {}: {} ({} min)",
                r.priority, r.kind, r.topic_name, r.reason, r.suggested_minutes
            );
        }
    }

    let s = &plan.session;
    println!("\nSession plan ({} min):", s.total_minutes());
    for (label, segment) in [
        ("Warm-up", &s.warmup),
        ("Main focus", &s.main_focus),
        ("Practice", &s.practice),
        ("Wrap-up", &s.wrap_up),
    ] {
        print_segment(label, segment);
    }
}

fn print_segment(label: &str, segment: &SessionSegment) {
    println!("  {label} ({} min): {}", segment.minutes, segment.activity);
    if !segment.topics.is_empty() {
        println!("    Topics: {}", segment.topics.join(", "));
    }
    if !segment.focus_areas.is_empty() {
        println!("    Focus: {}", segment.focus_areas.join(", "));
    }
    if let Some(count) = segment.recommended_questions {
        println!("    Questions: {count}");
    }
}
