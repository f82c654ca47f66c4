//! Assigned quiz tracking.
//!
//! Published quizzes are the student's homework. An assignment is completed
//! once an attempt report exists for a quiz with the same title and topic.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::grading::calculate_percentage;
use crate::model::Quiz;
use crate::report::AttemptReport;
use crate::timing::{format_time_remaining, is_overdue};

/// Pending quizzes due within this many days count as due soon.
pub const DUE_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Completed,
    Pending,
    Overdue,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Overdue => "overdue",
        };
        f.write_str(s)
    }
}

/// One published quiz and where the student stands on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub title: String,
    pub topic: String,
    pub week: u32,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub due_soon: bool,
    /// `Overdue`, or the time left until the due date.
    pub time_remaining: String,
    pub attempts: usize,
    pub best_percentage: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeworkSummary {
    pub total_assigned: usize,
    pub total_completed: usize,
    pub pending: usize,
    /// Not attempted and past the due date.
    pub overdue: usize,
    /// Not attempted and due within [`DUE_SOON_DAYS`].
    pub due_soon: usize,
    pub completion_rate: u32,
    /// Earliest due date first.
    pub assignments: Vec<Assignment>,
}

/// Summarize the published quizzes in `quizzes` against attempt history.
///
/// Unpublished quizzes are ignored.
pub fn homework_summary(
    quizzes: &[Quiz],
    reports: &[AttemptReport],
    now: DateTime<Utc>,
) -> HomeworkSummary {
    let mut attempted: HashMap<(&str, &str), Vec<&AttemptReport>> = HashMap::new();
    for report in reports {
        attempted
            .entry((report.quiz.title.as_str(), report.quiz.topic.as_str()))
            .or_default()
            .push(report);
    }

    let soon = now
        .checked_add_signed(Duration::days(DUE_SOON_DAYS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut assignments: Vec<Assignment> = quizzes
        .iter()
        .filter(|quiz| quiz.published)
        .map(|quiz| {
            let attempts = attempted
                .get(&(quiz.title.as_str(), quiz.topic.as_str()))
                .map(Vec::as_slice)
                .unwrap_or_default();
            let status = if !attempts.is_empty() {
                AssignmentStatus::Completed
            } else if is_overdue(quiz.due_date, now) {
                AssignmentStatus::Overdue
            } else {
                AssignmentStatus::Pending
            };
            Assignment {
                title: quiz.title.clone(),
                topic: quiz.topic.clone(),
                week: quiz.week,
                due_date: quiz.due_date,
                status,
                due_soon: status == AssignmentStatus::Pending && quiz.due_date <= soon,
                time_remaining: format_time_remaining(quiz.due_date, now),
                attempts: attempts.len(),
                best_percentage: attempts.iter().map(|r| r.percentage).max(),
            }
        })
        .collect();
    assignments.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.title.cmp(&b.title))
    });

    let total_assigned = assignments.len();
    let total_completed = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Completed)
        .count();

    HomeworkSummary {
        total_assigned,
        total_completed,
        pending: total_assigned - total_completed,
        overdue: assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Overdue)
            .count(),
        due_soon: assignments.iter().filter(|a| a.due_soon).count(),
        completion_rate: calculate_percentage(total_completed as u32, total_assigned as u32),
        assignments,
    }
}
