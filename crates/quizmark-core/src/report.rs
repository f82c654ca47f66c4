//! Graded attempt reports with JSON persistence.
//!
//! An attempt report is written once when an attempt is graded and is
//! read-only afterwards; the analytics modules consume directories of them.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::GradeLetter;
use crate::model::{Difficulty, GradingResult, Quiz, StudentAnswer};

/// A graded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// When the attempt was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Summary of the quiz that was attempted.
    pub quiz: QuizSummary,
    /// Answers as submitted.
    pub answers: Vec<StudentAnswer>,
    #[serde(default)]
    pub time_taken_seconds: Option<u64>,
    pub grading: GradingResult,
    pub percentage: u32,
    pub grade: GradeLetter,
}

/// Summary of a quiz (without the answer key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub title: String,
    pub topic: String,
    pub week: u32,
    pub difficulty: Difficulty,
    pub time_limit_minutes: u32,
    pub question_count: usize,
    pub total_marks: u32,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            topic: quiz.topic.clone(),
            week: quiz.week,
            difficulty: quiz.difficulty,
            time_limit_minutes: quiz.time_limit_minutes,
            question_count: quiz.questions.len(),
            total_marks: quiz.total_marks(),
        }
    }
}

impl AttemptReport {
    pub fn new(
        quiz: &Quiz,
        answers: Vec<StudentAnswer>,
        grading: GradingResult,
        time_taken_seconds: Option<u64>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let percentage = grading.percentage();
        Self {
            id: Uuid::new_v4(),
            submitted_at,
            quiz: QuizSummary::from(quiz),
            answers,
            time_taken_seconds,
            percentage,
            grade: GradeLetter::from_percentage(percentage),
            grading,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report JSON: {}", path.display()))?;
        Ok(report)
    }

    /// File name used when saving into an output directory.
    pub fn file_name(&self) -> String {
        format!(
            "attempt-{}-{}.json",
            self.submitted_at.format("%Y-%m-%dT%H%M%S"),
            self.id.simple()
        )
    }
}

/// Load every attempt report in a directory, oldest first.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_report_directory(dir: &Path) -> Result<Vec<AttemptReport>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut reports = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            match AttemptReport::load_json(&path) {
                Ok(report) => reports.push(report),
                Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
            }
        }
    }

    reports.sort_by_key(|r| r.submitted_at);
    Ok(reports)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::model::{AnswerValue, QuestionResult, QuestionType};

    /// A report whose results are `(is_correct, marks_awarded, marks_possible)`.
    pub fn report(
        topic: &str,
        submitted_at: DateTime<Utc>,
        results: &[(bool, u32, u32)],
    ) -> AttemptReport {
        let question_results: Vec<QuestionResult> = results
            .iter()
            .enumerate()
            .map(|(i, &(is_correct, awarded, possible))| QuestionResult {
                question_index: i,
                question_text: format!("Question {}", i + 1),
                topic: topic.to_string(),
                question_type: if i % 2 == 0 {
                    QuestionType::SingleChoice
                } else {
                    QuestionType::MultiSelect
                },
                student_answer: AnswerValue::Single("A".into()),
                correct_answer: AnswerValue::Single(if is_correct { "A" } else { "B" }.into()),
                is_correct,
                marks_awarded: awarded,
                marks_possible: possible,
            })
            .collect();
        let score = question_results.iter().map(|r| r.marks_awarded).sum();
        let total_marks = question_results.iter().map(|r| r.marks_possible).sum();
        let grading = GradingResult {
            score,
            total_marks,
            question_results,
        };
        let percentage = grading.percentage();
        AttemptReport {
            id: Uuid::new_v4(),
            submitted_at,
            quiz: QuizSummary {
                title: format!("{topic} quiz"),
                topic: topic.to_string(),
                week: 1,
                difficulty: Difficulty::Intermediate,
                time_limit_minutes: 30,
                question_count: results.len(),
                total_marks,
            },
            answers: vec![],
            time_taken_seconds: Some(900),
            percentage,
            grade: GradeLetter::from_percentage(percentage),
            grading,
        }
    }
}
