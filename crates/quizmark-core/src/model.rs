//! Core data model types for quizmark.
//!
//! These are the canonical shapes the grading engine works with. Loosely
//! typed payloads are converted into them by [`crate::normalize`] before they
//! reach the engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A quiz question, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    SingleChoice(SingleChoiceQuestion),
    MultiSelect(MultiSelectQuestion),
}

/// Exactly one correct option, identified by its letter label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoiceQuestion {
    pub id: u32,
    #[serde(rename = "question", default)]
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub marks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One or more correct options, optionally awarding partial credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSelectQuestion {
    pub id: u32,
    #[serde(rename = "question", default)]
    pub text: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    pub marks: u32,
    #[serde(default)]
    pub partial_credit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Identifier used to correlate the question with a submitted answer.
    pub fn id(&self) -> u32 {
        match self {
            Question::SingleChoice(q) => q.id,
            Question::MultiSelect(q) => q.id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::SingleChoice(q) => &q.text,
            Question::MultiSelect(q) => &q.text,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Question::SingleChoice(q) => &q.options,
            Question::MultiSelect(q) => &q.options,
        }
    }

    /// Configured mark value.
    pub fn marks(&self) -> u32 {
        match self {
            Question::SingleChoice(q) => q.marks,
            Question::MultiSelect(q) => q.marks,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Question::SingleChoice(q) => q.explanation.as_deref(),
            Question::MultiSelect(q) => q.explanation.as_deref(),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Question::SingleChoice(_) => QuestionType::SingleChoice,
            Question::MultiSelect(_) => QuestionType::MultiSelect,
        }
    }
}

/// Question variant tag, as recorded on each graded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiSelect,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "single_choice"),
            QuestionType::MultiSelect => write!(f, "multi_select"),
        }
    }
}

/// A submitted answer value: one letter, or a list of letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Single(s) if s.is_empty() => write!(f, "-"),
            AnswerValue::Single(s) => write!(f, "{s}"),
            AnswerValue::Multiple(v) if v.is_empty() => write!(f, "-"),
            AnswerValue::Multiple(v) => write!(f, "{}", v.join(", ")),
        }
    }
}

/// A student's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnswer {
    pub question_id: u32,
    pub answer: AnswerValue,
    /// Time spent on the question. Recorded but never scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u32>,
}

impl StudentAnswer {
    pub fn new(question_id: u32, answer: AnswerValue) -> Self {
        Self {
            question_id,
            answer,
            time_spent_seconds: None,
        }
    }
}

/// The graded outcome for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// Position of the question within the quiz.
    pub question_index: usize,
    /// Question text at grading time.
    pub question_text: String,
    pub topic: String,
    pub question_type: QuestionType,
    pub student_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub is_correct: bool,
    pub marks_awarded: u32,
    pub marks_possible: u32,
}

impl QuestionResult {
    /// Marks the student did not receive.
    pub fn marks_lost(&self) -> u32 {
        self.marks_possible.saturating_sub(self.marks_awarded)
    }
}

/// The graded outcome for a whole quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub score: u32,
    pub total_marks: u32,
    pub question_results: Vec<QuestionResult>,
}

/// Quiz difficulty band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Foundational,
    Intermediate,
    ExamLevel,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Foundational => write!(f, "foundational"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::ExamLevel => write!(f, "exam_level"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "foundational" => Ok(Difficulty::Foundational),
            "intermediate" => Ok(Difficulty::Intermediate),
            "exam_level" | "exam-level" | "exam" => Ok(Difficulty::ExamLevel),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A quiz as authored by the tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    /// Topic label attached to every graded result.
    pub topic: String,
    pub week: u32,
    pub difficulty: Difficulty,
    pub time_limit_minutes: u32,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Sum of the mark values of every question.
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().map(Question::marks).sum()
    }
}
