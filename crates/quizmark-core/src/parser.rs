//! Quiz and answer file parser.
//!
//! Loads quizzes from JSON or TOML files and directories, loads answer
//! sheets, and validates quiz definitions before they are published.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::config::TopicCatalog;
use crate::model::{Difficulty, Question, Quiz, StudentAnswer};
use crate::normalize::{normalize_answers, normalize_questions, option_letters};

const MAX_TITLE_CHARS: usize = 200;
const MAX_WEEK: u32 = 104;
const TIME_LIMIT_MINUTES: std::ops::RangeInclusive<u32> = 5..=135;
const MAX_QUESTIONS: usize = 20;
const MAX_MARKS: u32 = 12;
const SINGLE_CHOICE_OPTIONS: usize = 4;
const MIN_MULTI_SELECT_OPTIONS: usize = 3;

/// Quiz header fields. Questions go through the normalizer separately.
#[derive(Debug, Deserialize)]
struct QuizHeader {
    title: String,
    topic: String,
    week: u32,
    difficulty: String,
    time_limit_minutes: u32,
    due_date: DateTime<Utc>,
    #[serde(default)]
    published: bool,
}

/// Parse a single quiz file. The format is chosen by extension.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse quiz content; `source_path` picks the format and labels errors.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let raw: Value = if source_path.extension().is_some_and(|ext| ext == "toml") {
        let table: toml::Value = toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
        toml_to_json(table)
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?
    };

    let header: QuizHeader = serde_json::from_value(raw.clone())
        .with_context(|| format!("invalid quiz header: {}", source_path.display()))?;
    let difficulty: Difficulty = header
        .difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let questions = normalize_questions(raw.get("questions").unwrap_or(&Value::Null))
        .with_context(|| format!("invalid questions: {}", source_path.display()))?;

    Ok(Quiz {
        title: header.title,
        topic: header.topic,
        week: header.week,
        difficulty,
        time_limit_minutes: header.time_limit_minutes,
        due_date: header.due_date,
        published: header.published,
        questions,
    })
}

/// Convert a TOML document to JSON. Native datetimes become RFC 3339 strings.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Recursively load all `.json` and `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "toml")
        {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A student's submitted answers for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    pub answers: Vec<StudentAnswer>,
    pub time_taken_seconds: Option<u64>,
}

/// Parse an answers file: a JSON array, or an object with `answers` and an
/// optional `time_taken_seconds`.
pub fn parse_answers(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    parse_answers_str(&content)
        .with_context(|| format!("invalid answers file: {}", path.display()))
}

/// Parse an answers JSON string.
pub fn parse_answers_str(content: &str) -> Result<AnswerSheet> {
    let raw: Value = serde_json::from_str(content).context("failed to parse answers JSON")?;
    let answers = normalize_answers(&raw)?;
    let time_taken_seconds = raw.get("time_taken_seconds").and_then(Value::as_u64);
    Ok(AnswerSheet {
        answers,
        time_taken_seconds,
    })
}

/// A problem found while validating a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `questions.2.marks`.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validate a quiz before it is published.
pub fn validate_quiz(
    quiz: &Quiz,
    now: DateTime<Utc>,
    topics: &TopicCatalog,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let title_len = quiz.title.trim().chars().count();
    if title_len == 0 {
        issues.push(ValidationIssue::new("title", "quiz title is required"));
    } else if title_len > MAX_TITLE_CHARS {
        issues.push(ValidationIssue::new(
            "title",
            format!("title must be at most {MAX_TITLE_CHARS} characters"),
        ));
    }

    if !topics.contains(&quiz.topic) {
        issues.push(ValidationIssue::new(
            "topic",
            format!("unknown topic: {}", quiz.topic),
        ));
    }

    if quiz.week == 0 || quiz.week > MAX_WEEK {
        issues.push(ValidationIssue::new(
            "week",
            format!("week must be between 1 and {MAX_WEEK}"),
        ));
    }

    if !TIME_LIMIT_MINUTES.contains(&quiz.time_limit_minutes) {
        issues.push(ValidationIssue::new(
            "time_limit_minutes",
            format!(
                "time limit must be between {} and {} minutes",
                TIME_LIMIT_MINUTES.start(),
                TIME_LIMIT_MINUTES.end()
            ),
        ));
    }

    if quiz.due_date <= now {
        issues.push(ValidationIssue::new(
            "due_date",
            "due date must be in the future",
        ));
    }

    if quiz.questions.is_empty() {
        issues.push(ValidationIssue::new(
            "questions",
            "at least one question required",
        ));
    } else if quiz.questions.len() > MAX_QUESTIONS {
        issues.push(ValidationIssue::new(
            "questions",
            format!("maximum {MAX_QUESTIONS} questions per quiz"),
        ));
    }

    let mut seen_ids = HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(question.id()) {
            issues.push(ValidationIssue::new(
                "questions",
                format!("question IDs must be unique (duplicate {})", question.id()),
            ));
        }
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        validate_question(index, question, &mut issues);
    }

    issues
}

fn validate_question(index: usize, question: &Question, issues: &mut Vec<ValidationIssue>) {
    let at = |field: &str| format!("questions.{index}.{field}");

    if question.id() == 0 {
        issues.push(ValidationIssue::new(at("id"), "id must be positive"));
    }
    if question.text().trim().is_empty() {
        issues.push(ValidationIssue::new(
            at("question"),
            "question text is required",
        ));
    }
    if question.marks() == 0 || question.marks() > MAX_MARKS {
        issues.push(ValidationIssue::new(
            at("marks"),
            format!("marks must be between 1 and {MAX_MARKS}"),
        ));
    }
    if question.options().iter().any(|o| o.trim().is_empty()) {
        issues.push(ValidationIssue::new(at("options"), "options must not be empty"));
    }

    match question {
        Question::SingleChoice(q) => {
            if q.options.len() != SINGLE_CHOICE_OPTIONS {
                issues.push(ValidationIssue::new(
                    at("options"),
                    format!("exactly {SINGLE_CHOICE_OPTIONS} options required"),
                ));
            }
            if !option_letters(SINGLE_CHOICE_OPTIONS).contains(&q.correct_answer) {
                issues.push(ValidationIssue::new(
                    at("correctAnswer"),
                    format!("correct answer must be A-D, got {}", q.correct_answer),
                ));
            }
        }
        Question::MultiSelect(q) => {
            if q.options.len() < MIN_MULTI_SELECT_OPTIONS {
                issues.push(ValidationIssue::new(
                    at("options"),
                    format!("at least {MIN_MULTI_SELECT_OPTIONS} options required"),
                ));
            }
            if q.correct_answers.is_empty() {
                issues.push(ValidationIssue::new(
                    at("correctAnswers"),
                    "at least one correct answer required",
                ));
            }
            let letters = option_letters(q.options.len());
            for answer in &q.correct_answers {
                if !letters.contains(answer) {
                    issues.push(ValidationIssue::new(
                        at("correctAnswers"),
                        format!("correct answer {answer} does not match any option"),
                    ));
                }
            }
        }
    }
}
