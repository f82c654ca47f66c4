//! Boundary adapter from stored quiz payloads to canonical questions.
//!
//! Stored quizzes mix field names (`question` / `text`), type tags (`mcq` /
//! `single_choice`) and answer encodings (letters / zero-based option
//! indices). Everything is converted here so the grading engine only ever
//! sees one shape.

use serde_json::{Map, Value};

use crate::error::{GradingError, NormalizeError};
use crate::grading::grade_quiz;
use crate::model::{
    AnswerValue, GradingResult, MultiSelectQuestion, Question, SingleChoiceQuestion,
    StudentAnswer,
};

/// Letter label for a zero-based option index (`0 -> "A"`).
pub fn index_to_letter(index: u64) -> Option<String> {
    if index < 26 {
        Some(char::from(b'A' + index as u8).to_string())
    } else {
        None
    }
}

/// Letter labels for a question with `count` options: `A, B, C, ...`.
pub fn option_letters(count: usize) -> Vec<String> {
    (0..count as u64).filter_map(index_to_letter).collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize a raw question list.
///
/// An empty array normalizes to an empty list; rejecting it is the grading
/// engine's job.
pub fn normalize_questions(raw: &Value) -> Result<Vec<Question>, NormalizeError> {
    let items = raw.as_array().ok_or_else(|| NormalizeError::NotAList {
        what: "questions",
        found: json_type(raw).to_string(),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_question(index, item))
        .collect()
}

/// Normalize one raw question object.
pub fn normalize_question(index: usize, raw: &Value) -> Result<Question, NormalizeError> {
    let obj = raw
        .as_object()
        .ok_or(NormalizeError::MissingField { index, field: "id" })?;

    let id = get_u32(obj, &["id"]).ok_or(NormalizeError::MissingField { index, field: "id" })?;
    let marks = get_u32(obj, &["marks"]).ok_or(NormalizeError::MissingField {
        index,
        field: "marks",
    })?;
    let text = ["question", "text"]
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();
    let options = get_options(obj).ok_or(NormalizeError::MissingField {
        index,
        field: "options",
    })?;
    let explanation = obj
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::to_string);

    let kind = match obj.get("type").and_then(Value::as_str) {
        Some(tag) => match tag {
            "single_choice" | "mcq" | "single" => Kind::Single,
            "multi_select" | "multi" | "multiselect" => Kind::Multi,
            other => {
                return Err(NormalizeError::UnknownType {
                    index,
                    tag: other.to_string(),
                })
            }
        },
        None if get_any(obj, &["correctAnswers", "correct_answers"]).is_some() => Kind::Multi,
        None if get_any(obj, &["correctAnswer", "correct_answer"]).is_some() => Kind::Single,
        None => return Err(NormalizeError::MissingField { index, field: "type" }),
    };

    match kind {
        Kind::Single => {
            let raw_correct = get_any(obj, &["correctAnswer", "correct_answer"]).ok_or(
                NormalizeError::MissingField {
                    index,
                    field: "correctAnswer",
                },
            )?;
            let correct_answer = answer_letter(raw_correct)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| NormalizeError::InvalidCorrectAnswer {
                    index,
                    value: raw_correct.to_string(),
                })?;
            Ok(Question::SingleChoice(SingleChoiceQuestion {
                id,
                text,
                options,
                correct_answer,
                marks,
                explanation,
            }))
        }
        Kind::Multi => {
            let raw_correct = get_any(obj, &["correctAnswers", "correct_answers"])
                .and_then(Value::as_array)
                .filter(|items| !items.is_empty())
                .ok_or(NormalizeError::MissingField {
                    index,
                    field: "correctAnswers",
                })?;
            let correct_answers = raw_correct
                .iter()
                .map(|v| {
                    answer_letter(v)
                        .filter(|s| !s.is_empty())
                        .ok_or_else(|| NormalizeError::InvalidCorrectAnswer {
                            index,
                            value: v.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let partial_credit = get_any(obj, &["partialCredit", "partial_credit"])
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Ok(Question::MultiSelect(MultiSelectQuestion {
                id,
                text,
                options,
                correct_answers,
                marks,
                partial_credit,
                explanation,
            }))
        }
    }
}

enum Kind {
    Single,
    Multi,
}

fn get_any<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

fn get_u32(obj: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    get_any(obj, keys)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn get_options(obj: &Map<String, Value>) -> Option<Vec<String>> {
    obj.get("options")?
        .as_array()?
        .iter()
        .map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

/// A letter from either a letter string or a legacy numeric option index.
fn answer_letter(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_u64().and_then(index_to_letter),
        _ => None,
    }
}

/// Normalize a raw answer list, either a bare array or `{ "answers": [...] }`.
///
/// Answers that cannot be correlated or interpreted are dropped and grade as
/// unanswered.
pub fn normalize_answers(raw: &Value) -> Result<Vec<StudentAnswer>, NormalizeError> {
    let items = match raw {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("answers") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(NormalizeError::NotAList {
                    what: "answers",
                    found: "object".to_string(),
                })
            }
        },
        other => {
            return Err(NormalizeError::NotAList {
                what: "answers",
                found: json_type(other).to_string(),
            })
        }
    };

    let mut answers = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            tracing::debug!("dropping answer {position}: not an object");
            continue;
        };
        let Some(question_id) = get_u32(obj, &["question_id", "questionId"]) else {
            tracing::debug!("dropping answer {position}: no question id");
            continue;
        };
        let Some(answer) = obj.get("answer").and_then(normalize_answer_value) else {
            tracing::debug!("dropping answer for question {question_id}: unreadable value");
            continue;
        };
        let time_spent_seconds = get_u32(obj, &["time_spent_seconds", "timeSpentSeconds"]);
        answers.push(StudentAnswer {
            question_id,
            answer,
            time_spent_seconds,
        });
    }

    Ok(answers)
}

fn normalize_answer_value(value: &Value) -> Option<AnswerValue> {
    match value {
        Value::String(_) | Value::Number(_) => answer_letter(value).map(AnswerValue::Single),
        Value::Array(items) => Some(AnswerValue::Multiple(
            items.iter().filter_map(answer_letter).collect(),
        )),
        _ => None,
    }
}

/// Normalize raw questions and answers, then grade them.
pub fn grade_raw(
    questions: &Value,
    answers: &Value,
    topic: &str,
) -> Result<GradingResult, GradingError> {
    let questions = normalize_questions(questions)?;
    let answers = normalize_answers(answers)?;
    grade_quiz(&questions, &answers, topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn letters_from_indices() {
        assert_eq!(index_to_letter(0).as_deref(), Some("A"));
        assert_eq!(index_to_letter(3).as_deref(), Some("D"));
        assert_eq!(index_to_letter(26), None);
        assert_eq!(option_letters(4), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn legacy_mcq_with_text_field_and_numeric_answer() {
        let raw = json!([{
            "id": 7,
            "type": "mcq",
            "text": "Minimum of 2x^2 + 8x + 3?",
            "options": ["-5", "-2", "0", "3"],
            "correctAnswer": 0,
            "marks": 3
        }]);
        let questions = normalize_questions(&raw).unwrap();
        match &questions[0] {
            Question::SingleChoice(q) => {
                assert_eq!(q.id, 7);
                assert_eq!(q.text, "Minimum of 2x^2 + 8x + 3?");
                assert_eq!(q.correct_answer, "A");
            }
            Question::MultiSelect(_) => panic!("expected single choice"),
        }
    }

    #[test]
    fn multi_select_with_mixed_encodings() {
        let raw = json!([{
            "id": 2,
            "type": "multi_select",
            "question": "Which have real roots?",
            "options": ["a", "b", "c", "d"],
            "correctAnswers": ["A", 2],
            "partialCredit": true,
            "marks": 4
        }]);
        let questions = normalize_questions(&raw).unwrap();
        match &questions[0] {
            Question::MultiSelect(q) => {
                assert_eq!(q.correct_answers, vec!["A", "C"]);
                assert!(q.partial_credit);
            }
            Question::SingleChoice(_) => panic!("expected multi-select"),
        }
    }

    #[test]
    fn missing_type_is_inferred_from_answer_key() {
        let raw = json!({
            "id": 1, "options": ["a", "b", "c"], "correctAnswers": ["B"], "marks": 2
        });
        assert!(matches!(
            normalize_question(0, &raw).unwrap(),
            Question::MultiSelect(_)
        ));
    }

    #[test]
    fn non_array_questions_rejected() {
        let err = normalize_questions(&json!({"questions": []})).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAList { what: "questions", .. }));
    }

    #[test]
    fn unknown_type_rejected() {
        let raw = json!([{"id": 1, "type": "essay", "options": [], "marks": 2}]);
        assert!(matches!(
            normalize_questions(&raw).unwrap_err(),
            NormalizeError::UnknownType { index: 0, .. }
        ));
    }

    #[test]
    fn missing_marks_rejected() {
        let raw = json!([{"id": 1, "type": "mcq", "options": ["a"], "correctAnswer": "A"}]);
        assert_eq!(
            normalize_questions(&raw).unwrap_err(),
            NormalizeError::MissingField {
                index: 0,
                field: "marks"
            }
        );
    }

    #[test]
    fn empty_answer_key_rejected() {
        let raw = json!([{
            "id": 1, "type": "multi_select", "options": ["a", "b", "c"],
            "correctAnswers": [], "marks": 2
        }]);
        assert!(matches!(
            normalize_questions(&raw).unwrap_err(),
            NormalizeError::MissingField {
                field: "correctAnswers",
                ..
            }
        ));
    }

    #[test]
    fn answers_accept_wrapped_object_and_legacy_numbers() {
        let raw = json!({
            "answers": [
                {"question_id": 1, "answer": 1, "time_spent_seconds": 40},
                {"question_id": 2, "answer": ["A", 3, null]},
                {"question_id": 3, "answer": null},
                {"answer": "A"}
            ],
            "time_taken_seconds": 300
        });
        let answers = normalize_answers(&raw).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].answer, AnswerValue::Single("B".into()));
        assert_eq!(answers[0].time_spent_seconds, Some(40));
        assert_eq!(
            answers[1].answer,
            AnswerValue::Multiple(vec!["A".into(), "D".into()])
        );
    }

    #[test]
    fn answers_must_be_a_list() {
        assert!(normalize_answers(&json!("A")).is_err());
        assert!(normalize_answers(&json!({"other": 1})).is_err());
    }

    #[test]
    fn grade_raw_rejects_non_list_as_invalid_input() {
        let err = grade_raw(&json!("nope"), &json!([]), "A1").unwrap_err();
        assert!(matches!(err, GradingError::InvalidInput(_)));
        let err = grade_raw(&json!([]), &json!([]), "A1").unwrap_err();
        assert!(matches!(err, GradingError::InvalidInput(_)));
    }

    #[test]
    fn grade_raw_end_to_end() {
        let questions = json!([
            {"id": 1, "type": "mcq", "question": "Q1", "options": ["a","b","c","d"],
             "correctAnswer": "A", "marks": 3},
            {"id": 2, "type": "multi_select", "question": "Q2", "options": ["a","b","c","d"],
             "correctAnswers": ["B", "D"], "partialCredit": true, "marks": 5}
        ]);
        let answers = json!([
            {"question_id": 1, "answer": "A"},
            {"question_id": 2, "answer": ["B"]}
        ]);
        let result = grade_raw(&questions, &answers, "A1").unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.total_marks, 8);
    }
}
