//! Deterministic quiz grading.
//!
//! Scores a completed attempt against the answer key, including partial
//! credit for multi-select questions, and maps percentages onto grade letters.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::model::{
    AnswerValue, GradingResult, MultiSelectQuestion, Question, QuestionResult, QuestionType,
    SingleChoiceQuestion, StudentAnswer,
};

/// Grade an entire quiz attempt.
///
/// Unanswered questions score zero. Duplicate answers for the same question
/// id resolve to the last one submitted. Fails only when `questions` is empty.
pub fn grade_quiz(
    questions: &[Question],
    student_answers: &[StudentAnswer],
    topic: &str,
) -> Result<GradingResult, GradingError> {
    if questions.is_empty() {
        return Err(GradingError::InvalidInput(
            "questions array is empty".to_string(),
        ));
    }

    let answer_map: HashMap<u32, &AnswerValue> = student_answers
        .iter()
        .map(|a| (a.question_id, &a.answer))
        .collect();

    let question_results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let submitted = answer_map.get(&question.id()).copied();
            match question {
                Question::SingleChoice(q) => grade_single_choice(q, submitted, index, topic),
                Question::MultiSelect(q) => grade_multi_select(q, submitted, index, topic),
            }
        })
        .collect();

    let score = question_results.iter().map(|r| r.marks_awarded).sum();
    let total_marks = question_results.iter().map(|r| r.marks_possible).sum();

    Ok(GradingResult {
        score,
        total_marks,
        question_results,
    })
}

fn grade_single_choice(
    question: &SingleChoiceQuestion,
    submitted: Option<&AnswerValue>,
    question_index: usize,
    topic: &str,
) -> QuestionResult {
    // Anything other than a non-empty letter is a wrong answer, not an error.
    let is_correct = matches!(
        submitted,
        Some(AnswerValue::Single(letter))
            if !letter.is_empty() && *letter == question.correct_answer
    );

    QuestionResult {
        question_index,
        question_text: question.text.clone(),
        topic: topic.to_string(),
        question_type: QuestionType::SingleChoice,
        student_answer: submitted
            .cloned()
            .unwrap_or_else(|| AnswerValue::Single(String::new())),
        correct_answer: AnswerValue::Single(question.correct_answer.clone()),
        is_correct,
        marks_awarded: if is_correct { question.marks } else { 0 },
        marks_possible: question.marks,
    }
}

fn grade_multi_select(
    question: &MultiSelectQuestion,
    submitted: Option<&AnswerValue>,
    question_index: usize,
    topic: &str,
) -> QuestionResult {
    let selected: BTreeSet<&str> = match submitted {
        Some(AnswerValue::Multiple(letters)) => letters.iter().map(String::as_str).collect(),
        _ => BTreeSet::new(),
    };
    let correct: BTreeSet<&str> = question
        .correct_answers
        .iter()
        .map(String::as_str)
        .collect();

    let is_exact_match = selected == correct;

    let marks_awarded = if is_exact_match {
        question.marks
    } else if question.partial_credit && !selected.is_empty() {
        let correct_selected = selected.intersection(&correct).count() as u32;
        let incorrect_selected = selected.len() as u32 - correct_selected;
        partial_credit_marks(
            correct_selected,
            incorrect_selected,
            correct.len() as u32,
            question.marks,
        )
    } else {
        0
    };

    QuestionResult {
        question_index,
        question_text: question.text.clone(),
        topic: topic.to_string(),
        question_type: QuestionType::MultiSelect,
        student_answer: submitted
            .cloned()
            .unwrap_or_else(|| AnswerValue::Multiple(Vec::new())),
        correct_answer: AnswerValue::Multiple(question.correct_answers.clone()),
        is_correct: is_exact_match,
        marks_awarded,
        marks_possible: question.marks,
    }
}

/// Marks awarded for a partially correct multi-select answer.
///
/// `floor(max(0, (correct_selected - incorrect_selected) / total_correct) * marks)`,
/// computed in integers so the floor is exact.
pub fn partial_credit_marks(
    correct_selected: u32,
    incorrect_selected: u32,
    total_correct: u32,
    marks: u32,
) -> u32 {
    if total_correct == 0 {
        return 0;
    }
    let net = u64::from(correct_selected.saturating_sub(incorrect_selected));
    (net * u64::from(marks) / u64::from(total_correct)) as u32
}

/// Percentage score rounded to the nearest integer, halves rounding up.
///
/// Returns 0 when `total_marks` is 0.
pub fn calculate_percentage(score: u32, total_marks: u32) -> u32 {
    if total_marks == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total_marks);
    ((score * 200 + total) / (total * 2)).min(100) as u32
}

/// Grade letter on the nine-band scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeLetter {
    A1,
    A2,
    B3,
    B4,
    C5,
    C6,
    D7,
    E8,
    F9,
}

impl GradeLetter {
    /// Map a percentage onto its grade band.
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            75.. => GradeLetter::A1,
            70..=74 => GradeLetter::A2,
            65..=69 => GradeLetter::B3,
            60..=64 => GradeLetter::B4,
            55..=59 => GradeLetter::C5,
            50..=54 => GradeLetter::C6,
            45..=49 => GradeLetter::D7,
            40..=44 => GradeLetter::E8,
            _ => GradeLetter::F9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLetter::A1 => "A1",
            GradeLetter::A2 => "A2",
            GradeLetter::B3 => "B3",
            GradeLetter::B4 => "B4",
            GradeLetter::C5 => "C5",
            GradeLetter::C6 => "C6",
            GradeLetter::D7 => "D7",
            GradeLetter::E8 => "E8",
            GradeLetter::F9 => "F9",
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(GradeLetter::A1),
            "A2" => Ok(GradeLetter::A2),
            "B3" => Ok(GradeLetter::B3),
            "B4" => Ok(GradeLetter::B4),
            "C5" => Ok(GradeLetter::C5),
            "C6" => Ok(GradeLetter::C6),
            "D7" => Ok(GradeLetter::D7),
            "E8" => Ok(GradeLetter::E8),
            "F9" => Ok(GradeLetter::F9),
            other => Err(format!("unknown grade letter: {other}")),
        }
    }
}

impl GradingResult {
    pub fn percentage(&self) -> u32 {
        calculate_percentage(self.score, self.total_marks)
    }

    pub fn grade(&self) -> GradeLetter {
        GradeLetter::from_percentage(self.percentage())
    }

    /// Number of questions answered exactly right.
    pub fn correct_count(&self) -> usize {
        self.question_results.iter().filter(|r| r.is_correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(id: u32, correct: &str, marks: u32) -> Question {
        Question::SingleChoice(SingleChoiceQuestion {
            id,
            text: format!("Question {id}"),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_answer: correct.into(),
            marks,
            explanation: None,
        })
    }

    fn multi(id: u32, correct: &[&str], marks: u32, partial_credit: bool) -> Question {
        Question::MultiSelect(MultiSelectQuestion {
            id,
            text: format!("Question {id}"),
            options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
            correct_answers: correct.iter().map(|s| s.to_string()).collect(),
            marks,
            partial_credit,
            explanation: None,
        })
    }

    fn letter(id: u32, l: &str) -> StudentAnswer {
        StudentAnswer::new(id, AnswerValue::Single(l.into()))
    }

    fn letters(id: u32, ls: &[&str]) -> StudentAnswer {
        StudentAnswer::new(
            id,
            AnswerValue::Multiple(ls.iter().map(|s| s.to_string()).collect()),
        )
    }

    fn grade_one(question: Question, answers: &[StudentAnswer]) -> QuestionResult {
        grade_quiz(&[question], answers, "A1")
            .unwrap()
            .question_results
            .remove(0)
    }

    #[test]
    fn single_choice_correct_answer_gets_full_marks() {
        let r = grade_one(single(1, "B", 4), &[letter(1, "B")]);
        assert!(r.is_correct);
        assert_eq!(r.marks_awarded, 4);
        assert_eq!(r.marks_possible, 4);
        assert_eq!(r.question_type, QuestionType::SingleChoice);
        assert_eq!(r.correct_answer, AnswerValue::Single("B".into()));
    }

    #[test]
    fn single_choice_wrong_or_missing_scores_zero() {
        let wrong = grade_one(single(1, "B", 4), &[letter(1, "A")]);
        assert!(!wrong.is_correct);
        assert_eq!(wrong.marks_awarded, 0);

        let absent = grade_one(single(1, "B", 4), &[]);
        assert!(!absent.is_correct);
        assert_eq!(absent.marks_awarded, 0);
        assert_eq!(absent.student_answer, AnswerValue::Single(String::new()));
    }

    #[test]
    fn single_choice_is_case_sensitive() {
        let r = grade_one(single(1, "B", 4), &[letter(1, "b")]);
        assert!(!r.is_correct);
    }

    #[test]
    fn single_choice_malformed_answer_scores_zero() {
        let empty = grade_one(single(1, "B", 4), &[letter(1, "")]);
        assert_eq!(empty.marks_awarded, 0);

        let list = grade_one(single(1, "B", 4), &[letters(1, &["B"])]);
        assert!(!list.is_correct);
        assert_eq!(list.marks_awarded, 0);
        assert_eq!(list.student_answer, AnswerValue::Multiple(vec!["B".into()]));
    }

    #[test]
    fn multi_select_exact_match_is_order_independent() {
        let r = grade_one(multi(1, &["A", "C"], 6, false), &[letters(1, &["C", "A"])]);
        assert!(r.is_correct);
        assert_eq!(r.marks_awarded, 6);
        assert_eq!(
            r.student_answer,
            AnswerValue::Multiple(vec!["C".into(), "A".into()])
        );
    }

    #[test]
    fn multi_select_partial_credit() {
        let r = grade_one(multi(1, &["A", "C"], 6, true), &[letters(1, &["A"])]);
        assert!(!r.is_correct);
        assert_eq!(r.marks_awarded, 3);
    }

    #[test]
    fn multi_select_over_selection_is_penalised() {
        let r = grade_one(
            multi(1, &["A", "C"], 6, true),
            &[letters(1, &["A", "B", "C"])],
        );
        assert!(!r.is_correct);
        assert_eq!(r.marks_awarded, 3);
    }

    #[test]
    fn multi_select_negative_ratio_clamps_to_zero() {
        let r = grade_one(
            multi(1, &["A", "C"], 6, true),
            &[letters(1, &["A", "B", "D"])],
        );
        assert_eq!(r.marks_awarded, 0);

        let all_wrong = grade_one(multi(1, &["A", "C"], 6, true), &[letters(1, &["B"])]);
        assert_eq!(all_wrong.marks_awarded, 0);
    }

    #[test]
    fn multi_select_without_partial_credit_scores_zero() {
        let r = grade_one(multi(1, &["A", "C"], 6, false), &[letters(1, &["A"])]);
        assert_eq!(r.marks_awarded, 0);
        assert!(!r.is_correct);
    }

    #[test]
    fn multi_select_empty_or_missing_scores_zero() {
        let empty = grade_one(multi(1, &["A", "C"], 6, true), &[letters(1, &[])]);
        assert_eq!(empty.marks_awarded, 0);

        let absent = grade_one(multi(1, &["A", "C"], 6, true), &[]);
        assert_eq!(absent.marks_awarded, 0);
        assert_eq!(absent.student_answer, AnswerValue::Multiple(vec![]));

        let string = grade_one(multi(1, &["A", "C"], 6, true), &[letter(1, "A")]);
        assert_eq!(string.marks_awarded, 0);
    }

    #[test]
    fn multi_select_duplicate_letters_count_once() {
        let r = grade_one(
            multi(1, &["A", "C"], 6, true),
            &[letters(1, &["A", "A", "C"])],
        );
        assert!(r.is_correct);
        assert_eq!(r.marks_awarded, 6);
    }

    #[test]
    fn partial_credit_floors() {
        // (2 - 0) / 3 * 5 = 3.33
        assert_eq!(partial_credit_marks(2, 0, 3, 5), 3);
        // (1 - 0) / 3 * 3 = 1
        assert_eq!(partial_credit_marks(1, 0, 3, 3), 1);
        assert_eq!(partial_credit_marks(1, 2, 2, 6), 0);
        assert_eq!(partial_credit_marks(1, 0, 0, 6), 0);
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let err = grade_quiz(&[], &[letter(1, "A")], "A1").unwrap_err();
        assert!(matches!(err, GradingError::InvalidInput(_)));
    }

    #[test]
    fn last_duplicate_answer_wins() {
        let r = grade_one(single(1, "B", 2), &[letter(1, "B"), letter(1, "C")]);
        assert!(!r.is_correct);
        let r = grade_one(single(1, "B", 2), &[letter(1, "C"), letter(1, "B")]);
        assert!(r.is_correct);
    }

    #[test]
    fn total_marks_ignores_how_questions_were_answered() {
        let questions = vec![
            single(1, "A", 3),
            multi(2, &["B", "D"], 5, true),
            single(3, "C", 12),
        ];
        for answers in [
            vec![],
            vec![letter(1, "A")],
            vec![letter(1, "D"), letters(2, &["B", "D"]), letter(3, "C")],
        ] {
            let result = grade_quiz(&questions, &answers, "G1").unwrap();
            assert_eq!(result.total_marks, 20);
            assert_eq!(result.question_results.len(), 3);
        }
    }

    #[test]
    fn grading_is_deterministic() {
        let questions = vec![single(1, "A", 3), multi(2, &["B", "D"], 5, true)];
        let answers = vec![letter(1, "A"), letters(2, &["D", "C"])];
        let first = grade_quiz(&questions, &answers, "C1").unwrap();
        for _ in 0..10 {
            assert_eq!(grade_quiz(&questions, &answers, "C1").unwrap(), first);
        }
    }

    #[test]
    fn two_question_quiz_end_to_end() {
        let questions = vec![single(1, "A", 3), multi(2, &["B", "D"], 5, true)];
        let answers = vec![letter(1, "A"), letters(2, &["B"])];
        let result = grade_quiz(&questions, &answers, "A1").unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.total_marks, 8);
        assert_eq!(result.question_results[0].question_index, 0);
        assert_eq!(result.question_results[1].question_index, 1);
        assert!(result.question_results.iter().all(|r| r.topic == "A1"));
        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.percentage(), 63);
        assert_eq!(result.grade(), GradeLetter::B4);
    }

    #[test]
    fn percentage_boundaries() {
        assert_eq!(calculate_percentage(0, 0), 0);
        assert_eq!(calculate_percentage(15, 20), 75);
        assert_eq!(calculate_percentage(1, 8), 13);
        assert_eq!(calculate_percentage(1, 3), 33);
        assert_eq!(calculate_percentage(2, 3), 67);
        assert_eq!(calculate_percentage(8, 8), 100);
    }

    #[test]
    fn grade_letter_boundaries() {
        assert_eq!(GradeLetter::from_percentage(100), GradeLetter::A1);
        assert_eq!(GradeLetter::from_percentage(75), GradeLetter::A1);
        assert_eq!(GradeLetter::from_percentage(74), GradeLetter::A2);
        assert_eq!(GradeLetter::from_percentage(65), GradeLetter::B3);
        assert_eq!(GradeLetter::from_percentage(60), GradeLetter::B4);
        assert_eq!(GradeLetter::from_percentage(55), GradeLetter::C5);
        assert_eq!(GradeLetter::from_percentage(50), GradeLetter::C6);
        assert_eq!(GradeLetter::from_percentage(45), GradeLetter::D7);
        assert_eq!(GradeLetter::from_percentage(40), GradeLetter::E8);
        assert_eq!(GradeLetter::from_percentage(39), GradeLetter::F9);
        assert_eq!(GradeLetter::from_percentage(0), GradeLetter::F9);
    }

    #[test]
    fn grade_letter_display_and_parse() {
        assert_eq!(GradeLetter::A1.to_string(), "A1");
        assert_eq!("c6".parse::<GradeLetter>().unwrap(), GradeLetter::C6);
        assert!("Z0".parse::<GradeLetter>().is_err());
        assert_eq!(serde_json::to_string(&GradeLetter::F9).unwrap(), r#""F9""#);
    }
}
