//! Aggregate statistics over graded attempts.
//!
//! Topic mastery, the progress overview, and the mistakes journal are all
//! derived from stored [`AttemptReport`]s and never modify them.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{MasteryThresholds, TopicCatalog};
use crate::grading::calculate_percentage;
use crate::model::{AnswerValue, Difficulty, QuestionType};
use crate::report::AttemptReport;

/// Integer mean of `sum / count`, halves rounding up. 0 for no samples.
fn rounded_mean(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    ((sum * 2 + count) / (count * 2)) as u32
}

/// How well a topic has been learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    NotStarted,
    Beginner,
    Developing,
    Proficient,
    Mastered,
}

impl MasteryLevel {
    pub fn classify(total_questions: u32, accuracy: u32, thresholds: &MasteryThresholds) -> Self {
        if total_questions == 0 {
            MasteryLevel::NotStarted
        } else if accuracy >= thresholds.mastered {
            MasteryLevel::Mastered
        } else if accuracy >= thresholds.proficient {
            MasteryLevel::Proficient
        } else if accuracy >= thresholds.developing {
            MasteryLevel::Developing
        } else {
            MasteryLevel::Beginner
        }
    }
}

impl std::fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MasteryLevel::NotStarted => "not started",
            MasteryLevel::Beginner => "beginner",
            MasteryLevel::Developing => "developing",
            MasteryLevel::Proficient => "proficient",
            MasteryLevel::Mastered => "mastered",
        };
        f.write_str(s)
    }
}

/// Mastery statistics for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMastery {
    pub topic: String,
    pub topic_name: String,
    pub total_questions: u32,
    pub correct_questions: u32,
    /// Percentage of questions answered exactly right.
    pub accuracy: u32,
    /// Percentage of available marks awarded.
    pub average_score: u32,
    /// Distinct attempts that touched the topic.
    pub quizzes_completed: usize,
    pub marks_awarded: u32,
    pub total_marks: u32,
    pub last_attempt: Option<DateTime<Utc>>,
    pub mastery_level: MasteryLevel,
}

/// Headline numbers across all topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryOverview {
    pub topics_attempted: usize,
    pub topics_mastered: usize,
    pub topics_proficient: usize,
    /// Mean accuracy of the attempted topics.
    pub average_accuracy: u32,
}

/// Topic mastery across the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryReport {
    pub has_data: bool,
    pub overview: MasteryOverview,
    /// One entry per catalog topic, in catalog order.
    pub topics: Vec<TopicMastery>,
    pub strengths: Vec<TopicMastery>,
    pub weaknesses: Vec<TopicMastery>,
}

#[derive(Default)]
struct TopicAccumulator {
    total_questions: u32,
    correct_questions: u32,
    total_marks: u32,
    marks_awarded: u32,
    attempts: HashSet<Uuid>,
    last_attempt: Option<DateTime<Utc>>,
}

/// Compute topic mastery from every question result in `reports`.
///
/// Results whose topic is not in the catalog are skipped.
pub fn topic_mastery(
    reports: &[AttemptReport],
    topics: &TopicCatalog,
    thresholds: &MasteryThresholds,
) -> MasteryReport {
    let mut stats: HashMap<&str, TopicAccumulator> = HashMap::new();
    let mut has_data = false;

    for report in reports {
        for result in &report.grading.question_results {
            has_data = true;
            if !topics.contains(&result.topic) {
                tracing::warn!(
                    "attempt {}: topic '{}' is not in the catalog, skipping",
                    report.id,
                    result.topic
                );
                continue;
            }
            let acc = stats.entry(result.topic.as_str()).or_default();
            acc.total_questions += 1;
            if result.is_correct {
                acc.correct_questions += 1;
            }
            acc.total_marks += result.marks_possible;
            acc.marks_awarded += result.marks_awarded;
            acc.attempts.insert(report.id);
            if acc.last_attempt.is_none_or(|t| report.submitted_at > t) {
                acc.last_attempt = Some(report.submitted_at);
            }
        }
    }

    let mastery: Vec<TopicMastery> = topics
        .entries()
        .iter()
        .map(|entry| {
            let acc = stats.remove(entry.code.as_str()).unwrap_or_default();
            let accuracy = calculate_percentage(acc.correct_questions, acc.total_questions);
            TopicMastery {
                topic: entry.code.clone(),
                topic_name: entry.name.clone(),
                total_questions: acc.total_questions,
                correct_questions: acc.correct_questions,
                accuracy,
                average_score: calculate_percentage(acc.marks_awarded, acc.total_marks),
                quizzes_completed: acc.attempts.len(),
                marks_awarded: acc.marks_awarded,
                total_marks: acc.total_marks,
                last_attempt: acc.last_attempt,
                mastery_level: MasteryLevel::classify(acc.total_questions, accuracy, thresholds),
            }
        })
        .collect();

    let attempted: Vec<&TopicMastery> = mastery.iter().filter(|t| t.total_questions > 0).collect();
    let overview = MasteryOverview {
        topics_attempted: attempted.len(),
        topics_mastered: mastery
            .iter()
            .filter(|t| t.mastery_level == MasteryLevel::Mastered)
            .count(),
        topics_proficient: mastery
            .iter()
            .filter(|t| t.mastery_level == MasteryLevel::Proficient)
            .count(),
        average_accuracy: rounded_mean(
            attempted.iter().map(|t| u64::from(t.accuracy)).sum(),
            attempted.len() as u64,
        ),
    };

    let mut by_accuracy = mastery.clone();
    by_accuracy.sort_by(|a, b| b.accuracy.cmp(&a.accuracy));

    let strengths = by_accuracy
        .iter()
        .filter(|t| {
            t.accuracy >= thresholds.strength_accuracy
                && t.total_questions >= thresholds.min_questions
        })
        .take(thresholds.highlight_count)
        .cloned()
        .collect();
    let weaknesses = by_accuracy
        .iter()
        .filter(|t| {
            t.accuracy < thresholds.strength_accuracy
                && t.total_questions >= thresholds.min_questions
        })
        .rev()
        .take(thresholds.highlight_count)
        .cloned()
        .collect();

    MasteryReport {
        has_data,
        overview,
        topics: mastery,
        strengths,
        weaknesses,
    }
}

/// One attempt as shown in trend and activity lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSnapshot {
    pub attempt_id: Uuid,
    pub quiz_title: String,
    pub topic: String,
    pub score: u32,
    pub total_marks: u32,
    pub percentage: u32,
    pub submitted_at: DateTime<Utc>,
}

impl From<&AttemptReport> for AttemptSnapshot {
    fn from(report: &AttemptReport) -> Self {
        Self {
            attempt_id: report.id,
            quiz_title: report.quiz.title.clone(),
            topic: report.quiz.topic.clone(),
            score: report.grading.score,
            total_marks: report.grading.total_marks,
            percentage: calculate_percentage(report.grading.score, report.grading.total_marks),
            submitted_at: report.submitted_at,
        }
    }
}

/// A point on the score trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based position among all attempts.
    pub quiz_number: usize,
    #[serde(flatten)]
    pub attempt: AttemptSnapshot,
}

/// Performance for one difficulty band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub difficulty: Difficulty,
    pub average: u32,
    pub quizzes_taken: usize,
}

/// Overall progress across every completed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressOverview {
    pub total_quizzes: usize,
    pub average_score: u32,
    pub total_score: u32,
    pub total_possible: u32,
    /// Mean time taken as a percentage of the time limit.
    pub avg_time_efficiency: Option<u32>,
    /// Mean percentage of the last five attempts minus the first five.
    pub improvement_trend: Option<i32>,
    pub score_trend: Vec<TrendPoint>,
    pub difficulty_breakdown: Vec<DifficultyStats>,
    pub best: AttemptSnapshot,
    pub worst: AttemptSnapshot,
    pub recent_activity: Vec<AttemptSnapshot>,
}

const TREND_LEN: usize = 20;
const RECENT_LEN: usize = 5;
const IMPROVEMENT_WINDOW: usize = 5;

fn compare_scores(a: &AttemptReport, b: &AttemptReport) -> Ordering {
    let lhs = u64::from(a.grading.score) * u64::from(b.grading.total_marks.max(1));
    let rhs = u64::from(b.grading.score) * u64::from(a.grading.total_marks.max(1));
    lhs.cmp(&rhs)
}

fn exact_percentage(report: &AttemptReport) -> f64 {
    if report.grading.total_marks == 0 {
        return 0.0;
    }
    f64::from(report.grading.score) / f64::from(report.grading.total_marks) * 100.0
}

/// Summarize progress across attempts. `None` when there are no attempts.
pub fn progress_overview(reports: &[AttemptReport]) -> Option<ProgressOverview> {
    if reports.is_empty() {
        return None;
    }

    let mut attempts: Vec<&AttemptReport> = reports.iter().collect();
    attempts.sort_by_key(|r| r.submitted_at);

    let total_score: u32 = attempts.iter().map(|r| r.grading.score).sum();
    let total_possible: u32 = attempts.iter().map(|r| r.grading.total_marks).sum();

    let efficiencies: Vec<f64> = attempts
        .iter()
        .filter(|r| r.quiz.time_limit_minutes > 0)
        .filter_map(|r| {
            r.time_taken_seconds.map(|secs| {
                secs as f64 / (f64::from(r.quiz.time_limit_minutes) * 60.0) * 100.0
            })
        })
        .collect();
    let avg_time_efficiency = (!efficiencies.is_empty()).then(|| {
        (efficiencies.iter().sum::<f64>() / efficiencies.len() as f64).round() as u32
    });

    let improvement_trend = (attempts.len() >= IMPROVEMENT_WINDOW * 2).then(|| {
        let mean = |window: &[&AttemptReport]| {
            window.iter().map(|r| exact_percentage(r)).sum::<f64>() / window.len() as f64
        };
        let first = mean(&attempts[..IMPROVEMENT_WINDOW]);
        let last = mean(&attempts[attempts.len() - IMPROVEMENT_WINDOW..]);
        (last - first + 0.5).floor() as i32
    });

    let skip = attempts.len().saturating_sub(TREND_LEN);
    let score_trend = attempts
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, r)| TrendPoint {
            quiz_number: i + 1,
            attempt: AttemptSnapshot::from(*r),
        })
        .collect();

    let mut by_difficulty: BTreeMap<Difficulty, (u32, u32, usize)> = BTreeMap::new();
    for r in &attempts {
        let entry = by_difficulty.entry(r.quiz.difficulty).or_default();
        entry.0 += r.grading.score;
        entry.1 += r.grading.total_marks;
        entry.2 += 1;
    }
    let difficulty_breakdown = by_difficulty
        .into_iter()
        .map(|(difficulty, (score, total, count))| DifficultyStats {
            difficulty,
            average: calculate_percentage(score, total),
            quizzes_taken: count,
        })
        .collect();

    let mut ranked = attempts.clone();
    ranked.sort_by(|a, b| compare_scores(b, a));
    let best = AttemptSnapshot::from(ranked[0]);
    let worst = AttemptSnapshot::from(ranked[ranked.len() - 1]);

    let recent_activity = attempts
        .iter()
        .rev()
        .take(RECENT_LEN)
        .map(|r| AttemptSnapshot::from(*r))
        .collect();

    Some(ProgressOverview {
        total_quizzes: attempts.len(),
        average_score: calculate_percentage(total_score, total_possible),
        total_score,
        total_possible,
        avg_time_efficiency,
        improvement_trend,
        score_trend,
        difficulty_breakdown,
        best,
        worst,
        recent_activity,
    })
}

/// One incorrectly answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeEntry {
    pub attempt_id: Uuid,
    pub quiz_title: String,
    pub submitted_at: DateTime<Utc>,
    pub question_index: usize,
    pub question_text: String,
    pub topic: String,
    pub topic_name: String,
    pub question_type: QuestionType,
    pub student_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub marks_awarded: u32,
    pub marks_possible: u32,
    pub marks_lost: u32,
}

/// Mistakes grouped under one topic, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicMistakes {
    pub topic: String,
    pub topic_name: String,
    pub mistake_count: usize,
    pub latest_mistake: DateTime<Utc>,
    pub mistakes: Vec<MistakeEntry>,
}

/// The mistakes journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistakesSummary {
    pub total_mistakes: usize,
    pub topics_covered: usize,
    pub single_choice_mistakes: usize,
    pub multi_select_mistakes: usize,
    pub total_marks_lost: u32,
    /// Rounded to one decimal place.
    pub avg_marks_lost_per_mistake: f64,
    /// Topics with the most mistakes first.
    pub by_topic: Vec<TopicMistakes>,
    pub recent: Vec<MistakeEntry>,
}

const RECENT_MISTAKES: usize = 10;

/// Collect every incorrect result, optionally restricted to one topic.
pub fn mistakes_summary(
    reports: &[AttemptReport],
    topics: &TopicCatalog,
    topic_filter: Option<&str>,
) -> MistakesSummary {
    let mut attempts: Vec<&AttemptReport> = reports.iter().collect();
    attempts.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

    let mistakes: Vec<MistakeEntry> = attempts
        .iter()
        .flat_map(|report| {
            report
                .grading
                .question_results
                .iter()
                .filter(|r| !r.is_correct)
                .filter(move |r| topic_filter.is_none_or(|t| r.topic == t))
                .map(move |r| MistakeEntry {
                    attempt_id: report.id,
                    quiz_title: report.quiz.title.clone(),
                    submitted_at: report.submitted_at,
                    question_index: r.question_index,
                    question_text: r.question_text.clone(),
                    topic: r.topic.clone(),
                    topic_name: topics.display_name(&r.topic).to_string(),
                    question_type: r.question_type,
                    student_answer: r.student_answer.clone(),
                    correct_answer: r.correct_answer.clone(),
                    marks_awarded: r.marks_awarded,
                    marks_possible: r.marks_possible,
                    marks_lost: r.marks_lost(),
                })
        })
        .collect();

    let mut by_topic: Vec<TopicMistakes> = Vec::new();
    for mistake in &mistakes {
        match by_topic.iter_mut().find(|g| g.topic == mistake.topic) {
            Some(group) => {
                group.mistake_count += 1;
                group.mistakes.push(mistake.clone());
            }
            None => by_topic.push(TopicMistakes {
                topic: mistake.topic.clone(),
                topic_name: mistake.topic_name.clone(),
                mistake_count: 1,
                latest_mistake: mistake.submitted_at,
                mistakes: vec![mistake.clone()],
            }),
        }
    }
    by_topic.sort_by(|a, b| b.mistake_count.cmp(&a.mistake_count));

    let total_mistakes = mistakes.len();
    let total_marks_lost: u32 = mistakes.iter().map(|m| m.marks_lost).sum();
    let avg_marks_lost_per_mistake = if total_mistakes > 0 {
        (f64::from(total_marks_lost) / total_mistakes as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    MistakesSummary {
        total_mistakes,
        topics_covered: by_topic.len(),
        single_choice_mistakes: mistakes
            .iter()
            .filter(|m| m.question_type == QuestionType::SingleChoice)
            .count(),
        multi_select_mistakes: mistakes
            .iter()
            .filter(|m| m.question_type == QuestionType::MultiSelect)
            .count(),
        total_marks_lost,
        avg_marks_lost_per_mistake,
        by_topic,
        recent: mistakes.into_iter().take(RECENT_MISTAKES).collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::report::fixtures::report;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn mastery_levels_follow_accuracy_bands() {
        let t = MasteryThresholds::default();
        assert_eq!(MasteryLevel::classify(0, 0, &t), MasteryLevel::NotStarted);
        assert_eq!(MasteryLevel::classify(10, 90, &t), MasteryLevel::Mastered);
        assert_eq!(MasteryLevel::classify(10, 89, &t), MasteryLevel::Proficient);
        assert_eq!(MasteryLevel::classify(10, 75, &t), MasteryLevel::Proficient);
        assert_eq!(MasteryLevel::classify(10, 60, &t), MasteryLevel::Developing);
        assert_eq!(MasteryLevel::classify(10, 59, &t), MasteryLevel::Beginner);
    }

    #[test]
    fn mastery_aggregates_per_topic() {
        let reports = vec![
            report("A1", day(0), &[(true, 3, 3), (true, 2, 2), (false, 1, 4)]),
            report("A1", day(2), &[(true, 3, 3)]),
            report("G1", day(1), &[(false, 0, 2), (false, 0, 2), (true, 2, 2)]),
        ];
        let mastery = topic_mastery(
            &reports,
            &TopicCatalog::default(),
            &MasteryThresholds::default(),
        );
        assert!(mastery.has_data);
        assert_eq!(mastery.topics.len(), 10);

        let a1 = &mastery.topics[0];
        assert_eq!(a1.topic, "A1");
        assert_eq!(a1.topic_name, "Quadratic Functions");
        assert_eq!(a1.total_questions, 4);
        assert_eq!(a1.correct_questions, 3);
        assert_eq!(a1.accuracy, 75);
        assert_eq!(a1.average_score, 75);
        assert_eq!(a1.quizzes_completed, 2);
        assert_eq!(a1.last_attempt, Some(day(2)));
        assert_eq!(a1.mastery_level, MasteryLevel::Proficient);

        let g1 = mastery.topics.iter().find(|t| t.topic == "G1").unwrap();
        assert_eq!(g1.accuracy, 33);
        assert_eq!(g1.mastery_level, MasteryLevel::Beginner);

        assert_eq!(mastery.overview.topics_attempted, 2);
        assert_eq!(mastery.overview.topics_proficient, 1);
        assert_eq!(mastery.overview.average_accuracy, 54);
        assert_eq!(mastery.strengths.len(), 1);
        assert_eq!(mastery.strengths[0].topic, "A1");
        assert_eq!(mastery.weaknesses.len(), 1);
        assert_eq!(mastery.weaknesses[0].topic, "G1");
    }

    #[test]
    fn mastery_skips_unknown_topics() {
        let reports = vec![report("Z9", day(0), &[(true, 1, 1)])];
        let mastery = topic_mastery(
            &reports,
            &TopicCatalog::default(),
            &MasteryThresholds::default(),
        );
        assert!(mastery.has_data);
        assert_eq!(mastery.overview.topics_attempted, 0);
        assert!(mastery
            .topics
            .iter()
            .all(|t| t.mastery_level == MasteryLevel::NotStarted));
    }

    #[test]
    fn weaknesses_list_weakest_first() {
        let reports = vec![
            report("A2", day(0), &[(false, 0, 1), (false, 0, 1), (false, 0, 1)]),
            report("A3", day(0), &[(true, 1, 1), (false, 0, 1), (false, 0, 1)]),
            report("A4", day(0), &[(true, 1, 1), (true, 1, 1), (false, 0, 1)]),
            report("A5", day(0), &[(true, 1, 1), (false, 0, 1), (false, 0, 1), (true, 1, 1)]),
        ];
        let mastery = topic_mastery(
            &reports,
            &TopicCatalog::default(),
            &MasteryThresholds::default(),
        );
        let weak: Vec<&str> = mastery.weaknesses.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(weak, vec!["A2", "A3", "A5"]);
        assert!(mastery.strengths.is_empty());
    }

    #[test]
    fn progress_overview_empty() {
        assert!(progress_overview(&[]).is_none());
    }

    #[test]
    fn progress_overview_totals_best_and_worst() {
        let reports = vec![
            report("A1", day(1), &[(true, 4, 4)]),
            report("G1", day(0), &[(false, 1, 4)]),
            report("C1", day(2), &[(true, 3, 4)]),
        ];
        let overview = progress_overview(&reports).unwrap();
        assert_eq!(overview.total_quizzes, 3);
        assert_eq!(overview.total_score, 8);
        assert_eq!(overview.total_possible, 12);
        assert_eq!(overview.average_score, 67);
        assert_eq!(overview.best.topic, "A1");
        assert_eq!(overview.worst.topic, "G1");
        assert_eq!(overview.score_trend[0].quiz_number, 1);
        assert_eq!(overview.score_trend[0].attempt.topic, "G1");
        assert_eq!(overview.recent_activity[0].topic, "C1");
        // 900s against a 30 minute limit
        assert_eq!(overview.avg_time_efficiency, Some(50));
        assert_eq!(overview.improvement_trend, None);
        assert_eq!(overview.difficulty_breakdown.len(), 1);
        assert_eq!(overview.difficulty_breakdown[0].quizzes_taken, 3);
    }

    #[test]
    fn improvement_trend_compares_first_and_last_five() {
        let mut reports = Vec::new();
        for i in 0..5 {
            reports.push(report("A1", day(i), &[(false, 1, 2)]));
        }
        for i in 5..10 {
            reports.push(report("A1", day(i), &[(true, 2, 2)]));
        }
        let overview = progress_overview(&reports).unwrap();
        assert_eq!(overview.improvement_trend, Some(50));
        assert_eq!(overview.recent_activity.len(), 5);
    }

    #[test]
    fn score_trend_keeps_last_twenty() {
        let reports: Vec<_> = (0..25)
            .map(|i| report("A1", day(i), &[(true, 1, 1)]))
            .collect();
        let overview = progress_overview(&reports).unwrap();
        assert_eq!(overview.score_trend.len(), 20);
        assert_eq!(overview.score_trend[0].quiz_number, 6);
        assert_eq!(overview.score_trend[19].quiz_number, 25);
    }

    #[test]
    fn mistakes_grouped_by_topic() {
        let reports = vec![
            report("A1", day(0), &[(false, 0, 3), (true, 2, 2)]),
            report("G1", day(1), &[(false, 1, 4), (false, 0, 2)]),
        ];
        let summary = mistakes_summary(&reports, &TopicCatalog::default(), None);
        assert_eq!(summary.total_mistakes, 3);
        assert_eq!(summary.topics_covered, 2);
        assert_eq!(summary.by_topic[0].topic, "G1");
        assert_eq!(summary.by_topic[0].topic_name, "Trigonometry");
        assert_eq!(summary.by_topic[0].mistake_count, 2);
        assert_eq!(summary.total_marks_lost, 8);
        assert_eq!(summary.recent[0].marks_lost, 3);
        assert!((summary.avg_marks_lost_per_mistake - 2.7).abs() < f64::EPSILON);
        assert_eq!(summary.single_choice_mistakes, 2);
        assert_eq!(summary.multi_select_mistakes, 1);
        // Newest attempt first
        assert_eq!(summary.recent[0].topic, "G1");
    }

    #[test]
    fn mistakes_topic_filter() {
        let reports = vec![
            report("A1", day(0), &[(false, 0, 3)]),
            report("G1", day(1), &[(false, 1, 4)]),
        ];
        let summary = mistakes_summary(&reports, &TopicCatalog::default(), Some("A1"));
        assert_eq!(summary.total_mistakes, 1);
        assert_eq!(summary.by_topic[0].topic, "A1");

        let none = mistakes_summary(&[], &TopicCatalog::default(), None);
        assert_eq!(none.total_mistakes, 0);
        assert_eq!(none.avg_marks_lost_per_mistake, 0.0);
    }
}
