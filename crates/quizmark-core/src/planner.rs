//! Weekly tutoring session planner.
//!
//! Looks at the attempts submitted in a recent window and proposes what the
//! next session should cover.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{PlannerConfig, TopicCatalog};
use crate::grading::calculate_percentage;
use crate::report::AttemptReport;

const PRIORITY_LIMIT: usize = 3;
const STRONG_LIMIT: usize = 3;
const WARMUP_TOPICS: usize = 2;
const PRACTICE_QUESTIONS: u32 = 5;

/// Recent performance in one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAnalysis {
    pub topic: String,
    pub topic_name: String,
    pub total_questions: u32,
    pub correct_questions: u32,
    pub total_marks: u32,
    pub marks_awarded: u32,
    /// Attempts in the window whose quiz was on this topic.
    pub recent_attempts: u32,
    pub accuracy: u32,
    pub needs_attention: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Review,
    Practice,
    NewTopic,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecommendationKind::Review => "review",
            RecommendationKind::Practice => "practice",
            RecommendationKind::NewTopic => "new_topic",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => f.write_str("high"),
            Priority::Medium => f.write_str("medium"),
        }
    }
}

/// A suggested lesson segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub topic: String,
    pub topic_name: String,
    pub reason: String,
    pub suggested_minutes: u32,
    pub focus_areas: Vec<String>,
}

/// Totals over the planning window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub quizzes_completed: usize,
    pub total_questions: usize,
    /// Percentage of questions answered exactly right.
    pub average_score: u32,
    pub topics_practiced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSegment {
    pub minutes: u32,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub focus_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_questions: Option<u32>,
}

impl SessionSegment {
    fn new(minutes: u32, activity: &str) -> Self {
        Self {
            minutes,
            activity: activity.to_string(),
            topics: Vec::new(),
            focus_areas: Vec::new(),
            recommended_questions: None,
        }
    }
}

/// A 60 minute session outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStructure {
    pub warmup: SessionSegment,
    pub main_focus: SessionSegment,
    pub practice: SessionSegment,
    pub wrap_up: SessionSegment,
}

impl SessionStructure {
    pub fn total_minutes(&self) -> u32 {
        self.warmup.minutes + self.main_focus.minutes + self.practice.minutes + self.wrap_up.minutes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPlan {
    /// Whether any attempt falls inside the window.
    pub has_data: bool,
    pub week_summary: WeekSummary,
    pub priority_topics: Vec<TopicAnalysis>,
    pub strong_topics: Vec<TopicAnalysis>,
    pub not_started_topics: Vec<TopicAnalysis>,
    pub recommendations: Vec<Recommendation>,
    pub session: SessionStructure,
    /// Every catalog topic, in catalog order.
    pub analysis: Vec<TopicAnalysis>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Plan the next session from attempts submitted within the window ending at `now`.
pub fn plan_session(
    reports: &[AttemptReport],
    now: DateTime<Utc>,
    topics: &TopicCatalog,
    config: &PlannerConfig,
) -> SessionPlan {
    let since = Duration::try_days(config.window_days.max(0))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent: Vec<&AttemptReport> = reports
        .iter()
        .filter(|r| r.submitted_at >= since)
        .collect();
    tracing::debug!(
        "planning from {} of {} attempts since {}",
        recent.len(),
        reports.len(),
        since
    );

    let mut analysis: Vec<TopicAnalysis> = topics
        .entries()
        .iter()
        .map(|entry| TopicAnalysis {
            topic: entry.code.clone(),
            topic_name: entry.name.clone(),
            total_questions: 0,
            correct_questions: 0,
            total_marks: 0,
            marks_awarded: 0,
            recent_attempts: 0,
            accuracy: 0,
            needs_attention: false,
        })
        .collect();
    let index: HashMap<String, usize> = analysis
        .iter()
        .enumerate()
        .map(|(i, t)| (t.topic.clone(), i))
        .collect();

    let mut total_questions = 0usize;
    let mut total_correct = 0u32;
    for report in &recent {
        if let Some(&i) = index.get(&report.quiz.topic) {
            analysis[i].recent_attempts += 1;
        }
        for result in &report.grading.question_results {
            total_questions += 1;
            if result.is_correct {
                total_correct += 1;
            }
            let Some(&i) = index.get(&result.topic) else {
                tracing::warn!("topic '{}' is not in the catalog, skipping", result.topic);
                continue;
            };
            let metrics = &mut analysis[i];
            metrics.total_questions += 1;
            if result.is_correct {
                metrics.correct_questions += 1;
            }
            metrics.total_marks += result.marks_possible;
            metrics.marks_awarded += result.marks_awarded;
        }
    }

    for t in &mut analysis {
        t.accuracy = calculate_percentage(t.correct_questions, t.total_questions);
        t.needs_attention = (t.total_questions >= config.min_questions
            && t.accuracy < config.attention_accuracy)
            || (t.total_questions > 0 && t.total_questions < config.min_questions)
            || (t.recent_attempts == 0 && t.total_questions > 0);
    }

    let mut priority: Vec<TopicAnalysis> =
        analysis.iter().filter(|t| t.needs_attention).cloned().collect();
    priority.sort_by_key(|t| t.accuracy);

    let mut strong: Vec<TopicAnalysis> = analysis
        .iter()
        .filter(|t| !t.needs_attention && t.accuracy >= config.strong_accuracy)
        .cloned()
        .collect();
    strong.sort_by(|a, b| b.accuracy.cmp(&a.accuracy));

    let not_started: Vec<TopicAnalysis> = analysis
        .iter()
        .filter(|t| t.total_questions == 0)
        .cloned()
        .collect();

    let recommendations = recommend(&priority, &not_started, config);
    let session = session_structure(&strong, recommendations.first());

    let topics_practiced = recent
        .iter()
        .map(|r| r.quiz.topic.as_str())
        .collect::<HashSet<_>>()
        .len();

    SessionPlan {
        has_data: !recent.is_empty(),
        week_summary: WeekSummary {
            quizzes_completed: recent.len(),
            total_questions,
            average_score: calculate_percentage(total_correct, total_questions as u32),
            topics_practiced,
        },
        priority_topics: priority.into_iter().take(PRIORITY_LIMIT).collect(),
        strong_topics: strong.into_iter().take(STRONG_LIMIT).collect(),
        not_started_topics: not_started,
        recommendations,
        session,
        analysis,
    }
}

fn recommend(
    priority: &[TopicAnalysis],
    not_started: &[TopicAnalysis],
    config: &PlannerConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(top) = priority.first() {
        let reason = if top.accuracy < config.attention_accuracy {
            format!("Low accuracy ({}%) - needs reinforcement", top.accuracy)
        } else if top.recent_attempts == 0 {
            "Not practiced recently - review needed".to_string()
        } else {
            "Limited practice - needs more questions".to_string()
        };
        recommendations.push(Recommendation {
            kind: RecommendationKind::Review,
            priority: Priority::High,
            topic: top.topic.clone(),
            topic_name: top.topic_name.clone(),
            reason,
            suggested_minutes: 30,
            focus_areas: strings(&[
                "Conceptual understanding",
                "Common mistakes",
                "Practice problems",
            ]),
        });
    }

    if let Some(second) = priority.get(1) {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Practice,
            priority: Priority::Medium,
            topic: second.topic.clone(),
            topic_name: second.topic_name.clone(),
            reason: format!(
                "Accuracy: {}% - additional practice needed",
                second.accuracy
            ),
            suggested_minutes: 20,
            focus_areas: strings(&["Practice questions", "Speed improvement"]),
        });
    }

    if priority.len() < 2 {
        if let Some(fresh) = not_started.first() {
            recommendations.push(Recommendation {
                kind: RecommendationKind::NewTopic,
                priority: Priority::Medium,
                topic: fresh.topic.clone(),
                topic_name: fresh.topic_name.clone(),
                reason: "Not yet covered - ready to introduce".to_string(),
                suggested_minutes: 45,
                focus_areas: strings(&[
                    "Concept introduction",
                    "Worked examples",
                    "Basic practice",
                ]),
            });
        }
    }

    recommendations
}

fn session_structure(strong: &[TopicAnalysis], lead: Option<&Recommendation>) -> SessionStructure {
    let mut warmup = SessionSegment::new(10, "Quick review of previous week's topics");
    warmup.topics = strong
        .iter()
        .take(WARMUP_TOPICS)
        .map(|t| t.topic_name.clone())
        .collect();

    let is_review = lead.is_some_and(|r| r.kind == RecommendationKind::Review);
    let mut main_focus = SessionSegment::new(
        30,
        if is_review {
            "Review and reinforce weak topic"
        } else {
            "Introduce new topic"
        },
    );
    main_focus.topics = vec![lead
        .map(|r| r.topic_name.clone())
        .unwrap_or_else(|| "Continue syllabus".to_string())];
    main_focus.focus_areas = lead.map(|r| r.focus_areas.clone()).unwrap_or_default();

    let mut practice = SessionSegment::new(15, "Guided practice questions");
    practice.topics = lead.map(|r| vec![r.topic_name.clone()]).unwrap_or_default();
    practice.recommended_questions = Some(PRACTICE_QUESTIONS);

    SessionStructure {
        warmup,
        main_focus,
        practice,
        wrap_up: SessionSegment::new(5, "Summary and homework assignment"),
    }
}
