//! quizmark configuration.
//!
//! Holds the topic catalog and the thresholds the analytics use. Everything
//! has a default, so a missing config file is not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A syllabus topic: short code plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub code: String,
    pub name: String,
}

/// Ordered list of known topics. Analytics report topics in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicCatalog(Vec<TopicEntry>);

impl TopicCatalog {
    pub fn new(entries: Vec<TopicEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.0
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|t| t.code == code)
    }

    /// Display name for a topic code, if the code is known.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.code == code)
            .map(|t| t.name.as_str())
    }

    /// Display name, falling back to the code itself.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.name_of(code).unwrap_or(code)
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        let topics = [
            ("A1", "Quadratic Functions"),
            ("A2", "Equations & Inequalities"),
            ("A3", "Surds"),
            ("A4", "Polynomials"),
            ("A5", "Binomial Expansions"),
            ("A6", "Exponential & Log"),
            ("G1", "Trigonometry"),
            ("G2", "Coordinate Geometry"),
            ("G3", "Proofs"),
            ("C1", "Calculus"),
        ];
        Self(
            topics
                .iter()
                .map(|(code, name)| TopicEntry {
                    code: code.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        )
    }
}

/// Accuracy bands for topic mastery levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryThresholds {
    pub mastered: u32,
    pub proficient: u32,
    pub developing: u32,
    /// Accuracy separating strengths from weaknesses.
    pub strength_accuracy: u32,
    /// Questions a topic needs before it can count as a strength or weakness.
    pub min_questions: u32,
    /// How many strengths and weaknesses to report.
    pub highlight_count: usize,
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self {
            mastered: 90,
            proficient: 75,
            developing: 60,
            strength_accuracy: 75,
            min_questions: 3,
            highlight_count: 3,
        }
    }
}

/// Longest planner look-back window accepted from a config file.
pub const MAX_WINDOW_DAYS: i64 = 3660;

/// Session planner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Look-back window for "recent" attempts.
    pub window_days: i64,
    /// Topics below this accuracy need attention.
    pub attention_accuracy: u32,
    /// Topics at or above this accuracy count as strong.
    pub strong_accuracy: u32,
    /// Fewer questions than this counts as limited practice.
    pub min_questions: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            attention_accuracy: 70,
            strong_accuracy: 75,
            min_questions: 3,
        }
    }
}

/// Top-level quizmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizmarkConfig {
    /// Where graded attempt reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Known topics, in reporting order.
    #[serde(default)]
    pub topics: TopicCatalog,
    #[serde(default)]
    pub mastery: MasteryThresholds,
    #[serde(default)]
    pub planner: PlannerConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizmark-attempts")
}

impl Default for QuizmarkConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            topics: TopicCatalog::default(),
            mastery: MasteryThresholds::default(),
            planner: PlannerConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizmark.toml` in the current directory
/// 2. `~/.config/quizmark/config.toml`
///
/// `QUIZMARK_OUTPUT_DIR` overrides the output directory.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmarkConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZMARK_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<QuizmarkConfig> {
    let config: QuizmarkConfig = toml::from_str(content)?;
    anyhow::ensure!(
        !config.topics.entries().is_empty(),
        "topic catalog must not be empty"
    );
    anyhow::ensure!(
        (1..=MAX_WINDOW_DAYS).contains(&config.planner.window_days),
        "planner.window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
        config.planner.window_days
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZMARK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZMARK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZMARK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZMARK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizmarkConfig::default();
        assert_eq!(config.topics.entries().len(), 10);
        assert_eq!(config.topics.name_of("G1"), Some("Trigonometry"));
        assert_eq!(config.mastery.mastered, 90);
        assert_eq!(config.planner.window_days, 7);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
output_dir = "attempts"

[planner]
window_days = 14
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("attempts"));
        assert_eq!(config.planner.window_days, 14);
        assert_eq!(config.planner.attention_accuracy, 70);
        assert!(config.topics.contains("C1"));
    }

    #[test]
    fn custom_topic_catalog() {
        let toml_str = r#"
[[topics]]
code = "S1"
name = "Statistics"

[[topics]]
code = "P1"
name = "Probability"
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.topics.entries().len(), 2);
        assert_eq!(config.topics.display_name("P1"), "Probability");
        assert_eq!(config.topics.display_name("A1"), "A1");
    }

    #[test]
    fn window_days_out_of_range_is_rejected() {
        for bad in ["0", "-7", "1000000000"] {
            let toml_str = format!("[planner]\nwindow_days = {bad}\n");
            let err = parse_config_str(&toml_str).unwrap_err();
            assert!(
                err.to_string().contains("planner.window_days"),
                "unexpected error for {bad}: {err}"
            );
        }
        let config = parse_config_str("[planner]\nwindow_days = 3660\n").unwrap();
        assert_eq!(config.planner.window_days, MAX_WINDOW_DAYS);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = load_config_from(Some(Path::new("/nonexistent/quizmark.toml")));
        assert!(result.is_err());
    }
}
