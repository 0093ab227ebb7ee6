//! Loading evaluation configuration (thresholds + feedback messages + data paths) from TOML.
//!
//! See `EvalConfig` for the expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct EvalConfig {
  #[serde(default)]
  pub thresholds: Thresholds,
  #[serde(default)]
  pub feedback: FeedbackMessages,
  #[serde(default)]
  pub data: DataPaths,
}

/// Score thresholds that trigger feedback lines.
#[derive(Clone, Debug, Deserialize)]
pub struct Thresholds {
  /// Similarity below this asks the student to revise (0..1).
  pub low_similarity: f32,
  /// Plagiarism above this percentage flags overlap with the references.
  pub high_plagiarism: f32,
  /// More spellcheck issues than this asks for a grammar review.
  pub max_grammar_issues: usize,
}

impl Default for Thresholds {
  fn default() -> Self {
    Self {
      low_similarity: 0.5,
      high_plagiarism: 20.0,
      max_grammar_issues: 5,
    }
  }
}

/// Feedback lines shown in the dashboard. Override in TOML to tune tone.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedbackMessages {
  pub low_similarity: String,
  pub high_plagiarism: String,
  pub many_grammar_issues: String,
  pub all_clear: String,
}

impl Default for FeedbackMessages {
  fn default() -> Self {
    Self {
      low_similarity: "Consider revising your answer.".into(),
      high_plagiarism: "High similarity with other works detected.".into(),
      many_grammar_issues: "Review grammar errors for clarity.".into(),
      all_clear: "Great job! Your answer is well-structured and original.".into(),
    }
  }
}

/// Where the plain-text inputs live. All file names are resolved under `dir`.
#[derive(Clone, Debug, Deserialize)]
pub struct DataPaths {
  pub dir: String,
  /// File whose first double-newline-delimited block is the model answer.
  pub model_answers: String,
  /// Sample student answer files offered by the form, in display order.
  pub samples: Vec<String>,
  /// One lowercase word per line; merged over the built-in base list.
  pub dictionary: String,
}

impl Default for DataPaths {
  fn default() -> Self {
    Self {
      dir: "./data".into(),
      model_answers: "model_answers.txt".into(),
      samples: vec![
        "sample_student_answer1.txt".into(),
        "sample_student_answer2.txt".into(),
      ],
      dictionary: "dictionary.txt".into(),
    }
  }
}

/// Attempt to load `EvalConfig` from EVAL_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_eval_config_from_env() -> Option<EvalConfig> {
  let path = std::env::var("EVAL_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<EvalConfig>(&s) {
      Ok(cfg) => {
        info!(target: "markwise_backend", %path, "Loaded eval config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "markwise_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "markwise_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_dashboard_tuning() {
    let cfg = EvalConfig::default();
    assert!((cfg.thresholds.low_similarity - 0.5).abs() < f32::EPSILON);
    assert!((cfg.thresholds.high_plagiarism - 20.0).abs() < f32::EPSILON);
    assert_eq!(cfg.thresholds.max_grammar_issues, 5);
    assert_eq!(cfg.data.samples.len(), 2);
  }

  #[test]
  fn partial_toml_fills_in_defaults() {
    let cfg: EvalConfig = toml::from_str(
      r#"
      [thresholds]
      low_similarity = 0.7
      high_plagiarism = 35.0
      max_grammar_issues = 3
      "#,
    )
    .expect("parse");
    assert!((cfg.thresholds.low_similarity - 0.7).abs() < f32::EPSILON);
    // Untouched sections keep their defaults.
    assert_eq!(cfg.data.dir, "./data");
    assert_eq!(cfg.feedback.all_clear, FeedbackMessages::default().all_clear);
  }
}
