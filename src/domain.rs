//! Domain models used by the backend: answer sources, student answers, and evaluation results.

use serde::{Deserialize, Serialize};

/// Where did the student answer come from?
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
  Upload,      // text posted by the client (file read browser-side)
  SampleFile,  // one of the bundled sample answer files
  Seed,        // built-in seed text (data files missing)
}

/// A student answer held in the in-memory store for the lifetime of the process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudentAnswer {
  pub id: String,
  pub source: AnswerSource,
  pub text: String,
}

/// One spellcheck finding. `word` is the normalized token that missed the dictionary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrammarIssue {
  pub word: String,
  pub message: String,
}

/// Spellcheck issues plus the Flesch reading-ease score for the same text.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GrammarReport {
  pub issues: Vec<GrammarIssue>,
  pub readability: f32,
}

/// Full result of one evaluation request. Computed fresh from the current
/// inputs on every request; nothing is cached or mutated incrementally.
#[derive(Clone, Debug, Serialize)]
pub struct Evaluation {
  /// TF-IDF cosine similarity against the model answer, in [0, 1].
  pub similarity: f32,
  /// Max embedding similarity against the reference corpus, in [0, 100].
  pub plagiarism: f32,
  /// Which path produced the plagiarism score.
  pub plagiarism_origin: &'static str,
  pub grammar: GrammarReport,
  /// Student text with reference-word matches wrapped in highlight markup.
  pub highlighted: String,
  /// Threshold-derived feedback lines for the dashboard.
  pub feedback: Vec<String>,
}
