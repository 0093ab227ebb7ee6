//! Core evaluation flow shared by the HTTP handlers.
//!
//! This includes:
//!   - Resolving the student text (inline text or a stored answer id)
//!   - Running the four independent scorers over the shared input strings
//!   - Deriving threshold feedback for the dashboard
//!
//! The scorers never depend on each other's output, only on the inputs.

use tracing::{debug, error, instrument};

use crate::domain::Evaluation;
use crate::grammar::grammar_check;
use crate::highlight::highlight_overlap;
use crate::similarity;
use crate::state::AppState;
use crate::util::trunc_for_log;
use crate::embedding;

pub const ORIGIN_EMBEDDING: &str = "embedding_model";
pub const ORIGIN_LEXICAL: &str = "lexical_fallback";

/// Resolve the input text and evaluate it. Inline text wins over a stored
/// answer id; an unknown id or a fully missing input is an error.
#[instrument(level = "info", skip(state, text), fields(answer_id = answer_id.unwrap_or("-")))]
pub async fn evaluate_request(
  state: &AppState,
  answer_id: Option<&str>,
  text: Option<&str>,
) -> Result<Evaluation, String> {
  let student_text = match (text, answer_id) {
    (Some(t), _) => t.to_string(),
    (None, Some(id)) => match state.get_answer(id).await {
      Some(answer) => answer.text,
      None => return Err(format!("Unknown answerId: {}", id)),
    },
    (None, None) => return Err("Provide either `text` or `answerId`.".into()),
  };
  Ok(evaluate_answer(state, &student_text).await)
}

/// Run all four scorers against the current model answer.
#[instrument(level = "info", skip(state, student_text), fields(answer_len = student_text.len()))]
pub async fn evaluate_answer(state: &AppState, student_text: &str) -> Evaluation {
  let references = state.reference_corpus();

  let similarity = similarity::score(student_text, &state.model_answer);
  let (plagiarism, plagiarism_origin) = plagiarism_score(state, student_text, &references).await;
  let grammar = grammar_check(student_text, &state.dictionary);

  let highlighted = match highlight_overlap(student_text, &references) {
    Ok(h) => h,
    Err(e) => {
      error!(target: "evaluation", error = %e, "Highlighting failed; returning unmarked text");
      student_text.to_string()
    }
  };

  let feedback = build_feedback(state, similarity, plagiarism, grammar.issues.len());
  debug!(
    target: "evaluation",
    similarity = %format!("{:.3}", similarity),
    plagiarism = %format!("{:.1}", plagiarism),
    issues = grammar.issues.len(),
    highlighted = %trunc_for_log(&highlighted, 120),
    "Evaluation computed"
  );

  Evaluation {
    similarity,
    plagiarism,
    plagiarism_origin,
    grammar,
    highlighted,
    feedback,
  }
}

/// Max similarity against the reference corpus as a percentage in [0, 100].
/// Uses the embedding model when loaded; any failure is logged and the
/// lexical TF-IDF estimate is used instead.
#[instrument(level = "debug", skip(state, student_text, references), fields(references = references.len()))]
async fn plagiarism_score(
  state: &AppState,
  student_text: &str,
  references: &[String],
) -> (f32, &'static str) {
  if let Some(embedder) = &state.embedder {
    match embedded_max_similarity(state, embedder, student_text, references).await {
      Ok(max) => return ((max * 100.0).clamp(0.0, 100.0), ORIGIN_EMBEDDING),
      Err(e) => {
        error!(target: "evaluation", error = %e, "Embedding plagiarism check failed; using lexical fallback");
      }
    }
  }

  let max = references
    .iter()
    .map(|r| similarity::score(student_text, r))
    .fold(0.0f32, f32::max);
  ((max * 100.0).clamp(0.0, 100.0), ORIGIN_LEXICAL)
}

async fn embedded_max_similarity(
  state: &AppState,
  embedder: &crate::embedding::SentenceEmbedder,
  student_text: &str,
  references: &[String],
) -> Result<f32, String> {
  let student = embedder.encode(student_text)?;
  let mut max = 0.0f32;
  for reference in references {
    let reference_embedding = state.reference_embedding(embedder, reference).await?;
    max = max.max(embedding::cosine(&student, &reference_embedding));
  }
  Ok(max)
}

/// Threshold feedback, in the dashboard's fixed order. The all-clear line is
/// used when no threshold fires.
fn build_feedback(
  state: &AppState,
  similarity: f32,
  plagiarism: f32,
  issue_count: usize,
) -> Vec<String> {
  let thresholds = &state.config.thresholds;
  let messages = &state.config.feedback;

  let mut feedback = Vec::new();
  if similarity < thresholds.low_similarity {
    feedback.push(messages.low_similarity.clone());
  }
  if plagiarism > thresholds.high_plagiarism {
    feedback.push(messages.high_plagiarism.clone());
  }
  if issue_count > thresholds.max_grammar_issues {
    feedback.push(messages.many_grammar_issues.clone());
  }
  if feedback.is_empty() {
    feedback.push(messages.all_clear.clone());
  }
  feedback
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{collections::HashMap, sync::Arc};
  use tokio::sync::RwLock;

  use crate::config::EvalConfig;
  use crate::domain::AnswerSource;
  use crate::grammar::SpellChecker;

  fn test_state(model_answer: &str) -> AppState {
    AppState {
      config: EvalConfig::default(),
      model_answer: model_answer.to_string(),
      sample_names: vec![],
      dictionary: Arc::new(SpellChecker::new([
        "the", "cat", "sat", "on", "mat", "a", "dog", "ran", "fast",
      ])),
      answers: Arc::new(RwLock::new(HashMap::new())),
      embedder: None,
      embed_cache: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  #[tokio::test]
  async fn identical_answer_maxes_both_scores() {
    let state = test_state("The cat sat on the mat.");
    let eval = evaluate_answer(&state, "The cat sat on the mat.").await;

    assert!((eval.similarity - 1.0).abs() < 1e-6, "similarity {}", eval.similarity);
    assert!((eval.plagiarism - 100.0).abs() < 1e-3, "plagiarism {}", eval.plagiarism);
    assert_eq!(eval.plagiarism_origin, ORIGIN_LEXICAL);
    assert!(eval.grammar.issues.is_empty(), "issues: {:?}", eval.grammar.issues);
    assert_eq!(eval.feedback, vec![state.config.feedback.high_plagiarism.clone()]);
  }

  #[tokio::test]
  async fn disjoint_answer_bottoms_out_and_asks_for_revision() {
    let state = test_state("The cat sat on the mat.");
    let eval = evaluate_answer(&state, "dog ran fast").await;

    assert!(eval.similarity.abs() < 1e-6, "similarity {}", eval.similarity);
    assert!(eval.plagiarism.abs() < 1e-3, "plagiarism {}", eval.plagiarism);
    assert!(eval.feedback.contains(&state.config.feedback.low_similarity));
    assert!(!eval.feedback.contains(&state.config.feedback.high_plagiarism));
  }

  #[tokio::test]
  async fn many_misspellings_trigger_grammar_feedback() {
    let state = test_state("The cat sat on the mat.");
    let eval =
      evaluate_answer(&state, "teh czt sot urn thx mot extra wordz here").await;

    assert!(eval.grammar.issues.len() > state.config.thresholds.max_grammar_issues);
    assert!(eval.feedback.contains(&state.config.feedback.many_grammar_issues));
  }

  #[tokio::test]
  async fn scores_stay_inside_their_ranges() {
    let state = test_state("The cat sat on the mat.");
    for text in ["", "The cat", "cat cat cat cat", "unrelated words entirely"] {
      let eval = evaluate_answer(&state, text).await;
      assert!((0.0..=1.0).contains(&eval.similarity), "similarity {}", eval.similarity);
      assert!((0.0..=100.0).contains(&eval.plagiarism), "plagiarism {}", eval.plagiarism);
    }
  }

  #[tokio::test]
  async fn highlighting_marks_reference_words() {
    let state = test_state("The cat sat on the mat.");
    let eval = evaluate_answer(&state, "my cat sat quietly").await;
    assert!(eval.highlighted.contains("<span class=\"plagiarized\">cat</span>"));
    assert!(eval.highlighted.contains("quietly"));
    assert!(!eval.highlighted.contains("<span class=\"plagiarized\">quietly"));
  }

  #[tokio::test]
  async fn evaluate_request_resolves_stored_answers() {
    let state = test_state("The cat sat on the mat.");
    let stored = state
      .insert_answer(AnswerSource::Upload, "The cat sat on the mat.".into())
      .await;

    let eval = evaluate_request(&state, Some(&stored.id), None).await.expect("eval");
    assert!((eval.similarity - 1.0).abs() < 1e-6);

    let err = evaluate_request(&state, Some("missing-id"), None).await.unwrap_err();
    assert!(err.contains("missing-id"));

    let err = evaluate_request(&state, None, None).await.unwrap_err();
    assert!(err.contains("text"));
  }
}
