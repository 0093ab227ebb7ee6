//! Bag-of-words TF-IDF cosine similarity over exactly two texts.
//!
//! Tokenization follows common vectorizer defaults: lowercase, tokens are
//! runs of two or more word characters. IDF is smoothed,
//! `ln((1 + n) / (1 + df)) + 1` with n = 2 documents, and vectors are
//! L2-normalized before the cosine. Degenerate input (no tokens on either
//! side) scores 0.0 rather than erroring.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

fn token_re() -> &'static Regex {
  static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
  TOKEN_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").unwrap())
}

/// Term frequencies of the lowercased text.
fn term_counts(text: &str) -> HashMap<String, f64> {
  let lowered = text.to_lowercase();
  let mut counts = HashMap::new();
  for m in token_re().find_iter(&lowered) {
    *counts.entry(m.as_str().to_string()).or_insert(0.0) += 1.0;
  }
  counts
}

fn cosine_similarity(vec_a: &HashMap<String, f64>, vec_b: &HashMap<String, f64>) -> f64 {
  let mut dot_product = 0.0;
  let mut norm_a = 0.0;
  let mut norm_b = 0.0;

  for (term, weight) in vec_a {
    norm_a += weight * weight;
    if let Some(weight_b) = vec_b.get(term) {
      dot_product += weight * weight_b;
    }
  }
  for weight in vec_b.values() {
    norm_b += weight * weight;
  }

  if norm_a == 0.0 || norm_b == 0.0 {
    return 0.0;
  }
  dot_product / (norm_a.sqrt() * norm_b.sqrt())
}

/// TF-IDF weights for one document of the two-document space.
fn tfidf_vector(
  counts: &HashMap<String, f64>,
  other: &HashMap<String, f64>,
) -> HashMap<String, f64> {
  let total_docs = 2.0_f64;
  counts
    .iter()
    .map(|(term, &tf)| {
      let df = if other.contains_key(term) { 2.0 } else { 1.0 };
      let idf = ((total_docs + 1.0) / (df + 1.0)).ln() + 1.0;
      (term.clone(), tf * idf)
    })
    .collect()
}

/// Cosine similarity between two texts in their shared TF-IDF space, in [0, 1].
pub fn score(text_a: &str, text_b: &str) -> f32 {
  let counts_a = term_counts(text_a);
  let counts_b = term_counts(text_b);
  if counts_a.is_empty() || counts_b.is_empty() {
    return 0.0;
  }

  let vec_a = tfidf_vector(&counts_a, &counts_b);
  let vec_b = tfidf_vector(&counts_b, &counts_a);
  cosine_similarity(&vec_a, &vec_b).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identical_texts_score_one() {
    let s = score("The cat sat on the mat.", "The cat sat on the mat.");
    assert!((s - 1.0).abs() < 1e-6, "got {s}");
  }

  #[test]
  fn case_differences_do_not_matter() {
    let s = score("The Cat Sat", "the cat sat");
    assert!((s - 1.0).abs() < 1e-6, "got {s}");
  }

  #[test]
  fn disjoint_vocabularies_score_zero() {
    let s = score("alpha bravo charlie", "delta echo foxtrot");
    assert!(s.abs() < 1e-6, "got {s}");
  }

  #[test]
  fn partial_overlap_scores_strictly_between() {
    let s = score("green plants convert light", "green plants release oxygen");
    assert!(s > 0.0 && s < 1.0, "got {s}");
  }

  #[test]
  fn empty_or_token_free_input_scores_zero() {
    assert_eq!(score("", "The cat sat"), 0.0);
    assert_eq!(score("The cat sat", ""), 0.0);
    // Single-character tokens are below the vectorizer's minimum length.
    assert_eq!(score("a b c", "a b c"), 0.0);
  }
}
