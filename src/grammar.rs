//! Dictionary-backed spellcheck plus a Flesch reading-ease score.
//!
//! Tokens are whitespace-split, edge-trimmed of punctuation, and lowercased
//! before lookup, so "mat." resolves to the dictionary word "mat". Purely
//! numeric tokens are never flagged. Readability uses the standard Flesch
//! formula with a vowel-group syllable estimate; empty input scores 0.0.

use std::collections::HashSet;
use std::path::Path;

use tracing::error;

use crate::domain::{GrammarIssue, GrammarReport};
use crate::samples::{load_dictionary_words, seed_dictionary};
use crate::util::normalize_token;

/// Static word list loaded at startup. Lookups only; no suggestions.
#[derive(Clone, Debug)]
pub struct SpellChecker {
  words: HashSet<String>,
}

impl SpellChecker {
  pub fn new<I, S>(words: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
    }
  }

  /// Built-in base list, optionally merged with a dictionary file.
  /// A missing or unreadable file is logged and the base list is used alone.
  pub fn from_file_or_seed(path: &Path) -> Self {
    let mut checker = Self::new(seed_dictionary());
    match load_dictionary_words(path) {
      Ok(words) => checker.words.extend(words),
      Err(e) => {
        error!(target: "markwise_backend", error = %e, "Dictionary file unavailable; using built-in word list only");
      }
    }
    checker
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  /// Is the normalized token in the dictionary?
  pub fn knows(&self, token: &str) -> bool {
    let norm = normalize_token(token);
    norm.is_empty()
      || norm.chars().all(|c| c.is_ascii_digit())
      || self.words.contains(&norm)
  }

  /// Normalized tokens of `text` missing from the dictionary, first
  /// occurrence each, in input order.
  pub fn unknown(&self, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut missing = Vec::new();
    for token in text.split_whitespace() {
      if self.knows(token) {
        continue;
      }
      let norm = normalize_token(token);
      if seen.insert(norm.clone()) {
        missing.push(norm);
      }
    }
    missing
  }
}

/// Count syllables in a single word: vowel groups, minus a silent trailing
/// "e", never below one.
fn syllables(word: &str) -> usize {
  let lowered = word.to_lowercase();
  let mut count = 0usize;
  let mut prev_vowel = false;
  for c in lowered.chars() {
    let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    if vowel && !prev_vowel {
      count += 1;
    }
    prev_vowel = vowel;
  }
  if lowered.ends_with('e') && !lowered.ends_with("le") && count > 1 {
    count -= 1;
  }
  count.max(1)
}

/// Flesch reading ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`.
/// Higher is easier to read. Empty input returns 0.0.
pub fn flesch_reading_ease(text: &str) -> f32 {
  let words: Vec<String> = text
    .split_whitespace()
    .map(normalize_token)
    .filter(|w| !w.is_empty())
    .collect();
  if words.is_empty() {
    return 0.0;
  }

  let sentences = text
    .split(['.', '!', '?'])
    .filter(|s| s.chars().any(char::is_alphanumeric))
    .count()
    .max(1);
  let syllable_total: usize = words.iter().map(|w| syllables(w)).sum();

  let words_per_sentence = words.len() as f32 / sentences as f32;
  let syllables_per_word = syllable_total as f32 / words.len() as f32;
  206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
}

/// Spellcheck `text` and score its readability. The issue list and the
/// readability scalar always describe the same input.
pub fn grammar_check(text: &str, checker: &SpellChecker) -> GrammarReport {
  let issues = checker
    .unknown(text)
    .into_iter()
    .map(|word| GrammarIssue {
      message: format!("Misspelled word: {}", word),
      word,
    })
    .collect();
  GrammarReport {
    issues,
    readability: flesch_reading_ease(text),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn checker() -> SpellChecker {
    SpellChecker::new(["the", "cat", "sat", "on", "mat", "quick", "brown", "fox"])
  }

  #[test]
  fn clean_sentence_has_zero_issues() {
    let report = grammar_check("The cat sat on the mat.", &checker());
    assert!(report.issues.is_empty(), "issues: {:?}", report.issues);
  }

  #[test]
  fn punctuation_attached_words_still_resolve() {
    let c = checker();
    assert!(c.knows("mat."));
    assert!(c.knows("(cat)"));
    assert!(c.knows("Mat!"));
  }

  #[test]
  fn numbers_are_never_flagged() {
    assert!(checker().unknown("the cat sat 42 times.").iter().all(|w| w != "42"));
  }

  #[test]
  fn misspellings_are_reported_once_in_order() {
    let report = grammar_check("teh cat szt on teh mat", &checker());
    let words: Vec<&str> = report.issues.iter().map(|i| i.word.as_str()).collect();
    assert_eq!(words, vec!["teh", "szt"]);
  }

  #[test]
  fn issue_count_is_monotonic_in_added_misspellings() {
    let c = checker();
    let base = "the cat sat on the mat";
    let mut text = base.to_string();
    let mut last = grammar_check(&text, &c).issues.len();
    for junk in ["qwrtz", "asdfg", "zxcvb"] {
      text.push(' ');
      text.push_str(junk);
      let count = grammar_check(&text, &c).issues.len();
      assert!(count >= last, "{count} < {last} after adding {junk}");
      last = count;
    }
    assert_eq!(last, 3);
  }

  #[test]
  fn syllable_estimates_are_sane() {
    assert_eq!(syllables("cat"), 1);
    assert_eq!(syllables("table"), 2);
    assert_eq!(syllables("energy"), 3);
    assert_eq!(syllables("idea"), 2);
    // Silent trailing e.
    assert_eq!(syllables("sunshine"), 2);
  }

  #[test]
  fn readability_prefers_short_simple_sentences() {
    let easy = flesch_reading_ease("The cat sat on the mat. The dog ran.");
    let hard = flesch_reading_ease(
      "Photosynthetic organisms utilize electromagnetic radiation, synthesizing carbohydrates.",
    );
    assert!(easy > hard, "easy {easy} vs hard {hard}");
  }

  #[test]
  fn empty_input_scores_zero_readability() {
    assert_eq!(flesch_reading_ease(""), 0.0);
    assert_eq!(flesch_reading_ease("   "), 0.0);
  }
}
