//! Wrap reference-word matches in the student text with highlight markup.
//!
//! The whitespace words of the first reference text are edge-trimmed,
//! deduplicated, regex-escaped, and compiled into a single word-boundary
//! alternation applied in one pass, so inserted markup is never re-matched
//! by a later word. Matching is case-sensitive.

use std::collections::HashSet;

use regex::Regex;

const MARK_OPEN: &str = "<span class=\"plagiarized\">";
const MARK_CLOSE: &str = "</span>";

/// Reference words worth matching: whitespace-split, punctuation trimmed
/// from the edges, case preserved, duplicates dropped, input order kept.
fn reference_words(reference: &str) -> Vec<String> {
  let mut seen = HashSet::new();
  let mut words = Vec::new();
  for token in reference.split_whitespace() {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
      continue;
    }
    if seen.insert(word.to_string()) {
      words.push(word.to_string());
    }
  }
  words
}

/// Highlight every standalone occurrence of a first-reference word inside
/// `student`. Non-matching text is returned unchanged, as is the whole input
/// when the reference has no usable words.
pub fn highlight_overlap(student: &str, reference_corpus: &[String]) -> Result<String, String> {
  let reference = match reference_corpus.first() {
    Some(r) => r,
    None => return Ok(student.to_string()),
  };
  let words = reference_words(reference);
  if words.is_empty() {
    return Ok(student.to_string());
  }

  let alternation = words
    .iter()
    .map(|w| regex::escape(w))
    .collect::<Vec<_>>()
    .join("|");
  let re = Regex::new(&format!(r"\b(?:{})\b", alternation))
    .map_err(|e| format!("highlight pattern: {}", e))?;

  Ok(
    re.replace_all(student, |caps: &regex::Captures| {
      format!("{}{}{}", MARK_OPEN, &caps[0], MARK_CLOSE)
    })
    .into_owned(),
  )
}
