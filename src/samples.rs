//! Seed content and plain-text input loading.
//!
//! The data directory holds the model answers file, the sample student
//! answers, and the spellcheck dictionary. Built-in seed texts guarantee the
//! app is useful even when the data files are missing; loaders log the IO
//! error and the caller falls back to the seed.

use std::path::Path;
use tracing::{error, info};

/// Model answer used when `model_answers.txt` cannot be read.
pub const SEED_MODEL_ANSWER: &str = "Photosynthesis is the process by which green plants convert light energy into chemical energy. Chlorophyll in the leaves absorbs sunlight, and the plant uses this energy to turn carbon dioxide and water into glucose and oxygen. The glucose is stored as food while the oxygen is released into the air.";

/// Sample student answers used when the sample files cannot be read.
/// The first mirrors the model answer closely; the second paraphrases it.
pub fn seed_sample_answers() -> Vec<(&'static str, &'static str)> {
  vec![
    (
      "sample_student_answer1.txt",
      "Photosynthesis is the process by which green plants convert light energy into chemical energy. Chlorophyll in the leaves absorbs sunlight and the plant turns carbon dioxide and water into glucose and oxygen.",
    ),
    (
      "sample_student_answer2.txt",
      "Plants make their own food using sunlight. The green pigment in leaves captures light, and with water and carbon dioxide the plant produces sugar and releases oxygen.",
    ),
  ]
}

/// Read a model answers file and return its first double-newline-delimited
/// block, trimmed. Later blocks are alternative answers kept for future use.
pub fn load_model_answer(path: &Path) -> Result<String, String> {
  let raw = std::fs::read_to_string(path)
    .map_err(|e| format!("read {}: {}", path.display(), e))?;
  let first = raw.split("\n\n").next().unwrap_or("").trim().to_string();
  if first.is_empty() {
    return Err(format!("{}: first answer block is empty", path.display()));
  }
  Ok(first)
}

/// Read one sample student answer file as UTF-8 text.
pub fn load_sample_answer(dir: &Path, name: &str) -> Result<String, String> {
  let path = dir.join(name);
  std::fs::read_to_string(&path)
    .map(|s| s.trim_end().to_string())
    .map_err(|e| format!("read {}: {}", path.display(), e))
}

/// Load dictionary words from a file: one word per line, `#` comments and
/// blank lines ignored, lowercased. Returns words in file order.
pub fn load_dictionary_words(path: &Path) -> Result<Vec<String>, String> {
  let raw = std::fs::read_to_string(path)
    .map_err(|e| format!("read {}: {}", path.display(), e))?;
  let words = raw
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty() && !l.starts_with('#'))
    .map(str::to_lowercase)
    .collect::<Vec<_>>();
  info!(target: "markwise_backend", path = %path.display(), words = words.len(), "Dictionary file loaded");
  Ok(words)
}

/// Model answer with the seed fallback applied.
pub fn model_answer_or_seed(path: &Path) -> (String, bool) {
  match load_model_answer(path) {
    Ok(text) => (text, false),
    Err(e) => {
      error!(target: "markwise_backend", error = %e, "Model answer unavailable; using seed text");
      (SEED_MODEL_ANSWER.to_string(), true)
    }
  }
}

/// Base word list merged under any loaded dictionary file. Covers the seed
/// texts plus enough everyday English that the service stays meaningful when
/// `dictionary.txt` is missing.
pub fn seed_dictionary() -> Vec<&'static str> {
  vec![
    // Seed model answer / sample answers vocabulary.
    "photosynthesis", "process", "which", "green", "plants", "plant", "convert",
    "converts", "light", "energy", "into", "chemical", "chlorophyll", "leaves",
    "leaf", "absorbs", "sunlight", "uses", "this", "turn", "turns", "carbon",
    "dioxide", "water", "glucose", "oxygen", "stored", "food", "while",
    "released", "releases", "air", "make", "their", "own", "using", "pigment",
    "captures", "with", "produces", "sugar",
    // Everyday function words and common vocabulary.
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "not", "no",
    "yes", "is", "are", "was", "were", "be", "been", "being", "am", "do",
    "does", "did", "done", "have", "has", "had", "will", "would", "can",
    "could", "shall", "should", "may", "might", "must", "of", "in", "on",
    "at", "to", "from", "by", "for", "as", "about", "above", "below", "over",
    "under", "between", "through", "during", "before", "after", "again",
    "once", "here", "there", "where", "when", "why", "how", "what", "who",
    "whom", "whose", "that", "these", "those", "it", "its", "he", "she",
    "they", "them", "his", "her", "we", "us", "our", "you", "your", "i",
    "me", "my", "mine", "all", "any", "both", "each", "few", "more", "most",
    "other", "some", "such", "only", "same", "so", "than", "too", "very",
    "just", "also", "because", "until", "against", "among", "within",
    "without", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "ten", "first", "second", "third", "new", "old",
    "good", "bad", "great", "small", "large", "big", "long", "short",
    "high", "low", "early", "late", "young", "right", "wrong", "true",
    "false", "cat", "dog", "sat", "sit", "mat", "man", "woman", "child",
    "children", "people", "person", "student", "teacher", "answer",
    "question", "school", "class", "book", "paper", "word", "words",
    "sentence", "text", "write", "written", "writing", "read", "reading",
    "learn", "learning", "study", "know", "knowledge", "think", "thought",
    "idea", "example", "part", "whole", "kind", "form", "way", "time",
    "year", "day", "week", "month", "world", "life", "hand", "eye", "place",
    "work", "home", "house", "city", "country", "state", "group", "number",
    "fact", "case", "point", "problem", "result", "reason", "name", "thing",
    "things", "use", "used", "go", "went", "gone", "come", "came", "get",
    "got", "give", "gave", "take", "took", "see", "saw", "seen", "look",
    "find", "found", "say", "said", "tell", "told", "ask", "asked", "need",
    "needed", "feel", "felt", "become", "became", "leave", "left", "put",
    "mean", "means", "keep", "kept", "let", "begin", "began", "seem",
    "help", "show", "showed", "shown", "hear", "heard", "play", "run",
    "move", "live", "believe", "hold", "bring", "happen", "happened",
    "provide", "turned", "start", "started", "called", "call", "made",
    "making", "grow", "grows", "growing", "cell", "cells", "body", "sun",
    "earth", "tree", "trees", "grass", "flower", "flowers", "animal",
    "animals", "nature", "natural", "science", "scientific", "biology",
    "organism", "organisms", "system", "important", "different", "many",
    "much", "well", "own",
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write as _;

  #[test]
  fn model_answer_takes_the_first_block_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model_answers.txt");
    let mut f = std::fs::File::create(&path).expect("create");
    writeln!(f, "First answer block.\nStill the first block.\n\nSecond block.").expect("write");

    let loaded = load_model_answer(&path).expect("load");
    assert_eq!(loaded, "First answer block.\nStill the first block.");
  }

  #[test]
  fn missing_model_answer_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_model_answer(&dir.path().join("nope.txt")).unwrap_err();
    assert!(err.contains("nope.txt"));
  }

  #[test]
  fn seed_fallback_kicks_in_when_file_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (text, seeded) = model_answer_or_seed(&dir.path().join("nope.txt"));
    assert!(seeded);
    assert_eq!(text, SEED_MODEL_ANSWER);
  }

  #[test]
  fn dictionary_loader_skips_comments_and_lowercases() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dictionary.txt");
    std::fs::write(&path, "# common words\nThe\ncat\n\nMat\n").expect("write");
    let words = load_dictionary_words(&path).expect("load");
    assert_eq!(words, vec!["the", "cat", "mat"]);
  }

  #[test]
  fn seed_dictionary_covers_seed_texts() {
    let dict: std::collections::HashSet<&str> = seed_dictionary().into_iter().collect();
    for (_, text) in seed_sample_answers() {
      for tok in text.split_whitespace() {
        let norm = crate::util::normalize_token(tok);
        assert!(dict.contains(norm.as_str()), "seed dictionary missing {norm:?}");
      }
    }
  }
}
