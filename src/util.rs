//! Small utility helpers used across modules.

/// Strip leading/trailing non-alphanumeric characters and lowercase.
/// Shared by the spellchecker and the highlighter so that a token like
/// "mat." resolves to the dictionary word "mat".
pub fn normalize_token(token: &str) -> String {
  token
    .trim_matches(|c: char| !c.is_alphanumeric())
    .to_lowercase()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let head: String = s
      .char_indices()
      .take_while(|(i, _)| *i < max)
      .map(|(_, c)| c)
      .collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_strips_edge_punctuation_and_lowercases() {
    assert_eq!(normalize_token("Mat."), "mat");
    assert_eq!(normalize_token("(hello)"), "hello");
    assert_eq!(normalize_token("don't"), "don't");
    assert_eq!(normalize_token("..."), "");
  }

  #[test]
  fn trunc_keeps_short_strings_intact() {
    assert_eq!(trunc_for_log("short", 32), "short");
    assert!(trunc_for_log(&"x".repeat(100), 10).contains("100 bytes total"));
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    let s = "日本語のテキストです、長い文字列";
    let out = trunc_for_log(s, 10);
    assert!(out.contains("bytes total"));
  }
}
