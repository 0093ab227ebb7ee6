//! In-process sentence embeddings for the plagiarism scorer.
//!
//! A pretrained MiniLM-class sentence-transformer (ONNX export) is loaded
//! once at startup and run locally; no network calls happen at evaluation
//! time. Encoding is the usual recipe: wordpiece tokenize, run the encoder,
//! mean-pool the last hidden state under the attention mask, L2-normalize.
//!
//! Construction follows the optional-model pattern: `from_env` returns None
//! when the model paths are not configured, and callers fall back to the
//! lexical scorer.

use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{info, instrument};

/// Wraps the ONNX session and its tokenizer. The session is behind a mutex
/// because inference needs exclusive access; encoding requests are short.
pub struct SentenceEmbedder {
  session: Mutex<Session>,
  tokenizer: Tokenizer,
  pub model_path: String,
}

impl SentenceEmbedder {
  /// Construct the embedder if EMBED_MODEL_PATH and EMBED_TOKENIZER_PATH are
  /// both set; otherwise return None. A configured-but-broken model is an
  /// error: silently dropping to the fallback would hide a deployment bug.
  pub fn from_env() -> Option<Result<Self, String>> {
    let model_path = std::env::var("EMBED_MODEL_PATH").ok()?;
    let tokenizer_path = std::env::var("EMBED_TOKENIZER_PATH").ok()?;
    Some(Self::load(&model_path, &tokenizer_path))
  }

  pub fn load(model_path: &str, tokenizer_path: &str) -> Result<Self, String> {
    let tokenizer = Tokenizer::from_file(tokenizer_path)
      .map_err(|e| format!("load tokenizer {}: {}", tokenizer_path, e))?;

    let session = Session::builder()
      .map_err(|e| format!("ONNX session builder: {}", e))?
      .commit_from_file(model_path)
      .map_err(|e| format!("load ONNX model {}: {}", model_path, e))?;

    info!(target: "markwise_backend", model = %model_path, "Sentence embedding model loaded");
    Ok(Self {
      session: Mutex::new(session),
      tokenizer,
      model_path: model_path.to_string(),
    })
  }

  /// Encode one text into a unit-length embedding vector.
  #[instrument(level = "debug", skip(self, text), fields(text_len = text.len()))]
  pub fn encode(&self, text: &str) -> Result<Vec<f32>, String> {
    let encoding = self
      .tokenizer
      .encode(text, true)
      .map_err(|e| format!("tokenize: {}", e))?;

    let ids: Vec<i64> = encoding.get_ids().iter().map(|&v| v as i64).collect();
    let mask: Vec<i64> = encoding
      .get_attention_mask()
      .iter()
      .map(|&v| v as i64)
      .collect();
    let type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&v| v as i64).collect();
    let seq_len = ids.len();
    if seq_len == 0 {
      return Err("tokenizer produced an empty encoding".into());
    }

    let input_ids = Tensor::from_array(([1, seq_len], ids))
      .map_err(|e| format!("input_ids tensor: {}", e))?;
    let attention_mask = Tensor::from_array(([1, seq_len], mask.clone()))
      .map_err(|e| format!("attention_mask tensor: {}", e))?;
    let token_type_ids = Tensor::from_array(([1, seq_len], type_ids))
      .map_err(|e| format!("token_type_ids tensor: {}", e))?;

    let mut session = self
      .session
      .lock()
      .map_err(|_| "embedding session lock poisoned".to_string())?;
    let outputs = session
      .run(ort::inputs![
        "input_ids" => input_ids,
        "attention_mask" => attention_mask,
        "token_type_ids" => token_type_ids,
      ])
      .map_err(|e| format!("embedding inference: {}", e))?;

    let (shape, data) = outputs[0]
      .try_extract_tensor::<f32>()
      .map_err(|e| format!("read embedding output: {}", e))?;
    if shape.len() != 3 {
      return Err(format!("unexpected embedding output rank: {:?}", shape));
    }
    let tokens = shape[1] as usize;
    let hidden = shape[2] as usize;
    if tokens != seq_len || data.len() < tokens * hidden {
      return Err(format!(
        "unexpected embedding output shape: {:?} for {} input tokens",
        shape, seq_len
      ));
    }

    // Mean-pool token vectors under the attention mask.
    let mut pooled = vec![0.0f32; hidden];
    let mut counted = 0.0f32;
    for (t, &m) in mask.iter().enumerate() {
      if m == 0 {
        continue;
      }
      counted += 1.0;
      let row = &data[t * hidden..(t + 1) * hidden];
      for (p, &v) in pooled.iter_mut().zip(row) {
        *p += v;
      }
    }
    if counted > 0.0 {
      for p in pooled.iter_mut() {
        *p /= counted;
      }
    }
    normalize(&mut pooled);
    Ok(pooled)
  }
}

/// Scale a vector to unit length. Zero vectors are left unchanged.
pub fn normalize(vector: &mut [f32]) {
  let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
  if magnitude > 0.0 {
    for x in vector.iter_mut() {
      *x /= magnitude;
    }
  }
}

/// Cosine similarity between two embedding vectors, 0.0 when degenerate.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
  if a.len() != b.len() || a.is_empty() {
    return 0.0;
  }
  let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
  let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
  let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
  if norm_a == 0.0 || norm_b == 0.0 {
    return 0.0;
  }
  dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cosine_of_identical_vectors_is_one() {
    let v = vec![0.3, -0.4, 0.5];
    assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
  }

  #[test]
  fn cosine_of_orthogonal_vectors_is_zero() {
    assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
  }

  #[test]
  fn cosine_handles_degenerate_input() {
    assert_eq!(cosine(&[], &[]), 0.0);
    assert_eq!(cosine(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
  }

  #[test]
  fn normalize_produces_unit_length() {
    let mut v = vec![3.0, 4.0];
    normalize(&mut v);
    let len: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((len - 1.0).abs() < 1e-6);
    assert!((v[0] - 0.6).abs() < 1e-6);
  }

  #[test]
  fn normalize_leaves_zero_vector_alone() {
    let mut v = vec![0.0, 0.0];
    normalize(&mut v);
    assert_eq!(v, vec![0.0, 0.0]);
  }
}
