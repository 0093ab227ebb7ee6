//! Application state: loaded reference texts, answer store, dictionary,
//! and the optional sentence-embedding model.
//!
//! This module owns:
//!   - the model answer (first block of the model answers file, or the seed)
//!   - the ordered list of sample student answers
//!   - the in-memory store of loaded student answers (by id)
//!   - the spellcheck dictionary
//!   - the optional embedder plus its reference-embedding cache
//!   - thresholds and feedback messages (from TOML or defaults)
//!
//! Everything is computed fresh per evaluation request; the only mutable
//! state is the answer store and the embedding cache.

use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::config::{load_eval_config_from_env, EvalConfig};
use crate::domain::{AnswerSource, StudentAnswer};
use crate::embedding::SentenceEmbedder;
use crate::grammar::SpellChecker;
use crate::samples::{load_sample_answer, model_answer_or_seed, seed_sample_answers};

#[derive(Clone)]
pub struct AppState {
    pub config: EvalConfig,
    pub model_answer: String,
    /// Sample names in display order.
    pub sample_names: Vec<String>,
    pub dictionary: Arc<SpellChecker>,
    pub answers: Arc<RwLock<HashMap<String, StudentAnswer>>>,
    pub embedder: Option<Arc<SentenceEmbedder>>,
    /// Reference text -> embedding, so the fixed model answer is encoded once.
    pub embed_cache: Arc<RwLock<HashMap<String, Vec<f32>>>>,
}

impl AppState {
    /// Build state from env: load config, reference texts, dictionary, and
    /// the optional embedding model.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_eval_config_from_env().unwrap_or_default();
        let data_dir = PathBuf::from(&config.data.dir);

        let (model_answer, seeded) =
            model_answer_or_seed(&data_dir.join(&config.data.model_answers));

        let sample_names: Vec<String> = if config.data.samples.is_empty() {
            seed_sample_answers().iter().map(|(n, _)| n.to_string()).collect()
        } else {
            config.data.samples.clone()
        };

        let dictionary = SpellChecker::from_file_or_seed(&data_dir.join(&config.data.dictionary));

        let embedder = match SentenceEmbedder::from_env() {
            Some(Ok(e)) => Some(Arc::new(e)),
            Some(Err(e)) => {
                error!(target: "markwise_backend", error = %e, "Embedding model configured but failed to load; plagiarism will use the lexical fallback");
                None
            }
            None => {
                info!(target: "markwise_backend", "Embedding model disabled (EMBED_MODEL_PATH not set). Plagiarism will use the lexical fallback.");
                None
            }
        };

        info!(
            target: "markwise_backend",
            model_answer_len = model_answer.len(),
            model_answer_seeded = seeded,
            samples = sample_names.len(),
            dictionary_words = dictionary.len(),
            embedder = embedder.is_some(),
            "Startup evaluation inventory"
        );

        Self {
            config,
            model_answer,
            sample_names,
            dictionary: Arc::new(dictionary),
            answers: Arc::new(RwLock::new(HashMap::new())),
            embedder,
            embed_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The reference corpus the plagiarism scorer and highlighter run
    /// against. Always length 1 today; kept a list so more references can be
    /// configured later without touching the scorers.
    pub fn reference_corpus(&self) -> Vec<String> {
        vec![self.model_answer.clone()]
    }

    /// Read one sample answer, falling back to the matching seed text when
    /// the file cannot be read.
    #[instrument(level = "debug", skip(self), fields(%name))]
    pub fn sample_text(&self, name: &str) -> Option<(String, AnswerSource)> {
        if !self.sample_names.iter().any(|n| n == name) {
            return None;
        }
        let dir = PathBuf::from(&self.config.data.dir);
        match load_sample_answer(&dir, name) {
            Ok(text) => Some((text, AnswerSource::SampleFile)),
            Err(e) => {
                error!(target: "markwise_backend", %name, error = %e, "Sample file unavailable; trying seed text");
                seed_sample_answers()
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, text)| (text.to_string(), AnswerSource::Seed))
            }
        }
    }

    /// Store a student answer and return it with its fresh id.
    #[instrument(level = "debug", skip(self, text), fields(answer_len = text.len()))]
    pub async fn insert_answer(&self, source: AnswerSource, text: String) -> StudentAnswer {
        let answer = StudentAnswer {
            id: Uuid::new_v4().to_string(),
            source,
            text,
        };
        self.answers
            .write()
            .await
            .insert(answer.id.clone(), answer.clone());
        answer
    }

    /// Read-only access to a stored answer by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_answer(&self, id: &str) -> Option<StudentAnswer> {
        self.answers.read().await.get(id).cloned()
    }

    /// Embedding for a reference text, encoded once and cached.
    pub async fn reference_embedding(
        &self,
        embedder: &SentenceEmbedder,
        reference: &str,
    ) -> Result<Vec<f32>, String> {
        if let Some(hit) = self.embed_cache.read().await.get(reference) {
            return Ok(hit.clone());
        }
        let embedding = embedder.encode(reference)?;
        self.embed_cache
            .write()
            .await
            .insert(reference.to_string(), embedding.clone());
        Ok(embedding)
    }
}
