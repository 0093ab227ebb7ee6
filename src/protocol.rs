//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerSource, Evaluation, StudentAnswer};

//
// HTTP request DTOs
//

/// Load a student answer into the session store: either inline text
/// (client-side file read) or the name of a bundled sample.
#[derive(Debug, Deserialize)]
pub struct LoadAnswerIn {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sample: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SampleQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateIn {
    #[serde(default, rename = "answerId")]
    pub answer_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

//
// HTTP response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ModelAnswerOut {
    pub text: String,
}

#[derive(Serialize)]
pub struct SamplesOut {
    pub names: Vec<String>,
}

#[derive(Serialize)]
pub struct SampleOut {
    pub name: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct LoadAnswerOut {
    #[serde(rename = "answerId")]
    pub answer_id: String,
    pub source: AnswerSource,
    pub text: String,
}

pub fn answer_to_out(a: &StudentAnswer) -> LoadAnswerOut {
    LoadAnswerOut {
        answer_id: a.id.clone(),
        source: a.source.clone(),
        text: a.text.clone(),
    }
}

#[derive(Serialize)]
pub struct GrammarIssueOut {
    pub word: String,
    pub message: String,
}

/// Bar-chart payload the dashboard renders: one value per category,
/// all on a 0..100 "higher is better" scale.
#[derive(Serialize)]
pub struct ChartOut {
    pub categories: Vec<&'static str>,
    pub values: Vec<f32>,
}

#[derive(Serialize)]
pub struct EvaluationOut {
    /// TF-IDF cosine similarity, 0..1.
    pub similarity: f32,
    /// Embedding similarity percentage, 0..100.
    pub plagiarism: f32,
    #[serde(rename = "plagiarismOrigin")]
    pub plagiarism_origin: &'static str,
    #[serde(rename = "grammarIssues")]
    pub grammar_issues: Vec<GrammarIssueOut>,
    pub readability: f32,
    pub highlighted: String,
    pub feedback: Vec<String>,
    pub chart: ChartOut,
}

/// Convert the internal `Evaluation` to the public DTO, deriving the chart
/// values the dashboard plots: similarity%, originality%, and language
/// quality, each clamped to 0..100.
pub fn evaluation_to_out(e: &Evaluation) -> EvaluationOut {
    let issue_count = e.grammar.issues.len() as f32;
    EvaluationOut {
        similarity: e.similarity,
        plagiarism: e.plagiarism,
        plagiarism_origin: e.plagiarism_origin,
        grammar_issues: e
            .grammar
            .issues
            .iter()
            .map(|i| GrammarIssueOut {
                word: i.word.clone(),
                message: i.message.clone(),
            })
            .collect(),
        readability: e.grammar.readability,
        highlighted: e.highlighted.clone(),
        feedback: e.feedback.clone(),
        chart: ChartOut {
            categories: vec!["Similarity", "Plagiarism", "Grammar"],
            values: vec![
                (e.similarity * 100.0).clamp(0.0, 100.0),
                (100.0 - e.plagiarism).clamp(0.0, 100.0),
                (100.0 - issue_count).clamp(0.0, 100.0),
            ],
        },
    }
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GrammarIssue, GrammarReport};

    #[test]
    fn chart_values_are_clamped_to_percentages() {
        let eval = Evaluation {
            similarity: 1.0,
            plagiarism: 100.0,
            plagiarism_origin: "lexical_fallback",
            grammar: GrammarReport {
                issues: (0..120)
                    .map(|i| GrammarIssue {
                        word: format!("w{i}"),
                        message: String::new(),
                    })
                    .collect(),
                readability: 50.0,
            },
            highlighted: String::new(),
            feedback: vec![],
        };

        let out = evaluation_to_out(&eval);
        assert_eq!(out.chart.categories, vec!["Similarity", "Plagiarism", "Grammar"]);
        assert_eq!(out.chart.values, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn wire_format_uses_camel_case_names() {
        let eval = Evaluation {
            similarity: 0.5,
            plagiarism: 10.0,
            plagiarism_origin: "embedding_model",
            grammar: GrammarReport::default(),
            highlighted: "text".into(),
            feedback: vec!["ok".into()],
        };

        let json = serde_json::to_value(evaluation_to_out(&eval)).expect("serialize");
        assert!(json.get("plagiarismOrigin").is_some());
        assert!(json.get("grammarIssues").is_some());
        assert!(json.get("plagiarism_origin").is_none());

        let body: EvaluateIn =
            serde_json::from_str(r#"{"answerId": "abc"}"#).expect("deserialize");
        assert_eq!(body.answer_id.as_deref(), Some("abc"));
        assert!(body.text.is_none());
    }
}
