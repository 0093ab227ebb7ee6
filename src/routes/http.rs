//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::domain::AnswerSource;
use crate::logic::evaluate_request;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_model_answer(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(ModelAnswerOut { text: state.model_answer.clone() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_samples(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(SamplesOut { names: state.sample_names.clone() })
}

#[instrument(level = "info", skip(state), fields(%q.name))]
pub async fn http_get_sample(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SampleQuery>,
) -> impl IntoResponse {
  match state.sample_text(&q.name) {
    Some((text, _)) => Json(SampleOut { name: q.name, text }).into_response(),
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { message: format!("Unknown sample: {}", q.name) }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state, body), fields(has_text = body.text.is_some(), sample = body.sample.as_deref().unwrap_or("-")))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LoadAnswerIn>,
) -> impl IntoResponse {
  // Uploaded text wins over a sample selection.
  let (text, source) = if let Some(text) = body.text {
    (text, AnswerSource::Upload)
  } else if let Some(name) = body.sample.as_deref() {
    match state.sample_text(name) {
      Some((text, source)) => (text, source),
      None => {
        return (
          StatusCode::NOT_FOUND,
          Json(ErrorOut { message: format!("Unknown sample: {}", name) }),
        )
          .into_response();
      }
    }
  } else {
    return (
      StatusCode::BAD_REQUEST,
      Json(ErrorOut { message: "Provide either `text` or `sample`.".into() }),
    )
      .into_response();
  };

  let answer = state.insert_answer(source, text).await;
  info!(target: "evaluation", id = %answer.id, source = ?answer.source, answer_len = answer.text.len(), "Student answer loaded");
  Json(answer_to_out(&answer)).into_response()
}

#[instrument(level = "info", skip(state, body), fields(answer_id = body.answer_id.as_deref().unwrap_or("-"), inline_len = body.text.as_deref().map(str::len).unwrap_or(0)))]
pub async fn http_post_evaluate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EvaluateIn>,
) -> impl IntoResponse {
  match evaluate_request(&state, body.answer_id.as_deref(), body.text.as_deref()).await {
    Ok(eval) => {
      info!(
        target: "evaluation",
        similarity = %format!("{:.3}", eval.similarity),
        plagiarism = %format!("{:.1}", eval.plagiarism),
        origin = eval.plagiarism_origin,
        issues = eval.grammar.issues.len(),
        "HTTP evaluate served"
      );
      Json(evaluation_to_out(&eval)).into_response()
    }
    Err(message) => {
      let status = if message.starts_with("Unknown") {
        StatusCode::NOT_FOUND
      } else {
        StatusCode::BAD_REQUEST
      };
      (status, Json(ErrorOut { message })).into_response()
    }
  }
}
