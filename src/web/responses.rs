use crate::error::AppError;
use crate::services::survey;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};

#[derive(Deserialize)]
pub struct ResponsePayload {
    /// Submissions are attributed to an identified user, passed explicitly
    /// by the caller.
    pub respondent_id: i64,
    /// question id -> raw value. Keys that are not question ids are ignored.
    pub answers: HashMap<String, String>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/surveys/:id/responses", post(submit_responses))
        .with_state(state)
}

/// Drops entries whose key does not parse as a question id.
fn parse_answer_keys(raw: HashMap<String, String>) -> BTreeMap<i64, String> {
    raw.into_iter()
        .filter_map(|(key, value)| key.parse::<i64>().ok().map(|id| (id, value)))
        .collect()
}

async fn submit_responses(
    State(state): State<SharedState>,
    Path(survey_id): Path<i64>,
    Json(payload): Json<ResponsePayload>,
) -> Result<Json<Value>, AppError> {
    let answers = parse_answer_keys(payload.answers);
    let recorded =
        survey::submit_response_batch(&state.pool, survey_id, &answers, payload.respondent_id)
            .await?;
    Ok(Json(json!({ "recorded": recorded })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut raw = HashMap::new();
        raw.insert("3".to_string(), "42".to_string());
        raw.insert("not-a-question".to_string(), "x".to_string());
        raw.insert("7".to_string(), "hello".to_string());

        let parsed = parse_answer_keys(raw);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(&3).map(String::as_str), Some("42"));
        assert_eq!(parsed.get(&7).map(String::as_str), Some("hello"));
    }
}
