use crate::db;
use crate::error::AppError;
use crate::services::stats::{self, ChartSeries};
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/surveys/:id/chart", get(chart_data))
        .with_state(state)
}

/// `{ "labels": [...], "data": [...] }` for the survey's scale questions.
async fn chart_data(
    State(state): State<SharedState>,
    Path(survey_id): Path<i64>,
) -> Result<Json<ChartSeries>, AppError> {
    db::get_survey(&state.pool, survey_id)
        .await?
        .ok_or(AppError::NotFound("survey"))?;
    let questions = db::list_questions(&state.pool, survey_id).await?;
    let question_stats = stats::compute_survey_stats(&state.pool, &questions).await?;
    Ok(Json(stats::build_chart_series(&questions, &question_stats)))
}
