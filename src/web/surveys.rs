use crate::db::{self, SurveyWithCount};
use crate::domain::models::{Question, QuestionType, Survey};
use crate::error::AppError;
use crate::services::{stats, survey};
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct CreateSurveyPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<survey::NewQuestion>,
}

#[derive(Deserialize)]
pub struct CreateQuestionPayload {
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<String>,
}

#[derive(Serialize)]
pub struct SurveyDetail {
    pub survey: Survey,
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
pub struct SurveyResults {
    pub survey: Survey,
    pub questions: Vec<Question>,
    /// Index-aligned with `questions`.
    pub stats: Vec<stats::QuestionStats>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/surveys", get(list_surveys).post(create_survey))
        .route("/surveys/:id", get(survey_detail).delete(delete_survey))
        .route("/surveys/:id/questions", post(add_question))
        .route("/surveys/:id/results", get(survey_results))
        .with_state(state)
}

async fn list_surveys(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SurveyWithCount>>, AppError> {
    let surveys = db::list_surveys_with_question_totals(&state.pool).await?;
    Ok(Json(surveys))
}

async fn create_survey(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSurveyPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = if payload.questions.is_empty() {
        survey::submit_survey_creation(&state.pool, &payload.title, payload.description.as_deref())
            .await?
    } else {
        survey::create_survey_with_questions(
            &state.pool,
            &payload.title,
            payload.description.as_deref(),
            &payload.questions,
        )
        .await?
    };
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn survey_detail(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<SurveyDetail>, AppError> {
    let survey = db::get_survey(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("survey"))?;
    let questions = db::list_questions(&state.pool, id).await?;
    Ok(Json(SurveyDetail { survey, questions }))
}

async fn delete_survey(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if db::delete_survey(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("survey"))
    }
}

async fn add_question(
    State(state): State<SharedState>,
    Path(survey_id): Path<i64>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = survey::add_question(
        &state.pool,
        survey_id,
        &payload.text,
        payload.question_type,
        payload.options.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn survey_results(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<SurveyResults>, AppError> {
    let survey = db::get_survey(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("survey"))?;
    let questions = db::list_questions(&state.pool, id).await?;
    let stats = stats::compute_survey_stats(&state.pool, &questions).await?;
    Ok(Json(SurveyResults {
        survey,
        questions,
        stats,
    }))
}
