use crate::db;
use crate::domain::models::QuestionType;
use crate::error::AppError;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<String>,
}

/// Creates a survey after validating the title. Nothing is persisted when
/// validation fails.
pub async fn submit_survey_creation(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
) -> Result<i64, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("survey title is required"));
    }
    db::create_survey(pool, title, description).await
}

/// Survey plus its initial questions in one transaction, so a failure midway
/// never leaves a half-applied survey behind.
pub async fn create_survey_with_questions(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
    questions: &[NewQuestion],
) -> Result<i64, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("survey title is required"));
    }
    for question in questions {
        if question.text.trim().is_empty() {
            return Err(AppError::validation("question text is required"));
        }
    }

    let mut tx = pool.begin().await?;
    let survey_id = db::create_survey(&mut *tx, title, description).await?;
    for question in questions {
        db::create_question(
            &mut *tx,
            survey_id,
            question.text.trim(),
            question.question_type,
            question.options.as_deref(),
        )
        .await?;
    }
    tx.commit().await?;
    Ok(survey_id)
}

pub async fn add_question(
    pool: &SqlitePool,
    survey_id: i64,
    text: &str,
    question_type: QuestionType,
    options: Option<&str>,
) -> Result<i64, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::validation("question text is required"));
    }
    db::get_survey(pool, survey_id)
        .await?
        .ok_or(AppError::NotFound("survey"))?;
    db::create_question(pool, survey_id, text, question_type, options).await
}

/// Records one answer per entry, attributed to the given respondent, inside
/// a single transaction. Partial submissions are accepted; whether each
/// question actually belongs to the survey is not checked. Returns the
/// number of answers recorded.
pub async fn submit_response_batch(
    pool: &SqlitePool,
    survey_id: i64,
    answers: &BTreeMap<i64, String>,
    respondent_user_id: i64,
) -> Result<usize, AppError> {
    db::get_survey(pool, survey_id)
        .await?
        .ok_or(AppError::NotFound("survey"))?;

    let mut tx = pool.begin().await?;
    for (question_id, raw_value) in answers {
        db::record_answer(&mut *tx, *question_id, respondent_user_id, raw_value).await?;
    }
    tx.commit().await?;
    Ok(answers.len())
}
