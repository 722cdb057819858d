pub mod schema;
pub mod seed;

use crate::domain::models::{Answer, Question, QuestionType, Survey, User, UserRole};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqliteExecutor, SqlitePool};

/// Survey joined with its question total. Surveys without questions show up
/// with a count of 0, not as missing rows.
#[derive(Debug, Serialize, FromRow)]
pub struct SurveyWithCount {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub question_count: i64,
}

pub async fn list_surveys(pool: &SqlitePool) -> Result<Vec<Survey>, AppError> {
    let surveys = sqlx::query_as::<_, Survey>(
        r#"
        SELECT id, title, description, created_at
        FROM surveys
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(surveys)
}

pub async fn list_surveys_with_question_totals(
    pool: &SqlitePool,
) -> Result<Vec<SurveyWithCount>, AppError> {
    let surveys = sqlx::query_as::<_, SurveyWithCount>(
        r#"
        SELECT s.id, s.title, s.description, s.created_at,
               COUNT(q.id) AS question_count
        FROM surveys s
        LEFT JOIN questions q ON q.survey_id = s.id
        GROUP BY s.id
        ORDER BY s.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(surveys)
}

pub async fn create_survey(
    executor: impl SqliteExecutor<'_>,
    title: &str,
    description: Option<&str>,
) -> Result<i64, AppError> {
    if title.is_empty() {
        return Err(AppError::validation("survey title is required"));
    }
    let result = sqlx::query("INSERT INTO surveys (title, description, created_at) VALUES (?, ?, ?)")
        .bind(title)
        .bind(description)
        .bind(Utc::now())
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_survey(pool: &SqlitePool, id: i64) -> Result<Option<Survey>, AppError> {
    let survey = sqlx::query_as::<_, Survey>(
        "SELECT id, title, description, created_at FROM surveys WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(survey)
}

/// Removes the survey and, through the schema cascades, every question and
/// answer hanging off it. Returns false when the id did not exist.
pub async fn delete_survey(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM surveys WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_questions(pool: &SqlitePool, survey_id: i64) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, survey_id, text, question_type, options
        FROM questions
        WHERE survey_id = ?
        ORDER BY id
        "#,
    )
    .bind(survey_id)
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

pub async fn create_question(
    executor: impl SqliteExecutor<'_>,
    survey_id: i64,
    text: &str,
    question_type: QuestionType,
    options: Option<&str>,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO questions (survey_id, text, question_type, options) VALUES (?, ?, ?, ?)",
    )
    .bind(survey_id)
    .bind(text)
    .bind(question_type)
    .bind(options)
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Digits-only input is stored as an integer, independent of the question's
/// declared type; everything else (including values past i64) is stored
/// verbatim as text.
fn parse_numeric(raw: &str) -> Option<i64> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

pub async fn record_answer(
    executor: impl SqliteExecutor<'_>,
    question_id: i64,
    user_id: i64,
    raw_value: &str,
) -> Result<i64, AppError> {
    let result = match parse_numeric(raw_value) {
        Some(value) => {
            sqlx::query(
                "INSERT INTO answers (question_id, user_id, numeric_value, submitted_at) VALUES (?, ?, ?, ?)",
            )
            .bind(question_id)
            .bind(user_id)
            .bind(value)
            .bind(Utc::now())
            .execute(executor)
            .await?
        }
        None => {
            sqlx::query(
                "INSERT INTO answers (question_id, user_id, text_value, submitted_at) VALUES (?, ?, ?, ?)",
            )
            .bind(question_id)
            .bind(user_id)
            .bind(raw_value)
            .bind(Utc::now())
            .execute(executor)
            .await?
        }
    };
    Ok(result.last_insert_rowid())
}

pub async fn list_answers(pool: &SqlitePool, question_id: i64) -> Result<Vec<Answer>, AppError> {
    let answers = sqlx::query_as::<_, Answer>(
        r#"
        SELECT id, question_id, user_id, text_value, numeric_value, submitted_at
        FROM answers
        WHERE question_id = ?
        ORDER BY id
        "#,
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;
    Ok(answers)
}

/// Duplicate emails violate the unique index and surface as a Database
/// error; callers creating users handle that explicitly.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    role: UserRole,
) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO users (name, email, role) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;
    use std::str::FromStr;

    /// In-memory database with the schema and seed users applied. A single
    /// connection keeps the in-memory store alive for the whole test.
    pub async fn pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid sqlite url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("connect to in-memory sqlite");
        super::schema::initialize(&pool).await.expect("schema init");
        super::seed::seed_users(&pool).await.expect("seed users");
        pool
    }
}
