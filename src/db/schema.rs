use crate::error::AppError;
use sqlx::SqlitePool;

const CREATE_SURVEYS: &str = r#"
    CREATE TABLE IF NOT EXISTS surveys(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_QUESTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS questions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        survey_id INTEGER NOT NULL,
        text TEXT NOT NULL,
        question_type TEXT NOT NULL
            CHECK(question_type IN ('free_text', 'multiple_choice', 'scale')),
        options TEXT,
        FOREIGN KEY (survey_id) REFERENCES surveys(id) ON DELETE CASCADE
    )
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        role TEXT NOT NULL DEFAULT 'respondent'
    )
"#;

const CREATE_ANSWERS: &str = r#"
    CREATE TABLE IF NOT EXISTS answers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        text_value TEXT,
        numeric_value INTEGER,
        submitted_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE CASCADE,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
"#;

/// Creates the four tables if absent. Safe to call on every startup; a
/// pre-existing schema with an incompatible shape is not detected here.
pub async fn initialize(pool: &SqlitePool) -> Result<(), AppError> {
    for statement in [CREATE_SURVEYS, CREATE_QUESTIONS, CREATE_USERS, CREATE_ANSWERS] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
