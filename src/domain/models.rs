use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    FreeText,
    MultipleChoice,
    Scale,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::FreeText => "free_text",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Scale => "scale",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Respondent,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Survey {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub survey_id: i64,
    pub text: String,
    pub question_type: QuestionType,
    /// Comma-delimited choice list; meaningful only for multiple_choice.
    pub options: Option<String>,
}

impl Question {
    pub fn choices(&self) -> Vec<&str> {
        self.options
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|choice| !choice.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub user_id: i64,
    pub text_value: Option<String>,
    pub numeric_value: Option<i64>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_split_and_trim() {
        let question = Question {
            id: 1,
            survey_id: 1,
            text: "Favourite color?".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: Some("red, green ,blue,".to_string()),
        };
        assert_eq!(question.choices(), vec!["red", "green", "blue"]);
    }

    #[test]
    fn choices_empty_without_options() {
        let question = Question {
            id: 1,
            survey_id: 1,
            text: "Any thoughts?".to_string(),
            question_type: QuestionType::FreeText,
            options: None,
        };
        assert!(question.choices().is_empty());
    }
}
