use crate::domain::models::{Question, QuestionType};
use crate::error::AppError;
use serde::Serialize;
use sqlx::SqlitePool;

/// Per-question aggregate. `average` is only carried for scale questions and
/// is omitted from JSON otherwise.
#[derive(Debug, Serialize)]
pub struct QuestionStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    pub count: i64,
}

pub async fn compute_stats(
    pool: &SqlitePool,
    question: &Question,
) -> Result<QuestionStats, AppError> {
    match question.question_type {
        QuestionType::Scale => {
            // AVG over zero rows is NULL, mapped to 0 rather than failing.
            let (average, count): (Option<f64>, i64) = sqlx::query_as(
                "SELECT AVG(numeric_value), COUNT(*) FROM answers WHERE question_id = ?",
            )
            .bind(question.id)
            .fetch_one(pool)
            .await?;
            Ok(QuestionStats {
                average: Some(average.unwrap_or(0.0)),
                count,
            })
        }
        _ => {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE question_id = ?")
                    .bind(question.id)
                    .fetch_one(pool)
                    .await?;
            Ok(QuestionStats {
                average: None,
                count,
            })
        }
    }
}

/// One entry per question, index-aligned with the input slice.
pub async fn compute_survey_stats(
    pool: &SqlitePool,
    questions: &[Question],
) -> Result<Vec<QuestionStats>, AppError> {
    let mut stats = Vec::with_capacity(questions.len());
    for question in questions {
        stats.push(compute_stats(pool, question).await?);
    }
    Ok(stats)
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Reshapes aggregates for the chart endpoint: scale questions only, labeled
/// P1, P2, ... over the filtered subset.
pub fn build_chart_series(questions: &[Question], stats: &[QuestionStats]) -> ChartSeries {
    let mut labels = Vec::new();
    let mut data = Vec::new();
    for (question, stat) in questions.iter().zip(stats) {
        if question.question_type != QuestionType::Scale {
            continue;
        }
        labels.push(format!("P{}", labels.len() + 1));
        data.push(stat.average.unwrap_or(0.0));
    }
    ChartSeries { labels, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, testing};

    fn question(id: i64, question_type: QuestionType) -> Question {
        Question {
            id,
            survey_id: 1,
            text: format!("q{id}"),
            question_type,
            options: None,
        }
    }

    #[tokio::test]
    async fn scale_question_averages_numeric_answers() {
        let pool = testing::pool().await;
        let survey_id = db::create_survey(&pool, "s", None).await.unwrap();
        let question_id =
            db::create_question(&pool, survey_id, "rate", QuestionType::Scale, None)
                .await
                .unwrap();
        for value in ["3", "5", "4"] {
            db::record_answer(&pool, question_id, 2, value).await.unwrap();
        }

        let questions = db::list_questions(&pool, survey_id).await.unwrap();
        let stats = compute_stats(&pool, &questions[0]).await.unwrap();

        assert_eq!(stats.average, Some(4.0));
        assert_eq!(stats.count, 3);
    }

    #[tokio::test]
    async fn scale_question_without_answers_averages_zero() {
        let pool = testing::pool().await;
        let survey_id = db::create_survey(&pool, "s", None).await.unwrap();
        db::create_question(&pool, survey_id, "rate", QuestionType::Scale, None)
            .await
            .unwrap();

        let questions = db::list_questions(&pool, survey_id).await.unwrap();
        let stats = compute_stats(&pool, &questions[0]).await.unwrap();

        assert_eq!(stats.average, Some(0.0));
        assert_eq!(stats.count, 0);
    }

    #[tokio::test]
    async fn non_scale_question_counts_only() {
        let pool = testing::pool().await;
        let survey_id = db::create_survey(&pool, "s", None).await.unwrap();
        let question_id =
            db::create_question(&pool, survey_id, "thoughts", QuestionType::FreeText, None)
                .await
                .unwrap();
        db::record_answer(&pool, question_id, 2, "fine").await.unwrap();
        db::record_answer(&pool, question_id, 2, "great").await.unwrap();

        let questions = db::list_questions(&pool, survey_id).await.unwrap();
        let stats = compute_stats(&pool, &questions[0]).await.unwrap();

        assert_eq!(stats.average, None);
        assert_eq!(stats.count, 2);

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("average").is_none());
    }

    #[tokio::test]
    async fn survey_stats_align_with_question_order() {
        let pool = testing::pool().await;
        let survey_id = db::create_survey(&pool, "s", None).await.unwrap();
        let scale_id =
            db::create_question(&pool, survey_id, "rate", QuestionType::Scale, None)
                .await
                .unwrap();
        db::create_question(&pool, survey_id, "why", QuestionType::FreeText, None)
            .await
            .unwrap();
        db::record_answer(&pool, scale_id, 2, "8").await.unwrap();

        let questions = db::list_questions(&pool, survey_id).await.unwrap();
        let stats = compute_survey_stats(&pool, &questions).await.unwrap();

        assert_eq!(stats.len(), questions.len());
        assert_eq!(stats[0].average, Some(8.0));
        assert_eq!(stats[1].average, None);
        assert_eq!(stats[1].count, 0);
    }

    #[test]
    fn chart_series_filters_to_scale_and_renumbers() {
        let questions = vec![
            question(1, QuestionType::Scale),
            question(2, QuestionType::FreeText),
            question(3, QuestionType::Scale),
        ];
        let stats = vec![
            QuestionStats {
                average: Some(2.0),
                count: 4,
            },
            QuestionStats {
                average: None,
                count: 5,
            },
            QuestionStats {
                average: Some(4.0),
                count: 4,
            },
        ];

        let series = build_chart_series(&questions, &stats);

        assert_eq!(
            series,
            ChartSeries {
                labels: vec!["P1".to_string(), "P2".to_string()],
                data: vec![2.0, 4.0],
            }
        );
    }

    #[test]
    fn chart_series_empty_without_scale_questions() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        let stats = vec![QuestionStats {
            average: None,
            count: 9,
        }];

        let series = build_chart_series(&questions, &stats);
        assert!(series.labels.is_empty());
        assert!(series.data.is_empty());
    }
}
