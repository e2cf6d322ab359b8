use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question, QuizScope},
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

// the client also sends the category label as `type`, only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
}

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

/// First candidate, in the order given, that hasn't been asked yet.
fn pick_unasked(candidates: Vec<Question>, previous_questions: &[i64]) -> Option<Question> {
    let asked: HashSet<i64> = previous_questions.iter().copied().collect();
    candidates.into_iter().find(|q| !asked.contains(&q.id))
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<NextQuestion>> {
    let (Some(previous_questions), Some(category_id)) = (
        request.previous_questions,
        request.quiz_category.and_then(|c| c.id),
    ) else {
        tracing::warn!("quiz request without previous_questions or quiz_category");
        return Err(ApiError::BadRequest);
    };

    let scope = QuizScope::from(category_id);
    let candidates = questions::get_quiz_candidates(&pool, scope).await?;
    if candidates.is_empty() {
        return Err(ApiError::NotFound);
    }

    // no question left means the quiz is over, which isn't an error
    let question = pick_unasked(candidates, &previous_questions);
    if question.is_some() {
        QUIZ_QUESTIONS_SERVED
            .with_label_values(&[scope.label()])
            .inc();
    } else {
        tracing::debug!(?scope, asked = previous_questions.len(), "quiz exhausted");
    }

    Ok(Json(NextQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
