use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
        extract::{ApiJson, ApiPath, ApiQuery},
        pagination::{paginate, PageQuery},
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{category_map, id_route_fallback, CategoryMap};

// nothing is validated up front: absent fields reach the insert as NULL and fail there
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    // the web client sends category ids as strings
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    question_created: String,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let selection = questions::get_all_questions(&pool).await?;
    let total_questions = selection.len();
    let page = paginate(query.page(), selection);
    let categories = category_map(categories::get_all_categories(&pool).await?);

    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPage {
        success: true,
        questions: page,
        total_questions,
        categories,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(new_question): ApiJson<NewQuestion>,
) -> ApiResponse<Json<Created>> {
    let id = questions::create_question(
        &pool,
        new_question.question.as_deref(),
        new_question.answer.as_deref(),
        new_question.category,
        new_question.difficulty,
    )
    .await
    .map_err(|error| {
        tracing::warn!(%error, "failed to insert question");
        ApiError::Unprocessable
    })?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, "question created");

    let selection = questions::get_all_questions(&pool).await.map_err(|error| {
        tracing::warn!(%error, "failed to list questions after insert");
        ApiError::Unprocessable
    })?;
    let total_questions = selection.len();

    Ok(Json(Created {
        success: true,
        created: id,
        // the insert would have failed without it
        question_created: new_question.question.unwrap_or_default(),
        questions: paginate(query.page(), selection),
        total_questions,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    questions::get_question_by_id(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    questions::delete_question(&pool, id)
        .await
        .map_err(|error| {
            tracing::warn!(%error, id, "failed to delete question");
            ApiError::Unprocessable
        })?;
    QUESTIONS_DELETED.inc();
    tracing::info!(id, "question deleted");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

// no matches is still a success, unlike the plain listing
async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let Some(term) = body.search_term else {
        tracing::warn!("search without searchTerm");
        return Err(ApiError::BadRequest);
    };

    let term = questions::SearchTerm::new(&term).map_err(|error| {
        tracing::warn!(%error, "search term does not compile");
        ApiError::BadRequest
    })?;
    let selection = questions::search_questions(&pool, &term).await?;
    let total_questions = selection.len();
    Ok(Json(SearchResults {
        success: true,
        questions: paginate(query.page(), selection),
        total_questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route(
            "/questions/{id}",
            delete(delete_question).fallback(id_route_fallback("DELETE")),
        )
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
