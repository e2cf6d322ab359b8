use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
        extract::{ApiPath, ApiQuery},
        pagination::{paginate, PageQuery},
    },
};

use super::{category_map, id_route_fallback, CategoryMap};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = category_map(categories::get_all_categories(&pool).await?);
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

// an empty page is fine here, only an unknown category is a 404
async fn get_category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let selection = questions::get_questions_for_category(&pool, category.id).await?;
    let total_questions = selection.len();
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: paginate(query.page(), selection),
        total_questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{id}/questions",
            get(get_category_questions).fallback(id_route_fallback("GET,HEAD")),
        )
        .with_state(state)
}
