mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    db::Category,
    server::{error::ApiError, extract::ApiPath},
};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

/// Category id to display label; serialized as a JSON object keyed by id.
pub type CategoryMap = BTreeMap<i64, String>;

fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

/// Method fallback for routes keyed by a numeric id.
///
/// A non-integer id is a 404 for every method; a well-formed id with the wrong
/// method is a 405 carrying `allow`.
fn id_route_fallback(
    allow: &'static str,
) -> impl Fn(ApiPath<String>) -> std::future::Ready<Response> + Clone + Send + Sync + 'static {
    move |ApiPath(raw): ApiPath<String>| {
        let response = match raw.parse::<i64>() {
            Ok(_) => ([(header::ALLOW, allow)], ApiError::MethodNotAllowed).into_response(),
            Err(_) => ApiError::NotFound.into_response(),
        };
        std::future::ready(response)
    }
}
