use serde::Deserialize;

use super::deserializers::deserialize_lenient_page;

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<i64>,
}

impl PageQuery {
    /// Requested 1-based page, the first one when absent.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Cuts the `page`-th run of [`QUESTIONS_PER_PAGE`] items out of an ordered selection.
///
/// Pages before the first or past the end are empty.
pub fn paginate<T>(page: i64, selection: Vec<T>) -> Vec<T> {
    let start = usize::try_from(page.saturating_sub(1))
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));
    match start {
        Some(start) => selection
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect(),
        None => Vec::new(),
    }
}
