use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Which questions a quiz round may draw from. Category id `0` stands for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl From<i64> for QuizScope {
    fn from(category_id: i64) -> Self {
        match category_id {
            0 => QuizScope::All,
            id => QuizScope::Category(id),
        }
    }
}

impl QuizScope {
    pub fn label(&self) -> &'static str {
        match self {
            QuizScope::All => "all",
            QuizScope::Category(_) => "category",
        }
    }
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.category = ?1
ORDER BY id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Search term with `LIKE` semantics: `%` matches any run of characters, `_` a single one.
///
/// Case is folded over all of Unicode, which SQLite's own `LIKE` doesn't do.
#[derive(Debug, Clone)]
pub struct SearchTerm(Regex);

impl SearchTerm {
    pub fn new(term: &str) -> Result<Self, regex::Error> {
        let mut pattern = String::from("(?is)");
        for c in term.chars() {
            match c {
                '%' => pattern.push_str(".*"),
                '_' => pattern.push('.'),
                c => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        Ok(SearchTerm(Regex::new(&pattern)?))
    }

    pub fn matches(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

/// Questions whose text contains the term, ordered by id.
pub async fn search_questions(
    pool: &SqlitePool,
    term: &SearchTerm,
) -> sqlx::Result<Vec<Question>> {
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| term.matches(&q.question))
        .collect())
}

/// All questions in scope, shuffled by the database. The order differs on every call.
pub async fn get_quiz_candidates(
    pool: &SqlitePool,
    scope: QuizScope,
) -> sqlx::Result<Vec<Question>> {
    match scope {
        QuizScope::All => {
            sqlx::query_as::<_, Question>(
                r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY RANDOM()
                "#,
            )
            .fetch_all(pool)
            .await
        }
        QuizScope::Category(category_id) => {
            sqlx::query_as::<_, Question>(
                r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.category = ?1
ORDER BY RANDOM()
                "#,
            )
            .bind(category_id)
            .fetch_all(pool)
            .await
        }
    }
}

/// Inserts a question. Missing values are bound as NULL and left to the table constraints.
pub async fn create_question(
    pool: &SqlitePool,
    question: Option<&str>,
    answer: Option<&str>,
    category: Option<i64>,
    difficulty: Option<i64>,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let deleted = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(deleted)
}

/// Inserts questions keeping their ids; an existing row with the same id is replaced.
///
/// Runs on the caller's connection so it can share a transaction with other imports.
pub async fn import_questions(
    conn: &mut SqliteConnection,
    questions: Vec<Question>,
) -> sqlx::Result<()> {
    for question in questions {
        sqlx::query(
            r#"
INSERT OR REPLACE INTO questions (id, question, answer, category, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
