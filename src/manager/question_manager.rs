use sqlx::types::chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use super::{Question, UserInfo};

pub struct QuestionManager<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> QuestionManager<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: String,
    title: String,
    content: String,
    user_id: String,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
    poster_id: String,
    poster_name: String,
    poster_email: String,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: UserInfo {
                id: row.poster_id,
                name: row.poster_name,
                email: row.poster_email,
            },
        }
    }
}

impl QuestionManager<'_> {
    pub async fn list(&self) -> Result<Vec<Question>, sqlx::Error> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT q.id, q.title, q.content, q.user_id, q.created_at, q.updated_at, \
                    u.id AS poster_id, u.name AS poster_name, u.email AS poster_email \
             FROM question q \
             JOIN user u ON u.id = q.user_id \
             ORDER BY q.created_at DESC, q.rowid DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
        user_id: &str,
    ) -> Result<Question, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().naive_utc();

        sqlx::query(
            "INSERT INTO question (id, title, content, user_id, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(title)
        .bind(content)
        .bind(user_id)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        let user = sqlx::query_as::<_, UserInfo>("SELECT id, name, email FROM user WHERE id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(Question {
            id,
            title: title.to_owned(),
            content: content.to_owned(),
            user_id: user_id.to_owned(),
            created_at,
            updated_at: None,
            user,
        })
    }
}
