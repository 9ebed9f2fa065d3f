use sqlx::types::chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use super::{ChatMessage, UserInfo};

pub struct MessageManager<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> MessageManager<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: String,
    content: String,
    user_id: String,
    created_at: NaiveDateTime,
    poster_id: String,
    poster_name: String,
    poster_email: String,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        ChatMessage {
            id: row.id,
            content: row.content,
            user_id: row.user_id,
            created_at: row.created_at,
            user: UserInfo {
                id: row.poster_id,
                name: row.poster_name,
                email: row.poster_email,
            },
        }
    }
}

impl MessageManager<'_> {
    /// The newest 100 messages, returned oldest-first, each joined with the
    /// poster's public profile.
    pub async fn list(&self) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT m.id, m.content, m.user_id, m.created_at, \
                    u.id AS poster_id, u.name AS poster_name, u.email AS poster_email \
             FROM (SELECT id, content, user_id, created_at, rowid AS seq \
                   FROM chat_message ORDER BY created_at DESC, seq DESC LIMIT 100) AS m \
             JOIN user u ON u.id = m.user_id \
             ORDER BY m.created_at ASC, m.seq ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    pub async fn create(&self, content: &str, user_id: &str) -> Result<ChatMessage, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().naive_utc();

        sqlx::query(
            "INSERT INTO chat_message (id, content, user_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(content)
        .bind(user_id)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        let user = sqlx::query_as::<_, UserInfo>("SELECT id, name, email FROM user WHERE id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(ChatMessage {
            id,
            content: content.to_owned(),
            user_id: user_id.to_owned(),
            created_at,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures("users"))]
    async fn create_attaches_poster_profile(pool: sqlx::SqlitePool) {
        let message = MessageManager::new(&pool)
            .create("hello", "user-1")
            .await
            .unwrap();
        assert_eq!(message.user.id, "user-1");
        assert_eq!(message.user.email, "test123@example.com");
    }

    #[sqlx::test(fixtures("users"))]
    async fn list_caps_at_newest_hundred_oldest_first(pool: sqlx::SqlitePool) {
        let manager = MessageManager::new(&pool);
        for n in 0..101 {
            manager.create(&format!("msg {n}"), "user-1").await.unwrap();
        }

        let listed = manager.list().await.unwrap();
        assert_eq!(listed.len(), 100);
        // "msg 0" fell outside the window; the rest arrive in posting order.
        assert_eq!(listed[0].content, "msg 1");
        assert_eq!(listed[99].content, "msg 100");
    }
}
