use serde::Serialize;
use sqlx::types::chrono::NaiveDateTime;

pub mod category_manager;
pub mod contestant_manager;
pub mod message_manager;
pub mod question_manager;
pub mod user_manager;
pub mod vote_manager;

/// Full user row. The stored password hash leaves this module only through
/// [`PublicUser`].
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// What login hands back to the client: the user record minus the hash.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Short profile attached to messages and questions.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct VoteTally {
    pub votes: i64,
}

/// Category list entry, annotated with its computed vote count under the
/// `_count` key the frontend expects.
#[derive(Serialize, Debug, Clone)]
pub struct CategoryWithVotes {
    #[serde(flatten)]
    pub category: Category,
    #[serde(rename = "_count")]
    pub count: VoteTally,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contestant {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub surname: String,
    pub picture: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub category_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub user: UserInfo,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub user: UserInfo,
}
