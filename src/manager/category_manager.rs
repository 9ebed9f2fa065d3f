use serde::Deserialize;
use sqlx::types::chrono::Utc;
use uuid::Uuid;

use super::{Category, CategoryWithVotes, VoteTally};
use crate::utils;

pub struct CategoryManager<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> CategoryManager<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug)]
pub enum Error {
    DoesNotExist,
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::DoesNotExist,
            _ => Error::DatabaseError(err),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// PATCH payload. Outer `None` means the field was absent and keeps its
/// value; `Some(None)` on the nullable fields means an explicit JSON null
/// and clears it.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "utils::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "utils::double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(sqlx::FromRow)]
struct CategoryCountRow {
    #[sqlx(flatten)]
    category: Category,
    vote_count: i64,
}

impl CategoryManager<'_> {
    /// Lists categories newest-first, each with its computed vote count.
    /// Inactive ones are skipped unless `include_inactive` is set.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<CategoryWithVotes>, Error> {
        let filter = if include_inactive {
            ""
        } else {
            "WHERE c.is_active = TRUE "
        };
        let rows = sqlx::query_as::<_, CategoryCountRow>(&format!(
            "SELECT c.*, COUNT(v.id) AS vote_count \
             FROM category c \
             LEFT JOIN vote v ON v.category_id = c.id \
             {filter}\
             GROUP BY c.id \
             ORDER BY c.created_at DESC, c.rowid DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryWithVotes {
                category: row.category,
                count: VoteTally {
                    votes: row.vote_count,
                },
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<Category, Error> {
        Ok(
            sqlx::query_as::<_, Category>("SELECT * FROM category WHERE id = ?")
                .bind(id)
                .fetch_one(self.pool)
                .await?,
        )
    }

    pub async fn create(&self, new: NewCategory) -> Result<Category, Error> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            image_url: new.image_url,
            is_active: new.is_active,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };

        sqlx::query(
            "INSERT INTO category (id, name, description, image_url, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image_url)
        .bind(category.is_active)
        .bind(category.created_at)
        .execute(self.pool)
        .await?;

        Ok(category)
    }

    /// Applies only the supplied fields and refreshes `updated_at`.
    pub async fn update(&self, id: &str, changes: CategoryChanges) -> Result<Category, Error> {
        let mut category = self.get(id).await?;

        if let Some(name) = changes.name {
            category.name = name;
        }
        if let Some(description) = changes.description {
            category.description = description;
        }
        if let Some(image_url) = changes.image_url {
            category.image_url = image_url;
        }
        if let Some(is_active) = changes.is_active {
            category.is_active = is_active;
        }
        category.updated_at = Some(Utc::now().naive_utc());

        sqlx::query(
            "UPDATE category SET name = ?, description = ?, image_url = ?, is_active = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image_url)
        .bind(category.is_active)
        .bind(category.updated_at)
        .bind(&category.id)
        .execute(self.pool)
        .await?;

        Ok(category)
    }

    /// Deletes the category; votes and contestants go with it via the
    /// ON DELETE CASCADE rules.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM category WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::DoesNotExist);
        }
        Ok(())
    }
}
