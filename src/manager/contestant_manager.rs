use serde::Deserialize;
use sqlx::types::chrono::Utc;
use uuid::Uuid;

use super::Contestant;
use crate::utils;

pub struct ContestantManager<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> ContestantManager<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug)]
pub enum Error {
    CategoryDoesNotExist,
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

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContestantChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default, deserialize_with = "utils::double_option")]
    pub picture: Option<Option<String>>,
}

impl ContestantManager<'_> {
    /// Entrants of a category in insertion order. An unknown category just
    /// lists empty.
    pub async fn list(&self, category_id: &str) -> Result<Vec<Contestant>, Error> {
        Ok(sqlx::query_as::<_, Contestant>(
            "SELECT * FROM contestant WHERE category_id = ? \
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?)
    }

    pub async fn create(
        &self,
        category_id: &str,
        name: &str,
        surname: &str,
        picture: Option<String>,
    ) -> Result<Contestant, Error> {
        let category_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT id FROM category WHERE id = ?)",
        )
        .bind(category_id)
        .fetch_one(self.pool)
        .await?;
        if !category_exists {
            return Err(Error::CategoryDoesNotExist);
        }

        let contestant = Contestant {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.to_owned(),
            name: name.to_owned(),
            surname: surname.to_owned(),
            picture,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };

        sqlx::query(
            "INSERT INTO contestant (id, category_id, name, surname, picture, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&contestant.id)
        .bind(&contestant.category_id)
        .bind(&contestant.name)
        .bind(&contestant.surname)
        .bind(&contestant.picture)
        .bind(contestant.created_at)
        .execute(self.pool)
        .await?;

        Ok(contestant)
    }

    pub async fn update(&self, id: &str, changes: ContestantChanges) -> Result<Contestant, Error> {
        let mut contestant =
            sqlx::query_as::<_, Contestant>("SELECT * FROM contestant WHERE id = ?")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if let Some(name) = changes.name {
            contestant.name = name;
        }
        if let Some(surname) = changes.surname {
            contestant.surname = surname;
        }
        if let Some(picture) = changes.picture {
            contestant.picture = picture;
        }
        contestant.updated_at = Some(Utc::now().naive_utc());

        sqlx::query(
            "UPDATE contestant SET name = ?, surname = ?, picture = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&contestant.name)
        .bind(&contestant.surname)
        .bind(&contestant.picture)
        .bind(contestant.updated_at)
        .bind(&contestant.id)
        .execute(self.pool)
        .await?;

        Ok(contestant)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM contestant WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::DoesNotExist);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::category_manager::{CategoryManager, NewCategory};

    async fn make_category(pool: &sqlx::SqlitePool) -> String {
        CategoryManager::new(pool)
            .create(NewCategory {
                name: "Best Singer".into(),
                description: None,
                image_url: None,
                is_active: true,
            })
            .await
            .unwrap()
            .id
    }

    #[sqlx::test]
    async fn create_requires_existing_category(pool: sqlx::SqlitePool) {
        assert!(matches!(
            ContestantManager::new(&pool)
                .create("no-such-id", "Jane", "Doe", None)
                .await,
            Err(Error::CategoryDoesNotExist)
        ));
    }

    #[sqlx::test]
    async fn list_is_insertion_ordered(pool: sqlx::SqlitePool) {
        let category_id = make_category(&pool).await;
        let manager = ContestantManager::new(&pool);
        manager
            .create(&category_id, "Jane", "Doe", None)
            .await
            .unwrap();
        manager
            .create(&category_id, "John", "Smith", None)
            .await
            .unwrap();

        let listed = manager.list(&category_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Jane");
        assert_eq!(listed[1].name, "John");
    }

    #[sqlx::test]
    async fn partial_update(pool: sqlx::SqlitePool) {
        let category_id = make_category(&pool).await;
        let manager = ContestantManager::new(&pool);
        let contestant = manager
            .create(&category_id, "Jane", "Doe", Some("http://x/p.jpg".into()))
            .await
            .unwrap();

        let updated = manager
            .update(
                &contestant.id,
                ContestantChanges {
                    surname: Some("Doe-Smith".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane");
        assert_eq!(updated.surname, "Doe-Smith");
        assert_eq!(updated.picture.as_deref(), Some("http://x/p.jpg"));
        assert!(updated.updated_at.is_some());
    }

    #[sqlx::test]
    async fn delete_missing_contestant(pool: sqlx::SqlitePool) {
        assert!(matches!(
            ContestantManager::new(&pool).delete("no-such-id").await,
            Err(Error::DoesNotExist)
        ));
    }
}
