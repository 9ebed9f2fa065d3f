use sqlx::types::chrono::Utc;
use uuid::Uuid;

use super::Vote;

/// Who is casting the ballot. A vote is keyed either by a registered user id
/// or by a bare email address, never both at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteIdentity {
    ByUser(String),
    ByEmail(String),
}

impl VoteIdentity {
    /// Builds an identity from the optional `userId`/`email` request inputs.
    /// The user id wins when both were supplied; `None` when neither was.
    pub fn from_parts(user_id: Option<String>, email: Option<String>) -> Option<Self> {
        match (user_id, email) {
            (Some(id), _) => Some(VoteIdentity::ByUser(id)),
            (None, Some(email)) => Some(VoteIdentity::ByEmail(email)),
            (None, None) => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            VoteIdentity::ByUser(_) => "user_id",
            VoteIdentity::ByEmail(_) => "email",
        }
    }

    fn value(&self) -> &str {
        match self {
            VoteIdentity::ByUser(id) => id,
            VoteIdentity::ByEmail(email) => email,
        }
    }
}

pub struct VoteManager<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> VoteManager<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug)]
pub enum Error {
    AlreadyVoted,
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

impl VoteManager<'_> {
    pub async fn list(&self, identity: &VoteIdentity) -> Result<Vec<Vote>, Error> {
        let query = format!("SELECT * FROM vote WHERE {} = ?", identity.column());
        Ok(sqlx::query_as::<_, Vote>(&query)
            .bind(identity.value())
            .fetch_all(self.pool)
            .await?)
    }

    /// Inserts a ballot for the category. The pre-check gives the friendly
    /// duplicate error; the composite UNIQUE constraints settle any race the
    /// pre-check loses, and that violation surfaces as the same error.
    pub async fn create(&self, category_id: &str, identity: VoteIdentity) -> Result<Vote, Error> {
        let query = format!(
            "SELECT EXISTS(SELECT id FROM vote WHERE category_id = ? AND {} = ?)",
            identity.column()
        );
        let exists = sqlx::query_scalar::<_, bool>(&query)
            .bind(category_id)
            .bind(identity.value())
            .fetch_one(self.pool)
            .await?;
        if exists {
            return Err(Error::AlreadyVoted);
        }

        let (user_id, email) = match identity {
            VoteIdentity::ByUser(id) => (Some(id), None),
            VoteIdentity::ByEmail(email) => (None, Some(email)),
        };
        let vote = Vote {
            id: Uuid::new_v4().to_string(),
            user_id,
            email,
            category_id: category_id.to_owned(),
            created_at: Utc::now().naive_utc(),
        };

        let inserted = sqlx::query(
            "INSERT INTO vote (id, user_id, email, category_id, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&vote.id)
        .bind(&vote.user_id)
        .bind(&vote.email)
        .bind(&vote.category_id)
        .bind(vote.created_at)
        .execute(self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(vote),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(Error::AlreadyVoted),
            Err(err) => Err(err.into()),
        }
    }

    /// A category that does not exist simply counts zero.
    pub async fn count_for_category(&self, category_id: &str) -> Result<i64, Error> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM vote WHERE category_id = ?")
                .bind(category_id)
                .fetch_one(self.pool)
                .await?,
        )
    }

    pub async fn delete(&self, category_id: &str, identity: &VoteIdentity) -> Result<(), Error> {
        let query = format!(
            "DELETE FROM vote WHERE category_id = ? AND {} = ?",
            identity.column()
        );
        let result = sqlx::query(&query)
            .bind(category_id)
            .bind(identity.value())
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
    use crate::manager::user_manager::UserManager;

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
    async fn second_vote_is_rejected(pool: sqlx::SqlitePool) {
        let category_id = make_category(&pool).await;
        let user = UserManager::new(&pool)
            .create_user("a@x.com", "A", "p", "user")
            .await
            .unwrap();

        let manager = VoteManager::new(&pool);
        manager
            .create(&category_id, VoteIdentity::ByUser(user.id.clone()))
            .await
            .unwrap();
        assert_eq!(manager.count_for_category(&category_id).await.unwrap(), 1);

        assert!(matches!(
            manager
                .create(&category_id, VoteIdentity::ByUser(user.id))
                .await,
            Err(Error::AlreadyVoted)
        ));
        assert_eq!(manager.count_for_category(&category_id).await.unwrap(), 1);
    }

    #[sqlx::test]
    async fn user_and_email_ballots_do_not_cross_check(pool: sqlx::SqlitePool) {
        let category_id = make_category(&pool).await;
        let user = UserManager::new(&pool)
            .create_user("a@x.com", "A", "p", "user")
            .await
            .unwrap();

        // Same person, two identity methods: both land. Current behavior,
        // not a guarantee.
        let manager = VoteManager::new(&pool);
        manager
            .create(&category_id, VoteIdentity::ByUser(user.id))
            .await
            .unwrap();
        manager
            .create(&category_id, VoteIdentity::ByEmail("a@x.com".into()))
            .await
            .unwrap();
        assert_eq!(manager.count_for_category(&category_id).await.unwrap(), 2);
    }

    #[sqlx::test]
    async fn count_of_unknown_category_is_zero(pool: sqlx::SqlitePool) {
        assert_eq!(
            VoteManager::new(&pool)
                .count_for_category("no-such-id")
                .await
                .unwrap(),
            0
        );
    }

    #[sqlx::test]
    async fn delete_vote(pool: sqlx::SqlitePool) {
        let category_id = make_category(&pool).await;
        let identity = VoteIdentity::ByEmail("a@x.com".into());

        let manager = VoteManager::new(&pool);
        assert!(matches!(
            manager.delete(&category_id, &identity).await,
            Err(Error::DoesNotExist)
        ));

        manager.create(&category_id, identity.clone()).await.unwrap();
        manager.delete(&category_id, &identity).await.unwrap();
        assert_eq!(manager.count_for_category(&category_id).await.unwrap(), 0);
    }

    #[test]
    fn user_id_wins_over_email() {
        assert_eq!(
            VoteIdentity::from_parts(Some("u1".into()), Some("a@x.com".into())),
            Some(VoteIdentity::ByUser("u1".into()))
        );
        assert_eq!(VoteIdentity::from_parts(None, None), None);
    }
}
