use sqlx::types::chrono::Utc;
use uuid::Uuid;

use super::User;

#[derive(Clone)]
pub struct UserManager<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> UserManager<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug)]
pub enum Error {
    EmailTaken,
    // Covers both unknown email and wrong password so the two are
    // indistinguishable to the caller.
    InvalidCredentials,
    PasswordHash(bcrypt::BcryptError),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Error::DatabaseError(value)
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(value: bcrypt::BcryptError) -> Self {
        Error::PasswordHash(value)
    }
}

pub fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
}

pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

impl UserManager<'_> {
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM user WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool)
            .await
    }

    /// Checks the stored bcrypt hash; unknown email and wrong password
    /// produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if verify_password(password, &user.password) {
            Ok(user)
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: &str,
    ) -> Result<User, Error> {
        if self.find_by_email(email).await?.is_some() {
            return Err(Error::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_owned(),
            name: name.to_owned(),
            password: hash_password(password)?,
            role: role.to_owned(),
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };

        sqlx::query(
            "INSERT INTO user (id, email, name, password, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn ok_create_new_user(pool: sqlx::SqlitePool) {
        let user = UserManager::new(&pool)
            .create_user("test123@example.com", "Test", "test123", "user")
            .await
            .unwrap();
        assert_eq!(user.role, "user");
        // Stored as a bcrypt hash, never the plaintext.
        assert_ne!(user.password, "test123");
        assert!(verify_password("test123", &user.password));
    }

    #[sqlx::test]
    async fn err_duplicate_email(pool: sqlx::SqlitePool) {
        let manager = UserManager::new(&pool);
        manager
            .create_user("test123@example.com", "Test", "test123", "user")
            .await
            .unwrap();
        assert!(matches!(
            manager
                .create_user("test123@example.com", "Other", "other", "user")
                .await,
            Err(Error::EmailTaken)
        ));
    }

    #[sqlx::test]
    async fn ok_login(pool: sqlx::SqlitePool) {
        let manager = UserManager::new(&pool);
        manager
            .create_user("test123@example.com", "Test", "test123", "user")
            .await
            .unwrap();
        assert!(manager.login("test123@example.com", "test123").await.is_ok());
    }

    #[sqlx::test]
    async fn err_login_is_generic(pool: sqlx::SqlitePool) {
        let manager = UserManager::new(&pool);
        manager
            .create_user("test123@example.com", "Test", "test123", "user")
            .await
            .unwrap();

        // Wrong password and unknown email fail identically.
        assert!(matches!(
            manager.login("test123@example.com", "nope").await,
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            manager.login("missing@example.com", "test123").await,
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret", &a));
        assert!(verify_password("secret", &b));
    }
}
