use crate::db::SqlitePool;
use crate::db::models::{PasswordResetToken, User};
use crate::error::TruckestError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A duplicate email surfaces as the driver's
    /// unique-violation error and maps to 409 at the API boundary.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, TruckestError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: "inspector".to_string(),
            experience_level: None,
            created_at: Utc::now(),
        };
        sqlx::query(
            r#"INSERT INTO users (id, name, email, password_hash, role, experience_level, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.experience_level)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, TruckestError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password_hash, role, experience_level, created_at
               FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, TruckestError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password_hash, role, experience_level, created_at
               FROM users WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn store_reset_token(
        &self,
        token: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TruckestError> {
        sqlx::query(
            r#"INSERT INTO password_reset_tokens (token, user_id, expires_at, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, TruckestError> {
        let row = sqlx::query_as::<_, PasswordResetToken>(
            r#"SELECT token, user_id, expires_at, created_at
               FROM password_reset_tokens WHERE token = ?"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the user's hash and consume the token in one transaction.
    pub async fn apply_password_reset(
        &self,
        token: &str,
        user_id: &str,
        new_hash: &str,
    ) -> Result<(), TruckestError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(new_hash)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM password_reset_tokens WHERE token = ?")
            .bind(token)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
