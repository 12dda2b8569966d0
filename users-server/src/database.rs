use crate::queries::{parse_user, Queries};
use async_trait::async_trait;
use sqlx::PgPool;
use users_core::models::{NewUser, User};
use users_core::UsersResult;

/// Table-scoped access to the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts `new_user` and returns the stored row.
    async fn create_user(&self, new_user: &NewUser) -> UsersResult<User>;
}

pub struct ServerDatabase {
    pub pool: PgPool,
}

impl ServerDatabase {
    /// Builds the pool without opening a connection. Connection failures
    /// surface on the first query instead of at startup.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect_lazy(database_url)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for ServerDatabase {
    async fn create_user(&self, new_user: &NewUser) -> UsersResult<User> {
        let row = sqlx::query(Queries::CREATE_USER)
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&new_user.password)
            .fetch_one(&self.pool)
            .await?;

        parse_user(&row)
    }
}
