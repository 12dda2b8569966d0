use sqlx::{postgres::PgRow, types::Json, Row};
use users_core::models::User;
use users_core::UsersResult;

/// SQL queries for server database operations
pub struct Queries;

impl Queries {
    /// Inserts one user and returns the whole stored row, generated columns
    /// included, as a single JSON object.
    pub const CREATE_USER: &'static str = r#"
        WITH inserted AS (
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
        )
        SELECT to_jsonb(inserted) AS "user"
        FROM inserted
    "#;
}

/// Parse a user from a row produced by `Queries::CREATE_USER`
pub fn parse_user(row: &PgRow) -> UsersResult<User> {
    let Json(user) = row.try_get::<Json<User>, _>("user")?;
    Ok(user)
}
