use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use users_core::models::{NewUser, User};
use users_core::UsersResult;

/// `POST /api/users`
///
/// Inserts the payload as-is and answers with the stored row. Store failures
/// propagate to the fallback error response.
#[tracing::instrument(name = "Creating user", skip_all)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUser>,
) -> UsersResult<Json<User>> {
    let user = state.store.create_user(&new_user).await?;

    tracing::debug!(user_id = ?user.id(), "User created");
    Ok(Json(user))
}
