use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{CreateUser, UserPatch, UserRow};

pub async fn insert_user(
    pool: &PgPool,
    user: &CreateUser,
    hash: &str,
) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (first_name, last_name, email, username, hash, current_salary)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.email.trim())
    .bind(user.username.trim())
    .bind(hash)
    .bind(user.current_salary)
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &PgPool, user_id: i32) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Applies a normalized patch to a user's profile.
///
/// Absent fields keep their stored value, so a blank email never replaces the
/// existing one. A new `active_role` must be a role the user has applied to.
/// The check and the update share one transaction.
pub async fn update_profile(
    pool: &PgPool,
    user_id: i32,
    patch: &UserPatch,
) -> Result<UserRow, AppError> {
    let mut tx = pool.begin().await?;

    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }

    if let Some(role_id) = patch.active_role {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE user_id = $1 AND role_id = $2)",
        )
        .bind(user_id)
        .bind(role_id)
        .fetch_one(&mut *tx)
        .await?;
        if !applied {
            return Err(AppError::UnprocessableEntity(format!(
                "Role {role_id} is not one of the roles user {user_id} applied to"
            )));
        }
    }

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users SET
            first_name     = COALESCE($2, first_name),
            last_name      = COALESCE($3, last_name),
            email          = COALESCE($4, email),
            active_role    = COALESCE($5, active_role),
            current_salary = COALESCE($6, current_salary)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&patch.first_name)
    .bind(&patch.last_name)
    .bind(&patch.email)
    .bind(patch.active_role)
    .bind(patch.current_salary)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    info!("Updated profile of user {user_id}");
    Ok(user)
}
