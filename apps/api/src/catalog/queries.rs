use sqlx::PgPool;

use crate::models::company::CompanyRow;
use crate::models::role::{CreateRole, RoleRow, RoleWithCompanyRow};

pub async fn insert_company(pool: &PgPool, name: &str) -> Result<CompanyRow, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("INSERT INTO companies (name) VALUES ($1) RETURNING *")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn list_companies(pool: &PgPool) -> Result<Vec<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Deletes a company. Returns `false` when no such company exists.
/// Fails with a foreign-key violation while any role still references it.
pub async fn delete_company(pool: &PgPool, company_id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(company_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_role(pool: &PgPool, role: &CreateRole) -> Result<RoleRow, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>(
        "INSERT INTO roles (name, salary, company_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(role.name.trim())
    .bind(role.salary)
    .bind(role.company_id)
    .fetch_one(pool)
    .await
}

/// Roles the user has applied to, i.e. the candidates for their active role.
pub async fn roles_for_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<RoleWithCompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleWithCompanyRow>(
        r#"
        SELECT DISTINCT r.id, r.name, r.salary, r.company_id, c.name AS company_name
        FROM roles r
        JOIN companies c ON c.id = r.company_id
        JOIN applications a ON a.role_id = r.id
        WHERE a.user_id = $1
        ORDER BY r.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn roles_for_company(
    pool: &PgPool,
    company_id: i32,
) -> Result<Vec<RoleWithCompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleWithCompanyRow>(
        r#"
        SELECT r.id, r.name, r.salary, r.company_id, c.name AS company_name
        FROM roles r
        JOIN companies c ON c.id = r.company_id
        WHERE r.company_id = $1
        ORDER BY r.id
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn list_roles(pool: &PgPool) -> Result<Vec<RoleWithCompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleWithCompanyRow>(
        r#"
        SELECT r.id, r.name, r.salary, r.company_id, c.name AS company_name
        FROM roles r
        JOIN companies c ON c.id = r.company_id
        ORDER BY r.id
        "#,
    )
    .fetch_all(pool)
    .await
}
