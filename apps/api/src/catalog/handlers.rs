use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::catalog::queries;
use crate::errors::{is_foreign_key_violation, AppError};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::company::{CompanyRow, CreateCompany};
use crate::models::role::{CreateRole, RoleRow, RoleView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RolesQuery {
    pub user_id: Option<i32>,
    pub company_id: Option<i32>,
}

/// POST /api/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateCompany>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    req.validate()?;
    let company = queries::insert_company(&state.db, req.name.trim()).await?;
    info!("Created company {} ({})", company.id, company.name);
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    Ok(Json(queries::list_companies(&state.db).await?))
}

/// DELETE /api/companies/:id
///
/// Rejected with 409 while roles still reference the company.
pub async fn handle_delete_company(
    State(state): State<AppState>,
    AppPath(company_id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    let deleted = queries::delete_company(&state.db, company_id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::Conflict(format!(
                    "Company {company_id} still has roles; remove them first"
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    if !deleted {
        return Err(AppError::NotFound(format!("Company {company_id} not found")));
    }
    info!("Deleted company {company_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/roles
pub async fn handle_create_role(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateRole>,
) -> Result<(StatusCode, Json<RoleRow>), AppError> {
    req.validate()?;
    let role = queries::insert_role(&state.db, &req).await?;
    info!("Created role {} at company {}", role.id, role.company_id);
    Ok((StatusCode::CREATED, Json(role)))
}

/// GET /api/roles?user_id=<id> | ?company_id=<id>
///
/// With `user_id`, only roles that user has applied to are returned.
/// The two filters cannot be combined.
pub async fn handle_list_roles(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RolesQuery>,
) -> Result<Json<Vec<RoleView>>, AppError> {
    let rows = match (params.user_id, params.company_id) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Filter roles by either user_id or company_id, not both".to_string(),
            ))
        }
        (Some(user_id), None) => queries::roles_for_user(&state.db, user_id).await?,
        (None, Some(company_id)) => queries::roles_for_company(&state.db, company_id).await?,
        (None, None) => queries::list_roles(&state.db).await?,
    };
    Ok(Json(rows.into_iter().map(RoleView::from).collect()))
}
