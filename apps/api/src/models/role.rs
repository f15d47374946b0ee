use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: i32,
    pub name: String,
    pub salary: Option<i32>,
    pub company_id: i32,
}

/// A role joined with the name of the company offering it.
#[derive(Debug, Clone, FromRow)]
pub struct RoleWithCompanyRow {
    pub id: i32,
    pub name: String,
    pub salary: Option<i32>,
    pub company_id: i32,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub id: i32,
    pub name: String,
}

/// Wire shape of a role: `{id, name, salary, company: {id, name}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleView {
    pub id: i32,
    pub name: String,
    pub salary: Option<i32>,
    pub company: CompanyRef,
}

impl From<RoleWithCompanyRow> for RoleView {
    fn from(row: RoleWithCompanyRow) -> Self {
        RoleView {
            id: row.id,
            name: row.name,
            salary: row.salary,
            company: CompanyRef {
                id: row.company_id,
                name: row.company_name,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRole {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub salary: Option<i32>,
    pub company_id: i32,
}
