#![cfg_attr(not(test), allow(dead_code))]

//! View model behind the "Edit User's Profile" card.
//!
//! The card loads the roles the user applied to, pre-fills its fields from the
//! session user, and submits a partial update. Unedited fields are sent with
//! their original values. A blank email falls back to the stored one.

use thiserror::Error;

use crate::models::role::RoleView;
use crate::models::user::{UserPatch, UserRow};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Salary must be a whole number, got '{0}'")]
    InvalidSalary(String),
}

/// One `<option>` of the active-role selector.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleOption {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

/// Builds selector options labelled "{role} at {company}", marking the active role.
pub fn role_options(roles: &[RoleView], active_role: Option<i32>) -> Vec<RoleOption> {
    roles
        .iter()
        .map(|role| RoleOption {
            value: role.id,
            label: format!("{} at {}", role.name, role.company.name),
            selected: active_role == Some(role.id),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ProfileForm {
    user_id: i32,
    stored_email: String,
    stored_salary: Option<i32>,
    first_name: String,
    last_name: String,
    email: String,
    active_role: Option<i32>,
    salary: String,
}

impl ProfileForm {
    /// Pre-populates every field from the session user.
    pub fn from_user(user: &UserRow) -> Self {
        ProfileForm {
            user_id: user.id,
            stored_email: user.email.clone(),
            stored_salary: user.current_salary,
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            active_role: user.active_role,
            salary: user
                .current_salary
                .map(|s| s.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.last_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_active_role(&mut self, role_id: i32) {
        self.active_role = Some(role_id);
    }

    pub fn set_salary(&mut self, value: impl Into<String>) {
        self.salary = value.into();
    }

    /// Endpoint fetched on mount to fill the active-role selector.
    pub fn roles_url(&self) -> String {
        format!("/api/roles?user_id={}", self.user_id)
    }

    /// Endpoint the patch is submitted to.
    pub fn submit_url(&self) -> String {
        format!("/api/user?id={}", self.user_id)
    }

    /// Builds the PATCH body sent on submit.
    pub fn to_patch(&self) -> Result<UserPatch, FormError> {
        let email = if self.email.trim().is_empty() {
            self.stored_email.clone()
        } else {
            self.email.trim().to_string()
        };

        let salary = self.salary.trim();
        let current_salary = if salary.is_empty() {
            None
        } else {
            let parsed = salary
                .replace(',', "")
                .parse::<i32>()
                .map_err(|_| FormError::InvalidSalary(salary.to_string()))?;
            (Some(parsed) != self.stored_salary).then_some(parsed)
        };

        Ok(UserPatch {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(email),
            active_role: self.active_role,
            current_salary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::CompanyRef;
    use chrono::Utc;

    fn session_user() -> UserRow {
        UserRow {
            id: 7,
            first_name: Some("Ada".into()),
            last_name: Some("Byron".into()),
            email: "ada@example.com".into(),
            username: "ada".into(),
            hash: String::new(),
            current_salary: Some(95_000),
            active_role: Some(2),
            created_at: Utc::now(),
        }
    }

    fn role(id: i32, name: &str, company: &str) -> RoleView {
        RoleView {
            id,
            name: name.into(),
            salary: None,
            company: CompanyRef {
                id: id * 10,
                name: company.into(),
            },
        }
    }

    #[test]
    fn test_only_last_name_changed_keeps_originals() {
        let mut form = ProfileForm::from_user(&session_user());
        form.set_last_name("Lovelace");

        let patch = form.to_patch().unwrap();
        assert_eq!(patch.first_name.as_deref(), Some("Ada"));
        assert_eq!(patch.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(patch.email.as_deref(), Some("ada@example.com"));
        assert_eq!(patch.active_role, Some(2));
        assert_eq!(patch.current_salary, None);
    }

    #[test]
    fn test_blank_email_falls_back_to_stored() {
        let mut form = ProfileForm::from_user(&session_user());
        form.set_email("   ");
        let patch = form.to_patch().unwrap();
        assert_eq!(patch.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_edited_email_is_sent_trimmed() {
        let mut form = ProfileForm::from_user(&session_user());
        form.set_email(" ada@lovelace.dev ");
        assert_eq!(
            form.to_patch().unwrap().email.as_deref(),
            Some("ada@lovelace.dev")
        );
    }

    #[test]
    fn test_salary_sent_only_when_changed() {
        let mut form = ProfileForm::from_user(&session_user());
        form.set_salary("95000");
        assert_eq!(form.to_patch().unwrap().current_salary, None);

        form.set_salary("105,000");
        assert_eq!(form.to_patch().unwrap().current_salary, Some(105_000));
    }

    #[test]
    fn test_invalid_salary_is_rejected() {
        let mut form = ProfileForm::from_user(&session_user());
        form.set_salary("a lot");
        assert_eq!(
            form.to_patch().unwrap_err(),
            FormError::InvalidSalary("a lot".into())
        );
    }

    #[test]
    fn test_urls_carry_user_id() {
        let form = ProfileForm::from_user(&session_user());
        assert_eq!(form.roles_url(), "/api/roles?user_id=7");
        assert_eq!(form.submit_url(), "/api/user?id=7");
    }

    #[test]
    fn test_role_options_mark_active_role() {
        let roles = vec![role(1, "Engineer", "Acme"), role(2, "Lead", "Globex")];
        let options = role_options(&roles, Some(2));
        assert_eq!(options[0].label, "Engineer at Acme");
        assert!(!options[0].selected);
        assert_eq!(options[1].label, "Lead at Globex");
        assert!(options[1].selected);
    }

    #[test]
    fn test_selecting_role_updates_patch() {
        let mut form = ProfileForm::from_user(&session_user());
        form.set_active_role(1);
        assert_eq!(form.to_patch().unwrap().active_role, Some(1));
    }
}
