//! User domain model.
//!
//! # Responsibility
//! - Define the `users` row shape plus its insert draft and update patch.
//!
//! # Invariants
//! - `user_id` is assigned by storage and never reused.
//! - `name`, `email` and `password_hash` are non-empty.
//! - `email` carries no uniqueness constraint; duplicates are permitted.
//! - `password_hash` is opaque credential material, never a plaintext
//!   password.

use crate::model::{require_non_empty, ConstraintViolation, Entity};
use serde::{Deserialize, Serialize};

/// Storage-assigned identifier for a user row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// Canonical `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    /// Opaque hash material; this crate never inspects or derives it.
    pub password_hash: String,
}

/// Insert draft for a new user. The identifier is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Checks NOT NULL / non-empty column constraints before SQL runs.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        require_non_empty(Entity::User, "name", &self.name)?;
        require_non_empty(Entity::User, "email", &self.email)?;
        require_non_empty(Entity::User, "password_hash", &self.password_hash)?;
        Ok(())
    }
}

/// Partial update for a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }

    /// Checks that no patched text column would become empty.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        if let Some(name) = &self.name {
            require_non_empty(Entity::User, "name", name)?;
        }
        if let Some(email) = &self.email {
            require_non_empty(Entity::User, "email", email)?;
        }
        if let Some(password_hash) = &self.password_hash {
            require_non_empty(Entity::User, "password_hash", password_hash)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NewUser, UserPatch};
    use crate::model::ConstraintViolation;

    #[test]
    fn draft_with_all_fields_is_valid() {
        let draft = NewUser::new("Ann", "ann@x.com", "h1");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let draft = NewUser::new("", "ann@x.com", "h1");
        let err = draft.validate().unwrap_err();
        assert!(matches!(
            err,
            ConstraintViolation::EmptyField { field: "name", .. }
        ));
    }

    #[test]
    fn empty_patch_reports_is_empty() {
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn patch_rejects_empty_email() {
        let patch = UserPatch {
            email: Some(String::new()),
            ..UserPatch::default()
        };
        let err = patch.validate().unwrap_err();
        assert!(matches!(
            err,
            ConstraintViolation::EmptyField { field: "email", .. }
        ));
    }
}
