use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::validation::{validate_user_age, validate_user_name};

/// Identifier assigned by the store.
pub type UserId = i32;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned, unique, never reused
    pub id: UserId,
    /// Display name, stored exactly as supplied
    pub user_name: String,
    /// Age in years, always positive
    pub user_age: i32,
}

/// Request body for creating or replacing a user.
///
/// Both fields are lenient at decode time so that an absent or `null`
/// name and an absent age surface as a validation failure (400
/// "Invalid user data.") rather than a decode failure. Any client-sent
/// `id` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_age: i32,
}

/// A user payload that has passed validation and may enter the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_name: String,
    pub user_age: i32,
}

impl UserInput {
    /// Build an input from known values.
    pub fn new(user_name: impl Into<String>, user_age: i32) -> Self {
        Self {
            user_name: Some(user_name.into()),
            user_age,
        }
    }

    /// Check the payload against the admission rules.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the name is missing or blank, or
    /// the age is not strictly positive.
    pub fn validate(self) -> AppResult<NewUser> {
        let Some(user_name) = self.user_name else {
            return Err(AppError::Validation);
        };
        validate_user_name(Some(&user_name))?;
        validate_user_age(self.user_age)?;

        Ok(NewUser {
            user_name,
            user_age: self.user_age,
        })
    }
}

impl User {
    /// Location of this record, as sent in the `Location` header on create.
    pub fn location(&self) -> String {
        format!("/users/{}", self.id)
    }
}
