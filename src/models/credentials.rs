// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Credential entry and the account API's auth response.

use super::UserProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Which form the page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

impl FormMode {
    /// API path the form submits to.
    pub fn endpoint(self) -> &'static str {
        match self {
            FormMode::Login => "/api/users/login",
            FormMode::Register => "/api/users/register",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            FormMode::Login => FormMode::Register,
            FormMode::Register => FormMode::Login,
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormMode::Login => "login",
            FormMode::Register => "register",
        })
    }
}

/// Login/register request body.
#[derive(Clone, Serialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Credentials {
    #[validate(email(message = "Adresse email invalide"))]
    pub email: String,
    #[validate(length(min = 1, message = "Mot de passe requis"))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response body of both auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}
