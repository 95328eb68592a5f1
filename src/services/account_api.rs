// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account API client for login and registration.
//!
//! Both endpoints take `{email, password}` and answer
//! `{success, user?, message?}`. A `success: false` answer is still a
//! well-formed response; only transport and decoding problems are errors here.

use crate::error::AppError;
use crate::models::{AuthResponse, Credentials, FormMode};
use anyhow::Context;

/// Account API client.
#[derive(Clone)]
pub struct AccountApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl AccountApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// Fails only if the HTTP client can't be built (TLS backend setup).
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POST /api/users/login
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AppError> {
        self.authenticate(FormMode::Login, credentials).await
    }

    /// POST /api/users/register
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, AppError> {
        self.authenticate(FormMode::Register, credentials).await
    }

    /// Send credentials to the endpoint for `mode`.
    async fn authenticate(
        &self,
        mode: FormMode,
        credentials: &Credentials,
    ) -> Result<AuthResponse, AppError> {
        let url = format!("{}{}", self.base_url, mode.endpoint());

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                mode,
                detail: e.to_string(),
            })?;

        self.parse_response(mode, response).await
    }

    /// Decode the auth body.
    ///
    /// The API reports refusals as `success: false` with any status code, so
    /// the body is decoded regardless of status; a non-2xx status only
    /// matters when the body isn't an auth response.
    async fn parse_response(
        &self,
        mode: FormMode,
        response: reqwest::Response,
    ) -> Result<AuthResponse, AppError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| AppError::Transport {
            mode,
            detail: format!("Failed to read body: {}", e),
        })?;

        serde_json::from_str(&body).map_err(|e| {
            let detail = if status.is_success() {
                format!("JSON parse error: {}", e)
            } else {
                format!("HTTP {}: {}", status, body)
            };
            AppError::Transport { mode, detail }
        })
    }
}
