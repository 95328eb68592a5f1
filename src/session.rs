// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account session controller.
//!
//! Owns the page state (current user, credential inputs, form mode) and is
//! the only place that changes it. Every change to the current user is
//! written to the [`PersistentStore`] before the operation returns; the
//! store is read once, when the session is created.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AuthResponse, Credentials, FormMode, UserProfile};
use crate::services::AccountApiClient;
use crate::store::PersistentStore;
use crate::time_utils::today_utc;
use chrono::NaiveDate;
use validator::{Validate, ValidationErrors};

/// State and operations of the account page.
pub struct AccountSession {
    api: AccountApiClient,
    store: PersistentStore,
    storage_key: String,
    current_user: Option<UserProfile>,
    email_input: String,
    password_input: String,
    form_mode: FormMode,
    today: fn() -> NaiveDate,
}

impl AccountSession {
    /// Create a session, seeding the current user from `store`.
    pub fn new(
        api: AccountApiClient,
        store: PersistentStore,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let current_user: Option<UserProfile> = store.load(&storage_key, None);
        if let Some(user) = &current_user {
            tracing::debug!(id = ?user.id, "Restored stored profile");
        }

        Self {
            api,
            store,
            storage_key,
            current_user,
            email_input: String::new(),
            password_input: String::new(),
            form_mode: FormMode::default(),
            today: today_utc,
        }
    }

    /// Create a session against the API and record key named in `config`.
    pub fn from_config(config: &Config, store: PersistentStore) -> Result<Self> {
        Ok(Self::new(
            AccountApiClient::new(config.api_base_url.clone())?,
            store,
            config.storage_key.clone(),
        ))
    }

    /// Replace the date source used for history entries.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    // ─── State ───────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn email_input(&self) -> &str {
        &self.email_input
    }

    pub fn password_input(&self) -> &str {
        &self.password_input
    }

    pub fn form_mode(&self) -> FormMode {
        self.form_mode
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email_input = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password_input = password.into();
    }

    pub fn set_mode(&mut self, mode: FormMode) {
        self.form_mode = mode;
    }

    /// Switch between the login and register forms.
    pub fn toggle_mode(&mut self) {
        self.form_mode = self.form_mode.toggled();
    }

    // ─── Authentication ──────────────────────────────────────────

    /// Submit the credential inputs to the form's current endpoint.
    pub async fn submit(&mut self) -> Result<()> {
        let credentials = Credentials::new(self.email_input.clone(), self.password_input.clone());
        self.authenticate(self.form_mode, credentials).await
    }

    /// Log in with `email` and `password`.
    ///
    /// On success the returned profile becomes the current user and both
    /// inputs are cleared. On failure nothing changes and the error carries
    /// the alert text to show.
    pub async fn submit_login(&mut self, email: &str, password: &str) -> Result<()> {
        self.authenticate(FormMode::Login, Credentials::new(email, password))
            .await
    }

    /// Register with `email` and `password`. Same contract as [`Self::submit_login`].
    pub async fn submit_register(&mut self, email: &str, password: &str) -> Result<()> {
        self.authenticate(FormMode::Register, Credentials::new(email, password))
            .await
    }

    async fn authenticate(&mut self, mode: FormMode, credentials: Credentials) -> Result<()> {
        credentials
            .validate()
            .map_err(|e| AppError::InvalidInput(validation_message(&e)))?;

        let request = match mode {
            FormMode::Login => self.api.login(&credentials).await,
            FormMode::Register => self.api.register(&credentials).await,
        };
        let response = match request {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%mode, error = %e, "Account request failed");
                return Err(e);
            }
        };

        match response {
            AuthResponse {
                success: true,
                user: Some(user),
                ..
            } => {
                tracing::info!(%mode, email = %user.email, "Signed in");
                self.set_current_user(Some(user));
                self.email_input.clear();
                self.password_input.clear();
                Ok(())
            }
            AuthResponse { message, .. } => {
                tracing::warn!(%mode, message = ?message, "Account request rejected");
                Err(AppError::Rejected { mode, message })
            }
        }
    }

    /// Forget the current user. No server call is made.
    pub fn logout(&mut self) {
        tracing::info!("Signed out");
        self.set_current_user(None);
    }

    // ─── Profile mutations ───────────────────────────────────────

    /// Credit a token purchase. Returns `false` when nobody is logged in.
    pub fn purchase_tokens(&mut self) -> bool {
        let today = (self.today)();
        let Some(user) = self.current_user.as_mut() else {
            tracing::debug!("Token purchase ignored: no user");
            return false;
        };

        user.purchase_tokens(today);
        tracing::info!(tokens = user.tokens, "Tokens purchased");
        self.persist();
        true
    }

    /// Upgrade to Pro. Returns `false` when nobody is logged in or the
    /// account is already Pro; nothing is recorded or saved then.
    pub fn upgrade_subscription(&mut self) -> bool {
        let today = (self.today)();
        let Some(user) = self.current_user.as_mut() else {
            tracing::debug!("Upgrade ignored: no user");
            return false;
        };

        if !user.upgrade_to_pro(today) {
            tracing::debug!("Upgrade ignored: already Pro");
            return false;
        }
        tracing::info!("Subscription upgraded to Pro");
        self.persist();
        true
    }

    /// Re-read the current user from the store, as a fresh page load would.
    pub fn reload(&mut self) {
        self.current_user = self.store.load(&self.storage_key, None);
    }

    fn set_current_user(&mut self, user: Option<UserProfile>) {
        self.current_user = user;
        self.persist();
    }

    fn persist(&self) {
        self.store.save(&self.storage_key, &self.current_user);
    }
}

/// First human-readable validation message, email before password.
fn validation_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["email", "password"]
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
