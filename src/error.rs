// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with user-facing alert messages.

use crate::models::FormMode;

/// Application error type surfaced by the session controller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The account API answered but did not accept the request.
    #[error("{mode} rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        mode: FormMode,
        message: Option<String>,
    },

    /// The request never produced a usable answer (network, status, JSON).
    #[error("{mode} request failed: {detail}")]
    Transport { mode: FormMode, detail: String },

    /// The credentials were refused locally; no request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Fallback alert text for a failed login.
    pub const LOGIN_FALLBACK: &'static str = "Erreur de connexion";
    /// Fallback alert text for a failed registration.
    pub const REGISTER_FALLBACK: &'static str = "Erreur d'inscription";
    /// Alert text for failures that are nobody's input.
    pub const INTERNAL_FALLBACK: &'static str = "Erreur interne";

    /// Text to show the user in a blocking alert.
    ///
    /// Server-provided messages win; everything else falls back to the
    /// localized text for the operation that failed.
    pub fn alert_message(&self) -> String {
        match self {
            AppError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            AppError::Rejected { mode, .. } | AppError::Transport { mode, .. } => {
                Self::fallback_for(*mode).to_string()
            }
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Internal(_) => Self::INTERNAL_FALLBACK.to_string(),
        }
    }

    /// Localized fallback text for a form mode.
    pub fn fallback_for(mode: FormMode) -> &'static str {
        match mode {
            FormMode::Login => Self::LOGIN_FALLBACK,
            FormMode::Register => Self::REGISTER_FALLBACK,
        }
    }

    /// Whether the failure came from the transport rather than the server's verdict.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport { .. })
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_messages() {
        let rejected = AppError::Rejected {
            mode: FormMode::Login,
            message: Some("Compte bloqué".to_string()),
        };
        assert_eq!(rejected.alert_message(), "Compte bloqué");

        let empty = AppError::Rejected {
            mode: FormMode::Register,
            message: Some(String::new()),
        };
        assert_eq!(empty.alert_message(), AppError::REGISTER_FALLBACK);

        let internal = AppError::from(anyhow::anyhow!("TLS backend unavailable"));
        assert!(matches!(internal, AppError::Internal(_)));
        assert_eq!(internal.alert_message(), AppError::INTERNAL_FALLBACK);
        assert!(internal.to_string().contains("TLS backend unavailable"));
        assert!(!internal.is_transport());
    }
}
