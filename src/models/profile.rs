// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile model, as returned by the account API and persisted locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Tokens credited by a single purchase.
pub const TOKEN_PURCHASE_AMOUNT: u64 = 50;
/// History label recorded for a token purchase.
pub const PURCHASE_ACTION: &str = "Achat de 50 tokens";
/// History label recorded for an upgrade to Pro.
pub const UPGRADE_ACTION: &str = "Abonnement passé à Pro";

/// Account identifier; the API may hand out numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileId::Number(n) => write!(f, "{}", n),
            ProfileId::Text(s) => f.write_str(s),
        }
    }
}

/// Subscription tier. Transitions only go towards `Pro`.
///
/// Tiers this crate doesn't know are kept verbatim in `Other` so they
/// display and persist unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subscription {
    #[default]
    Free,
    Pro,
    Other(String),
}

impl Subscription {
    pub fn as_str(&self) -> &str {
        match self {
            Subscription::Free => "Free",
            Subscription::Pro => "Pro",
            Subscription::Other(tier) => tier,
        }
    }
}

impl From<String> for Subscription {
    fn from(tier: String) -> Self {
        match tier.as_str() {
            "Free" => Subscription::Free,
            "Pro" => Subscription::Pro,
            _ => Subscription::Other(tier),
        }
    }
}

impl From<Subscription> for String {
    fn from(tier: Subscription) -> Self {
        match tier {
            Subscription::Other(tier) => tier,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged account action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryEntry {
    /// Calendar date of the action (serialized as `YYYY-MM-DD`)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Free-text label
    pub action: String,
}

/// The persisted account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string | null"))]
    pub id: Option<ProfileId>,
    pub email: String,
    /// Token balance
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub tokens: u64,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub subscription: Subscription,
    /// Newest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Any other fields the API sent; kept so they survive persistence.
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Create a fresh free-tier profile.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            tokens: 0,
            subscription: Subscription::Free,
            history: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Whether the account is already on the Pro tier.
    pub fn is_pro(&self) -> bool {
        self.subscription == Subscription::Pro
    }

    /// Record an action at the front of the history.
    pub fn record(&mut self, date: NaiveDate, action: &str) {
        self.history.insert(
            0,
            HistoryEntry {
                date,
                action: action.to_string(),
            },
        );
    }

    /// Credit one token purchase and log it.
    pub fn purchase_tokens(&mut self, date: NaiveDate) {
        self.tokens = self.tokens.saturating_add(TOKEN_PURCHASE_AMOUNT);
        self.record(date, PURCHASE_ACTION);
    }

    /// Move to Pro and log it. Returns `false` if already Pro.
    pub fn upgrade_to_pro(&mut self, date: NaiveDate) -> bool {
        if self.is_pro() {
            return false;
        }
        self.subscription = Subscription::Pro;
        self.record(date, UPGRADE_ACTION);
        true
    }
}
