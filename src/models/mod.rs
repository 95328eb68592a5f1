// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credentials;
pub mod profile;

pub use credentials::{AuthResponse, Credentials, FormMode};
pub use profile::{
    HistoryEntry, ProfileId, Subscription, UserProfile, PURCHASE_ACTION, TOKEN_PURCHASE_AMOUNT,
    UPGRADE_ACTION,
};
