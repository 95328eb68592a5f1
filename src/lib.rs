// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Account session: login/registration, token purchase and subscription
//! upgrade for a single account page.
//!
//! This crate holds the page's state management: an [`AccountSession`]
//! controller talking to the remote account API, with every profile change
//! mirrored into a local [`PersistentStore`].

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod time_utils;
pub mod view;

pub use session::AccountSession;
pub use store::PersistentStore;
