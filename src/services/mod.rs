// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote API clients.

pub mod account_api;

pub use account_api::AccountApiClient;
