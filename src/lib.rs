// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FITT-Sync: client-side data layer for the FITT fitness dashboard
//!
//! This crate talks to the FITT API on behalf of a signed-in wallet and
//! keeps an aggregated, independently refreshable view of its profile,
//! activities, badges, pending rewards and leaderboard.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::{AppError, Result};
pub use services::{ApiClient, ProfileView};
