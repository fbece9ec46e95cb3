// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API client, session and the aggregated profile view.

pub mod api;
pub mod profile_view;
pub mod session;

pub use api::{ApiClient, Operation};
pub use profile_view::{OperationStatus, ProfileSnapshot, ProfileView, Resource};
pub use session::{Session, SessionClaims, SignInChallenge};
