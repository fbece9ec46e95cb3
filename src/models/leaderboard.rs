// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One leaderboard row, ranked by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub address: String,
    #[serde(default)]
    pub ens_name: Option<String>,
    /// Number of logged activities
    pub activities: u32,
    /// FITT tokens earned
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub tokens: i64,
    /// Number of badges held
    pub badges: u32,
    /// Whether this row belongs to the signed-in wallet
    #[serde(default)]
    pub is_current_user: bool,
}

/// Position (1-based) of the signed-in wallet, if it is ranked.
pub fn current_user_rank(entries: &[LeaderboardEntry]) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.is_current_user)
        .map(|idx| idx + 1)
}
