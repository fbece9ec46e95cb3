// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wallet profile model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile of the signed-in wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Profile {
    /// Wallet address (checksummed by the service)
    pub wallet_address: String,
    /// When the wallet first signed in (ISO 8601)
    pub join_date: String,
    /// ENS name, if the service resolved one
    #[serde(default)]
    pub ens_name: Option<String>,
    /// Seed for the generated avatar
    pub avatar_seed: String,
}

impl Profile {
    /// Name to show in the UI: the ENS name, or the shortened address.
    pub fn display_name(&self) -> String {
        match &self.ens_name {
            Some(name) => name.clone(),
            None => shorten_address(&self.wallet_address),
        }
    }
}

/// Envelope returned by `GET /auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub wallet_address: String,
    pub profile: Profile,
}

/// Shorten a wallet address to `0x1234...5678`.
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
