// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reward models: pending rewards, claim vouchers and claim history.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// What a pending reward pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Token,
    Badge,
}

/// Reward earned but not yet claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct PendingReward {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RewardKind,
    pub title: String,
    pub description: String,
    /// Token amount; always 0 for badge rewards
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub amount: i64,
    /// When the reward was earned (ISO 8601)
    pub earned_date: String,
}

/// Signed claim authorization issued by the service.
///
/// The fields form an EIP-712 typed-data payload that a separate settlement
/// step submits on-chain. This crate never looks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ClaimVoucher {
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub domain: serde_json::Value,
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub types: serde_json::Value,
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub message: serde_json::Value,
    pub signature: String,
}

/// One past claim from `GET /rewards/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct RewardHistoryItem {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    /// `token` or the claimed badge ID
    pub reward_type: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub amount: i64,
    /// Settlement transaction, once submitted
    #[serde(default)]
    pub tx_hash: Option<String>,
    /// Claim time (ISO 8601)
    pub created_at: String,
}
