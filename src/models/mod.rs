// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wire models shared with the FITT API.

pub mod activity;
pub mod badge;
pub mod leaderboard;
pub mod profile;
pub mod reward;

pub use activity::{Activity, ActivityStatus, ActivityTag, ActivityType, LogActivityRequest};
pub use badge::{Badge, Rarity};
pub use leaderboard::LeaderboardEntry;
pub use profile::{Profile, ProfileResponse};
pub use reward::{ClaimVoucher, PendingReward, RewardHistoryItem, RewardKind};
