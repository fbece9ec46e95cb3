// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregated profile view.
//!
//! Holds the dashboard's read model: profile, activities, badges, pending
//! rewards and leaderboard, each fetched independently. Handles:
//! - Concurrent initial load with per-resource error isolation
//! - Full-snapshot replacement of a container on each successful fetch
//! - Prepend + dependent refresh after logging an activity
//! - Pending-reward refresh after a claim
//!
//! Overlapping fetches of the same resource are not cancelled or ordered:
//! whichever response completes last is the one kept. There is no request
//! token at this boundary to detect a stale response.

use crate::error::{AppError, Result};
use crate::models::{
    Activity, Badge, ClaimVoucher, LeaderboardEntry, LogActivityRequest, PendingReward, Profile,
};
use crate::services::api::{ApiClient, Operation};
use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// The five independently fetched resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Profile,
    Activities,
    Badges,
    PendingRewards,
    Leaderboard,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Profile,
        Resource::Activities,
        Resource::Badges,
        Resource::PendingRewards,
        Resource::Leaderboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Activities => "activities",
            Resource::Badges => "badges",
            Resource::PendingRewards => "pending_rewards",
            Resource::Leaderboard => "leaderboard",
        }
    }

    /// Remote operation that reads this resource.
    pub fn operation(&self) -> Operation {
        match self {
            Resource::Profile => Operation::GetProfile,
            Resource::Activities => Operation::ListActivities,
            Resource::Badges => Operation::ListBadges,
            Resource::PendingRewards => Operation::ListPendingRewards,
            Resource::Leaderboard => Operation::Leaderboard,
        }
    }
}

/// Loading and error state of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationStatus {
    /// Requests issued but not yet settled
    pub in_flight: usize,
    /// Message from the most recent failure; cleared by the next success
    pub last_error: Option<String>,
}

impl OperationStatus {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Point-in-time copy of every container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub profile: Option<Profile>,
    /// Most recent first
    pub activities: Vec<Activity>,
    pub badges: Vec<Badge>,
    pub pending_rewards: Vec<PendingReward>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl ProfileSnapshot {
    /// Sum of tokens awarded over the known activities.
    pub fn token_balance(&self) -> i64 {
        self.activities.iter().map(|a| a.tokens_awarded).sum()
    }

    pub fn activities_count(&self) -> usize {
        self.activities.len()
    }
}

/// Marks an operation in flight until dropped.
struct InFlight<'a> {
    status: &'a DashMap<Operation, OperationStatus>,
    op: Operation,
}

impl<'a> InFlight<'a> {
    fn start(status: &'a DashMap<Operation, OperationStatus>, op: Operation) -> Self {
        status.entry(op).or_default().in_flight += 1;
        Self { status, op }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(mut entry) = self.status.get_mut(&self.op) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
        }
    }
}

/// Aggregated, independently refreshable view of the signed-in wallet.
pub struct ProfileView {
    api: ApiClient,
    snapshot: RwLock<ProfileSnapshot>,
    /// Per-operation loading/error state.
    status: DashMap<Operation, OperationStatus>,
    /// Most recent failure of any operation.
    last_error: RwLock<Option<String>>,
    ready: AtomicBool,
}

impl ProfileView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: RwLock::new(ProfileSnapshot::default()),
            status: DashMap::new(),
            last_error: RwLock::new(None),
            ready: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ─── Read model ──────────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> ProfileSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.snapshot.read().await.profile.clone()
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.snapshot.read().await.activities.clone()
    }

    pub async fn badges(&self) -> Vec<Badge> {
        self.snapshot.read().await.badges.clone()
    }

    pub async fn pending_rewards(&self) -> Vec<PendingReward> {
        self.snapshot.read().await.pending_rewards.clone()
    }

    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.snapshot.read().await.leaderboard.clone()
    }

    pub async fn token_balance(&self) -> i64 {
        self.snapshot.read().await.token_balance()
    }

    pub async fn activities_count(&self) -> usize {
        self.snapshot.read().await.activities_count()
    }

    // ─── Status ──────────────────────────────────────────────────────────────

    /// True once the initial load has settled, whatever its outcome.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// True while any fetch or mutation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.status.iter().any(|entry| entry.is_loading())
    }

    pub fn status(&self, op: Operation) -> OperationStatus {
        self.status
            .get(&op)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn resource_status(&self, resource: Resource) -> OperationStatus {
        self.status(resource.operation())
    }

    /// Current failures, one per operation, in a stable order.
    pub fn errors(&self) -> Vec<(Operation, String)> {
        let mut errors: Vec<_> = self
            .status
            .iter()
            .filter_map(|entry| {
                entry
                    .last_error
                    .as_ref()
                    .map(|msg| (*entry.key(), msg.clone()))
            })
            .collect();
        errors.sort_by_key(|(op, _)| *op);
        errors
    }

    /// Most recent failure message of any operation.
    pub async fn error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    pub async fn clear_error(&self) {
        *self.last_error.write().await = None;
    }

    // ─── Fetches ─────────────────────────────────────────────────────────────

    /// Issue all five fetches concurrently and wait for every one to settle.
    pub async fn load_all(&self) {
        self.refresh_all().await;
        self.ready.store(true, Ordering::Release);

        let errors = self.errors();
        if errors.is_empty() {
            tracing::info!("Profile view loaded");
        } else {
            tracing::warn!(failed = errors.len(), "Profile view loaded with errors");
        }
    }

    /// Re-issue all five fetches concurrently.
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.fetch_profile(),
            self.fetch_activities(),
            self.fetch_badges(),
            self.fetch_pending_rewards(),
            self.fetch_leaderboard(),
        );
    }

    /// Re-fetch a single resource.
    pub async fn refresh(&self, resource: Resource) {
        match resource {
            Resource::Profile => self.fetch_profile().await,
            Resource::Activities => self.fetch_activities().await,
            Resource::Badges => self.fetch_badges().await,
            Resource::PendingRewards => self.fetch_pending_rewards().await,
            Resource::Leaderboard => self.fetch_leaderboard().await,
        }
    }

    pub async fn fetch_profile(&self) {
        self.fetch(Operation::GetProfile, self.api.get_profile(), |s, profile| {
            s.profile = Some(profile)
        })
        .await
    }

    pub async fn fetch_activities(&self) {
        self.fetch(
            Operation::ListActivities,
            self.api.list_activities(),
            |s, activities| s.activities = activities,
        )
        .await
    }

    pub async fn fetch_badges(&self) {
        self.fetch(Operation::ListBadges, self.api.list_badges(), |s, badges| {
            s.badges = badges
        })
        .await
    }

    pub async fn fetch_pending_rewards(&self) {
        self.fetch(
            Operation::ListPendingRewards,
            self.api.list_pending_rewards(),
            |s, rewards| s.pending_rewards = rewards,
        )
        .await
    }

    pub async fn fetch_leaderboard(&self) {
        self.fetch(
            Operation::Leaderboard,
            self.api.leaderboard(),
            |s, entries| s.leaderboard = entries,
        )
        .await
    }

    // ─── Mutations ───────────────────────────────────────────────────────────

    /// Log an activity.
    ///
    /// On success the new record goes to the front of the activities list,
    /// then badges, pending rewards and leaderboard are re-fetched
    /// concurrently. Profile and the activities list are not re-fetched.
    /// On failure the activities list is left unchanged.
    pub async fn log_activity(&self, request: LogActivityRequest) -> Result<Activity> {
        let op = Operation::LogActivity;
        let _in_flight = InFlight::start(&self.status, op);

        let activity = match self.api.log_activity(&request).await {
            Ok(activity) => activity,
            Err(e) => return Err(self.fail(op, e).await),
        };
        self.succeed(op);

        tracing::info!(
            activity_id = activity.id,
            activity_type = %activity.activity_type,
            tokens = activity.tokens_awarded,
            "Activity logged"
        );
        self.snapshot
            .write()
            .await
            .activities
            .insert(0, activity.clone());

        tokio::join!(
            self.fetch_badges(),
            self.fetch_pending_rewards(),
            self.fetch_leaderboard(),
        );

        Ok(activity)
    }

    /// Claim a pending reward and re-fetch the pending list.
    ///
    /// The refresh settles before the voucher is returned, but the voucher
    /// does not depend on it.
    pub async fn claim_reward(&self, reward_id: &str) -> Result<ClaimVoucher> {
        let op = Operation::ClaimReward;
        let _in_flight = InFlight::start(&self.status, op);

        let voucher = match self.api.claim_reward(reward_id).await {
            Ok(voucher) => voucher,
            Err(e) => return Err(self.fail(op, e).await),
        };
        self.succeed(op);
        tracing::info!(reward_id, "Reward claimed");

        self.fetch_pending_rewards().await;
        Ok(voucher)
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    /// Run one read and replace its container on success.
    ///
    /// Failures are recorded and swallowed; the previous container stays.
    async fn fetch<T>(
        &self,
        op: Operation,
        request: impl Future<Output = Result<T>>,
        apply: impl FnOnce(&mut ProfileSnapshot, T),
    ) {
        let _in_flight = InFlight::start(&self.status, op);

        match request.await {
            Ok(value) => {
                apply(&mut *self.snapshot.write().await, value);
                self.succeed(op);
            }
            Err(e) => {
                self.fail(op, e).await;
            }
        }
    }

    fn succeed(&self, op: Operation) {
        self.status.entry(op).or_default().last_error = None;
    }

    /// Record a failure for `op` and in the aggregate slot.
    async fn fail(&self, op: Operation, error: AppError) -> AppError {
        let message = error.message();
        tracing::warn!(op = op.as_str(), error = %message, "Operation failed");

        self.status.entry(op).or_default().last_error = Some(message.clone());
        *self.last_error.write().await = Some(message);
        error
    }
}
