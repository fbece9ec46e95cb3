// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FITT API client.
//!
//! Thin wrappers over the nine remote operations. Every request carries a
//! JSON content type and, once signed in, the session bearer token. Any
//! non-success status is a failure; error bodies are not parsed.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Activity, Badge, ClaimVoucher, LeaderboardEntry, LogActivityRequest, PendingReward, Profile,
    ProfileResponse, RewardHistoryItem,
};
use crate::services::session::Session;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Remote operations exposed by the FITT API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    SignIn,
    GetProfile,
    ListActivities,
    LogActivity,
    ListBadges,
    ListPendingRewards,
    ClaimReward,
    RewardHistory,
    Leaderboard,
}

impl Operation {
    /// Short name used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SignIn => "sign_in",
            Operation::GetProfile => "get_profile",
            Operation::ListActivities => "list_activities",
            Operation::LogActivity => "log_activity",
            Operation::ListBadges => "list_badges",
            Operation::ListPendingRewards => "list_pending_rewards",
            Operation::ClaimReward => "claim_reward",
            Operation::RewardHistory => "reward_history",
            Operation::Leaderboard => "leaderboard",
        }
    }

    /// Human-readable message shown when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::SignIn => "SIWE authentication failed",
            Operation::GetProfile => "Failed to fetch profile",
            Operation::ListActivities => "Failed to fetch activities",
            Operation::LogActivity => "Failed to log activity",
            Operation::ListBadges => "Failed to fetch badges",
            Operation::ListPendingRewards => "Failed to fetch pending rewards",
            Operation::ClaimReward => "Failed to claim reward",
            Operation::RewardHistory => "Failed to fetch reward history",
            Operation::Leaderboard => "Failed to fetch leaderboard",
        }
    }
}

/// Response of `POST /auth/siwe`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// FITT API client.
///
/// Cloning is cheap; clones share the HTTP connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<RwLock<Option<Session>>>,
}

impl ApiClient {
    /// Create a client with no session and no transport timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: crate::config::normalize_base_url(&base_url.into()),
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a client from configuration, restoring a saved session token.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: crate::config::normalize_base_url(&config.api_base_url),
            session: Arc::new(RwLock::new(config.auth_token.clone().map(Session::new))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─── Session ─────────────────────────────────────────────────────────────

    /// Current session, if signed in.
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Replace the session credential (e.g. one restored from storage).
    pub async fn set_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    /// Drop the session credential. Later requests go out unauthenticated.
    pub async fn sign_out(&self) {
        *self.session.write().await = None;
        tracing::info!("Signed out");
    }

    /// Exchange a wallet-signed challenge for a session token.
    ///
    /// On success the session is stored and attached to every later request.
    pub async fn sign_in(&self, message: &str, signature: &str) -> Result<Session> {
        let op = Operation::SignIn;
        let body = serde_json::json!({
            "message": message,
            "signature": signature,
        });

        // No bearer header: sign-in is how the credential is obtained.
        let request = self
            .http
            .post(self.url("/auth/siwe"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&body);

        let response: TokenResponse = self.send_json(op, request).await?;
        let session = Session::new(response.token);
        tracing::info!(wallet = ?session.wallet(), "Signed in");

        self.set_session(session.clone()).await;
        Ok(session)
    }

    // ─── Profile ─────────────────────────────────────────────────────────────

    /// Get the signed-in wallet's profile.
    pub async fn get_profile(&self) -> Result<Profile> {
        let response: ProfileResponse = self.get_json(Operation::GetProfile, "/auth/me").await?;
        Ok(response.profile)
    }

    // ─── Activities ──────────────────────────────────────────────────────────

    /// Log a new activity. Returns the stored record with its token award.
    pub async fn log_activity(&self, request: &LogActivityRequest) -> Result<Activity> {
        self.post_json(Operation::LogActivity, "/activities/log", request)
            .await
    }

    /// List the signed-in wallet's activities, most recent first.
    pub async fn list_activities(&self) -> Result<Vec<Activity>> {
        self.get_json(Operation::ListActivities, "/activities/me")
            .await
    }

    // ─── Rewards ─────────────────────────────────────────────────────────────

    pub async fn list_pending_rewards(&self) -> Result<Vec<PendingReward>> {
        self.get_json(Operation::ListPendingRewards, "/rewards/pending")
            .await
    }

    /// Claim a pending reward and receive the signed voucher.
    pub async fn claim_reward(&self, reward_id: &str) -> Result<ClaimVoucher> {
        let body = serde_json::json!({ "rewardId": reward_id });
        self.post_json(Operation::ClaimReward, "/rewards/claim", &body)
            .await
    }

    /// Past claims, most recent first.
    pub async fn reward_history(&self) -> Result<Vec<RewardHistoryItem>> {
        self.get_json(Operation::RewardHistory, "/rewards/history")
            .await
    }

    // ─── Leaderboard & Badges ────────────────────────────────────────────────

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        self.get_json(Operation::Leaderboard, "/leaderboard").await
    }

    pub async fn list_badges(&self) -> Result<Vec<Badge>> {
        self.get_json(Operation::ListBadges, "/badges/me").await
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the JSON content type and the bearer token, if signed in.
    async fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match self.session.read().await.as_ref() {
            Some(session) => request.bearer_auth(session.token()),
            None => request,
        }
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, op: Operation, path: &str) -> Result<T> {
        let request = self.authorize(self.http.get(self.url(path))).await;
        self.send_json(op, request).await
    }

    /// Generic POST request with JSON body and JSON response.
    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        op: Operation,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .authorize(self.http.post(self.url(path)))
            .await
            .json(body);
        self.send_json(op, request).await
    }

    /// Send the request, check the status and parse the JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|source| {
            tracing::debug!(op = op.as_str(), error = %source, "Request failed");
            AppError::Request { op, source }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(op = op.as_str(), status = %status, "Non-success response");
            return Err(AppError::Status { op, status });
        }

        let body = response
            .json()
            .await
            .map_err(|source| AppError::Decode { op, source })?;
        tracing::debug!(op = op.as_str(), "Request succeeded");
        Ok(body)
    }
}
