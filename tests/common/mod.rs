// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the FITT API, served over real HTTP on an ephemeral
//! port so requests go through reqwest exactly as in production.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use fitt_sync::services::ApiClient;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const WALLET: &str = "0x1234567890123456789012345678901234567890";
const OTHER_WALLET: &str = "0x9999999999999999999999999999999999999999";

/// Activities needed for the bronze badge.
pub const BRONZE_THRESHOLD: usize = 3;

/// A request as seen by the mock service.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

/// Mutable state behind the mock service.
#[derive(Default)]
pub struct MockState {
    pub token: String,
    pub activities: Mutex<Vec<Value>>,
    pub pending: Mutex<Vec<Value>>,
    pub history: Mutex<Vec<Value>>,
    /// Paths that answer 500 until removed
    pub failing: Mutex<HashSet<String>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
    /// When set, the first leaderboard request is held back this long
    pub slow_first_leaderboard_ms: AtomicUsize,
    /// Gated paths with their request counts when the gate was set
    rendezvous: Mutex<Option<Vec<(String, usize)>>>,
    leaderboard_calls: AtomicUsize,
    next_id: AtomicI64,
}

#[allow(dead_code)]
impl MockState {
    pub fn fail(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    pub fn recover(&self, path: &str) {
        self.failing.lock().unwrap().remove(path);
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Hold back each of `paths` until every one of them has been requested.
    ///
    /// A client that issues these requests one after another stalls on the
    /// first one.
    pub fn hold_until_all_requested(&self, paths: &[&str]) {
        let gate = paths
            .iter()
            .map(|p| (p.to_string(), self.requests_to(p).len()))
            .collect();
        *self.rendezvous.lock().unwrap() = Some(gate);
    }

    fn rendezvous_open(&self, path: &str) -> bool {
        match &*self.rendezvous.lock().unwrap() {
            Some(gate) if gate.iter().any(|(p, _)| p == path) => gate
                .iter()
                .all(|(p, seen)| self.requests_to(p).len() > *seen),
            _ => true,
        }
    }

    async fn rendezvous(&self, path: &str) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !self.rendezvous_open(path) && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    pub fn seed_activity(&self, activity_type: &str, tokens: i64, date: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let activity = activity_json(id, activity_type, None, Some(30), date, tokens);
        self.activities.lock().unwrap().insert(0, activity);
    }

    pub fn seed_pending(&self, id: &str, kind: &str, amount: i64) {
        self.pending.lock().unwrap().push(json!({
            "id": id,
            "type": kind,
            "title": format!("Reward {}", id),
            "description": "Earned by logging activities",
            "amount": amount,
            "earnedDate": "2025-01-10",
        }));
    }

    fn record(&self, path: &str, headers: &HeaderMap, body: Option<Value>) {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            authorization: header_str(header::AUTHORIZATION),
            content_type: header_str(header::CONTENT_TYPE),
            body,
        });
    }

    /// Record the request, then apply failure injection and bearer auth.
    fn check(&self, path: &str, headers: &HeaderMap, body: Option<Value>) -> Result<(), StatusCode> {
        self.record(path, headers, body);

        if self.failing.lock().unwrap().contains(path) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }

        let expected = format!("Bearer {}", self.token);
        match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(h) if h == expected => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    fn total_tokens(&self) -> i64 {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .map(|a| a["tokens_awarded"].as_i64().unwrap_or(0))
            .sum()
    }
}

/// Handle to a running mock service.
pub struct MockApi {
    pub state: Arc<MockState>,
    pub base_url: String,
}

#[allow(dead_code)]
impl MockApi {
    /// Client with no session.
    pub fn anonymous_client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// Client already signed in as [`WALLET`].
    pub async fn client(&self) -> ApiClient {
        let client = self.anonymous_client();
        client
            .set_session(fitt_sync::services::Session::new(self.state.token.clone()))
            .await;
        client
    }
}

/// Create a session JWT the way the service issues them.
pub fn create_test_jwt(wallet: &str, exp: i64) -> String {
    #[derive(serde::Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: i64,
    }

    encode(
        &Header::new(Algorithm::HS256),
        &Claims { sub: wallet, exp },
        &EncodingKey::from_secret(b"dev_secret"),
    )
    .unwrap()
}

pub fn activity_json(
    id: i64,
    activity_type: &str,
    distance: Option<f64>,
    duration: Option<u64>,
    date: &str,
    tokens: i64,
) -> Value {
    json!({
        "id": id,
        "wallet_address": WALLET,
        "activity_type": activity_type,
        "distance": distance,
        "duration": duration,
        "date": date,
        "tokens_awarded": tokens,
        "status": "pending",
    })
}

/// Start the mock service on an ephemeral port.
pub async fn spawn_mock_api() -> MockApi {
    let state = Arc::new(MockState {
        token: create_test_jwt(WALLET, 4_102_444_800),
        ..Default::default()
    });

    let app = Router::new()
        .route("/auth/siwe", post(siwe))
        .route("/auth/me", get(me))
        .route("/activities/log", post(log_activity))
        .route("/activities/me", get(my_activities))
        .route("/rewards/pending", get(pending_rewards))
        .route("/rewards/claim", post(claim))
        .route("/rewards/history", get(history))
        .route("/leaderboard", get(leaderboard))
        .route("/badges/me", get(badges))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockApi {
        state,
        base_url: format!("http://{}", addr),
    }
}

type Shared = State<Arc<MockState>>;

async fn siwe(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record("/auth/siwe", &headers, Some(body.clone()));

    let message = body["message"].as_str().unwrap_or_default();
    if body["signature"] == "bad" || !message.contains("address:") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "token": state.token })))
}

async fn me(State(state): Shared, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    state.check("/auth/me", &headers, None)?;
    state.rendezvous("/auth/me").await;
    Ok(Json(json!({
        "wallet_address": WALLET,
        "profile": {
            "wallet_address": WALLET,
            "join_date": "2025-01-01T12:00:00.123456",
            "ens_name": null,
            "avatar_seed": "f00dfeed",
        }
    })))
}

async fn log_activity(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.check("/activities/log", &headers, Some(body.clone()))?;

    let distance = body["distance"].as_f64();
    let duration = body["duration"].as_u64();
    if distance.is_none() && duration.is_none() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let date = body["date"].as_str().unwrap_or_default();
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let tokens = match (distance, duration) {
        (Some(d), _) if d > 0.0 => ((d * 2.0) as i64).max(10),
        (_, Some(m)) if m > 0 => (m as i64).max(10),
        _ => 10,
    };

    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let activity = activity_json(
        id,
        body["activity_type"].as_str().unwrap_or("run"),
        distance,
        duration,
        date,
        tokens,
    );
    state.activities.lock().unwrap().insert(0, activity.clone());
    Ok(Json(activity))
}

async fn my_activities(State(state): Shared, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    state.check("/activities/me", &headers, None)?;
    state.rendezvous("/activities/me").await;
    Ok(Json(Value::Array(state.activities.lock().unwrap().clone())))
}

async fn pending_rewards(
    State(state): Shared,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    state.check("/rewards/pending", &headers, None)?;
    state.rendezvous("/rewards/pending").await;
    Ok(Json(Value::Array(state.pending.lock().unwrap().clone())))
}

async fn claim(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.check("/rewards/claim", &headers, Some(body.clone()))?;

    let reward_id = body["rewardId"].as_str().unwrap_or_default().to_string();
    let reward = {
        let mut pending = state.pending.lock().unwrap();
        let idx = pending
            .iter()
            .position(|r| r["id"] == reward_id.as_str())
            .ok_or(StatusCode::NOT_FOUND)?;
        pending.remove(idx)
    };

    let reward_type = if reward["type"] == "token" {
        "token".to_string()
    } else {
        reward_id.clone()
    };
    let mut history = state.history.lock().unwrap();
    let nonce = history.len() + 1;
    history.insert(
        0,
        json!({
            "id": nonce,
            "reward_type": reward_type,
            "amount": reward["amount"],
            "tx_hash": null,
            "created_at": "2025-01-11T09:30:00",
        }),
    );

    Ok(Json(json!({
        "domain": { "name": "FITT", "version": "1", "chainId": 11155111 },
        "types": { "Claim": [
            { "name": "wallet", "type": "address" },
            { "name": "rewardType", "type": "string" },
            { "name": "amount", "type": "uint256" },
            { "name": "nonce", "type": "uint256" },
        ]},
        "message": {
            "wallet": WALLET,
            "rewardType": reward["type"],
            "amount": reward["amount"],
            "nonce": nonce,
        },
        "signature": "0x5ig",
    })))
}

async fn history(State(state): Shared, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    state.check("/rewards/history", &headers, None)?;
    Ok(Json(Value::Array(state.history.lock().unwrap().clone())))
}

async fn leaderboard(State(state): Shared, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    state.check("/leaderboard", &headers, None)?;
    state.rendezvous("/leaderboard").await;

    let call = state.leaderboard_calls.fetch_add(1, Ordering::SeqCst);
    let slow_ms = state.slow_first_leaderboard_ms.load(Ordering::SeqCst);
    if call == 0 && slow_ms > 0 {
        tokio::time::sleep(Duration::from_millis(slow_ms as u64)).await;
    }

    let count = state.activities.lock().unwrap().len();
    let badges = usize::from(count >= BRONZE_THRESHOLD);
    // Tag rows with the arrival order when timing is under test.
    let ens_name = if slow_ms > 0 {
        json!(format!("call-{}", call))
    } else {
        Value::Null
    };
    Ok(Json(json!([
        {
            "address": OTHER_WALLET,
            "ensName": "pacer.eth",
            "activities": 100,
            "tokens": 5000,
            "badges": 3,
            "isCurrentUser": false,
        },
        {
            "address": WALLET,
            "ensName": ens_name,
            "activities": count,
            "tokens": state.total_tokens(),
            "badges": badges,
            "isCurrentUser": true,
        },
    ])))
}

async fn badges(State(state): Shared, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    state.check("/badges/me", &headers, None)?;
    state.rendezvous("/badges/me").await;

    let count = state.activities.lock().unwrap().len();
    let mut badges = Vec::new();
    if count >= BRONZE_THRESHOLD {
        badges.push(json!({
            "id": "badge-bronze",
            "name": "Bronze Achiever",
            "description": format!("Logged {} activities", BRONZE_THRESHOLD),
            "emoji": "🥉",
            "mintDate": "2025-01-10",
            "tokenId": "1",
            "rarity": "common",
            "ipfsUrl": "ipfs://badge-bronze",
        }));
    }
    Ok(Json(Value::Array(badges)))
}
