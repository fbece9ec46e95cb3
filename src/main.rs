// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FITT-Sync command line client
//!
//! Loads the dashboard view for the signed-in wallet, logs activities and
//! claims rewards against the FITT API.

use clap::{Parser, Subcommand};
use fitt_sync::{
    config::Config,
    models::{leaderboard::current_user_rank, ActivityType, LogActivityRequest},
    services::{profile_view::Resource, ApiClient, ProfileView, SignInChallenge},
    time_utils::today_iso_date,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fitt-sync")]
#[command(about = "Client for the FITT fitness rewards API")]
struct Cli {
    /// Base URL of the FITT API (overrides FITT_API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Session token from `sign-in` (overrides FITT_AUTH_TOKEN)
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load every dashboard section and print it
    Dashboard,

    /// Log an activity
    Log {
        /// run, walk, cycle, swim, pushups, yoga, weightlifting or stretching
        activity_type: ActivityType,

        /// Distance in kilometers
        #[arg(short, long)]
        distance: Option<f64>,

        /// Duration in minutes
        #[arg(short = 'm', long)]
        duration: Option<u32>,

        /// Workout date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Claim a pending reward and print the signed voucher
    Claim {
        reward_id: String,
    },

    /// Print past reward claims
    History,

    /// Print the challenge text a wallet should sign
    Challenge {
        #[arg(long)]
        address: String,

        #[arg(long)]
        nonce: String,
    },

    /// Exchange a signed challenge for a session token
    SignIn {
        #[arg(long)]
        message: String,

        #[arg(long)]
        signature: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = fitt_sync::config::normalize_base_url(&url);
    }
    if let Some(token) = cli.token {
        config.auth_token = Some(token);
    }
    tracing::info!(api = %config.api_base_url, "Starting FITT-Sync");

    let api = ApiClient::from_config(&config)?;
    if let Some(session) = api.session().await {
        if session.is_expired() {
            tracing::warn!(wallet = ?session.wallet(), "Session token has expired; sign in again");
        }
    }

    let view = ProfileView::new(api);

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => {
            view.load_all().await;
            let snapshot = view.snapshot().await;

            let errors: Vec<_> = view
                .errors()
                .into_iter()
                .map(|(op, msg)| serde_json::json!({ "operation": op.as_str(), "error": msg }))
                .collect();
            let loaded: Vec<_> = Resource::ALL
                .iter()
                .filter(|r| view.resource_status(**r).last_error.is_none())
                .map(|r| r.as_str())
                .collect();

            let summary = serde_json::json!({
                "token_balance": snapshot.token_balance(),
                "activities_count": snapshot.activities_count(),
                "rank": current_user_rank(&snapshot.leaderboard),
                "loaded": loaded,
                "errors": errors,
                "snapshot": snapshot,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Log {
            activity_type,
            distance,
            duration,
            date,
        } => {
            let mut request =
                LogActivityRequest::new(activity_type, date.unwrap_or_else(today_iso_date));
            request.distance = distance;
            request.duration = duration;

            let activity = view.log_activity(request).await?;
            let badges = view.badges().await;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "activity": activity,
                    "badges": badges,
                    "pending_rewards": view.pending_rewards().await,
                }))?
            );
        }
        Command::Claim { reward_id } => {
            let voucher = view.claim_reward(&reward_id).await?;
            println!("{}", serde_json::to_string_pretty(&voucher)?);
        }
        Command::History => {
            let history = view.api().reward_history().await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Command::Challenge { address, nonce } => {
            println!("{}", SignInChallenge::new(address, nonce).to_message());
        }
        Command::SignIn { message, signature } => {
            let session = view.api().sign_in(&message, &signature).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "token": session.token(),
                    "wallet": session.wallet(),
                    "expires_at": session.expires_at().map(|t| t.to_rfc3339()),
                }))?
            );
        }
    }

    Ok(())
}

/// Initialize structured JSON logging on stderr, leaving stdout for output.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fitt_sync=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
