// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credential handling.
//!
//! The service signs session JWTs with a secret this client never sees, so
//! claims are decoded without signature verification. They are used only for
//! display (which wallet is signed in) and to notice an expired session
//! before the service rejects it.

use crate::error::{AppError, Result};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (checksummed wallet address)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Bearer credential obtained from sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    claims: Option<SessionClaims>,
}

impl Session {
    /// Wrap a bearer token, decoding its claims when it is a JWT.
    ///
    /// Opaque tokens are still accepted; they just carry no wallet or expiry.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let claims = match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!(error = %e, "Session token is not a decodable JWT");
                None
            }
        };
        Self { token, claims }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Wallet address the session was issued for.
    pub fn wallet(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.sub.as_str())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .as_ref()
            .and_then(|c| c.exp)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the token has expired as of `now`. Tokens without an expiry
    /// never expire locally.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Decode session claims without verifying the signature.
pub fn decode_claims(token: &str) -> Result<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::InvalidToken(e.to_string()))
}

/// Challenge text the wallet signs to sign in.
///
/// The service reads `;`-separated `key:value` pairs and requires `address`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInChallenge {
    pub address: String,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
}

impl SignInChallenge {
    pub fn new(address: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            nonce: nonce.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn to_message(&self) -> String {
        format!(
            "Sign in to FITT;address:{};nonce:{};issued_at:{}",
            self.address,
            self.nonce,
            format_utc_rfc3339(self.issued_at)
        )
    }
}
