// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged activity model and the log request body.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kind of workout the log endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Run,
    Walk,
    Cycle,
    Swim,
    Pushups,
    Yoga,
    Weightlifting,
    Stretching,
}

impl ActivityType {
    pub const ALL: [ActivityType; 8] = [
        ActivityType::Run,
        ActivityType::Walk,
        ActivityType::Cycle,
        ActivityType::Swim,
        ActivityType::Pushups,
        ActivityType::Yoga,
        ActivityType::Weightlifting,
        ActivityType::Stretching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Run => "run",
            ActivityType::Walk => "walk",
            ActivityType::Cycle => "cycle",
            ActivityType::Swim => "swim",
            ActivityType::Pushups => "pushups",
            ActivityType::Yoga => "yoga",
            ActivityType::Weightlifting => "weightlifting",
            ActivityType::Stretching => "stretching",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| format!("unknown activity type: {}", s))
    }
}

/// Activity tag as stored by the service.
///
/// Older rows may carry tags outside [`ActivityType`]; those are kept
/// verbatim so they serialize back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(untagged)]
pub enum ActivityTag {
    Known(ActivityType),
    Other(String),
}

impl ActivityTag {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityTag::Known(t) => t.as_str(),
            ActivityTag::Other(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<ActivityType> {
        match self {
            ActivityTag::Known(t) => Some(*t),
            ActivityTag::Other(_) => None,
        }
    }
}

impl From<ActivityType> for ActivityTag {
    fn from(t: ActivityType) -> Self {
        ActivityTag::Known(t)
    }
}

impl PartialEq<ActivityType> for ActivityTag {
    fn eq(&self, other: &ActivityType) -> bool {
        self.known() == Some(*other)
    }
}

impl fmt::Display for ActivityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side review state of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Pending,
    Confirmed,
    #[serde(other)]
    Unknown,
}

/// Activity record as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Activity {
    /// Server-assigned ID
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    /// Owning wallet
    pub wallet_address: String,
    pub activity_type: ActivityTag,
    /// Distance in kilometers
    pub distance: Option<f64>,
    /// Duration in minutes
    pub duration: Option<u32>,
    /// Calendar date of the workout (ISO 8601)
    pub date: String,
    /// FITT tokens credited for this activity
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub tokens_awarded: i64,
    pub status: ActivityStatus,
}

/// Body of `POST /activities/log`.
///
/// Only known [`ActivityType`]s can be submitted.
/// `date` is passed through unvalidated; a malformed date is rejected by
/// the service and surfaces as a failed log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogActivityRequest {
    pub activity_type: ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub date: String,
}

impl LogActivityRequest {
    pub fn new(activity_type: ActivityType, date: impl Into<String>) -> Self {
        Self {
            activity_type,
            distance: None,
            duration: None,
            date: date.into(),
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }
}
