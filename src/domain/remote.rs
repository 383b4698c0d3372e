//! Remote records as returned by the identity source
//!
//! These mirror the wire shape (camelCase fields) and are read-only from
//! this tool's perspective. Anything the projection may omit defaults to
//! empty rather than failing deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record from the identity source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

/// Reference to a team by name, as embedded in a user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
}

/// A team record from the identity source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTeam {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
