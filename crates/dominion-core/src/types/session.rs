//! Session record types.
//!
//! A session represents one observed CLI client connection. Records are
//! created and mutated by the client product itself; this service only
//! reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One observed CLI client connection.
///
/// `last_activity >= created_at` whenever both are present; `id` is never
/// reused. Deletion, if any, is an external retention policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque unique identifier.
    pub id: Uuid,
    /// Owning user, embedded by the backend join. Absent means
    /// anonymous/system.
    #[serde(default, rename = "cli_users")]
    pub user: Option<SessionUser>,
    /// Session start time, immutable.
    pub created_at: DateTime<Utc>,
    /// Last observed action time, monotonically non-decreasing, updated
    /// externally on each client action.
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    /// Two-letter country code, if geolocation succeeded.
    #[serde(default)]
    pub country_code: Option<String>,
    /// Country display name.
    #[serde(default)]
    pub country: Option<String>,
    /// City display name.
    #[serde(default)]
    pub city: Option<String>,
    /// Linux distribution reported by the client.
    #[serde(default)]
    pub distro: Option<String>,
    /// Operating system name, fallback when no distro was detected.
    #[serde(default)]
    pub os_name: Option<String>,
    /// Terminal emulator reported by the client.
    #[serde(default)]
    pub terminal: Option<String>,
    /// Public IP address as seen by the backend.
    #[serde(default)]
    pub public_ip: Option<String>,
    /// Whether the connection came through a VPN.
    #[serde(default)]
    pub is_vpn: bool,
}

/// User fields embedded into a session record by the backend join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display username.
    #[serde(default)]
    pub username: Option<String>,
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionRecord {
    /// The activity timestamp used for liveness classification: the last
    /// observed action, falling back to the session start when no action
    /// has been recorded yet.
    pub fn effective_activity(&self) -> DateTime<Utc> {
        self.last_activity.unwrap_or(self.created_at)
    }
}
