//! Display-row projection for the admin session table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dominion_core::types::session::SessionRecord;

use crate::activity::ActivityWindow;
use crate::geo::display_label;

/// Badge style for a reported distro, with a defined fallback branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistroBadge {
    Kali,
    Parrot,
    Ubuntu,
    Debian,
    Arch,
    Termux,
    /// Unknown or absent distro.
    Generic,
}

impl DistroBadge {
    /// Classify a reported distro string into a badge.
    pub fn classify(distro: Option<&str>) -> Self {
        let Some(distro) = distro else {
            return Self::Generic;
        };
        let d = distro.to_lowercase();
        if d.contains("kali") {
            Self::Kali
        } else if d.contains("parrot") {
            Self::Parrot
        } else if d.contains("ubuntu") {
            Self::Ubuntu
        } else if d.contains("debian") {
            Self::Debian
        } else if d.contains("arch") {
            Self::Arch
        } else if d.contains("termux") {
            Self::Termux
        } else {
            Self::Generic
        }
    }

    /// CSS class suffix used by the console stylesheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kali => "distro-kali",
            Self::Parrot => "distro-parrot",
            Self::Ubuntu => "distro-ubuntu",
            Self::Debian => "distro-debian",
            Self::Arch => "distro-arch",
            Self::Termux => "distro-termux",
            Self::Generic => "",
        }
    }
}

/// Flag emoji for a two-letter country code, built from the Unicode
/// regional indicator symbols. Unknown geo renders a globe.
pub fn country_flag(country_code: Option<&str>) -> String {
    let Some(code) = country_code else {
        return "🌐".to_string();
    };
    code.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32) - ('A' as u32)))
        .collect()
}

/// Coarse relative-time label: `3d`, `5h`, `2m`, or `now` for anything
/// under a minute.
pub fn format_relative_time(earlier: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - earlier;
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if days > 0 {
        format!("{days}d")
    } else if hours > 0 {
        format!("{hours}h")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "now".to_string()
    }
}

/// One session projected into display form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRow {
    /// Session id.
    pub id: Uuid,
    /// Display username: account username, else the email local part,
    /// else "Anonymous".
    pub username: String,
    /// Country label with code fallback, `?` when no geo data exists.
    pub country: String,
    /// Flag emoji for the country code.
    pub country_flag: String,
    /// City, `-` when unknown.
    pub city: String,
    /// Reported distro with OS-name fallback, `-` when unknown.
    pub distro: String,
    /// Badge style for the distro.
    pub distro_badge: DistroBadge,
    /// Stylesheet class for the badge, empty for the generic badge.
    pub distro_badge_class: String,
    /// Public IP, `-` when unknown.
    pub public_ip: String,
    /// Whether the connection came through a VPN.
    pub is_vpn: bool,
    /// Whether the session is inside the live window.
    pub is_live: bool,
    /// Relative session start time.
    pub started: String,
    /// Relative last-activity time, `-` when never active.
    pub last_seen: String,
}

impl SessionRow {
    /// Project a session record into its display row.
    pub fn from_record(record: &SessionRecord, now: DateTime<Utc>, window: ActivityWindow) -> Self {
        let username = record
            .user
            .as_ref()
            .and_then(|u| {
                u.username.clone().or_else(|| {
                    u.email
                        .as_deref()
                        .and_then(|e| e.split('@').next())
                        .map(String::from)
                })
            })
            .unwrap_or_else(|| "Anonymous".to_string());

        let distro = record
            .distro
            .clone()
            .or_else(|| record.os_name.clone())
            .unwrap_or_else(|| "-".to_string());

        let distro_badge = DistroBadge::classify(record.distro.as_deref());

        Self {
            id: record.id,
            username,
            country: display_label(record).unwrap_or("?").to_string(),
            country_flag: country_flag(record.country_code.as_deref()),
            city: record.city.clone().unwrap_or_else(|| "-".to_string()),
            distro_badge,
            distro_badge_class: distro_badge.as_str().to_string(),
            distro,
            public_ip: record.public_ip.clone().unwrap_or_else(|| "-".to_string()),
            is_vpn: record.is_vpn,
            is_live: window.record_is_live(record, now),
            started: format_relative_time(record.created_at, now),
            last_seen: record
                .last_activity
                .map(|ts| format_relative_time(ts, now))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}
