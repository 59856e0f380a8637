//! Session filter criteria.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The single active selection narrowing which sessions are considered
/// for display and aggregation. Exactly one criterion is active per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterCriterion {
    /// No narrowing; the full fetched batch.
    #[default]
    All,
    /// Sessions started on the current calendar day.
    Today,
    /// Sessions started within the past seven days.
    PastWeek,
    /// Sessions flagged as VPN connections.
    VpnOnly,
}

impl FilterCriterion {
    /// Canonical token, as used in query strings and the admin UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::PastWeek => "week",
            Self::VpnOnly => "vpn",
        }
    }
}

impl std::fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCriterion {
    type Err = AppError;

    /// Parse a UI filter token. Unknown tokens fail loudly; there is no
    /// silent fall-through to [`FilterCriterion::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" | "past_week" => Ok(Self::PastWeek),
            "vpn" | "vpn_only" => Ok(Self::VpnOnly),
            other => Err(AppError::invalid_filter(format!(
                "Unknown filter criterion '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!("all".parse::<FilterCriterion>().unwrap(), FilterCriterion::All);
        assert_eq!(
            "today".parse::<FilterCriterion>().unwrap(),
            FilterCriterion::Today
        );
        assert_eq!(
            "week".parse::<FilterCriterion>().unwrap(),
            FilterCriterion::PastWeek
        );
        assert_eq!(
            "past_week".parse::<FilterCriterion>().unwrap(),
            FilterCriterion::PastWeek
        );
        assert_eq!(
            "vpn".parse::<FilterCriterion>().unwrap(),
            FilterCriterion::VpnOnly
        );
    }

    #[test]
    fn test_unknown_token_is_invalid_filter() {
        let err = "yesterday".parse::<FilterCriterion>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFilter);
    }

    #[test]
    fn test_round_trip() {
        for c in [
            FilterCriterion::All,
            FilterCriterion::Today,
            FilterCriterion::PastWeek,
            FilterCriterion::VpnOnly,
        ] {
            assert_eq!(c.as_str().parse::<FilterCriterion>().unwrap(), c);
        }
    }
}
