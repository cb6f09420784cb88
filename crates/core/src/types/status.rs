//! Service request lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a service request.
///
/// Stored as kebab-case strings in the hosted backend. New submissions start
/// as `Pending`; only an admitted admin may move a request to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Rejected,
}

impl RequestStatus {
    /// All defined statuses, in workflow order. Used to render the admin
    /// status selector.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Completed, Self::Rejected];

    /// The kebab-case wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid request status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_defined_values() {
        for status in RequestStatus::ALL {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_rejects_undefined_values() {
        assert!("bogus-status".parse::<RequestStatus>().is_err());
        assert!("".parse::<RequestStatus>().is_err());
        assert!("Pending".parse::<RequestStatus>().is_err());
        assert!("in_progress".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let parsed: RequestStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, RequestStatus::Rejected);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(RequestStatus::default(), RequestStatus::Pending);
    }
}
