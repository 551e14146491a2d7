use serde::{Deserialize, Serialize};

/// The visitor's binary consent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    /// Map a stored or external spelling onto a canonical decision.
    ///
    /// Accepts the canonical "accepted"/"rejected" pair and the
    /// grant-vocabulary pair "granted"/"denied" used by signaling
    /// payloads. Anything else yields `None`; this never fails.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "accepted" | "granted" => Some(Self::Accepted),
            "rejected" | "denied" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_spellings() {
        assert_eq!(Decision::normalize("accepted"), Some(Decision::Accepted));
        assert_eq!(Decision::normalize("rejected"), Some(Decision::Rejected));
    }

    #[test]
    fn test_normalize_grant_vocabulary() {
        assert_eq!(Decision::normalize("granted"), Some(Decision::Accepted));
        assert_eq!(Decision::normalize("denied"), Some(Decision::Rejected));
    }

    #[test]
    fn test_normalize_ignores_case_and_whitespace() {
        assert_eq!(Decision::normalize("  Accepted "), Some(Decision::Accepted));
        assert_eq!(Decision::normalize("REJECTED"), Some(Decision::Rejected));
    }

    #[test]
    fn test_normalize_unrecognized_yields_none() {
        assert_eq!(Decision::normalize("maybe"), None);
        assert_eq!(Decision::normalize(""), None);
        assert_eq!(Decision::normalize("accepted!"), None);
        assert_eq!(Decision::normalize("42"), None);
        assert_eq!(Decision::normalize("\u{1F36A}"), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Decision::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
        let back: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Decision::Accepted);
    }
}
