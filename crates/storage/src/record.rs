use serde::{Deserialize, Serialize};

/// Current stored-record schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// The visitor's persisted choice.
///
/// `choice` keeps the raw spelling; interpreting it is the policy
/// layer's job. A record is immutable once written; a later choice
/// writes a fresh record over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub choice: String,
    pub ts: i64,
    pub v: u32,
}

impl ConsentRecord {
    pub fn new(choice: impl Into<String>, ts: i64) -> Self {
        Self {
            choice: choice.into(),
            ts,
            v: SCHEMA_VERSION,
        }
    }

    /// Parse stored content. Malformed structure and foreign schema
    /// versions both count as "no record".
    pub fn parse(raw: &str) -> Option<Self> {
        let record: ConsentRecord = serde_json::from_str(raw).ok()?;
        if record.v != SCHEMA_VERSION {
            tracing::debug!(version = record.v, "ignoring record with foreign schema version");
            return None;
        }
        Some(record)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let record = ConsentRecord::new("accepted", 1_700_000_000_000);
        let json = record.to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["choice"], "accepted");
        assert_eq!(value["ts"], 1_700_000_000_000_i64);
        assert_eq!(value["v"], SCHEMA_VERSION);
    }

    #[test]
    fn test_parse_round_trip() {
        let record = ConsentRecord::new("rejected", 42);
        assert_eq!(ConsentRecord::parse(&record.to_json()), Some(record));
    }

    #[test]
    fn test_parse_rejects_invalid_structure() {
        assert_eq!(ConsentRecord::parse("not json"), None);
        assert_eq!(ConsentRecord::parse("{}"), None);
        assert_eq!(ConsentRecord::parse("{\"choice\":7,\"ts\":1,\"v\":2}"), None);
        assert_eq!(ConsentRecord::parse("[1,2,3]"), None);
    }

    #[test]
    fn test_parse_rejects_foreign_schema_version() {
        assert_eq!(
            ConsentRecord::parse("{\"choice\":\"accepted\",\"ts\":1,\"v\":1}"),
            None
        );
    }

    #[test]
    fn test_parse_keeps_unrecognized_choice_spelling() {
        // Semantic validation happens in the policy layer, not here.
        let record = ConsentRecord::parse("{\"choice\":\"maybe\",\"ts\":1,\"v\":2}").unwrap();
        assert_eq!(record.choice, "maybe");
    }
}
