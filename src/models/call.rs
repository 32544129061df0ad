use serde::{Deserialize, Serialize};

use crate::models::ContactRef;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Incoming,
    Outgoing,
    Missed,
    Rejected,
    Unknown,
    /// No call history exists for the number.
    None,
}

impl CallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Incoming => "incoming",
            CallOutcome::Outgoing => "outgoing",
            CallOutcome::Missed => "missed",
            CallOutcome::Rejected => "rejected",
            CallOutcome::Unknown => "unknown",
            CallOutcome::None => "none",
        }
    }

    /// Lenient parse for values read back from storage. Unrecognized values
    /// map to `Unknown` rather than failing the scan.
    pub fn parse(value: &str) -> Self {
        match value {
            "incoming" => CallOutcome::Incoming,
            "outgoing" => CallOutcome::Outgoing,
            "missed" => CallOutcome::Missed,
            "rejected" => CallOutcome::Rejected,
            "none" => CallOutcome::None,
            _ => CallOutcome::Unknown,
        }
    }
}

impl Default for CallOutcome {
    fn default() -> Self {
        CallOutcome::None
    }
}

/// One call-history record as delivered by the call-log source, newest first.
/// `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub raw_number: String,
    pub cached_name: Option<String>,
    pub cached_contact: Option<ContactRef>,
    pub timestamp: i64,
    pub outcome: CallOutcome,
}
