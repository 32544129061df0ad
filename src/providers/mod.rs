use anyhow::Result;

use crate::models::{CallOutcome, CallRecord, ContactRecord};

/// Contact lookups against the device store. A miss is `Ok(None)`; `Err` is
/// reserved for genuine storage failures.
pub trait ContactSource {
    /// Resolve a contact by its stable lookup key.
    fn resolve_by_token(&self, token: &str) -> Result<Option<ContactRecord>>;

    /// Reverse lookup: find the contact owning a phone number.
    fn resolve_by_number(&self, number: &str) -> Result<Option<ContactRecord>>;
}

/// Bounded access to the device call history.
pub trait CallLogSource {
    /// At most `limit` records, newest first.
    fn recent_calls(&self, limit: usize) -> Result<Vec<CallRecord>>;

    /// Outcome of the most recent call to/from `number`, if any.
    fn last_outcome(&self, number: &str) -> Result<Option<CallOutcome>>;
}
