//! In-memory fakes for the provider traits, shared by the service tests.

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::models::{CallOutcome, CallRecord, ContactRecord};
use crate::providers::{CallLogSource, ContactSource};
use crate::utils::phone::numbers_match;

#[derive(Default)]
pub struct FakeContacts {
    by_token: HashMap<String, ContactRecord>,
    pub fail: bool,
}

impl FakeContacts {
    pub fn with(records: Vec<ContactRecord>) -> Self {
        let by_token = records
            .into_iter()
            .map(|r| (r.lookup_key.clone(), r))
            .collect();
        Self {
            by_token,
            fail: false,
        }
    }
}

impl ContactSource for FakeContacts {
    fn resolve_by_token(&self, token: &str) -> Result<Option<ContactRecord>> {
        if self.fail {
            bail!("contact store offline");
        }
        Ok(self.by_token.get(token).cloned())
    }

    fn resolve_by_number(&self, number: &str) -> Result<Option<ContactRecord>> {
        if self.fail {
            bail!("contact store offline");
        }
        Ok(self
            .by_token
            .values()
            .find(|r| {
                r.phone_number
                    .as_deref()
                    .is_some_and(|n| numbers_match(n, number))
            })
            .cloned())
    }
}

#[derive(Default)]
pub struct FakeCallLog {
    /// Newest first, like the real call log delivers them.
    pub records: Vec<CallRecord>,
    pub fail: bool,
}

impl CallLogSource for FakeCallLog {
    fn recent_calls(&self, limit: usize) -> Result<Vec<CallRecord>> {
        if self.fail {
            bail!("call log unavailable");
        }
        Ok(self.records.iter().take(limit).cloned().collect())
    }

    fn last_outcome(&self, number: &str) -> Result<Option<CallOutcome>> {
        if self.fail {
            bail!("call log unavailable");
        }
        Ok(self
            .records
            .iter()
            .find(|r| numbers_match(&r.raw_number, number))
            .map(|r| r.outcome))
    }
}

pub fn contact(id: i64, name: &str, number: &str) -> ContactRecord {
    ContactRecord {
        contact_id: id,
        lookup_key: format!("lk-{}", id),
        display_name: name.to_string(),
        phone_number: Some(number.to_string()),
        photo_uri: None,
    }
}

pub fn call(raw_number: &str, timestamp: i64, outcome: CallOutcome) -> CallRecord {
    CallRecord {
        raw_number: raw_number.to_string(),
        cached_name: None,
        cached_contact: None,
        timestamp,
        outcome,
    }
}
