use serde::{Deserialize, Serialize};

use crate::models::CallOutcome;

/// Sentinel contact id for callers that could not be matched to any contact.
pub const UNKNOWN_CONTACT_ID: i64 = -1;

/// Optional link to a device contact. `lookup_key` is only present when the
/// link is resolved (`contact_id != UNKNOWN_CONTACT_ID`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRef {
    pub contact_id: i64,
    pub lookup_key: Option<String>,
}

impl ContactRef {
    pub fn linked(contact_id: i64, lookup_key: String) -> Self {
        Self {
            contact_id,
            lookup_key: Some(lookup_key),
        }
    }

    pub fn unlinked() -> Self {
        Self {
            contact_id: UNKNOWN_CONTACT_ID,
            lookup_key: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.contact_id != UNKNOWN_CONTACT_ID
    }
}

impl Default for ContactRef {
    fn default() -> Self {
        Self::unlinked()
    }
}

/// A contact as resolved from the device store at aggregation time.
/// `phone_number` is the contact's first number in the store's stable
/// ordering, or None if the contact has no numbers at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRecord {
    pub contact_id: i64,
    pub lookup_key: String,
    pub display_name: String,
    pub phone_number: Option<String>,
    pub photo_uri: Option<String>,
}

/// One row of the final widget list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetEntry {
    pub contact: ContactRef,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub photo_uri: Option<String>,
    pub last_call: CallOutcome,
    pub is_favorite: bool,
}
