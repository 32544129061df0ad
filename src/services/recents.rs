use std::collections::HashSet;

use crate::models::{CallRecord, ContactRecord, ContactRef, WidgetEntry};
use crate::providers::{CallLogSource, ContactSource};
use crate::utils::phone::normalize_number;

/// How far back the call-history scan reaches, in records.
pub const RECENTS_SCAN_WINDOW: usize = 250;

/// Reduces the call history to one candidate entry per distinct normalized
/// number, newest first. Returns each entry with the timestamp of the call
/// that produced it so the merge stage can age-filter.
///
/// The feed is already newest-first, so "most recent occurrence wins" is a
/// single forward pass over a set of seen keys. No re-sorting.
pub fn load_recents(
    contacts: &dyn ContactSource,
    call_log: &dyn CallLogSource,
    contacts_granted: bool,
    call_log_granted: bool,
) -> Vec<(WidgetEntry, i64)> {
    if !call_log_granted {
        return Vec::new();
    }

    let records = match call_log.recent_calls(RECENTS_SCAN_WINDOW) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Call history scan failed, omitting recents: {}", e);
            return Vec::new();
        }
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for record in records {
        let key = normalize_number(&record.raw_number);
        if key.is_empty() {
            continue;
        }
        if !seen.insert(key) {
            continue;
        }
        let entry = resolve_record(contacts, &record, contacts_granted);
        out.push((entry, record.timestamp));
    }

    out
}

/// Resolution chain per record: the cached contact link, then a reverse
/// number lookup, then an unlinked entry built from what the record carries.
fn resolve_record(
    contacts: &dyn ContactSource,
    record: &CallRecord,
    contacts_granted: bool,
) -> WidgetEntry {
    if contacts_granted {
        if let Some(token) = record
            .cached_contact
            .as_ref()
            .filter(|c| c.is_linked())
            .and_then(|c| c.lookup_key.as_deref())
        {
            match contacts.resolve_by_token(token) {
                Ok(Some(found)) => return linked_entry(found, record),
                Ok(None) => {
                    log::debug!("Cached contact link {} is stale", token);
                }
                Err(e) => {
                    log::debug!("Cached contact lookup failed for {}: {}", token, e);
                }
            }
        }

        match contacts.resolve_by_number(&record.raw_number) {
            Ok(Some(found)) => return linked_entry(found, record),
            Ok(None) => {}
            Err(e) => {
                log::debug!("Reverse lookup failed for {}: {}", record.raw_number, e);
            }
        }
    }

    WidgetEntry {
        contact: ContactRef::unlinked(),
        display_name: Some(
            record
                .cached_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| record.raw_number.clone()),
        ),
        phone_number: Some(record.raw_number.clone()),
        photo_uri: None,
        last_call: record.outcome,
        is_favorite: false,
    }
}

fn linked_entry(found: ContactRecord, record: &CallRecord) -> WidgetEntry {
    WidgetEntry {
        contact: ContactRef::linked(found.contact_id, found.lookup_key),
        display_name: Some(found.display_name),
        // The number that was actually called, not the contact's primary.
        phone_number: Some(record.raw_number.clone()),
        photo_uri: found.photo_uri,
        last_call: record.outcome,
        is_favorite: false,
    }
}
