use std::collections::HashSet;

use crate::models::{CallOutcome, ContactRef, WidgetEntry};
use crate::providers::{CallLogSource, ContactSource};

/// Resolves the user's pinned favorites into widget entries, preserving the
/// pinned order. A favorite that no longer resolves, or that has no phone
/// number, is skipped without surfacing an error: a deleted contact must not
/// break the widget.
pub fn load_favorites(
    contacts: &dyn ContactSource,
    call_log: &dyn CallLogSource,
    tokens: &[String],
    call_log_granted: bool,
) -> Vec<WidgetEntry> {
    let mut seen_ids: HashSet<i64> = HashSet::new();
    let mut entries = Vec::with_capacity(tokens.len());

    for token in tokens {
        let record = match contacts.resolve_by_token(token) {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::debug!("Favorite {} no longer resolves, skipping", token);
                continue;
            }
            Err(e) => {
                log::warn!("Favorite lookup failed for {}: {}", token, e);
                continue;
            }
        };

        let number = match record.phone_number {
            Some(number) => number,
            None => {
                log::debug!("Favorite {} has no phone number, skipping", record.display_name);
                continue;
            }
        };

        // Two tokens pointing at the same contact produce one entry.
        if !seen_ids.insert(record.contact_id) {
            continue;
        }

        let last_call = if call_log_granted {
            match call_log.last_outcome(&number) {
                Ok(Some(outcome)) => outcome,
                Ok(None) => CallOutcome::None,
                Err(e) => {
                    log::warn!("Last-call lookup failed for {}: {}", number, e);
                    CallOutcome::None
                }
            }
        } else {
            CallOutcome::None
        };

        entries.push(WidgetEntry {
            contact: ContactRef::linked(record.contact_id, record.lookup_key),
            display_name: Some(record.display_name),
            phone_number: Some(number),
            photo_uri: record.photo_uri,
            last_call,
            is_favorite: true,
        });
    }

    entries
}
