use std::collections::HashSet;

use chrono::Utc;

use crate::models::{Permissions, SortMode, WidgetEntry, WidgetSettings};
use crate::providers::{CallLogSource, ContactSource};
use crate::utils::phone::normalize_number;

use super::{favorites, recents};

/// Unlinked recents older than this are dropped by the old-unknown filter.
pub const OLD_UNKNOWN_MAX_AGE_MILLIS: i64 = 2 * 24 * 3600 * 1000;

/// The single entry point the presentation layer calls: favorites first in
/// their pinned order, then surviving recents newest first, truncated to the
/// configured size. Never fails; the worst outcome is an empty list.
pub fn build_widget_list(
    contacts: &dyn ContactSource,
    call_log: &dyn CallLogSource,
    favorite_tokens: &[String],
    settings: &WidgetSettings,
    permissions: Permissions,
) -> Vec<WidgetEntry> {
    let favorite_entries = if permissions.contacts_granted {
        favorites::load_favorites(
            contacts,
            call_log,
            favorite_tokens,
            permissions.call_log_granted,
        )
    } else {
        log::warn!("Contacts access not granted, favorites omitted");
        Vec::new()
    };

    let recent_entries = if settings.sort_mode == SortMode::FavoritesPlusRecents {
        recents::load_recents(
            contacts,
            call_log,
            permissions.contacts_granted,
            permissions.call_log_granted,
        )
    } else {
        Vec::new()
    };

    merge(
        favorite_entries,
        recent_entries,
        settings,
        Utc::now().timestamp_millis(),
    )
}

/// Pure merge/filter stage. `now_millis` is passed in so the age filter is
/// deterministic under test.
pub fn merge(
    favorite_entries: Vec<WidgetEntry>,
    recent_entries: Vec<(WidgetEntry, i64)>,
    settings: &WidgetSettings,
    now_millis: i64,
) -> Vec<WidgetEntry> {
    let favorite_ids: HashSet<i64> = favorite_entries
        .iter()
        .filter(|e| e.contact.is_linked())
        .map(|e| e.contact.contact_id)
        .collect();
    let favorite_numbers: HashSet<String> = favorite_entries
        .iter()
        .filter_map(|e| e.phone_number.as_deref())
        .map(normalize_number)
        .filter(|key| !key.is_empty())
        .collect();

    // A favorite that was re-contacted must not show up twice.
    let mut survivors: Vec<(WidgetEntry, i64)> = recent_entries
        .into_iter()
        .filter(|(entry, _)| {
            if entry.contact.is_linked() && favorite_ids.contains(&entry.contact.contact_id) {
                return false;
            }
            match entry.phone_number.as_deref() {
                Some(number) => !favorite_numbers.contains(&normalize_number(number)),
                None => true,
            }
        })
        .collect();

    if settings.filter_old_unknown {
        let threshold = now_millis - OLD_UNKNOWN_MAX_AGE_MILLIS;
        survivors.retain(|(entry, timestamp)| entry.contact.is_linked() || *timestamp >= threshold);
    }

    let mut result = favorite_entries;
    result.extend(survivors.into_iter().map(|(entry, _)| entry));

    if !settings.show_unknown_callers {
        result.retain(|entry| entry.contact.is_linked());
    }

    result.truncate(settings.max_items);
    result
}
