use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    FavoritesOnly,
    FavoritesPlusRecents,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetSettings {
    #[serde(default = "default_sort_mode")]
    pub sort_mode: SortMode,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_show_unknown_callers")]
    pub show_unknown_callers: bool,
    #[serde(default)]
    pub filter_old_unknown: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            sort_mode: default_sort_mode(),
            max_items: default_max_items(),
            show_unknown_callers: default_show_unknown_callers(),
            filter_old_unknown: false,
        }
    }
}

fn default_sort_mode() -> SortMode {
    SortMode::FavoritesPlusRecents
}

fn default_max_items() -> usize {
    12
}

fn default_show_unknown_callers() -> bool {
    true
}

/// Runtime permission state, as reported by the host. The engines never
/// query a source whose permission flag is off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Permissions {
    pub contacts_granted: bool,
    pub call_log_granted: bool,
}

impl Permissions {
    pub fn all_granted() -> Self {
        Self {
            contacts_granted: true,
            call_log_granted: true,
        }
    }
}
