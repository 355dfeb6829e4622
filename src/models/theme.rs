use serde::{Deserialize, Serialize};

/// Binary light/dark theme flag read from the host.
///
/// Only consulted as the last step of background resolution, when neither the
/// content root nor the application shell reports a usable background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// True for dark themes.
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}
