//! Theme and widget appearance

use serde::{Deserialize, Serialize};

/// Light/dark preference. Persisted as `"light"` / `"dark"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Startup theme: a stored preference wins, then the OS preference.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored.map(str::trim) {
            Some("dark") => Self::Dark,
            Some("light") => Self::Light,
            _ if prefers_dark => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Colours handed to the payment widget for this theme
    pub const fn appearance(self) -> Appearance {
        match self {
            Self::Light => Appearance {
                color_action: ACTION_BLUE,
                color_background: "#FFFFFF",
                color_border: "#DDDDDD",
                color_form_background: "#FFFFFF",
                color_form_border: "#DDDDDD",
                color_inverse: "#000000",
            },
            Self::Dark => Appearance {
                color_action: ACTION_BLUE,
                color_background: "#0A0A0C",
                color_border: "#68686C",
                color_form_background: "#1F1F1F",
                color_form_border: "#1F1F1F",
                color_inverse: "#F9F9FB",
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const ACTION_BLUE: &str = "#2F6AF7";

/// Widget colour overrides, serialized in the widget library's option names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub color_action: &'static str,
    pub color_background: &'static str,
    pub color_border: &'static str,
    pub color_form_background: &'static str,
    pub color_form_border: &'static str,
    pub color_inverse: &'static str,
}
