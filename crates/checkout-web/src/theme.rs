//! Theme persistence and document styling

use checkout_core::Theme;
use web_sys::Storage;

const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";
const THEME_ATTRIBUTE: &str = "data-theme";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// Stored preference, else the OS colour scheme
pub fn load() -> Theme {
    let stored = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    Theme::resolve(stored.as_deref(), prefers_dark())
}

pub fn persist(theme: Theme) {
    let Some(storage) = storage() else {
        return;
    };
    if storage.set_item(STORAGE_KEY, theme.as_str()).is_err() {
        tracing::warn!(%theme, "Could not persist theme");
    }
}

/// Set the `dark` class and `data-theme` attribute on `<html>`
pub fn apply(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let result = if theme.is_dark() {
        root.class_list()
            .add_1(DARK_CLASS)
            .and_then(|()| root.set_attribute(THEME_ATTRIBUTE, theme.as_str()))
    } else {
        root.class_list()
            .remove_1(DARK_CLASS)
            .and_then(|()| root.remove_attribute(THEME_ATTRIBUTE))
    };

    if result.is_err() {
        tracing::warn!(%theme, "Could not apply theme to document");
    }
}
