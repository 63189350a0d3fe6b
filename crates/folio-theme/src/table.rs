//! Static theme table keyed by theme name.

use serde::Deserialize;

use folio_types::error::{FolioError, Result};

use crate::theme::{Theme, ThemeDef};

/// Built-in palettes shipped with the terminal.
const BUILTIN_THEMES: &str = include_str!("../themes/builtin.toml");

#[derive(Deserialize)]
struct ThemeManifest {
    #[serde(default)]
    theme: Vec<ThemeDef>,
}

/// Ordered set of themes. The first entry is the fallback.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    themes: Vec<Theme>,
}

impl ThemeTable {
    /// Parse the built-in palettes.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_THEMES)
    }

    /// Parse a manifest of `[[theme]]` entries.
    pub fn from_toml(src: &str) -> Result<Self> {
        let manifest: ThemeManifest = toml::from_str(src)?;
        let mut themes: Vec<Theme> = Vec::with_capacity(manifest.theme.len());
        for def in manifest.theme {
            let theme = Theme::try_from(def)?;
            if themes.iter().any(|t| t.key == theme.key) {
                return Err(FolioError::Theme(format!("duplicate theme: {}", theme.key)));
            }
            themes.push(theme);
        }
        if themes.is_empty() {
            return Err(FolioError::Theme("theme table is empty".to_string()));
        }
        log::debug!("Loaded {} themes", themes.len());
        Ok(Self { themes })
    }

    /// Look up a theme by key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&Theme> {
        let key = key.to_lowercase();
        self.themes.iter().find(|t| t.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Theme keys in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.key.as_str())
    }

    pub fn fallback(&self) -> &Theme {
        // `from_toml` rejects empty tables.
        &self.themes[0]
    }

    /// Resolve `key`, falling back to the first theme with a warning.
    pub fn get_or_fallback(&self, key: &str) -> &Theme {
        self.get(key).unwrap_or_else(|| {
            let fallback = self.fallback();
            log::warn!("Theme '{key}' not found -- falling back to {}", fallback.key);
            fallback
        })
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
