//! Terminal theme -- the color palette for one named scheme.
//!
//! Loaded from a `[[theme]]` entry. Colors are kept as hex strings in the
//! manifest and parsed once when the table is built.

use serde::Deserialize;

use folio_types::color::{Color, parse_hex_color};
use folio_types::error::{FolioError, Result};
use folio_types::line::LineKind;

/// Manifest form of a theme, as written in TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeDef {
    /// Lowercase key accepted by `theme <key>`.
    pub key: String,
    /// Human-readable name shown in the terminal header.
    pub name: String,
    pub background: String,
    pub text: String,
    pub prompt: String,
    pub input: String,
    pub error: String,
    pub success: String,
    pub info: String,
    pub border: String,
}

/// A resolved color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub key: String,
    pub display_name: String,
    pub background: Color,
    /// Default text color (`Output` lines).
    pub text: Color,
    pub prompt: Color,
    pub input: Color,
    pub error: Color,
    pub success: Color,
    pub info: Color,
    pub border: Color,
}

impl Theme {
    /// Color used to render a line of the given kind.
    pub fn color_for(&self, kind: LineKind) -> Color {
        match kind {
            LineKind::Input => self.input,
            LineKind::Error => self.error,
            LineKind::Success => self.success,
            LineKind::Info => self.info,
            LineKind::Output => self.text,
        }
    }
}

impl TryFrom<ThemeDef> for Theme {
    type Error = FolioError;

    fn try_from(def: ThemeDef) -> Result<Self> {
        let key = def.key.to_lowercase();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(FolioError::Theme(format!("invalid theme key: '{}'", def.key)));
        }
        let color = |field: &str, value: &str| {
            parse_hex_color(value).ok_or_else(|| {
                FolioError::Theme(format!("{key}.{field}: invalid color '{value}'"))
            })
        };
        Ok(Theme {
            background: color("background", &def.background)?,
            text: color("text", &def.text)?,
            prompt: color("prompt", &def.prompt)?,
            input: color("input", &def.input)?,
            error: color("error", &def.error)?,
            success: color("success", &def.success)?,
            info: color("info", &def.info)?,
            border: color("border", &def.border)?,
            display_name: def.name,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(error: &str) -> ThemeDef {
        ThemeDef {
            key: "Test".to_string(),
            name: "Test Theme".to_string(),
            background: "#000000".to_string(),
            text: "#FFFFFF".to_string(),
            prompt: "#00FF00".to_string(),
            input: "#00FFFF".to_string(),
            error: error.to_string(),
            success: "#00FF00".to_string(),
            info: "#0000FF".to_string(),
            border: "#333333".to_string(),
        }
    }

    #[test]
    fn resolves_colors_and_lowercases_key() {
        let theme = Theme::try_from(def("#FF0000")).unwrap();
        assert_eq!(theme.key, "test");
        assert_eq!(theme.display_name, "Test Theme");
        assert_eq!(theme.error, Color::rgb(255, 0, 0));
    }

    #[test]
    fn invalid_color_names_field() {
        let err = Theme::try_from(def("red")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("test.error"), "{msg}");
    }

    #[test]
    fn invalid_key_rejected() {
        let mut d = def("#FF0000");
        d.key = "two words".to_string();
        assert!(Theme::try_from(d).is_err());
    }

    #[test]
    fn color_for_each_kind() {
        let theme = Theme::try_from(def("#FF0000")).unwrap();
        assert_eq!(theme.color_for(LineKind::Error), theme.error);
        assert_eq!(theme.color_for(LineKind::Success), theme.success);
        assert_eq!(theme.color_for(LineKind::Info), theme.info);
        assert_eq!(theme.color_for(LineKind::Input), theme.input);
        assert_eq!(theme.color_for(LineKind::Output), theme.text);
    }
}
