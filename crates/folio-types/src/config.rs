//! Terminal configuration and portfolio profile.
//!
//! Everything is optional in `folio.toml`; missing fields fall back to the
//! defaults below and the embedded profile.

use std::path::Path;

use serde::Deserialize;

use crate::error::{FolioError, Result};

/// Built-in profile manifest.
const DEFAULT_PROFILE: &str = include_str!("../profiles/default.toml");

/// Top-level configuration for a terminal session and its host.
#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    /// Theme active when the session starts.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Prefix echoed in front of submitted commands.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Whether the session opens with the welcome banner.
    #[serde(default = "default_true")]
    pub welcome_banner: bool,
    /// Host frame period in milliseconds (drives script timing).
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u32,
    /// Portfolio owner. `None` uses the embedded profile.
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            prompt: default_prompt(),
            welcome_banner: true,
            frame_ms: default_frame_ms(),
            profile: None,
        }
    }
}

impl FolioConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(src)?;
        if config.frame_ms == 0 {
            return Err(FolioError::Config("frame_ms must be positive".to_string()));
        }
        Ok(config)
    }

    /// Load a configuration file, or the defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::debug!("No config at {} -- using defaults", path.display());
            return Ok(Self::default());
        }
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&src)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The configured profile, or the embedded one.
    pub fn resolve_profile(&self) -> Result<Profile> {
        match &self.profile {
            Some(profile) => Ok(profile.clone()),
            None => Profile::builtin(),
        }
    }
}

fn default_theme() -> String {
    "dracula".to_string()
}
fn default_prompt() -> String {
    "> ".to_string()
}
fn default_true() -> bool {
    true
}
fn default_frame_ms() -> u32 {
    16
}

/// The person the portfolio is about.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub experience: String,
    /// Shared social handle, e.g. "@someone".
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub motto: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub stack: Vec<StackArea>,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// One line of the "full stack" summary.
#[derive(Debug, Clone, Deserialize)]
pub struct StackArea {
    pub area: String,
    pub items: String,
}

/// A named external link (`open github`).
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileLink {
    /// Short name accepted by `open`.
    pub name: String,
    /// Display label for `contact`.
    pub label: String,
    pub url: String,
    /// Extra short names for the same link.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ProfileLink {
    /// Whether `target` names this link, ignoring case on both sides.
    pub fn matches(&self, target: &str) -> bool {
        let target = target.to_lowercase();
        self.name.to_lowercase() == target
            || self.aliases.iter().any(|a| a.to_lowercase() == target)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGroup {
    pub group: String,
    pub entries: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency 0-100; skills without a level render as plain bullets.
    #[serde(default)]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tech: String,
}

impl Profile {
    /// Parse the profile embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_PROFILE)
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(src)?;
        if let Some(skill) = profile
            .skills
            .iter()
            .flat_map(|g| &g.entries)
            .find(|s| s.level.is_some_and(|l| l > 100))
        {
            return Err(FolioError::Config(format!(
                "skill level above 100: {}",
                skill.name
            )));
        }
        Ok(profile)
    }

    /// Resolve a short link name (case-insensitive).
    pub fn link(&self, target: &str) -> Option<&ProfileLink> {
        self.links.iter().find(|l| l.matches(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profile_parses() {
        let profile = Profile::builtin().unwrap();
        assert!(!profile.name.is_empty());
        assert!(profile.link("github").is_some());
        assert!(!profile.skills.is_empty());
        assert!(!profile.projects.is_empty());
    }

    #[test]
    fn link_aliases_resolve() {
        let profile = Profile::builtin().unwrap();
        let github = profile.link("github").unwrap();
        let git = profile.link("GIT").unwrap();
        assert_eq!(github.url, git.url);
        assert!(profile.link("myspace").is_none());
    }

    #[test]
    fn mixed_case_link_names_resolve() {
        let profile = Profile::from_toml_str(
            r#"
name = "Ada"
role = "Engineer"

[[links]]
name = "GitHub"
label = "GitHub"
url = "https://github.com/ada"
aliases = ["Repo", "ÉCOLE"]
"#,
        )
        .unwrap();
        for target in ["github", "GITHUB", "GitHub", "repo", "école"] {
            let link = profile.link(target);
            assert_eq!(link.map(|l| l.url.as_str()), Some("https://github.com/ada"), "{target}");
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = FolioConfig::from_toml_str("").unwrap();
        assert_eq!(config.theme, "dracula");
        assert_eq!(config.prompt, "> ");
        assert!(config.welcome_banner);
        assert_eq!(config.frame_ms, 16);
        assert!(config.profile.is_none());
    }

    #[test]
    fn config_overrides() {
        let config = FolioConfig::from_toml_str(
            r#"
theme = "nord"
prompt = "$ "
welcome_banner = false

[profile]
name = "Ada"
role = "Engineer"
"#,
        )
        .unwrap();
        assert_eq!(config.theme, "nord");
        assert_eq!(config.prompt, "$ ");
        assert!(!config.welcome_banner);
        let profile = config.resolve_profile().unwrap();
        assert_eq!(profile.name, "Ada");
        assert!(profile.links.is_empty());
    }

    #[test]
    fn zero_frame_period_rejected() {
        let err = FolioConfig::from_toml_str("frame_ms = 0").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn skill_level_out_of_range_rejected() {
        let src = r#"
name = "Ada"
role = "Engineer"

[[skills]]
group = "Math"
entries = [{ name = "Engines", level = 120 }]
"#;
        assert!(Profile::from_toml_str(src).is_err());
    }

    #[test]
    fn missing_config_file_is_default() {
        let config = FolioConfig::load(Path::new("/nonexistent/folio.toml")).unwrap();
        assert_eq!(config.theme, "dracula");
    }
}
