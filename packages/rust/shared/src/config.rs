//! Application configuration for sheetsite.
//!
//! User config lives at `~/.sheetsite/sheetsite.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SheetsiteError};
use crate::types::SectionKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sheetsite.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sheetsite";

/// Published spreadsheet shared by most home page tabs.
const PUBLISHED_SHEET: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTYKQwKNfKrrKl6J91u7X26Yr8cQxsalFeHIjnZfxjDaHcgS5JYPn_KzHt5naz_-yFXfLidX96gr_yg/pub";

// ---------------------------------------------------------------------------
// Config structs (matching sheetsite.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Sheet export URL per section.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Citizen feedback endpoint.
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// `[sources]` section. An empty URL means the section is not published
/// and always serves its fallback table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_hero_url")]
    pub hero: String,
    #[serde(default = "default_biography_url")]
    pub biography: String,
    #[serde(default = "default_profile_url")]
    pub profile: String,
    #[serde(default = "default_laws_url")]
    pub laws: String,
    #[serde(default = "default_achievements_url")]
    pub achievements: String,
    #[serde(default = "default_initiatives_url")]
    pub initiatives: String,
    #[serde(default = "default_agenda_url")]
    pub agenda: String,
    #[serde(default)]
    pub projects: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            hero: default_hero_url(),
            biography: default_biography_url(),
            profile: default_profile_url(),
            laws: default_laws_url(),
            achievements: default_achievements_url(),
            initiatives: default_initiatives_url(),
            agenda: default_agenda_url(),
            projects: String::new(),
        }
    }
}

fn published_tab(gid: &str) -> String {
    format!("{PUBLISHED_SHEET}?gid={gid}&single=true&output=csv")
}

fn default_hero_url() -> String {
    published_tab("1530434330")
}
fn default_biography_url() -> String {
    format!("{PUBLISHED_SHEET}?output=csv")
}
fn default_profile_url() -> String {
    "https://docs.google.com/spreadsheets/d/1eYERExfcLuzh_VYgByaDNgCj_6Pzm4WHlrLm5oL-pxQ/export?format=csv&gid=1612750821".into()
}
fn default_laws_url() -> String {
    published_tab("809219241")
}
fn default_achievements_url() -> String {
    published_tab("57984147")
}
fn default_initiatives_url() -> String {
    published_tab("604408329")
}
fn default_agenda_url() -> String {
    published_tab("2020873782")
}

impl SourcesConfig {
    /// Raw configured URL for a section (may be empty).
    pub fn raw(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Hero => &self.hero,
            SectionKind::Biography => &self.biography,
            SectionKind::Profile => &self.profile,
            SectionKind::Laws => &self.laws,
            SectionKind::Achievements => &self.achievements,
            SectionKind::Initiatives => &self.initiatives,
            SectionKind::Agenda => &self.agenda,
            SectionKind::Projects => &self.projects,
        }
    }

    /// Parsed URL for a section, `None` when the section is unpublished.
    pub fn url_for(&self, kind: SectionKind) -> Result<Option<Url>> {
        let raw = self.raw(kind).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Url::parse(raw).map(Some).map_err(|e| {
            SheetsiteError::config(format!("invalid URL for section '{kind}': {e}"))
        })
    }

    /// Override the URL for one section.
    pub fn set(&mut self, kind: SectionKind, url: impl Into<String>) {
        let url = url.into();
        match kind {
            SectionKind::Hero => self.hero = url,
            SectionKind::Biography => self.biography = url,
            SectionKind::Profile => self.profile = url,
            SectionKind::Laws => self.laws = url,
            SectionKind::Achievements => self.achievements = url,
            SectionKind::Initiatives => self.initiatives = url,
            SectionKind::Agenda => self.agenda = url,
            SectionKind::Projects => self.projects = url,
        }
    }
}

/// `[feedback]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Endpoint receiving the multipart feedback form.
    #[serde(default = "default_feedback_endpoint")]
    pub endpoint: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            endpoint: default_feedback_endpoint(),
        }
    }
}

fn default_feedback_endpoint() -> String {
    "https://peachpuff-cod-624982.hostingersite.com/wp-json/buzon/v1/guardar".into()
}

impl FeedbackConfig {
    /// Parsed endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(self.endpoint.trim())
            .map_err(|e| SheetsiteError::config(format!("invalid feedback endpoint: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sheetsite/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SheetsiteError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sheetsite/sheetsite.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SheetsiteError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        SheetsiteError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_at(&config_file_path()?)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| SheetsiteError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SheetsiteError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| SheetsiteError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("timeout_secs"));
        assert!(toml_str.contains("gid=1530434330"));
        assert!(toml_str.contains("buzon/v1/guardar"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.http.timeout_secs, 15);
        assert_eq!(parsed.sources.agenda, config.sources.agenda);
    }

    #[test]
    fn partial_sources_keep_defaults() {
        let toml_str = r#"
[sources]
hero = "http://localhost:9000/hero.csv"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.sources.hero, "http://localhost:9000/hero.csv");
        assert!(config.sources.laws.contains("gid=809219241"));
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn unpublished_section_has_no_url() {
        let sources = SourcesConfig::default();
        assert!(sources.url_for(SectionKind::Projects).unwrap().is_none());
        assert!(sources.url_for(SectionKind::Hero).unwrap().is_some());
    }

    #[test]
    fn invalid_source_url_is_config_error() {
        let mut sources = SourcesConfig::default();
        sources.set(SectionKind::Agenda, "not a url");
        let err = sources.url_for(SectionKind::Agenda).unwrap_err();
        assert!(err.to_string().contains("agenda"));
    }

    #[test]
    fn init_config_at_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("sheetsite-config-{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE_NAME);
        init_config_at(&path).expect("init config");
        let loaded = load_config_from(&path).expect("load config");
        assert_eq!(loaded.http.timeout_secs, 15);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_location_is_under_home() {
        let path = config_file_path().expect("config path");
        assert!(path.ends_with(Path::new(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)));

        // Without a user file the default location resolves to defaults.
        if !path.exists() {
            let config = load_config().expect("defaults");
            assert_eq!(config.http.timeout_secs, 15);
        }
    }
}
