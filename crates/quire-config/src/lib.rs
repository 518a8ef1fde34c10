//! Configuration management for quire.
//!
//! Parses `quire.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//! Build contexts can also be read from an `mkdocs.yml` via [`MkdocsSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.site_url`
//! - `server.host`
//! - `chat.api_key`
//! - `chat.endpoint`

mod expand;
mod mkdocs;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use mkdocs::MkdocsSettings;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override documentation source directory.
    pub docs_dir: Option<PathBuf>,
    /// Override build output directory.
    pub site_dir: Option<PathBuf>,
    /// Override site base URL.
    pub site_url: Option<String>,
    /// Override upstream API key.
    pub api_key: Option<String>,
    /// Override system instruction placement.
    pub system_instruction: Option<SystemInstructionMode>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Default upstream endpoint for the Gemini REST API.
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Index generation configuration.
    pub index: IndexConfig,
    /// Chat proxy configuration.
    pub chat: ChatConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    docs_dir: Option<String>,
    site_dir: Option<String>,
    site_url: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub docs_dir: PathBuf,
    /// Build output directory (where `content.json` lands).
    pub site_dir: PathBuf,
    /// Base URL of the published site. May be empty.
    pub site_url: String,
}

/// Index generation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Document file extension, without the leading dot.
    pub extension: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            extension: "md".to_owned(),
        }
    }
}

/// Where an optional system instruction goes in the upstream request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemInstructionMode {
    /// Prepend the instruction to the user message text.
    #[default]
    Prefix,
    /// Send the instruction as the upstream model's system instruction.
    Native,
}

impl std::str::FromStr for SystemInstructionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(Self::Prefix),
            "native" => Ok(Self::Native),
            other => Err(ConfigError::Validation(format!(
                "chat.system_instruction must be \"prefix\" or \"native\", got \"{other}\""
            ))),
        }
    }
}

/// Chat proxy configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Upstream API key. Empty means unset.
    api_key: Option<String>,
    /// Placement of the client-supplied system instruction.
    pub system_instruction: SystemInstructionMode,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
    /// Upstream API base URL.
    pub endpoint: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            system_instruction: SystemInstructionMode::default(),
            timeout_secs: 60,
            endpoint: DEFAULT_CHAT_ENDPOINT.to_owned(),
        }
    }
}

impl ChatConfig {
    /// Upstream API key, if one is configured and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// YAML parsing error (mkdocs.yml).
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`chat.api_key`").
        field: String,
        /// Error message (e.g., "${`GEMINI_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(site_dir) = &settings.site_dir {
            self.docs_resolved.site_dir.clone_from(site_dir);
        }
        if let Some(site_url) = &settings.site_url {
            self.docs_resolved.site_url.clone_from(site_url);
        }
        if let Some(api_key) = &settings.api_key {
            self.chat.api_key = Some(api_key.clone());
        }
        if let Some(mode) = settings.system_instruction {
            self.chat.system_instruction = mode;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            index: IndexConfig::default(),
            chat: ChatConfig::default(),
            docs_resolved: DocsConfig {
                docs_dir: base.join("docs"),
                site_dir: base.join("site"),
                site_url: String::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_index()?;
        self.validate_chat()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate index configuration.
    fn validate_index(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.index.extension, "index.extension")?;
        if self.index.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "index.extension must not start with a dot".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate chat configuration. The API key is optional here: a missing
    /// key is reported per request, not at startup.
    fn validate_chat(&self) -> Result<(), ConfigError> {
        if self.chat.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "chat.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&self.chat.endpoint, "chat.endpoint")?;
        require_http_url(&self.chat.endpoint, "chat.endpoint")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref url) = self.docs.site_url {
            self.docs.site_url = Some(expand::expand_env(url, "docs.site_url")?);
        }

        if let Some(ref key) = self.chat.api_key {
            self.chat.api_key = Some(expand::expand_env(key, "chat.api_key")?);
        }
        self.chat.endpoint = expand::expand_env(&self.chat.endpoint, "chat.endpoint")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            docs_dir: resolve(self.docs.docs_dir.as_deref(), "docs"),
            site_dir: resolve(self.docs.site_dir.as_deref(), "site"),
            site_url: self.docs.site_url.clone().unwrap_or_default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.site_dir, PathBuf::from("/test/site"));
        assert_eq!(config.docs_resolved.site_url, "");
        assert_eq!(config.index.extension, "md");
        assert_eq!(config.chat.timeout_secs, 60);
        assert_eq!(config.chat.endpoint, DEFAULT_CHAT_ENDPOINT);
        assert_eq!(
            config.chat.system_instruction,
            SystemInstructionMode::Prefix
        );
        assert!(config.chat.api_key().is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_chat_config() {
        let toml = r#"
[chat]
api_key = "key-123"
system_instruction = "native"
timeout_secs = 15
endpoint = "http://localhost:9999"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.chat.api_key(), Some("key-123"));
        assert_eq!(
            config.chat.system_instruction,
            SystemInstructionMode::Native
        );
        assert_eq!(config.chat.timeout_secs, 15);
        assert_eq!(config.chat.endpoint, "http://localhost:9999");
    }

    #[test]
    fn test_parse_unknown_system_instruction_mode() {
        let toml = r#"
[chat]
system_instruction = "sideways"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_system_instruction_mode_from_str() {
        assert_eq!(
            "prefix".parse::<SystemInstructionMode>().unwrap(),
            SystemInstructionMode::Prefix
        );
        assert_eq!(
            "native".parse::<SystemInstructionMode>().unwrap(),
            SystemInstructionMode::Native
        );
        assert!("system".parse::<SystemInstructionMode>().is_err());
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let toml = r#"
[chat]
api_key = "   "
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.chat.api_key().is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
docs_dir = "documentation"
site_dir = "public"
site_url = "https://x.io/notes/"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.docs_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.site_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(config.docs_resolved.site_url, "https://x.io/notes/");
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));

        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            site_url: Some("https://x.io".to_owned()),
            api_key: Some("from-cli".to_owned()),
            system_instruction: Some(SystemInstructionMode::Native),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.docs_resolved.site_url, "https://x.io");
        assert_eq!(config.chat.api_key(), Some("from-cli"));
        assert_eq!(
            config.chat.system_instruction,
            SystemInstructionMode::Native
        );
        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/test/docs")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_dirs() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            docs_dir: Some(PathBuf::from("/custom/docs")),
            site_dir: Some(PathBuf::from("/custom/site")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_resolved.site_dir, PathBuf::from("/custom/site"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, config_before.server.host);
        assert_eq!(config.server.port, config_before.server.port);
        assert_eq!(
            config.docs_resolved.docs_dir,
            config_before.docs_resolved.docs_dir
        );
    }

    #[test]
    fn test_expand_env_vars_chat() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_TEST_API_KEY", "secret-key");
            std::env::remove_var("QUIRE_TEST_ENDPOINT");
        }

        let toml = r#"
[chat]
api_key = "${QUIRE_TEST_API_KEY}"
endpoint = "${QUIRE_TEST_ENDPOINT:-http://127.0.0.1:1234}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.chat.api_key(), Some("secret-key"));
        assert_eq!(config.chat.endpoint, "http://127.0.0.1:1234");

        unsafe {
            std::env::remove_var("QUIRE_TEST_API_KEY");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_MISSING_SITE_URL");
        }

        let toml = r#"
[docs]
site_url = "${QUIRE_MISSING_SITE_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("QUIRE_MISSING_SITE_URL"));
        assert!(err.to_string().contains("docs.site_url"));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[docs]
docs_dir = "content"
site_url = "https://x.io"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.docs_dir, temp_dir.path().join("content"));
        assert_eq!(config.docs_resolved.site_dir, temp_dir.path().join("site"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/quire.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_extension_with_dot() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.extension = ".md".to_owned();
        assert_validation_error(&config, &["index.extension", "dot"]);
    }

    #[test]
    fn test_validate_chat_timeout_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.chat.timeout_secs = 0;
        assert_validation_error(&config, &["timeout_secs"]);
    }

    #[test]
    fn test_validate_chat_endpoint_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.chat.endpoint = "ftp://example.com".to_owned();
        assert_validation_error(&config, &["chat.endpoint", "http"]);
    }

    #[test]
    fn test_validate_passes_without_api_key() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.chat.api_key = None;
        assert!(config.validate().is_ok());
    }
}
