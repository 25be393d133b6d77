// crates/podium-config/src/config.rs
// ============================================================================
// Module: Podium Configuration
// Description: Configuration loading and validation for Podium.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing keys take documented defaults; invalid values fail closed so the
//! server never starts with a half-understood configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "podium.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "PODIUM_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default script resource directory relative to the working directory.
pub(crate) const DEFAULT_SCRIPT_DIR: &str = "scripts";
/// Default interpreter binary resolved via `PATH`.
pub(crate) const DEFAULT_OSASCRIPT_PATH: &str = "osascript";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Podium MCP configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodiumConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Automation interpreter configuration.
    #[serde(default)]
    pub automation: AutomationConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl PodiumConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then the `PODIUM_CONFIG`
    /// environment variable, then `podium.toml` in the working directory.
    /// A missing file at the default location yields the default config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some() || env::var(CONFIG_ENV_VAR).is_ok();
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.automation.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// Server transport and limits configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Transport type for MCP.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        match (&self.transport, &self.bind) {
            (ServerTransport::Http, None) => Err(ConfigError::Invalid(
                "server.bind is required for http transport".to_string(),
            )),
            (_, Some(bind)) => {
                bind.parse::<SocketAddr>().map_err(|_| {
                    ConfigError::Invalid(format!("server.bind is not a socket address: {bind}"))
                })?;
                Ok(())
            }
            (ServerTransport::Stdio, None) => Ok(()),
        }
    }
}

/// Supported MCP transport types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Use stdin/stdout transport.
    #[default]
    Stdio,
    /// Use HTTP JSON-RPC transport.
    Http,
}

/// Automation interpreter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutomationConfig {
    /// Interpreter binary path or name resolved via `PATH`.
    #[serde(default = "default_osascript_path")]
    pub osascript_path: String,
    /// Script resource directory holding routine files.
    #[serde(default = "default_script_dir")]
    pub script_dir: String,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            osascript_path: default_osascript_path(),
            script_dir: default_script_dir(),
        }
    }
}

impl AutomationConfig {
    /// Validates interpreter and resource-directory settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("automation.osascript_path", &self.osascript_path)?;
        validate_path_string("automation.script_dir", &self.script_dir)?;
        Ok(())
    }

    /// Returns the script directory as a path.
    #[must_use]
    pub fn script_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.script_dir)
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Enable structured audit logging.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when omitted.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} component too long")));
        }
    }
    Ok(())
}

/// Default maximum request body size.
pub(crate) const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default audit logging switch.
pub(crate) const fn default_audit_enabled() -> bool {
    true
}

/// Default interpreter binary.
pub(crate) fn default_osascript_path() -> String {
    DEFAULT_OSASCRIPT_PATH.to_string()
}

/// Default script resource directory.
pub(crate) fn default_script_dir() -> String {
    DEFAULT_SCRIPT_DIR.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
