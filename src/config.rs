use crate::ip::Alignment;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Default password used for console, enable, and enable secret
pub const DEFAULT_PASSWORD: &str = "cisco";

/// Default message-of-the-day banner on routers
pub const DEFAULT_BANNER: &str = "Authorized personnel only";

/// Delimiter wrapped around the banner text in `banner motd`
pub const BANNER_DELIMITER: char = '#';

/// Top-level configuration. Every section is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub allocation: AllocationConfig,
    pub router: RouterConfig,
    pub rip: RipConfig,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let passwords = [
            ("console_password", &self.router.console_password),
            ("enable_password", &self.router.enable_password),
            ("enable_secret", &self.router.enable_secret),
        ];
        for (field, value) in passwords {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidRouter(format!("{} cannot be empty", field)));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ValidationError::InvalidRouter(format!(
                    "{} cannot contain whitespace",
                    field
                )));
            }
        }

        if self.router.banner.trim().is_empty() {
            return Err(ValidationError::InvalidRouter("banner cannot be empty".to_string()));
        }
        if self.router.banner.contains(BANNER_DELIMITER) || self.router.banner.contains('\n') {
            return Err(ValidationError::InvalidRouter(format!(
                "banner cannot contain '{}' or line breaks",
                BANNER_DELIMITER
            )));
        }

        if !matches!(self.rip.version, 1 | 2) {
            return Err(ValidationError::InvalidRip(format!(
                "unsupported RIP version {}, expected 1 or 2",
                self.rip.version
            )));
        }

        if let Some(level) = &self.general.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ValidationError::InvalidGeneral(format!("unknown log_level '{}'", level)));
            }
        }

        Ok(())
    }
}

/// Shared general configuration
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Address space settings
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationConfig {
    /// Base address used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_address: Option<Ipv4Addr>,
    pub alignment: Alignment,
}

/// Router hardening preamble settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    pub console_password: String,
    pub enable_password: String,
    pub enable_secret: String,
    pub banner: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            console_password: DEFAULT_PASSWORD.to_string(),
            enable_password: DEFAULT_PASSWORD.to_string(),
            enable_secret: DEFAULT_PASSWORD.to_string(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

/// Switch RIP process settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RipConfig {
    pub version: u8,
    pub auto_summary: bool,
}

impl Default for RipConfig {
    fn default() -> Self {
        RipConfig {
            version: 2,
            auto_summary: false,
        }
    }
}

/// Validation error for configuration
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid router configuration: {0}")]
    InvalidRouter(String),
    #[error("Invalid RIP configuration: {0}")]
    InvalidRip(String),
}
