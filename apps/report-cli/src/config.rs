//! # Report Configuration
//!
//! Where the order store lives, which tenant to report on, and report
//! defaults.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --db ./titan.db --tenant pho-24.example.vn --preset last_week      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TITAN_DB_PATH=./titan.db                                           │
//! │     TITAN_TENANT_DOMAIN=pho-24.example.vn                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/reports/report.toml (Linux)                              │
//! │     ~/Library/Application Support/com.titan.reports/report.toml (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flags are applied by `main`; this module handles 2 to 4.
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [database]
//! path = "/var/lib/titan/titan.db"
//!
//! [tenant]
//! domain = "pho-24.example.vn"
//!
//! [report]
//! default_preset = "this_month"  # today | yesterday | last_week | ...
//! top_products = 5               # 1..=5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use titan_core::validation::validate_tenant_domain;
use titan_core::{DatePreset, DEFAULT_TENANT_DOMAIN, TOP_PRODUCTS_LIMIT};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Sections
// =============================================================================

/// `[database]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding orders and store settings.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "titan", "reports")
        .map(|dirs| dirs.data_dir().join("titan.db"))
        .unwrap_or_else(|| PathBuf::from("titan.db"))
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: default_database_path(),
        }
    }
}

/// `[tenant]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Store domain every fetch is scoped to.
    #[serde(default = "default_tenant_domain")]
    pub domain: String,
}

fn default_tenant_domain() -> String {
    DEFAULT_TENANT_DOMAIN.to_string()
}

impl Default for TenantConfig {
    fn default() -> Self {
        TenantConfig {
            domain: default_tenant_domain(),
        }
    }
}

/// `[report]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Window used when neither `--preset` nor `--start/--end` is given.
    #[serde(default = "default_preset")]
    pub default_preset: DatePreset,

    /// How many ranked products to print.
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

fn default_preset() -> DatePreset {
    DatePreset::Today
}

fn default_top_products() -> usize {
    TOP_PRODUCTS_LIMIT
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            default_preset: default_preset(),
            top_products: default_top_products(),
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

/// Complete `titan-report` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub tenant: TenantConfig,

    #[serde(default)]
    pub report: ReportSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// A missing file at the platform default path is fine; a missing file
    /// the caller named explicitly is an error.
    pub fn load(config_path: Option<&Path>) -> ReportResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ReportError::ConfigLoad(format!(
                        "{} does not exist",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ReportResult<Self> {
        info!(?path, "Loading report config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "database.path must not be empty".into(),
            ));
        }

        validate_tenant_domain(&self.tenant.domain)
            .map_err(|e| ReportError::InvalidConfig(e.to_string()))?;

        if self.report.top_products == 0 || self.report.top_products > TOP_PRODUCTS_LIMIT {
            return Err(ReportError::InvalidConfig(format!(
                "report.top_products must be between 1 and {}, got {}",
                TOP_PRODUCTS_LIMIT, self.report.top_products
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TITAN_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(domain) = var("TITAN_TENANT_DOMAIN") {
            debug!(domain = %domain, "Overriding tenant from environment");
            self.tenant.domain = domain;
        }

        if let Some(preset) = var("TITAN_REPORT_PRESET") {
            match preset.parse() {
                Ok(parsed) => self.report.default_preset = parsed,
                Err(_) => warn!(preset = %preset, "Unknown report preset in environment"),
            }
        }

        if let Some(top) = var("TITAN_TOP_PRODUCTS") {
            match top.parse::<usize>() {
                Ok(n) => self.report.top_products = n,
                Err(_) => warn!(value = %top, "Invalid TITAN_TOP_PRODUCTS in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "titan", "reports")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.tenant.domain, DEFAULT_TENANT_DOMAIN);
        assert_eq!(config.report.default_preset, DatePreset::Today);
        assert_eq!(config.report.top_products, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[database]
path = "/tmp/reports/titan.db"

[tenant]
domain = "pho-24.example.vn"

[report]
default_preset = "last_week"
"#
        )
        .unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/reports/titan.db"));
        assert_eq!(config.tenant.domain, "pho-24.example.vn");
        assert_eq!(config.report.default_preset, DatePreset::LastWeek);
        // Missing keys keep their defaults
        assert_eq!(config.report.top_products, 5);
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tenant]\ndomain = \"bun-cha.example.vn\"").unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tenant.domain, "bun-cha.example.vn");
        assert_eq!(config.report, ReportSettings::default());
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ReportConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ReportError::ConfigLoad(_)));
    }

    #[test]
    fn test_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ndefault_preset = \"fortnight\"").unwrap();
        assert!(matches!(
            ReportConfig::from_file(file.path()),
            Err(ReportError::ConfigLoad(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TITAN_DB_PATH", "/data/titan.db"),
            ("TITAN_TENANT_DOMAIN", "com-tam.example.vn"),
            ("TITAN_REPORT_PRESET", "this-month"),
            ("TITAN_TOP_PRODUCTS", "three"),
        ]);

        let mut config = ReportConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, PathBuf::from("/data/titan.db"));
        assert_eq!(config.tenant.domain, "com-tam.example.vn");
        assert_eq!(config.report.default_preset, DatePreset::ThisMonth);
        // Unparseable values are ignored
        assert_eq!(config.report.top_products, 5);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ReportConfig::default();

        config.report.top_products = 0;
        assert!(config.validate().is_err());
        config.report.top_products = 6;
        assert!(config.validate().is_err());
        config.report.top_products = 3;
        assert!(config.validate().is_ok());

        config.tenant.domain = "bad domain!".to_string();
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidConfig(_))
        ));

        config.tenant.domain = DEFAULT_TENANT_DOMAIN.to_string();
        config.database.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = ReportConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[tenant]"));
        assert!(toml_str.contains("default_preset = \"today\""));

        let back: ReportConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }
}
