//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from the command line or from `EDUTUTOR_`-prefixed
//! environment variables; accessors supply the defaults the original
//! deployment used.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_DATA_FILE: &str = "data/students.json";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration surface: listener address, data file locations, and the
/// environment name used in startup logging.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EDUTUTOR")]
pub struct Settings {
    /// Port the HTTP listener binds.
    pub port: Option<u16>,
    /// Host the HTTP listener binds.
    pub host: Option<String>,
    /// Path of the students JSON file.
    pub data_file: Option<PathBuf>,
    /// Optional catalog document overriding the embedded one.
    pub catalog_file: Option<PathBuf>,
    /// Deployment environment name.
    pub environment: Option<String>,
}

impl Settings {
    /// Listener port, falling back to the original default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Listener host, falling back to loopback.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Students file path, falling back to the conventional location.
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Catalog override path, when configured.
    pub fn catalog_file(&self) -> Option<&Path> {
        self.catalog_file.as_deref()
    }

    /// Environment name, falling back to development.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }
}
