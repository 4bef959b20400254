//! HTTP server configuration object and helpers.

use std::path::PathBuf;

use crate::domain::{CatalogError, CourseCatalog};

use super::settings::Settings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) data_file: PathBuf,
    pub(crate) catalog: CourseCatalog,
}

impl ServerConfig {
    /// Construct a configuration with the embedded catalog.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, data_file: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            data_file: data_file.into(),
            catalog: CourseCatalog::embedded(),
        }
    }

    /// Replace the catalog the server will serve.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CourseCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Build a configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when a configured catalog override cannot be
    /// read or parsed. A broken override fails startup rather than silently
    /// serving the embedded catalog.
    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        let catalog = match settings.catalog_file() {
            Some(path) => CourseCatalog::load(path)?,
            None => CourseCatalog::embedded(),
        };
        Ok(Self::new(settings.host(), settings.port(), settings.data_file()).with_catalog(catalog))
    }

    /// Address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
