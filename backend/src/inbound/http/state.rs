//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! the domain service and catalog only, and remain testable with an
//! in-memory repository behind the service.

use std::sync::Arc;

use crate::domain::{CourseCatalog, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<RegistrationService>,
    pub catalog: Arc<CourseCatalog>,
}

impl HttpState {
    /// Bundle the registration service and catalog for handler injection.
    pub fn new(registration: Arc<RegistrationService>, catalog: Arc<CourseCatalog>) -> Self {
        Self {
            registration,
            catalog,
        }
    }
}
