//! Domain types and services.
//!
//! Everything here is transport agnostic: the registration logic and the
//! course catalog know nothing about HTTP or files. Inbound adapters map
//! [`Error`] values to protocol envelopes; outbound adapters implement the
//! persistence port in [`ports`].

pub mod catalog;
pub mod error;
pub mod ports;
pub mod registration;
pub mod student;

pub use self::catalog::{CatalogError, CourseCatalog};
pub use self::error::{Error, ErrorCode};
pub use self::registration::{RegistrationOutcome, RegistrationService};
pub use self::student::{Course, EmailAddress, PLACEHOLDER_NAME, Student};
