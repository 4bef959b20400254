//! Static course catalog.
//!
//! The catalog is an immutable mapping from major name to an ordered list of
//! courses. It is loaded once at process start, either from the document
//! compiled into the binary or from a configured override file, and never
//! mutated afterwards.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::student::Course;

/// Catalog document shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../fixtures/catalog.json");

/// One major and its courses, in catalog declaration order.
#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    major: String,
    courses: Vec<Course>,
}

/// Errors raised while loading a catalog override file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The override file could not be read.
    #[error("catalog file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not a valid catalog.
    #[error("catalog document is not valid JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// Immutable major-to-courses mapping.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    entries: Vec<CatalogEntry>,
}

impl CourseCatalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str(document)?;
        Ok(Self { entries })
    }

    /// Catalog compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_CATALOG)
            .unwrap_or_else(|error| panic!("embedded catalog must parse: {error}"))
    }

    /// Load a catalog override from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let read_error = |source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "catalog path must be a file",
            ))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let document = dir
            .read_to_string(Path::new(file_name))
            .map_err(read_error)?;
        Ok(Self::from_json(&document)?)
    }

    /// Major names in declaration order.
    pub fn majors(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.major.clone()).collect()
    }

    /// Every course across all majors, each annotated with its owning major.
    ///
    /// Order is majors in declaration order, then courses within each major.
    pub fn all_courses(&self) -> Vec<Course> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry.courses.iter().map(|course| {
                    let mut annotated = course.clone();
                    annotated
                        .details
                        .insert("major".to_owned(), Value::String(entry.major.clone()));
                    annotated
                })
            })
            .collect()
    }

    /// Courses for a single major, by exact name.
    pub fn courses_for(&self, major: &str) -> Option<&[Course]> {
        self.entries
            .iter()
            .find(|entry| entry.major == major)
            .map(|entry| entry.courses.as_slice())
    }
}
