//! Domain ports for student persistence.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! The trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning opaque boxed errors.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use super::student::Student;

/// Errors surfaced by a student persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentRepositoryError {
    /// The collection could not be written back.
    #[error("student store write failed: {message}")]
    Write { message: String },
    /// Records could not be serialised for persistence.
    #[error("student record serialisation failed: {message}")]
    Serialization { message: String },
}

impl StudentRepositoryError {
    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Helper for serialisation failures.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Persistence port for the student collection.
///
/// The collection is always read and rewritten as a whole; there are no
/// partial updates. Reads are fail-open: an adapter that cannot produce the
/// stored collection (missing file, malformed content) returns an empty one
/// rather than failing the request. Write failures do propagate.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Read the full persisted collection.
    async fn load(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Replace the persisted collection with `students`.
    async fn save(&self, students: &[Student]) -> Result<(), StudentRepositoryError>;
}

/// In-memory repository used by unit tests and local experiments.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    students: Mutex<Vec<Student>>,
}

impl InMemoryStudentRepository {
    /// Start from an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-seeded collection.
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students: Mutex::new(students),
        }
    }

    /// Copy of the current collection, for assertions.
    pub fn snapshot(&self) -> Vec<Student> {
        self.students
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn load(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.snapshot())
    }

    async fn save(&self, students: &[Student]) -> Result<(), StudentRepositoryError> {
        let mut guard = self
            .students
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = students.to_vec();
        Ok(())
    }
}
