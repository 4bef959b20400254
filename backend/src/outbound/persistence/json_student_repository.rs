//! JSON-file-backed student repository.
//!
//! The whole collection lives in a single human-readable JSON array that is
//! read in full on every load and rewritten in full on every save. Reads are
//! fail-open: a missing or unreadable file yields an empty collection. Saves
//! are staged to a temporary file in the same directory and renamed over the
//! target so a crash mid-write cannot truncate the stored collection.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::warn;

use crate::domain::Student;
use crate::domain::ports::{StudentRepository, StudentRepositoryError};

/// Student repository persisting to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonStudentRepository {
    directory: PathBuf,
    file_name: PathBuf,
    staging_name: PathBuf,
}

impl JsonStudentRepository {
    /// Create a repository for the given file path.
    ///
    /// The parent directory is created when missing so the first save does
    /// not have to.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StudentRepositoryError> {
        let path = path.into();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| StudentRepositoryError::write("store path must name a file"))?;
        let mut staging_name = file_name.clone().into_os_string();
        staging_name.push(".tmp");

        Dir::create_ambient_dir_all(&directory, ambient_authority())
            .map_err(|error| StudentRepositoryError::write(error.to_string()))?;

        Ok(Self {
            directory,
            file_name,
            staging_name: PathBuf::from(staging_name),
        })
    }

    fn open_directory(&self) -> io::Result<Dir> {
        Dir::open_ambient_dir(&self.directory, ambient_authority())
    }

    fn read_document(&self) -> io::Result<String> {
        self.open_directory()?.read_to_string(&self.file_name)
    }
}

#[async_trait]
impl StudentRepository for JsonStudentRepository {
    async fn load(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let document = match self.read_document() {
            Ok(document) => document,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                warn!(path = %self.directory.join(&self.file_name).display(), %error,
                    "student store unreadable, treating as empty");
                return Ok(Vec::new());
            }
        };
        match serde_json::from_str(&document) {
            Ok(students) => Ok(students),
            Err(error) => {
                warn!(path = %self.directory.join(&self.file_name).display(), %error,
                    "student store malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, students: &[Student]) -> Result<(), StudentRepositoryError> {
        let document = serde_json::to_vec_pretty(students)
            .map_err(|error| StudentRepositoryError::serialization(error.to_string()))?;

        let write_error = |error: io::Error| StudentRepositoryError::write(error.to_string());
        let directory = self.open_directory().map_err(write_error)?;
        directory
            .write(&self.staging_name, &document)
            .map_err(write_error)?;
        replace_file(&directory, &self.staging_name, &self.file_name).map_err(write_error)
    }
}

fn replace_file(directory: &Dir, from: &Path, to: &Path) -> io::Result<()> {
    match directory.remove_file(to) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    directory.rename(from, directory, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Course;

    fn repository(dir: &tempfile::TempDir) -> JsonStudentRepository {
        JsonStudentRepository::new(dir.path().join("students.json")).expect("repository")
    }

    #[tokio::test]
    async fn missing_file_loads_as_an_empty_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = repository(&dir).load().await.expect("load");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn malformed_content_loads_as_an_empty_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("students.json"), b"not json").expect("write");
        let loaded = repository(&dir).load().await.expect("load");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn saved_collections_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = repository(&dir);

        let mut student = Student::new(1, "Ana", "a@x.com");
        student.add_course(Course::new(7).with_detail("name", "Algebra"));
        repository.save(&[student.clone()]).await.expect("save");

        let loaded = repository.load().await.expect("load");
        assert_eq!(loaded, vec![student]);
    }

    #[tokio::test]
    async fn save_replaces_prior_content_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = repository(&dir);

        repository
            .save(&[Student::new(1, "Ana", "a@x.com")])
            .await
            .expect("first save");
        repository.save(&[]).await.expect("second save");

        let loaded = repository.load().await.expect("load");
        assert!(loaded.is_empty());
        assert!(!dir.path().join("students.json.tmp").exists());
    }

    #[tokio::test]
    async fn stored_document_is_indented_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = repository(&dir);
        repository
            .save(&[Student::new(1, "Ana", "a@x.com")])
            .await
            .expect("save");

        let document =
            std::fs::read_to_string(dir.path().join("students.json")).expect("read back");
        assert!(document.contains('\n'));
        assert!(document.contains("\"selectedCourses\""));
    }

    #[tokio::test]
    async fn missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("data").join("students.json");
        let repository = JsonStudentRepository::new(&nested).expect("repository");
        repository
            .save(&[Student::new(1, "Ana", "a@x.com")])
            .await
            .expect("save");
        assert!(nested.exists());
    }
}
