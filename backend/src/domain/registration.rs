//! Student registration and course merge logic.
//!
//! Every operation reads the full collection through the repository port,
//! mutates it in memory, and writes it back. Mutating operations hold an
//! async mutex for the whole load-modify-save cycle so concurrent requests
//! cannot interleave their cycles and lose updates.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::Error;
use super::ports::{StudentRepository, StudentRepositoryError};
use super::student::{Course, EmailAddress, PLACEHOLDER_NAME, Student};

/// Result of an upsert, distinguishing newly created records from merges.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationOutcome {
    pub student: Student,
    pub created: bool,
}

/// Registration use-cases over a [`StudentRepository`].
pub struct RegistrationService {
    repository: Arc<dyn StudentRepository>,
    write_lock: Mutex<()>,
}

impl RegistrationService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// All persisted students.
    pub async fn list(&self) -> Result<Vec<Student>, Error> {
        self.load_collection().await
    }

    /// Case-insensitive lookup by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Student, Error> {
        let Ok(email) = EmailAddress::new(email) else {
            return Err(Self::student_not_found());
        };
        let students = self.load_collection().await?;
        students
            .into_iter()
            .find(|s| s.matches_email(&email))
            .ok_or_else(Self::student_not_found)
    }

    /// Register a student by name and email.
    ///
    /// A record whose email already matches is returned unchanged; otherwise
    /// a new record with an empty course list is appended and persisted.
    pub async fn register(&self, name: &str, email: &str) -> Result<RegistrationOutcome, Error> {
        const MESSAGE: &str = "Name and email are required";
        if name.trim().is_empty() {
            return Err(Error::invalid_request(MESSAGE));
        }
        let email = EmailAddress::new(email).map_err(|_| Error::invalid_request(MESSAGE))?;

        let _guard = self.write_lock.lock().await;
        let mut students = self.load_collection().await?;
        if let Some(existing) = students.iter().find(|s| s.matches_email(&email)) {
            debug!(
                student_id = existing.id,
                "registration replayed for existing email"
            );
            return Ok(RegistrationOutcome {
                student: existing.clone(),
                created: false,
            });
        }

        let student = Student::new(next_id(&students), name, email.as_str());
        students.push(student.clone());
        self.save_collection(&students).await?;
        info!(student_id = student.id, "student registered");
        Ok(RegistrationOutcome {
            student,
            created: true,
        })
    }

    /// Create a student with an initial course selection, or merge further
    /// courses into an existing record.
    ///
    /// Merging appends only incoming courses whose id is not yet selected,
    /// preserving existing order for prior entries and incoming order among
    /// the new ones. A missing `name` defaults to the placeholder.
    pub async fn complete_registration(
        &self,
        name: Option<&str>,
        email: &str,
        courses: Vec<Course>,
    ) -> Result<RegistrationOutcome, Error> {
        const MESSAGE: &str = "Email and selected courses are required";
        let email = EmailAddress::new(email).map_err(|_| Error::invalid_request(MESSAGE))?;

        let _guard = self.write_lock.lock().await;
        let mut students = self.load_collection().await?;
        if let Some(position) = students.iter().position(|s| s.matches_email(&email)) {
            let appended = students[position].merge_courses(courses);
            self.save_collection(&students).await?;
            debug!(
                student_id = students[position].id,
                appended, "courses merged into existing registration"
            );
            return Ok(RegistrationOutcome {
                student: students[position].clone(),
                created: false,
            });
        }

        let name = name.filter(|n| !n.trim().is_empty()).unwrap_or(PLACEHOLDER_NAME);
        let mut student = Student::new(next_id(&students), name, email.as_str());
        student.merge_courses(courses);
        students.push(student.clone());
        self.save_collection(&students).await?;
        info!(student_id = student.id, "registration completed");
        Ok(RegistrationOutcome {
            student,
            created: true,
        })
    }

    /// Add a single course to a student, creating a placeholder record when
    /// the email is unknown.
    ///
    /// The collection is persisted when it changed: a placeholder creation
    /// counts as a change even when the course itself turns out to be a
    /// duplicate addition.
    pub async fn register_course(&self, email: &str, course: Course) -> Result<Student, Error> {
        const MESSAGE: &str = "Email and course are required";
        let email = EmailAddress::new(email).map_err(|_| Error::invalid_request(MESSAGE))?;

        let _guard = self.write_lock.lock().await;
        let mut students = self.load_collection().await?;
        let (position, created) = match students.iter().position(|s| s.matches_email(&email)) {
            Some(position) => (position, false),
            None => {
                let student = Student::new(next_id(&students), PLACEHOLDER_NAME, email.as_str());
                info!(student_id = student.id, "placeholder student created");
                students.push(student);
                (students.len() - 1, true)
            }
        };

        let added = students[position].add_course(course);
        if created || added {
            self.save_collection(&students).await?;
        }
        Ok(students[position].clone())
    }

    /// Replace a student's course selection wholesale.
    ///
    /// An empty or missing incoming list leaves the selection unchanged; the
    /// collection is persisted either way once the student is found.
    pub async fn update_courses(
        &self,
        id: u64,
        courses: Option<Vec<Course>>,
    ) -> Result<Student, Error> {
        let _guard = self.write_lock.lock().await;
        let mut students = self.load_collection().await?;
        let position = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(Self::student_not_found)?;

        if let Some(courses) = courses.filter(|c| !c.is_empty()) {
            let student = &mut students[position];
            student.selected_courses.clear();
            student.merge_courses(courses);
        }
        self.save_collection(&students).await?;
        Ok(students[position].clone())
    }

    /// Remove a student record and return it.
    pub async fn delete_student(&self, id: u64) -> Result<Student, Error> {
        let _guard = self.write_lock.lock().await;
        let mut students = self.load_collection().await?;
        let position = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(Self::student_not_found)?;

        let removed = students.remove(position);
        self.save_collection(&students).await?;
        info!(student_id = removed.id, "student deleted");
        Ok(removed)
    }

    fn student_not_found() -> Error {
        Error::not_found("Student not found")
    }

    async fn load_collection(&self) -> Result<Vec<Student>, Error> {
        self.repository
            .load()
            .await
            .map_err(map_repository_error)
    }

    async fn save_collection(&self, students: &[Student]) -> Result<(), Error> {
        self.repository
            .save(students)
            .await
            .map_err(map_repository_error)
    }
}

fn map_repository_error(error: StudentRepositoryError) -> Error {
    Error::internal(error.to_string())
}

/// Next identifier under the collection-size scheme.
///
/// Assigned as `len + 1`; deleted ids are not reclaimed, so uniqueness over
/// the record's full history is not guaranteed.
fn next_id(students: &[Student]) -> u64 {
    students.len() as u64 + 1
}
