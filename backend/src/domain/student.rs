//! Student record and course domain types.
//!
//! A [`Student`] is keyed by a case-insensitive email address and owns an
//! ordered list of selected [`Course`] entries that is unique by course id.
//! Courses are opaque beyond their id: whatever other fields a client or the
//! catalog supplies are carried through serialisation untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Name assigned to students created implicitly, before a real name is known.
pub const PLACEHOLDER_NAME: &str = "Unknown";

/// Validation errors raised when constructing an [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyEmail,
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for StudentValidationError {}

/// Email address used as the student identity key.
///
/// The raw spelling supplied at registration time is preserved; equality
/// against stored records is case-insensitive via [`EmailAddress::matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from raw input.
    pub fn new(email: impl Into<String>) -> Result<Self, StudentValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the raw spelling.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison against another address.
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog or client-supplied course entry.
///
/// Only `id` participates in identity and de-duplication; every other field
/// travels in `details` verbatim. When two entries share an id, the
/// first-inserted copy wins and later duplicates are dropped silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    /// Merge key within a student's selection and across the catalog.
    pub id: u64,
    /// Opaque fields (name, credits, owning major, ...) carried through
    /// serialisation untouched.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub details: Map<String, Value>,
}

impl Course {
    /// Build a course carrying only its id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            details: Map::new(),
        }
    }

    /// Attach an opaque field, replacing any prior value under the key.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Persisted student registration record.
///
/// ## Invariants
/// - At most one record per case-insensitive email in a collection.
/// - `selected_courses` contains no two entries with the same course id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Assigned as collection length + 1 at creation; not reused after
    /// deletion, so uniqueness over the full history is not guaranteed.
    pub id: u64,
    pub name: String,
    pub email: String,
    pub selected_courses: Vec<Course>,
}

impl Student {
    /// Build a new record with no selected courses.
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            selected_courses: Vec::new(),
        }
    }

    /// Case-insensitive identity check against an email address.
    pub fn matches_email(&self, email: &EmailAddress) -> bool {
        email.matches(&self.email)
    }

    /// Whether a course with the given id is already selected.
    pub fn has_course(&self, course_id: u64) -> bool {
        self.selected_courses.iter().any(|c| c.id == course_id)
    }

    /// Append the course unless its id is already present.
    ///
    /// Returns `true` when the selection changed.
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.has_course(course.id) {
            return false;
        }
        self.selected_courses.push(course);
        true
    }

    /// Append every incoming course whose id is not yet selected, preserving
    /// existing order for prior entries and incoming order among the new ones.
    ///
    /// Returns the number of courses appended.
    pub fn merge_courses(&mut self, incoming: impl IntoIterator<Item = Course>) -> usize {
        incoming
            .into_iter()
            .filter(|course| self.add_course(course.clone()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com", "a@x.com")]
    #[case("A@X.COM", "a@x.com")]
    #[case("Ana@Uni.Edu", "aNa@uni.edu")]
    fn email_matching_is_case_insensitive(#[case] stored: &str, #[case] probe: &str) {
        let student = Student::new(1, "Ana", stored);
        let email = EmailAddress::new(probe).expect("non-empty email");
        assert!(student.matches_email(&email));
    }

    #[test]
    fn email_rejects_blank_input() {
        assert_eq!(
            EmailAddress::new("   "),
            Err(StudentValidationError::EmptyEmail)
        );
    }

    #[test]
    fn add_course_ignores_duplicate_ids() {
        let mut student = Student::new(1, "Ana", "a@x.com");
        assert!(student.add_course(Course::new(7).with_detail("name", "Algebra")));
        assert!(!student.add_course(Course::new(7).with_detail("name", "Renamed")));
        assert_eq!(student.selected_courses.len(), 1);
        // First-inserted copy wins; the later duplicate is dropped.
        assert_eq!(
            student.selected_courses[0].details.get("name"),
            Some(&Value::from("Algebra"))
        );
    }

    #[test]
    fn merge_appends_only_new_ids_in_incoming_order() {
        let mut student = Student::new(1, "Ana", "a@x.com");
        student.merge_courses([Course::new(1), Course::new(2)]);
        let appended = student.merge_courses([Course::new(2), Course::new(3)]);
        assert_eq!(appended, 1);
        let ids: Vec<u64> = student.selected_courses.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn course_round_trips_opaque_fields() {
        let json = r#"{"id":3,"name":"Calculus I","credits":4,"major":"Mathematics"}"#;
        let course: Course = serde_json::from_str(json).expect("course parses");
        assert_eq!(course.id, 3);
        assert_eq!(course.details.get("credits"), Some(&Value::from(4)));
        let back = serde_json::to_value(&course).expect("course serialises");
        assert_eq!(back.get("major"), Some(&Value::from("Mathematics")));
    }
}
