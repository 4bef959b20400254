//! Persistence adapters.

mod json_student_repository;

pub use json_student_repository::JsonStudentRepository;
