//! Application use cases. One manager per entity kind, plus the registry.

pub mod course_manager;
pub mod department_manager;
pub mod managers;
pub mod professor_manager;
pub mod student_manager;

pub use course_manager::CourseManager;
pub use department_manager::DepartmentManager;
pub use managers::Managers;
pub use professor_manager::ProfessorManager;
pub use student_manager::StudentManager;

use chrono::{Local, NaiveDate};

/// Reference day for derived ages.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
