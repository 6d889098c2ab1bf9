//! Registry from entity kind to its manager.

use super::{CourseManager, DepartmentManager, ProfessorManager, StudentManager};
use crate::domain::{EntityKind, RecordsError};
use crate::ports::AnyManager;

/// Every manager, reachable by kind without the caller branching on it.
#[derive(Debug, Default)]
pub struct Managers {
    departments: DepartmentManager,
    courses: CourseManager,
    professors: ProfessorManager,
    students: StudentManager,
}

impl Managers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrollments are managed through the Student capability, not a manager of their own.
    pub fn for_kind(&self, kind: EntityKind) -> Result<&dyn AnyManager, RecordsError> {
        match kind {
            EntityKind::Department => Ok(&self.departments),
            EntityKind::Course => Ok(&self.courses),
            EntityKind::Professor => Ok(&self.professors),
            EntityKind::Student => Ok(&self.students),
            EntityKind::Enrollment => Err(RecordsError::InvalidArgument(
                "enrollments are managed through the student manager".into(),
            )),
        }
    }

    pub fn all(&self) -> [&dyn AnyManager; 4] {
        [
            &self.departments,
            &self.courses,
            &self.professors,
            &self.students,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Detail, Field, FieldValues, Relation, RelationChoices};
    use crate::store::RecordStore;
    use chrono::NaiveDate;

    #[test]
    fn test_only_students_have_the_capability() {
        let managers = Managers::new();
        for manager in managers.all() {
            let has_ops = manager.student_ops().is_some();
            assert_eq!(has_ops, manager.kind() == EntityKind::Student);
        }
        assert!(managers.for_kind(EntityKind::Enrollment).is_err());
    }

    #[test]
    fn test_same_flow_for_every_kind() {
        let managers = Managers::new();
        let mut store = RecordStore::new();
        let birth = NaiveDate::from_ymd_opt(1980, 5, 20).unwrap();
        let choices = RelationChoices::from([(Relation::Department, "HS".to_string())]);

        let inputs = [
            (
                EntityKind::Department,
                FieldValues::new()
                    .text(Field::Id, "HS")
                    .text(Field::Name, "Health Science")
                    .text(Field::Description, "Health Science Department"),
            ),
            (
                EntityKind::Course,
                FieldValues::new()
                    .text(Field::Id, "HS2110")
                    .text(Field::Name, "Anatomy")
                    .text(Field::Description, "Human body"),
            ),
            (
                EntityKind::Professor,
                FieldValues::new()
                    .text(Field::Name, "Alice Walker")
                    .date(Field::BirthDate, birth),
            ),
            (
                EntityKind::Student,
                FieldValues::new()
                    .text(Field::Name, "Grace Hopper")
                    .date(Field::BirthDate, birth),
            ),
        ];

        for (kind, values) in inputs {
            let manager = managers.for_kind(kind).unwrap();
            let id = manager.add(&mut store, &values, &choices).unwrap();
            let record = manager.find(&store, &id, Detail::Summary).unwrap();
            assert_eq!(record.kind, kind);
            assert_eq!(manager.list(&store, Detail::Summary).len(), 1);
        }

        let hs = managers
            .for_kind(EntityKind::Department)
            .unwrap()
            .find(&store, "HS", Detail::Detailed)
            .unwrap();
        assert_eq!(hs.section_records("Courses").len(), 1);
        assert_eq!(hs.section_records("Professors").len(), 1);
    }
}
