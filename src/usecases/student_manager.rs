//! Student manager. Store-assigned ids; the only kind with enroll, grade and delete.

use super::today;
use crate::domain::display::round2;
use crate::domain::{
    Course, Detail, DisplayRecord, DisplayValue, Enrollment, EntityKind, Field, FieldValues,
    Identified, Professor, RecordsError, RelatedEntities, Student,
};
use crate::ports::{CrudManager, StudentOps};
use crate::store::RecordStore;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct StudentManager;

/// One enrollment row with related names resolved.
pub(crate) fn enrollment_record(store: &RecordStore, enrollment: &Enrollment) -> DisplayRecord {
    let student = store
        .get_by_id::<Student>(&enrollment.student_id().to_string())
        .map(|s| s.name().to_string())
        .unwrap_or_default();
    let course = store
        .get_by_id::<Course>(enrollment.course_id())
        .map(|c| c.name().to_string())
        .unwrap_or_default();
    let professor = store
        .get_by_id::<Professor>(&enrollment.professor_id().to_string())
        .map(|p| p.name().to_string())
        .unwrap_or_default();
    let grade_scale = enrollment
        .grade_scale()
        .map(DisplayValue::Decimal)
        .unwrap_or(DisplayValue::Absent);
    let letter = enrollment
        .letter_grade()
        .map(|l| DisplayValue::Text(l.to_string()))
        .unwrap_or(DisplayValue::Absent);

    DisplayRecord::new(
        EntityKind::Enrollment,
        enrollment.id(),
        store.enrollment_name(enrollment),
    )
    .text("Student", student)
    .text("Course", course)
    .text("Professor", professor)
    .field("Enrollment Date", DisplayValue::Date(enrollment.enrolled_on()))
    .field("Grade Scale", grade_scale)
    .field("Letter Grade", letter)
}

impl CrudManager for StudentManager {
    type Entity = Student;

    fn list_fields(&self, _updating: bool) -> Vec<Field> {
        vec![Field::Name, Field::BirthDate]
    }

    fn create(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        _related: &RelatedEntities,
    ) -> Result<String, RecordsError> {
        values.validate(&self.list_fields(false))?;
        let name = values.require_text(Field::Name)?;
        let birth_date = values.require_date(Field::BirthDate)?;
        let number = store.next_student_id()?;
        let id = store.add(Student::new(number, name, birth_date))?.id();
        debug!(id = %id, "student added");
        Ok(id)
    }

    fn update(
        &self,
        store: &mut RecordStore,
        id: &str,
        values: &FieldValues,
    ) -> Result<(), RecordsError> {
        values.validate(&self.list_fields(true))?;
        let name = values.require_text(Field::Name)?;
        let birth_date = values.require_date(Field::BirthDate)?;
        let student = store
            .get_by_id_mut::<Student>(id)
            .ok_or_else(|| RecordsError::not_found(Student::KIND, id))?;
        student.set_name(name);
        student.set_birth_date(birth_date);
        debug!(id, "student updated");
        Ok(())
    }

    fn render(&self, store: &RecordStore, student: &Student, detail: Detail) -> DisplayRecord {
        let record = DisplayRecord::new(Student::KIND, student.id(), student.name())
            .text("Id", student.id())
            .text("Name", student.name())
            .field("Birth Date", DisplayValue::Date(student.birth_date()))
            .field(
                "Age",
                DisplayValue::Integer(i64::from(student.age_on(today()))),
            )
            .field("GPA", DisplayValue::Decimal(round2(student.gpa())));
        if detail == Detail::Summary {
            return record;
        }
        let enrollments = student
            .enrollments()
            .iter()
            .map(|e| enrollment_record(store, e))
            .collect();
        record.section("Enrollments", enrollments)
    }

    fn student_ops(&self) -> Option<&dyn StudentOps> {
        Some(self)
    }
}

impl StudentOps for StudentManager {
    fn enroll(
        &self,
        store: &mut RecordStore,
        student_id: &str,
        course_id: &str,
        professor_id: &str,
        enrolled_on: NaiveDate,
    ) -> Result<String, RecordsError> {
        let id = store.enroll(student_id, course_id, professor_id, enrolled_on)?;
        debug!(id = %id, professor = professor_id, "student enrolled");
        Ok(id)
    }

    fn set_grade(
        &self,
        store: &mut RecordStore,
        student_id: &str,
        course_id: &str,
        scale: f64,
    ) -> Result<String, RecordsError> {
        let id = store.set_grade_scale(student_id, course_id, scale)?;
        debug!(id = %id, scale, "grade set");
        Ok(id)
    }

    fn delete(&self, store: &mut RecordStore, student_id: &str) -> bool {
        let removed = store.remove_student(student_id);
        debug!(id = student_id, removed, "student delete");
        removed
    }

    fn is_enrolled(&self, store: &RecordStore, student_id: &str, course_id: &str) -> bool {
        store
            .get_by_id::<Student>(student_id)
            .is_some_and(|s| s.is_enrolled(course_id.trim()))
    }

    fn gpa(&self, store: &RecordStore, student_id: &str) -> Option<f64> {
        store.get_by_id::<Student>(student_id).map(Student::gpa)
    }

    fn enrollments<'s>(
        &self,
        store: &'s RecordStore,
        student_id: &str,
    ) -> Option<&'s [Enrollment]> {
        store
            .get_by_id::<Student>(student_id)
            .map(Student::enrollments)
    }
}
