//! Course manager. Caller-assigned ids; a Department must be chosen first.

use super::student_manager;
use crate::domain::{
    Course, Department, Detail, DisplayRecord, EntityKind, Field, FieldValues, Identified,
    RecordsError, RelatedEntities, Relation,
};
use crate::ports::CrudManager;
use crate::store::RecordStore;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct CourseManager;

/// Summary columns, shared with the department view.
pub(crate) fn summary(store: &RecordStore, course: &Course) -> DisplayRecord {
    let department = store
        .get_by_id::<Department>(course.department_id())
        .map(|d| d.name().to_string())
        .unwrap_or_default();
    DisplayRecord::new(Course::KIND, course.id(), course.name())
        .text("Id", course.id())
        .text("Name", course.name())
        .text("Description", course.description())
        .text("Department", department)
}

impl CrudManager for CourseManager {
    type Entity = Course;

    fn list_fields(&self, updating: bool) -> Vec<Field> {
        let mut fields = vec![Field::Name, Field::Description];
        if !updating {
            fields.insert(0, Field::Id);
        }
        fields
    }

    fn relations(&self) -> &'static [Relation] {
        &[Relation::Department]
    }

    fn create(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        related: &RelatedEntities,
    ) -> Result<String, RecordsError> {
        values.validate(&self.list_fields(false))?;
        let department_id = related.require(Relation::Department)?;
        let department = store
            .get_by_id::<Department>(department_id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Department, department_id))?;
        let course = Course::new(
            values.require_text(Field::Id)?,
            values.require_text(Field::Name)?,
            values.require_text(Field::Description)?,
            department,
        );
        let id = store.add(course)?.id();
        debug!(id = %id, department = department_id, "course added");
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
        let description = values.require_text(Field::Description)?;
        let course = store
            .get_by_id_mut::<Course>(id)
            .ok_or_else(|| RecordsError::not_found(Course::KIND, id))?;
        course.set_name(name);
        course.set_description(description);
        debug!(id, "course updated");
        Ok(())
    }

    fn render(&self, store: &RecordStore, course: &Course, detail: Detail) -> DisplayRecord {
        let record = summary(store, course);
        if detail == Detail::Summary {
            return record;
        }
        let enrollments = store
            .course_enrollments(course.id().as_str())
            .map(|e| student_manager::enrollment_record(store, e))
            .collect();
        record.section("Enrollments", enrollments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayValue, Professor, RelationChoices, Student};
    use chrono::NaiveDate;

    fn store_with_math() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .add(Department::new("MATH", "Mathematics", "Mathematics Department"))
            .unwrap();
        store
    }

    fn calculus() -> FieldValues {
        FieldValues::new()
            .text(Field::Id, "MATH1211")
            .text(Field::Name, "Calculus")
            .text(Field::Description, "Limits and derivatives")
    }

    fn choose(id: &str) -> RelationChoices {
        RelationChoices::from([(Relation::Department, id.to_string())])
    }

    #[test]
    fn test_create_attaches_to_department() {
        let mut store = store_with_math();
        let related = CourseManager.resolve_related(&store, &choose("MATH")).unwrap();
        let id = CourseManager.create(&mut store, &calculus(), &related).unwrap();
        assert_eq!(id, "MATH1211");

        let math = store.get_by_id::<Department>("MATH").unwrap();
        assert_eq!(math.course_ids(), ["MATH1211".to_string()]);
        let course = CourseManager.find_by_id(&store, "MATH1211").unwrap();
        assert_eq!(course.department_id(), "MATH");
    }

    #[test]
    fn test_create_without_department_is_rejected() {
        let mut store = store_with_math();
        let err = CourseManager
            .create(&mut store, &calculus(), &RelatedEntities::default())
            .unwrap_err();
        assert!(matches!(err, RecordsError::InvalidArgument(_)));
        assert!(store.get_all::<Course>().is_empty());
        assert!(
            store
                .get_by_id::<Department>("MATH")
                .unwrap()
                .course_ids()
                .is_empty()
        );
    }

    #[test]
    fn test_resolve_related_checks_existence() {
        let store = store_with_math();
        assert!(matches!(
            CourseManager.resolve_related(&store, &RelationChoices::new()),
            Err(RecordsError::InvalidArgument(_))
        ));
        assert_eq!(
            CourseManager.resolve_related(&store, &choose("PHYS")),
            Err(RecordsError::not_found(EntityKind::Department, "PHYS"))
        );
    }

    #[test]
    fn test_update_does_not_move_department() {
        let mut store = store_with_math();
        let related = CourseManager.resolve_related(&store, &choose("MATH")).unwrap();
        CourseManager.create(&mut store, &calculus(), &related).unwrap();

        let values = FieldValues::new()
            .text(Field::Name, "Calculus I")
            .text(Field::Description, "Single variable");
        CourseManager.update(&mut store, "MATH1211", &values).unwrap();
        let course = store.get_by_id::<Course>("MATH1211").unwrap();
        assert_eq!(course.name(), "Calculus I");
        assert_eq!(course.department_id(), "MATH");

        let record = CourseManager.render(&store, course, Detail::Summary);
        assert_eq!(
            record.value("Department"),
            Some(&DisplayValue::Text("Mathematics".into()))
        );
    }

    #[test]
    fn test_detailed_render_lists_every_enrollment() {
        let mut store = store_with_math();
        let related = CourseManager.resolve_related(&store, &choose("MATH")).unwrap();
        CourseManager.create(&mut store, &calculus(), &related).unwrap();
        let math = store.get_by_id::<Department>("MATH").unwrap().clone();
        let day = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        store
            .add(Professor::new(1, "Bob Green", day, &math))
            .unwrap();
        store.add(Student::new(1, "Ada Lovelace", day)).unwrap();
        store.add(Student::new(2, "Alan Turing", day)).unwrap();
        store.enroll("1", "MATH1211", "1", day).unwrap();
        store.enroll("2", "MATH1211", "1", day).unwrap();
        store.set_grade_scale("2", "MATH1211", 85.0).unwrap();

        let course = store.get_by_id::<Course>("MATH1211").unwrap();
        assert!(
            CourseManager
                .render(&store, course, Detail::Summary)
                .related
                .is_empty()
        );
        let detailed = CourseManager.render(&store, course, Detail::Detailed);
        let rows = detailed.section_records("Enrollments");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ada Lovelace enroll Calculus");
        assert_eq!(rows[1].name, "Alan Turing enroll Calculus");
        assert_eq!(rows[0].value("Letter Grade"), Some(&DisplayValue::Absent));
        assert_eq!(
            rows[1].value("Letter Grade"),
            Some(&DisplayValue::Text("B".into()))
        );
    }
}
