//! Department manager. Caller-assigned string ids; no parents.

use super::{course_manager, professor_manager};
use crate::domain::{
    Course, Department, Detail, DisplayRecord, Field, FieldValues, Identified, Professor,
    RecordsError, RelatedEntities,
};
use crate::ports::CrudManager;
use crate::store::RecordStore;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct DepartmentManager;

impl CrudManager for DepartmentManager {
    type Entity = Department;

    fn list_fields(&self, updating: bool) -> Vec<Field> {
        let mut fields = vec![Field::Name, Field::Description];
        if !updating {
            fields.insert(0, Field::Id);
        }
        fields
    }

    fn create(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        _related: &RelatedEntities,
    ) -> Result<String, RecordsError> {
        values.validate(&self.list_fields(false))?;
        let department = Department::new(
            values.require_text(Field::Id)?,
            values.require_text(Field::Name)?,
            values.require_text(Field::Description)?,
        );
        let id = store.add(department)?.id();
        debug!(id = %id, "department added");
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
        let department = store
            .get_by_id_mut::<Department>(id)
            .ok_or_else(|| RecordsError::not_found(Department::KIND, id))?;
        department.set_name(name);
        department.set_description(description);
        debug!(id, "department updated");
        Ok(())
    }

    fn render(
        &self,
        store: &RecordStore,
        department: &Department,
        detail: Detail,
    ) -> DisplayRecord {
        let record = DisplayRecord::new(Department::KIND, department.id(), department.name())
            .text("Id", department.id())
            .text("Name", department.name())
            .text("Description", department.description());
        if detail == Detail::Summary {
            return record;
        }
        let courses = department
            .course_ids()
            .iter()
            .filter_map(|id| store.get_by_id::<Course>(id))
            .map(|course| course_manager::summary(store, course))
            .collect();
        let professors = department
            .professor_ids()
            .iter()
            .filter_map(|id| store.get_by_id::<Professor>(&id.to_string()))
            .map(|professor| professor_manager::summary(store, professor))
            .collect();
        record
            .section("Courses", courses)
            .section("Professors", professors)
    }
}
