//! Professor manager. Store-assigned ids; a Department must be chosen first.

use super::today;
use crate::domain::{
    Department, Detail, DisplayRecord, DisplayValue, EntityKind, Field, FieldValues, Identified,
    Professor, RecordsError, RelatedEntities, Relation,
};
use crate::ports::CrudManager;
use crate::store::RecordStore;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProfessorManager;

pub(crate) fn summary(store: &RecordStore, professor: &Professor) -> DisplayRecord {
    let department = store
        .get_by_id::<Department>(professor.department_id())
        .map(|d| d.name().to_string())
        .unwrap_or_default();
    DisplayRecord::new(Professor::KIND, professor.id(), professor.name())
        .text("Id", professor.id())
        .text("Name", professor.name())
        .field("Birth Date", DisplayValue::Date(professor.birth_date()))
        .field(
            "Age",
            DisplayValue::Integer(i64::from(professor.age_on(today()))),
        )
        .text("Department", department)
}

impl CrudManager for ProfessorManager {
    type Entity = Professor;

    fn list_fields(&self, _updating: bool) -> Vec<Field> {
        vec![Field::Name, Field::BirthDate]
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
        let name = values.require_text(Field::Name)?;
        let birth_date = values.require_date(Field::BirthDate)?;
        let department_id = related.require(Relation::Department)?;
        // Resolved before drawing an id so a rejected create consumes none.
        let department = store
            .get_by_id::<Department>(department_id)
            .cloned()
            .ok_or_else(|| RecordsError::not_found(EntityKind::Department, department_id))?;

        let number = store.next_professor_id()?;
        let professor = Professor::new(number, name, birth_date, &department);
        let id = store.add(professor)?.id();
        debug!(id = %id, department = department_id, "professor added");
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
        let professor = store
            .get_by_id_mut::<Professor>(id)
            .ok_or_else(|| RecordsError::not_found(Professor::KIND, id))?;
        professor.set_name(name);
        professor.set_birth_date(birth_date);
        debug!(id, "professor updated");
        Ok(())
    }

    fn render(
        &self,
        store: &RecordStore,
        professor: &Professor,
        _detail: Detail,
    ) -> DisplayRecord {
        summary(store, professor)
    }
}
