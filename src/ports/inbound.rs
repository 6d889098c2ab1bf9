//! Inbound ports. The generic manager contract a caller drives for any entity kind.
//!
//! `CrudManager` is the typed contract each kind implements. `AnyManager` is its
//! object-safe form (blanket-implemented) so one driver can hold every manager.
//! Student-only actions sit behind `StudentOps`, reached through `student_ops()`.

use crate::domain::{
    Department, Detail, DisplayRecord, Enrollment, EntityKind, Field, FieldValues,
    RecordsError, RelatedEntities, Relation, RelationChoices,
};
use crate::store::{RecordStore, Stored};
use chrono::NaiveDate;

pub trait CrudManager: Send + Sync {
    type Entity: Stored;

    fn kind(&self) -> EntityKind {
        <Self::Entity as crate::domain::Identified>::KIND
    }

    /// Fields to collect, in prompt order. `Id` only appears when creating a kind
    /// whose ids are caller-assigned.
    fn list_fields(&self, updating: bool) -> Vec<Field>;

    /// Parents that must be chosen before fields are collected.
    fn relations(&self) -> &'static [Relation] {
        &[]
    }

    /// Check the caller's choices against the store.
    fn resolve_related(
        &self,
        store: &RecordStore,
        choices: &RelationChoices,
    ) -> Result<RelatedEntities, RecordsError> {
        let mut related = RelatedEntities::default();
        for &relation in self.relations() {
            let id = choices
                .get(&relation)
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    RecordsError::InvalidArgument(format!("{} must be selected", relation))
                })?;
            if !relation_exists(store, relation, id) {
                return Err(RecordsError::not_found(relation_kind(relation), id));
            }
            related.insert(relation, id.to_string());
        }
        Ok(related)
    }

    /// Validate, construct and insert. Returns the new entity's id.
    fn create(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        related: &RelatedEntities,
    ) -> Result<String, RecordsError>;

    /// Overwrite the mutable fields only; identity and parents never change.
    fn update(
        &self,
        store: &mut RecordStore,
        id: &str,
        values: &FieldValues,
    ) -> Result<(), RecordsError>;

    fn find_by_id<'s>(&self, store: &'s RecordStore, id: &str) -> Option<&'s Self::Entity> {
        store.get_by_id::<Self::Entity>(id)
    }

    fn list_all<'s>(&self, store: &'s RecordStore) -> Vec<&'s Self::Entity> {
        store.get_all::<Self::Entity>()
    }

    fn render(&self, store: &RecordStore, entity: &Self::Entity, detail: Detail) -> DisplayRecord;

    fn student_ops(&self) -> Option<&dyn StudentOps> {
        None
    }
}

/// Object-safe view of a `CrudManager`; every method renders entities as display records.
pub trait AnyManager: Send + Sync {
    fn kind(&self) -> EntityKind;

    fn list_fields(&self, updating: bool) -> Vec<Field>;

    fn relations(&self) -> &'static [Relation];

    fn resolve_related(
        &self,
        store: &RecordStore,
        choices: &RelationChoices,
    ) -> Result<RelatedEntities, RecordsError>;

    fn create(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        related: &RelatedEntities,
    ) -> Result<String, RecordsError>;

    fn update(
        &self,
        store: &mut RecordStore,
        id: &str,
        values: &FieldValues,
    ) -> Result<(), RecordsError>;

    fn find(&self, store: &RecordStore, id: &str, detail: Detail) -> Option<DisplayRecord>;

    fn list(&self, store: &RecordStore, detail: Detail) -> Vec<DisplayRecord>;

    fn student_ops(&self) -> Option<&dyn StudentOps>;

    /// Resolve parents, then create. Same flow for every kind.
    fn add(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        choices: &RelationChoices,
    ) -> Result<String, RecordsError> {
        let related = self.resolve_related(store, choices)?;
        self.create(store, values, &related)
    }
}

impl<M: CrudManager> AnyManager for M {
    fn kind(&self) -> EntityKind {
        CrudManager::kind(self)
    }

    fn list_fields(&self, updating: bool) -> Vec<Field> {
        CrudManager::list_fields(self, updating)
    }

    fn relations(&self) -> &'static [Relation] {
        CrudManager::relations(self)
    }

    fn resolve_related(
        &self,
        store: &RecordStore,
        choices: &RelationChoices,
    ) -> Result<RelatedEntities, RecordsError> {
        CrudManager::resolve_related(self, store, choices)
    }

    fn create(
        &self,
        store: &mut RecordStore,
        values: &FieldValues,
        related: &RelatedEntities,
    ) -> Result<String, RecordsError> {
        CrudManager::create(self, store, values, related)
    }

    fn update(
        &self,
        store: &mut RecordStore,
        id: &str,
        values: &FieldValues,
    ) -> Result<(), RecordsError> {
        CrudManager::update(self, store, id, values)
    }

    fn find(&self, store: &RecordStore, id: &str, detail: Detail) -> Option<DisplayRecord> {
        self.find_by_id(store, id)
            .map(|entity| self.render(store, entity, detail))
    }

    fn list(&self, store: &RecordStore, detail: Detail) -> Vec<DisplayRecord> {
        self.list_all(store)
            .into_iter()
            .map(|entity| self.render(store, entity, detail))
            .collect()
    }

    fn student_ops(&self) -> Option<&dyn StudentOps> {
        CrudManager::student_ops(self)
    }
}

/// Actions only the Student manager offers.
pub trait StudentOps: Send + Sync {
    /// Returns the composite enrollment id.
    fn enroll(
        &self,
        store: &mut RecordStore,
        student_id: &str,
        course_id: &str,
        professor_id: &str,
        enrolled_on: NaiveDate,
    ) -> Result<String, RecordsError>;

    /// Returns the composite id of the graded enrollment.
    fn set_grade(
        &self,
        store: &mut RecordStore,
        student_id: &str,
        course_id: &str,
        scale: f64,
    ) -> Result<String, RecordsError>;

    /// `false` when no such student exists.
    fn delete(&self, store: &mut RecordStore, student_id: &str) -> bool;

    fn is_enrolled(&self, store: &RecordStore, student_id: &str, course_id: &str) -> bool;

    fn gpa(&self, store: &RecordStore, student_id: &str) -> Option<f64>;

    fn enrollments<'s>(&self, store: &'s RecordStore, student_id: &str)
    -> Option<&'s [Enrollment]>;
}

fn relation_kind(relation: Relation) -> EntityKind {
    match relation {
        Relation::Department => EntityKind::Department,
    }
}

fn relation_exists(store: &RecordStore, relation: Relation, id: &str) -> bool {
    match relation {
        Relation::Department => store.get_by_id::<Department>(id).is_some(),
    }
}
