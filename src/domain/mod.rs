//! Core domain layer. No external I/O dependencies.
//!
//! Entities, grading rules and the field vocabulary live here. Dependencies flow inward.

pub mod display;
pub mod entities;
pub mod errors;
pub mod fields;
pub mod grading;

pub use display::{Detail, DisplayField, DisplayRecord, DisplayValue, RelatedSection};
pub use entities::{Course, Department, Enrollment, EntityKind, Identified, Professor, Student};
pub use errors::RecordsError;
pub use fields::{
    Field, FieldType, FieldValue, FieldValues, RelatedEntities, Relation, RelationChoices,
};
pub use grading::{LetterGrade, UNGRADED};
