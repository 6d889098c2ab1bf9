//! Field and relation vocabulary shared by every manager.
//!
//! Values reach the core already typed: text as a string, dates as `NaiveDate`.

use super::errors::RecordsError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Name,
    Description,
    BirthDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Date,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Name => "Name",
            Self::Description => "Description",
            Self::BirthDate => "Birth Date",
        }
    }

    pub fn field_type(self) -> FieldType {
        match self {
            Self::BirthDate => FieldType::Date,
            _ => FieldType::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = RecordsError;

    /// Accepts the display label ("Birth Date") or snake case ("birth_date").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "birthdate" => Ok(Self::BirthDate),
            _ => Err(RecordsError::InvalidArgument(format!("unknown field '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

/// Values collected for one create or update call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: BTreeMap<Field, FieldValue>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, FieldValue::Text(value.into()));
        self
    }

    pub fn date(mut self, field: Field, value: NaiveDate) -> Self {
        self.insert(field, FieldValue::Date(value));
        self
    }

    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.values.insert(field, value);
    }

    /// Trimmed, non-empty text for `field`.
    pub fn require_text(&self, field: Field) -> Result<String, RecordsError> {
        match self.values.get(&field) {
            Some(FieldValue::Text(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(FieldValue::Text(_)) | None => Err(RecordsError::InvalidArgument(format!(
                "{} is required",
                field
            ))),
            Some(FieldValue::Date(_)) => Err(RecordsError::InvalidArgument(format!(
                "{} expects text, got a date",
                field
            ))),
        }
    }

    pub fn require_date(&self, field: Field) -> Result<NaiveDate, RecordsError> {
        match self.values.get(&field) {
            Some(FieldValue::Date(d)) => Ok(*d),
            Some(FieldValue::Text(_)) => Err(RecordsError::InvalidArgument(format!(
                "{} expects a date",
                field
            ))),
            None => Err(RecordsError::InvalidArgument(format!(
                "{} is required",
                field
            ))),
        }
    }

    /// Check every field in `fields` is present and well-typed.
    pub fn validate(&self, fields: &[Field]) -> Result<(), RecordsError> {
        for &field in fields {
            match field.field_type() {
                FieldType::Text => self.require_text(field).map(|_| ())?,
                FieldType::Date => self.require_date(field).map(|_| ())?,
            }
        }
        Ok(())
    }
}

/// A required parent an entity must be attached to at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Department,
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Relation {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "department" => Ok(Self::Department),
            _ => Err(RecordsError::InvalidArgument(format!(
                "unknown relation '{}'",
                s
            ))),
        }
    }
}

/// Relation -> id picked by the caller's chooser, not yet checked.
pub type RelationChoices = BTreeMap<Relation, String>;

/// Relation -> id of an entity confirmed to exist in the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedEntities {
    ids: BTreeMap<Relation, String>,
}

impl RelatedEntities {
    pub(crate) fn insert(&mut self, relation: Relation, id: String) {
        self.ids.insert(relation, id);
    }

    pub fn get(&self, relation: Relation) -> Option<&str> {
        self.ids.get(&relation).map(String::as_str)
    }

    pub fn require(&self, relation: Relation) -> Result<&str, RecordsError> {
        self.get(relation).ok_or_else(|| {
            RecordsError::InvalidArgument(format!("{} must be selected", relation))
        })
    }
}
