//! Batch commands (input) and reports (output). One JSON object per line.

use crate::domain::{
    DisplayRecord, Field, FieldType, FieldValue, FieldValues, LetterGrade, RecordsError,
    Relation, RelationChoices,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Accepted date formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    List {
        kind: String,
        #[serde(default)]
        detailed: bool,
    },
    Find {
        kind: String,
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(default)]
        detailed: bool,
    },
    Fields {
        kind: String,
        #[serde(default)]
        updating: bool,
    },
    Create {
        kind: String,
        fields: BTreeMap<String, String>,
        #[serde(default)]
        related: BTreeMap<String, String>,
    },
    Update {
        kind: String,
        #[serde(deserialize_with = "id_string")]
        id: String,
        fields: BTreeMap<String, String>,
    },
    Enroll {
        #[serde(deserialize_with = "id_string")]
        student: String,
        #[serde(deserialize_with = "id_string")]
        course: String,
        #[serde(deserialize_with = "id_string")]
        professor: String,
        /// Defaults to today.
        #[serde(default)]
        date: Option<String>,
    },
    SetGrade {
        #[serde(deserialize_with = "id_string")]
        student: String,
        #[serde(deserialize_with = "id_string")]
        course: String,
        scale: f64,
    },
    Delete {
        kind: String,
        #[serde(deserialize_with = "id_string")]
        id: String,
    },
    Gpa {
        #[serde(deserialize_with = "id_string")]
        student: String,
    },
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, RecordsError> {
        serde_json::from_str(line).map_err(|e| RecordsError::Input(format!("bad command: {}", e)))
    }
}

/// Ids may be written as JSON strings or numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, RecordsError> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            RecordsError::InvalidArgument(format!(
                "invalid date '{}', expected YYYY-MM-DD or MM/DD/YYYY",
                raw
            ))
        })
}

/// Typed field values from raw strings, resolving dates by field type.
pub fn field_values(raw: &BTreeMap<String, String>) -> Result<FieldValues, RecordsError> {
    let mut values = FieldValues::new();
    for (key, value) in raw {
        let field: Field = key.parse()?;
        let value = match field.field_type() {
            FieldType::Text => FieldValue::Text(value.clone()),
            FieldType::Date => FieldValue::Date(parse_date(value)?),
        };
        values.insert(field, value);
    }
    Ok(values)
}

pub fn relation_choices(raw: &BTreeMap<String, String>) -> Result<RelationChoices, RecordsError> {
    raw.iter()
        .map(|(key, id)| Ok((key.parse::<Relation>()?, id.clone())))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl From<Field> for FieldSpec {
    fn from(field: Field) -> Self {
        Self {
            name: field.label(),
            field_type: field.field_type(),
        }
    }
}

/// Successful command result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Records {
        records: Vec<DisplayRecord>,
    },
    /// `record` is null when nothing has that id.
    Record {
        record: Option<DisplayRecord>,
    },
    Fields {
        fields: Vec<FieldSpec>,
        relations: Vec<&'static str>,
    },
    Id {
        id: String,
    },
    Graded {
        enrollment: String,
        letter_grade: Option<LetterGrade>,
    },
    Removed {
        removed: bool,
    },
    Gpa {
        student: String,
        gpa: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
}

impl From<&RecordsError> for ErrorReport {
    fn from(err: &RecordsError) -> Self {
        Self {
            kind: err.code(),
            message: err.to_string(),
        }
    }
}

/// One output line per input command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub line: usize,
    pub ok: bool,
    #[serde(flatten)]
    pub payload: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl Report {
    pub fn from_result(line: usize, result: Result<Payload, RecordsError>) -> Self {
        match result {
            Ok(payload) => Self {
                line,
                ok: true,
                payload: Some(payload),
                error: None,
            },
            Err(err) => Self {
                line,
                ok: false,
                payload: None,
                error: Some(ErrorReport::from(&err)),
            },
        }
    }
}
