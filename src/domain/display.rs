//! Structured display records. Column layout and colors belong to the caller.

use super::entities::EntityKind;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    #[default]
    Summary,
    /// Summary plus related entities.
    Detailed,
}

impl Detail {
    pub fn from_flag(detailed: bool) -> Self {
        if detailed {
            Self::Detailed
        } else {
            Self::Summary
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayField {
    pub label: &'static str,
    pub value: DisplayValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedSection {
    pub title: &'static str,
    pub records: Vec<DisplayRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub kind: EntityKind,
    pub id: String,
    pub name: String,
    pub fields: Vec<DisplayField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<RelatedSection>,
}

impl DisplayRecord {
    pub fn new(kind: EntityKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            fields: Vec::new(),
            related: Vec::new(),
        }
    }

    pub fn field(mut self, label: &'static str, value: DisplayValue) -> Self {
        self.fields.push(DisplayField { label, value });
        self
    }

    pub fn text(self, label: &'static str, value: impl Into<String>) -> Self {
        self.field(label, DisplayValue::Text(value.into()))
    }

    /// Adds a related section; empty sections are left out.
    pub fn section(mut self, title: &'static str, records: Vec<DisplayRecord>) -> Self {
        if !records.is_empty() {
            self.related.push(RelatedSection { title, records });
        }
        self
    }

    pub fn value(&self, label: &str) -> Option<&DisplayValue> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| &f.value)
    }

    pub fn section_records(&self, title: &str) -> &[DisplayRecord] {
        self.related
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.records.as_slice())
            .unwrap_or(&[])
    }
}

/// Round to two decimals, the precision GPA is reported with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let record = DisplayRecord::new(EntityKind::Department, "CS", "Computer Science")
            .text("Description", "Computer Science Department")
            .section("Courses", vec![])
            .section(
                "Professors",
                vec![DisplayRecord::new(EntityKind::Professor, "1", "Jane White")],
            );
        assert_eq!(
            record.value("Description"),
            Some(&DisplayValue::Text("Computer Science Department".into()))
        );
        assert!(record.section_records("Courses").is_empty());
        assert_eq!(record.section_records("Professors").len(), 1);
        assert_eq!(record.related.len(), 1);
    }

    #[test]
    fn test_serializes_untagged_values() {
        let record = DisplayRecord::new(EntityKind::Student, "1", "Ada")
            .field("GPA", DisplayValue::Decimal(3.5))
            .field("Grade Scale", DisplayValue::Absent);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "student");
        assert_eq!(json["fields"][0]["value"], 3.5);
        assert!(json["fields"][1]["value"].is_null());
        assert!(json.get("related").is_none());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.3349), 3.33);
        assert_eq!(round2(2.675_1), 2.68);
    }
}
