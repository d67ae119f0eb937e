use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::relation::Relation;

/// A loosely-typed ERP record: field name → JSON value.
///
/// Accessors never fail. `false`, `null` and absence all read as "unset".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value; anything but an object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !is_unset(v))
    }

    /// Non-blank string field.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Decimal field; JSON numbers and numeric strings, zero otherwise.
    pub fn decimal(&self, field: &str) -> Decimal {
        let raw = match self.get(field) {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.trim().to_string(),
            _ => return Decimal::ZERO,
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .unwrap_or(Decimal::ZERO)
    }

    /// ISO date field (`YYYY-MM-DD`, an optional time part is ignored).
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        let s = self.text(field)?;
        let day = s.get(..10).unwrap_or(&s);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn relation(&self, field: &str) -> Relation {
        self.0.get(field).map(Relation::from_value).unwrap_or_default()
    }

    /// Integer id, accepting a bare id or a relation pair.
    pub fn id(&self, field: &str) -> Option<i64> {
        self.relation(field).id()
    }

    /// List of ids (one2many / many2many fields).
    pub fn id_list(&self, field: &str) -> Vec<i64> {
        match self.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_i64).collect(),
            Some(Value::Number(n)) => n.as_i64().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn is_unset(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(false))
}
