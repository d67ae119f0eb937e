use serde_json::Value;

/// A relation-valued ERP field.
///
/// The ERP encodes the same many-to-one field differently depending on the
/// call that produced the record: `false` when unset, a bare id, an
/// `[id, display_name]` pair, or occasionally just the display string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Relation {
    #[default]
    Unset,
    KeyOnly(i64),
    KeyAndLabel(i64, String),
    LabelOnly(String),
}

impl Relation {
    /// Decode a raw field value. Never fails; unknown shapes are `Unset`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_i64().map_or(Self::Unset, Self::KeyOnly),
            Value::String(s) if !s.trim().is_empty() => Self::LabelOnly(s.clone()),
            Value::Array(items) => match items.as_slice() {
                [Value::Number(id), Value::String(label), ..] => match id.as_i64() {
                    Some(id) => Self::KeyAndLabel(id, label.clone()),
                    None => Self::LabelOnly(label.clone()),
                },
                [Value::Number(id), ..] => id.as_i64().map_or(Self::Unset, Self::KeyOnly),
                _ => Self::Unset,
            },
            _ => Self::Unset,
        }
    }

    /// Numeric key used for lookup joins.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::KeyOnly(id) | Self::KeyAndLabel(id, _) => Some(*id),
            Self::Unset | Self::LabelOnly(_) => None,
        }
    }

    /// Human-readable label used for name matching.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::KeyAndLabel(_, label) | Self::LabelOnly(label) => Some(label.as_str()),
            Self::Unset | Self::KeyOnly(_) => None,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}
