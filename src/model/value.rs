use serde::Serialize;

use crate::parser::StepValue;

/// JSON-safe property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Null or empty string: treated as "not present".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric reading, accepting numeric strings such as `"150"`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(f) => Some(*f),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Display text used when matching free-text rules.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Number(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Conversion into the closed [`Value`] shape.
///
/// Idempotent: converting a `Value` returns it unchanged.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for StepValue {
    fn to_value(&self) -> Value {
        match self {
            StepValue::Null => Value::Null,
            StepValue::Boolean(b) => Value::Bool(*b),
            StepValue::Integer(i) => Value::Integer(*i),
            StepValue::Real(f) if f.is_finite() => Value::Number(*f),
            StepValue::Real(f) => Value::Text(f.to_string()),
            StepValue::String(s) | StepValue::Enum(s) => Value::Text(s.clone()),
            StepValue::List(items) => Value::List(items.iter().map(ToValue::to_value).collect()),
            StepValue::Reference(id) => Value::Text(format!("#{id}")),
            StepValue::Derived => Value::Text("*".to_string()),
        }
    }
}
