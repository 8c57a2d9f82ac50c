use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One provider-reported resource instance with arbitrary named fields.
///
/// A record has no identity beyond its field values; two records with
/// identical fields are indistinguishable to the classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostRecord {
    fields: Map<String, Value>,
}

impl HostRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Build a record from a JSON value. Anything but an object yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw field lookup.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the record carries the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Scalar rendering of a field, used wherever a field value becomes part
    /// of a group name or an address.
    ///
    /// Strings render as-is (no quotes), numbers and booleans via their JSON
    /// form. Null, arrays and objects are not scalar and yield `None`.
    pub fn field_str(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }
}

impl From<Map<String, Value>> for HostRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Value)> for HostRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
