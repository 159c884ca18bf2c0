//! Flat key/value payload consumed by message rendering and the SMS channel.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single scalar value in the template payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Int(i64),
    Text(String),
}

impl TemplateValue {
    /// Zero and blank strings both count as empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Text(s) => s.is_empty() || s == "0",
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Ordered template payload. Field order is preserved for validation and rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    fields: Vec<(&'static str, TemplateValue)>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, keeping the original position on replace
    pub fn insert(&mut self, key: &'static str, value: impl Into<TemplateValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<TemplateValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TemplateValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Variables object for placeholder substitution
    pub fn to_variables(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Serialize for TemplateData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            match value {
                TemplateValue::Int(n) => map.serialize_entry(key, n)?,
                TemplateValue::Text(s) => map.serialize_entry(key, s)?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_emptiness() {
        assert!(TemplateValue::Int(0).is_empty());
        assert!(!TemplateValue::Int(-3).is_empty());
        assert!(TemplateValue::from("").is_empty());
        assert!(TemplateValue::from("0").is_empty());
        assert!(!TemplateValue::from(" ").is_empty());
    }

    #[test]
    fn test_insert_keeps_order_on_replace() {
        let mut data = TemplateData::new().with("A", 1_i64).with("B", "two");
        data.insert("A", 10_i64);

        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(data.get("A"), Some(&TemplateValue::Int(10)));
    }

    #[test]
    fn test_serialize_as_flat_object() {
        let data = TemplateData::new().with("COMPLAINT_ID", 42_i64).with("DATE", "2024-05-01");
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["COMPLAINT_ID"], 42);
        assert_eq!(json["DATE"], "2024-05-01");
        assert_eq!(data.to_variables(), json);
    }
}
