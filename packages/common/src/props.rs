//! Property values carried by nodes.
//!
//! Values are JSON-compatible and keep their semantic type through edit,
//! serialize and render: integers stay integers, floats stay floats and
//! strings are never coerced into numbers.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;

/// A structured record, e.g. one navbar menu item.
pub type Record = BTreeMap<String, PropValue>;

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<PropValue>),
    Record(Record),
}

impl PropValue {
    pub fn text(value: impl Into<String>) -> Self {
        PropValue::Text(value.into())
    }

    pub fn int(value: i64) -> Self {
        PropValue::Number(Number::from(value))
    }

    /// Non-finite floats have no JSON representation and become `Null`.
    pub fn float(value: f64) -> Self {
        Number::from_f64(value)
            .map(PropValue::Number)
            .unwrap_or(PropValue::Null)
    }

    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropValue)>,
    {
        PropValue::Record(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            PropValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Value as it appears inside a CSS declaration or attribute.
    pub fn css_value(&self) -> String {
        match self {
            PropValue::Null => String::new(),
            PropValue::Bool(b) => b.to_string(),
            PropValue::Number(n) => n.to_string(),
            PropValue::Text(s) => s.clone(),
            PropValue::List(_) | PropValue::Record(_) => String::new(),
        }
    }

    /// Numbers get `unit` appended, strings pass through untouched
    /// (`"100%"`, `"auto"`, `"60vh"`).
    pub fn dimension(&self, unit: &str) -> String {
        match self {
            PropValue::Number(n) => format!("{}{}", n, unit),
            other => other.css_value(),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::List(_) | PropValue::Record(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            other => f.write_str(&other.css_value()),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::int(value as i64)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::float(value)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        PropValue::List(value)
    }
}

/// Property values of one node, keyed by property name.
///
/// Ordered so that two identical prop sets always serialize to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: PropValue) -> Option<PropValue> {
        self.0.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.0.iter()
    }

    /// Overlay `self` on top of `base`: every key of `self` wins.
    pub fn merged_over(&self, base: &Props) -> Props {
        let mut merged = base.clone();
        for (name, value) in &self.0 {
            merged.0.insert(name.clone(), value.clone());
        }
        merged
    }

    pub fn str_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.get(name).and_then(PropValue::as_str).unwrap_or(fallback)
    }

    pub fn f64_or(&self, name: &str, fallback: f64) -> f64 {
        self.get(name).and_then(PropValue::as_f64).unwrap_or(fallback)
    }

    pub fn i64_or(&self, name: &str, fallback: i64) -> i64 {
        self.get(name).and_then(PropValue::as_i64).unwrap_or(fallback)
    }

    pub fn bool_or(&self, name: &str, fallback: bool) -> bool {
        self.get(name).and_then(PropValue::as_bool).unwrap_or(fallback)
    }

    pub fn list(&self, name: &str) -> &[PropValue] {
        self.get(name).and_then(PropValue::as_list).unwrap_or(&[])
    }

    /// CSS text for a numeric prop with a unit; strings pass through.
    pub fn dimension(&self, name: &str, unit: &str) -> String {
        self.get(name).map(|v| v.dimension(unit)).unwrap_or_default()
    }

    pub fn css(&self, name: &str) -> String {
        self.get(name).map(PropValue::css_value).unwrap_or_default()
    }
}

impl FromIterator<(String, PropValue)> for Props {
    fn from_iter<T: IntoIterator<Item = (String, PropValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
