//! Dynamic value model for validation input.
//!
//! This module provides [`Value`], a loosely-typed representation of
//! request-shaped data (mappings, records, lists, scalars), and [`Record`],
//! an ordered collection of named fields that may carry alias annotations.
//!
//! Values are usually produced from Rust literals or from `serde_json::Value`
//! via the provided `From` conversions.

use std::fmt::{self, Display};

use indexmap::IndexMap;

/// A loosely-typed value of unknown shape.
///
/// `Value` is the single currency of the validation engine: roots, resolved
/// fields, and rule inputs/outputs are all `Value`s. Optional data collapses
/// at conversion time (`None` becomes [`Value::Null`]), so "nil at any
/// indirection level" is uniformly `Null`.
///
/// # Example
///
/// ```rust
/// use gauntlet::Value;
///
/// let v = Value::from(vec![1i64, 2, 3]);
/// assert_eq!(v.type_name(), "list");
///
/// let nil = Value::from(None::<i64>);
/// assert!(nil.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or nil data.
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A signed integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    Str(String),
    /// An ordered, integer-addressed collection.
    List(Vec<Value>),
    /// A key-value mapping, preserving insertion order.
    Map(IndexMap<String, Value>),
    /// A structured record with declared field names and optional aliases.
    Record(Record),
}

impl Value {
    /// Returns true if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for values the `required` rule treats as missing:
    /// `Null`, the empty string, and empty lists, maps, and records.
    ///
    /// Scalars (including `0` and `false`) are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Record(record) => record.is_empty(),
            _ => false,
        }
    }

    /// Returns the shape name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// Returns the string slice if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a float for `Int` or `Float` values.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is a `List` value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map` value.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the record if this is a `Record` value.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the element count for sized shapes, or the character count
    /// for strings. `None` for scalars and `Null`.
    pub fn size(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Record(record) => Some(record.len()),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self.clone()))
    }
}

/// A structured record: named fields in declaration order, each optionally
/// carrying an alias annotation.
///
/// The alias is consulted by the path resolver only as a fallback when no
/// declared field name matches a path component directly; a direct name
/// match always wins.
///
/// # Example
///
/// ```rust
/// use gauntlet::{Record, Value};
///
/// let record = Record::new()
///     .field("name", "widget")
///     .field_with_alias("stock_count", "stock", 7i64);
///
/// assert_eq!(record.lookup("name"), Some(&Value::from("widget")));
/// // `stock` resolves through the alias annotation
/// assert_eq!(record.lookup("stock"), Some(&Value::from(7i64)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<RecordField>,
}

/// One declared field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    name: String,
    alias: Option<String>,
    value: Value,
}

impl RecordField {
    /// The declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alias annotation, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The field's value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field with no alias and returns self for chaining.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(RecordField {
            name: name.into(),
            alias: None,
            value: value.into(),
        });
        self
    }

    /// Appends a field carrying an alias annotation and returns self for
    /// chaining.
    pub fn field_with_alias(
        mut self,
        name: impl Into<String>,
        alias: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.fields.push(RecordField {
            name: name.into(),
            alias: Some(alias.into()),
            value: value.into(),
        });
        self
    }

    /// Looks up a field by its declared name only.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Looks up a path token: declared names are tried first across all
    /// fields, then alias annotations. A direct name match always wins over
    /// an alias match, regardless of declaration order.
    pub fn lookup(&self, token: &str) -> Option<&Value> {
        self.get(token).or_else(|| {
            self.fields
                .iter()
                .find(|f| f.alias.as_deref() == Some(token))
                .map(|f| &f.value)
        })
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &RecordField> {
        self.fields.iter()
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        // usize larger than i64 falls back to a float approximation
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<V: Into<Value>> From<IndexMap<String, V>> for Value {
    fn from(entries: IndexMap<String, V>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => {
                Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::Number(n.into()),
            Value::Float(x) => serde_json::Number::from_f64(x)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Str(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
            // Aliases are annotations for path resolution; the exported
            // object is keyed by declared names only.
            Value::Record(record) => serde_json::Value::Object(
                record
                    .fields
                    .into_iter()
                    .map(|f| (f.name, f.value.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_empty() {
        assert!(Value::Null.is_null());
        assert!(Value::Null.is_empty());
    }

    #[test]
    fn test_scalars_are_not_empty() {
        assert!(!Value::Int(0).is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::Float(0.0).is_empty());
    }

    #[test]
    fn test_empty_containers() {
        assert!(Value::Str(String::new()).is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(Value::Map(IndexMap::new()).is_empty());
        assert!(Value::Record(Record::new()).is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(vec![1i64]).is_empty());
    }

    #[test]
    fn test_option_collapses_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
        // nested options unwrap all the way down
        assert_eq!(Value::from(Some(Some("x"))), Value::from("x"));
        assert_eq!(Value::from(Some(None::<&str>)), Value::Null);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(1i64).type_name(), "int");
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::from(vec![1i64]).type_name(), "list");
    }

    #[test]
    fn test_size() {
        assert_eq!(Value::from("héllo").size(), Some(5));
        assert_eq!(Value::from(vec![1i64, 2]).size(), Some(2));
        assert_eq!(Value::Int(7).size(), None);
        assert_eq!(Value::Null.size(), None);
    }

    #[test]
    fn test_record_direct_name_wins_over_alias() {
        // field "b" is aliased as "a"; a declared field "a" also exists
        let record = Record::new()
            .field("a", "direct")
            .field_with_alias("b", "a", "via-alias");

        assert_eq!(record.lookup("a"), Some(&Value::from("direct")));
        assert_eq!(record.lookup("b"), Some(&Value::from("via-alias")));
    }

    #[test]
    fn test_record_alias_fallback() {
        let record = Record::new().field_with_alias("stock_count", "stock", 7i64);

        assert_eq!(record.get("stock"), None);
        assert_eq!(record.lookup("stock"), Some(&Value::Int(7)));
        assert_eq!(record.lookup("stock_count"), Some(&Value::Int(7)));
        assert_eq!(record.lookup("missing"), None);
    }

    #[test]
    fn test_from_json() {
        let v = Value::from(json!({"a": [1, 2.5, "x", null, true]}));
        let map = v.as_map().unwrap();
        let list = map.get("a").unwrap().as_list().unwrap();
        assert_eq!(list[0], Value::Int(1));
        assert_eq!(list[1], Value::Float(2.5));
        assert_eq!(list[2], Value::from("x"));
        assert_eq!(list[3], Value::Null);
        assert_eq!(list[4], Value::Bool(true));
    }

    #[test]
    fn test_into_json_round_trip() {
        let v = Value::from(json!({"a": {"b": [1, "two"]}}));
        let back = serde_json::Value::from(v);
        assert_eq!(back, json!({"a": {"b": [1, "two"]}}));
    }

    #[test]
    fn test_record_exports_by_declared_name() {
        let record = Record::new().field_with_alias("stock_count", "stock", 7i64);
        let json = serde_json::Value::from(Value::Record(record));
        assert_eq!(json, json!({"stock_count": 7}));
    }

    #[test]
    fn test_display_renders_json() {
        assert_eq!(Value::from("x").to_string(), "\"x\"");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(vec![1i64, 2]).to_string(), "[1,2]");
    }
}
