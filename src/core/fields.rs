//! Context values and field extraction
//!
//! Call sites hand the logger a [`ContextValue`] describing whatever context
//! they have at hand. Only two shapes carry fields, a key/value mapping and a
//! record of named attributes. Everything else is accepted and ignored, so
//! [`extract_fields`] never fails.
//!
//! # Example
//!
//! ```
//! use hlog::core::{extract_fields, ContextValue};
//! use std::collections::HashMap;
//!
//! let mut ctx = HashMap::new();
//! ctx.insert("key1", "value1");
//! ctx.insert("key2", "value2");
//!
//! let fields = extract_fields(&ContextValue::from(ctx));
//! assert_eq!(fields.get("key1"), Some("value1"));
//! assert_eq!(fields.len(), 2);
//!
//! assert!(extract_fields(&ContextValue::from(42)).is_empty());
//! ```

use super::field_set::FieldSet;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Display};

/// Caller-supplied context attached to a log call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContextValue {
    /// No context at all
    #[default]
    Absent,

    /// Key/value mapping, keys and values already stringified
    Mapping(Vec<(String, String)>),

    /// Fixed-shape record, attribute name to stringified value
    Record(Vec<(String, String)>),

    /// Any other shape (primitive, sequence, ...); carries no fields
    Opaque(String),
}

/// Types that expose themselves as a record of named attributes
///
/// ```
/// use hlog::core::{extract_fields, ContextValue, ToFields};
///
/// struct Request {
///     method: &'static str,
///     status: u16,
/// }
///
/// impl ToFields for Request {
///     fn to_fields(&self) -> Vec<(String, String)> {
///         vec![
///             ("method".to_string(), self.method.to_string()),
///             ("status".to_string(), self.status.to_string()),
///         ]
///     }
/// }
///
/// let req = Request { method: "GET", status: 200 };
/// let fields = extract_fields(&ContextValue::from_fields(&req));
/// assert_eq!(fields.get("status"), Some("200"));
/// ```
pub trait ToFields {
    fn to_fields(&self) -> Vec<(String, String)>;
}

impl ContextValue {
    pub fn none() -> Self {
        ContextValue::Absent
    }

    /// Build a mapping from any iterator of displayable pairs
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        ContextValue::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Build a record from attribute names and displayable values
    pub fn record<I, N, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Display,
    {
        ContextValue::Record(
            attributes
                .into_iter()
                .map(|(n, v)| (n.into(), v.to_string()))
                .collect(),
        )
    }

    /// Wrap a value that has no named fields
    pub fn opaque(value: impl Display) -> Self {
        ContextValue::Opaque(value.to_string())
    }

    /// Record shape of a [`ToFields`] implementor
    pub fn from_fields<T: ToFields + ?Sized>(value: &T) -> Self {
        ContextValue::Record(value.to_fields())
    }

    /// Introspect any serializable value
    ///
    /// Structs and maps become a record of their top-level entries; nested
    /// values are rendered as compact JSON. `null` is absent, every other
    /// shape is opaque. A value that fails to serialize is treated as absent.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(map)) => ContextValue::Record(
                map.into_iter()
                    .map(|(k, v)| (k, stringify_json(&v)))
                    .collect(),
            ),
            Ok(serde_json::Value::Null) | Err(_) => ContextValue::Absent,
            Ok(other) => ContextValue::Opaque(stringify_json(&other)),
        }
    }

    /// True for the two shapes that can carry fields
    pub fn has_fields(&self) -> bool {
        matches!(self, ContextValue::Mapping(_) | ContextValue::Record(_))
    }
}

fn stringify_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flatten a context value into a field set
///
/// Mapping entries and record attributes become fields; any other shape
/// yields an empty set.
pub fn extract_fields(value: &ContextValue) -> FieldSet {
    match value {
        ContextValue::Mapping(entries) | ContextValue::Record(entries) => entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect(),
        ContextValue::Absent | ContextValue::Opaque(_) => FieldSet::new(),
    }
}

impl From<()> for ContextValue {
    fn from(_: ()) -> Self {
        ContextValue::Absent
    }
}

impl<T: Into<ContextValue>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ContextValue::Absent, Into::into)
    }
}

impl<K: Display, V: Display, S> From<HashMap<K, V, S>> for ContextValue {
    fn from(map: HashMap<K, V, S>) -> Self {
        ContextValue::mapping(map)
    }
}

impl<K: Display, V: Display, S> From<&HashMap<K, V, S>> for ContextValue {
    fn from(map: &HashMap<K, V, S>) -> Self {
        ContextValue::mapping(map.iter())
    }
}

impl<K: Display, V: Display> From<BTreeMap<K, V>> for ContextValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        ContextValue::mapping(map)
    }
}

impl<K: Display, V: Display> From<&BTreeMap<K, V>> for ContextValue {
    fn from(map: &BTreeMap<K, V>) -> Self {
        ContextValue::mapping(map.iter())
    }
}

impl From<FieldSet> for ContextValue {
    fn from(set: FieldSet) -> Self {
        ContextValue::mapping(set.iter())
    }
}

impl<T: Debug> From<Vec<T>> for ContextValue {
    fn from(items: Vec<T>) -> Self {
        ContextValue::Opaque(format!("{:?}", items))
    }
}

macro_rules! opaque_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ContextValue {
                fn from(value: $ty) -> Self {
                    ContextValue::opaque(value)
                }
            }
        )*
    };
}

opaque_from!(&str, String, bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_extract_from_mapping() {
        let mut map = HashMap::new();
        map.insert("key1", "value1");
        map.insert("key2", "value2");

        let fields = extract_fields(&map.into());
        let expected = FieldSet::new()
            .with_field("key1", "value1")
            .with_field("key2", "value2");
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_extract_stringifies_keys_and_values() {
        let mut map = BTreeMap::new();
        map.insert(7, 3.5);
        map.insert(8, 1.0);

        let fields = extract_fields(&ContextValue::from(&map));
        assert_eq!(fields.get("7"), Some("3.5"));
        assert_eq!(fields.get("8"), Some("1"));
    }

    #[test]
    fn test_extract_from_record() {
        let ctx = ContextValue::record([("key1", "value1"), ("key2", "value2")]);

        let fields = extract_fields(&ctx);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("key1"), Some("value1"));
        assert_eq!(fields.get("key2"), Some("value2"));
    }

    #[test]
    fn test_extract_from_serializable_struct() {
        #[derive(Serialize)]
        struct Login {
            key1: String,
            key2: String,
        }

        let login = Login {
            key1: "value1".to_string(),
            key2: "value2".to_string(),
        };
        let ctx = ContextValue::from_serialize(&login);
        assert!(matches!(ctx, ContextValue::Record(_)));

        let fields = extract_fields(&ctx);
        assert_eq!(
            fields,
            FieldSet::new()
                .with_field("key1", "value1")
                .with_field("key2", "value2")
        );
    }

    #[test]
    fn test_serializable_nested_values_are_lossy_text() {
        #[derive(Serialize)]
        struct Outer {
            id: u32,
            tags: Vec<&'static str>,
            parent: Option<u32>,
        }

        let fields = extract_fields(&ContextValue::from_serialize(&Outer {
            id: 9,
            tags: vec!["a", "b"],
            parent: None,
        }));
        assert_eq!(fields.get("id"), Some("9"));
        assert_eq!(fields.get("tags"), Some("[\"a\",\"b\"]"));
        assert_eq!(fields.get("parent"), Some("null"));
    }

    #[test]
    fn test_other_shapes_yield_no_fields() {
        assert!(extract_fields(&ContextValue::from(42)).is_empty());
        assert!(extract_fields(&ContextValue::from(1)).is_empty());
        assert!(extract_fields(&ContextValue::from(())).is_empty());
        assert!(extract_fields(&ContextValue::from(None::<i32>)).is_empty());
        assert!(extract_fields(&ContextValue::from("plain text")).is_empty());
        assert!(extract_fields(&ContextValue::from(vec![1, 2, 3])).is_empty());
        assert!(extract_fields(&ContextValue::from_serialize(&42)).is_empty());
        assert!(extract_fields(&ContextValue::from_serialize(&vec!["a"])).is_empty());
        assert_eq!(
            ContextValue::from_serialize(&Option::<u8>::None),
            ContextValue::Absent
        );
    }

    #[test]
    fn test_some_option_delegates() {
        let mut map = HashMap::new();
        map.insert("k", "v");
        let ctx = ContextValue::from(Some(map));
        assert!(ctx.has_fields());
        assert_eq!(extract_fields(&ctx).get("k"), Some("v"));
    }

    #[test]
    fn test_extract_is_pure() {
        let ctx = ContextValue::mapping([("a", 1), ("b", 2)]);
        assert_eq!(extract_fields(&ctx), extract_fields(&ctx));
    }
}
