//! Message metadata used for log correlation.
//!
//! [`Fields`] is an immutable key/value mapping. Merging never touches the
//! receiver: [`Fields::with_fields`] returns a new mapping, so a derived
//! message can extend its parent's context without the parent seeing the
//! change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::ArcStr;
use crate::message::MessageId;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value.
    Str(ArcStr),
    /// A signed integer value.
    Int(i64),
    /// An unsigned integer value.
    Uint(u64),
    /// A boolean value.
    Bool(bool),
}

impl FieldValue {
    /// Returns the string value, if this is a [`FieldValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Uint(u) => write!(f, "{u}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value.into())
    }
}

impl From<ArcStr> for FieldValue {
    fn from(value: ArcStr) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&MessageId> for FieldValue {
    fn from(value: &MessageId) -> Self {
        FieldValue::Str(value.as_arc().clone())
    }
}

impl From<MessageId> for FieldValue {
    fn from(value: MessageId) -> Self {
        FieldValue::from(&value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Uint(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Uint(value.into())
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::Uint(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// An immutable mapping from key to [`FieldValue`].
///
/// Cloning is cheap: the underlying map is shared and never mutated.
///
/// # Examples
///
/// ```
/// use sip_message::Fields;
///
/// let base = Fields::from([("call", "a84b4c76e66710")]);
/// let merged = base.with_fields(&Fields::from([("call", "other"), ("peer", "bob")]));
///
/// assert_eq!(base.len(), 1);
/// assert_eq!(merged.get("call").and_then(|v| v.as_str()), Some("other"));
/// assert_eq!(merged.to_string(), "{call=other, peer=bob}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Arc<BTreeMap<ArcStr, FieldValue>>);

impl Fields {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new mapping holding every entry of `self` and of `other`.
    ///
    /// Entries of `other` override same-named entries of `self`.
    pub fn with_fields(&self, other: &Fields) -> Fields {
        if other.is_empty() {
            return self.clone();
        }
        let mut merged = BTreeMap::clone(&self.0);
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));

        Fields(Arc::new(merged))
    }

    /// Returns a new mapping with a single entry added or replaced.
    pub fn with_field(&self, key: &str, value: impl Into<FieldValue>) -> Fields {
        let mut merged = BTreeMap::clone(&self.0);
        merged.insert(key.into(), value.into());

        Fields(Arc::new(merged))
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Returns an iterator over the entries, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<ArcStr>,
    V: Into<FieldValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<ArcStr>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Fields(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.0.iter().format_with(", ", |(k, v), f| f(&format_args!("{k}={v}")));

        write!(f, "{{{entries}}}")
    }
}
