//! Tri-state wire field
//!
//! Some properties must tell three states apart on the wire: left out of the
//! request body, sent as an explicit `null`, or sent with a value. An empty
//! collection is a value (`Value(vec![])`), not an absence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire field that is unset, explicitly null, or carries a value
///
/// Declare fields as
/// `#[serde(default, skip_serializing_if = "Nullable::is_unset")]` so that
/// `Unset` is omitted and a missing field deserializes as `Unset`.
#[derive(Debug, Clone, PartialEq)]
pub enum Nullable<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Unset
    }
}

impl<T> Nullable<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Nullable::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `None` becomes `Unset`
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Nullable::Value(v),
            None => Nullable::Unset,
        }
    }

    /// Both `Unset` and `Null` collapse to `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(v) => v.serialize(serializer),
            Nullable::Unset | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        })
    }
}
