//! Resource - Attribute values and the per-invocation view of a resource

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::differ::ChangeSet;
use crate::provider::{ProviderError, ProviderResult};

/// Attribute value of a resource as exchanged with the host
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

/// Attribute map keyed by schema attribute name
pub type Attributes = HashMap<String, Value>;

impl Value {
    /// Convert a JSON value into an attribute value.
    ///
    /// `null` has no attribute representation and yields `None`; null members of
    /// objects and arrays are dropped. Numbers must be integers that fit in `i64`.
    pub fn from_json(value: &serde_json::Value) -> ProviderResult<Option<Value>> {
        let value = match value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => {
                    return Err(ProviderError::Encode(format!(
                        "{} is not an integer attribute value",
                        n
                    )));
                }
            },
            serde_json::Value::Array(arr) => {
                let mut items = Vec::with_capacity(arr.len());
                for item in arr {
                    if let Some(v) = Value::from_json(item)? {
                        items.push(v);
                    }
                }
                Value::List(items)
            }
            serde_json::Value::Object(obj) => {
                let mut map = HashMap::with_capacity(obj.len());
                for (k, v) in obj {
                    if let Some(v) = Value::from_json(v)? {
                        map.insert(k.clone(), v);
                    }
                }
                Value::Map(map)
            }
        };
        Ok(Some(value))
    }

    /// Convert this attribute value into JSON
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Convert an attribute map into a JSON object
pub fn attributes_to_json(attributes: &Attributes) -> serde_json::Value {
    serde_json::Value::Object(
        attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

/// Convert a JSON object into an attribute map
pub fn attributes_from_json(value: &serde_json::Value) -> ProviderResult<Attributes> {
    match Value::from_json(value)? {
        Some(Value::Map(map)) => Ok(map),
        _ => Err(ProviderError::Encode(
            "expected the model to serialize to an object".to_string(),
        )),
    }
}

/// Everything a resource handler sees about the resource for one invocation
///
/// The host supplies the resource ID (absent before Create), the configured
/// attributes and the set of attributes that changed in this plan. Handlers
/// report back through [`set_id`](Self::set_id), [`encode`](Self::encode) and
/// [`mark_as_gone`](Self::mark_as_gone).
#[derive(Debug, Clone, Default)]
pub struct ResourceMetaData {
    id: Option<String>,
    config: Attributes,
    changes: ChangeSet,
    state: Option<Attributes>,
    gone: bool,
}

impl ResourceMetaData {
    pub fn new(config: Attributes) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_changes(mut self, changes: ChangeSet) -> Self {
        self.changes = changes;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Resource ID, failing when the host did not provide one
    pub fn require_id(&self) -> ProviderResult<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| ProviderError::InvalidId("resource ID is not set".to_string()))
    }

    pub fn set_id(&mut self, id: impl fmt::Display) {
        self.id = Some(id.to_string());
    }

    pub fn config(&self) -> &Attributes {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Attributes {
        &mut self.config
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Whether the host marked `attribute` as changed in this operation
    pub fn has_change(&self, attribute: &str) -> bool {
        self.changes.contains(attribute)
    }

    /// Decode the configured attributes into a typed model
    pub fn decode<T: DeserializeOwned>(&self) -> ProviderResult<T> {
        serde_json::from_value(attributes_to_json(&self.config))
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    /// Encode a typed model as the state reported back to the host
    pub fn encode<T: Serialize>(&mut self, model: &T) -> ProviderResult<()> {
        let value = serde_json::to_value(model).map_err(|e| ProviderError::Encode(e.to_string()))?;
        self.state = Some(attributes_from_json(&value)?);
        Ok(())
    }

    /// Record that the remote resource no longer exists
    pub fn mark_as_gone(&mut self, id: impl fmt::Display) {
        log::warn!("{} was not found - removing from state", id);
        self.id = None;
        self.state = None;
        self.gone = true;
    }

    pub fn is_gone(&self) -> bool {
        self.gone
    }

    pub fn state(&self) -> Option<&Attributes> {
        self.state.as_ref()
    }
}
