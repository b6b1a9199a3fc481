//! Schema - Declare and validate the attributes of a resource
//!
//! Providers describe each resource type with a [`ResourceSchema`] so the
//! host can reject bad configuration before any handler runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::differ::ChangeSet;
use crate::resource::{Attributes, Value};

/// Validation function attached to a custom attribute type
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>);

impl Validator {
    pub fn new(f: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: &Value) -> Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator")
    }
}

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    /// Enum (list of allowed values, matched case-sensitively)
    Enum(Vec<String>),
    /// Custom type (base type check followed by a validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: Validator,
    },
    /// Ordered list
    List(Box<AttributeType>),
    /// Unordered collection; element order carries no meaning
    Set(Box<AttributeType>),
    /// Map with string keys
    Map(Box<AttributeType>),
    /// Nested block with its own attributes
    Object(HashMap<String, AttributeSchema>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { base, validate, .. }, v) => {
                base.validate(v)?;
                validate
                    .call(v)
                    .map_err(|message| TypeError::ValidationFailed { message })
            }

            (AttributeType::List(inner) | AttributeType::Set(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Object(attributes), Value::Map(map)) => {
                match validate_attributes(attributes, map).into_iter().next() {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name().to_string(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Set(inner) => format!("Set<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Object(_) => "Object".to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' needs at least {min} item(s), got {got}")]
    TooFewItems { name: String, min: usize, got: usize },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Changing this attribute replaces the resource
    pub force_new: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Minimum number of elements for list and set attributes
    pub min_items: Option<usize>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            force_new: false,
            default: None,
            description: None,
            min_items: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    fn validate_value(&self, value: &Value) -> Result<(), TypeError> {
        if let (Some(min), Value::List(items)) = (self.min_items, value)
            && items.len() < min
        {
            return Err(TypeError::TooFewItems {
                name: self.name.clone(),
                min,
                got: items.len(),
            });
        }
        self.attr_type
            .validate(value)
            .map_err(|e| TypeError::AttributeError {
                name: self.name.clone(),
                inner: Box::new(e),
            })
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &Attributes) -> Result<(), Vec<TypeError>> {
        let errors = validate_attributes(&self.attributes, attributes);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Fill in defaults for attributes the configuration leaves out
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        for (name, schema) in &self.attributes {
            if let Some(default) = &schema.default {
                attributes
                    .entry(name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
    }

    /// Changed attributes that cannot be updated in place, sorted by name
    pub fn requires_replacement(&self, changes: &ChangeSet) -> Vec<String> {
        let mut names: Vec<String> = changes
            .iter()
            .filter(|name| self.attributes.get(*name).is_some_and(|s| s.force_new))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}

fn validate_attributes(
    schema: &HashMap<String, AttributeSchema>,
    attributes: &Attributes,
) -> Vec<TypeError> {
    let mut errors = Vec::new();

    for (name, attr) in schema {
        if attr.required && !attributes.contains_key(name) && attr.default.is_none() {
            errors.push(TypeError::MissingRequired { name: name.clone() });
        }
    }

    for (name, value) in attributes {
        match schema.get(name) {
            Some(attr) => {
                if let Err(e) = attr.validate_value(value) {
                    errors.push(e);
                }
            }
            None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
        }
    }

    errors
}

/// Helper functions for common types
pub mod types {
    use regex::Regex;

    use super::*;

    fn expect_string(value: &Value) -> Result<&str, String> {
        value.as_str().ok_or_else(|| "Expected string".to_string())
    }

    /// String type validated by a custom function
    pub fn custom_string(
        name: impl Into<String>,
        validate: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> AttributeType {
        AttributeType::Custom {
            name: name.into(),
            base: Box::new(AttributeType::String),
            validate: Validator::new(move |value| validate(expect_string(value)?)),
        }
    }

    /// String matching a regular expression
    pub fn string_match(pattern: &str, message: impl Into<String>) -> AttributeType {
        let regex = Regex::new(pattern).map_err(|e| format!("invalid pattern '{}': {}", pattern, e));
        let message = message.into();
        custom_string("StringMatch", move |s| match &regex {
            Ok(re) if re.is_match(s) => Ok(()),
            Ok(_) => Err(format!("'{}': {}", s, message)),
            Err(e) => Err(e.clone()),
        })
    }

    /// String restricted to a fixed set of values
    pub fn string_in_slice(values: &[&str]) -> AttributeType {
        AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// Non-empty string
    pub fn string_is_not_empty() -> AttributeType {
        custom_string("NonEmptyString", |s| {
            if s.is_empty() {
                Err("expected a non-empty string".to_string())
            } else {
                Ok(())
            }
        })
    }

    /// String holding a JSON document
    pub fn string_is_json() -> AttributeType {
        custom_string("Json", |s| {
            if s.is_empty() {
                return Ok(());
            }
            serde_json::from_str::<serde_json::Value>(s)
                .map(|_| ())
                .map_err(|e| format!("expected a valid JSON document: {}", e))
        })
    }
}
