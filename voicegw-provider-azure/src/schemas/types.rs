//! Attribute schemas shared by Azure resources

use voicegw_core::resource::Value;
use voicegw_core::schema::{AttributeSchema, AttributeType, Validator, types};

const MAX_TAGS: usize = 50;
const MAX_TAG_KEY_LENGTH: usize = 512;
const MAX_TAG_VALUE_LENGTH: usize = 256;

fn location_type() -> AttributeType {
    types::custom_string("Location", |s| {
        if s.trim().is_empty() {
            Err("location must not be empty".to_string())
        } else {
            Ok(())
        }
    })
}

/// Required, force-new Azure location
pub fn location() -> AttributeSchema {
    location_without_force_new().force_new()
}

/// Required Azure location that can change in place
pub fn location_without_force_new() -> AttributeSchema {
    AttributeSchema::new("location", location_type())
        .required()
        .with_description("The Azure Region where the resource should exist.")
}

/// Required, force-new resource group name
///
/// Resource group names are 1-90 characters of letters, digits, underscores,
/// periods, hyphens and parentheses, and cannot end in a period.
pub fn resource_group_name() -> AttributeSchema {
    let pattern = types::string_match(
        r"^[-\w\.\(\)]{1,90}$",
        "resource group names may only contain alphanumeric characters, dash, underscores, parentheses and periods, and must be at most 90 characters",
    );
    let no_trailing_period = AttributeType::Custom {
        name: "ResourceGroupName".to_string(),
        base: Box::new(pattern),
        validate: Validator::new(|value| match value.as_str() {
            Some(s) if s.ends_with('.') => {
                Err(format!("resource group name {:?} cannot end with a period", s))
            }
            _ => Ok(()),
        }),
    };

    AttributeSchema::new("resource_group_name", no_trailing_period)
        .required()
        .force_new()
        .with_description("The name of the Resource Group where the resource should exist.")
}

/// Optional map of tags
pub fn tags() -> AttributeSchema {
    let tags_type = AttributeType::Custom {
        name: "Tags".to_string(),
        base: Box::new(AttributeType::Map(Box::new(AttributeType::String))),
        validate: Validator::new(validate_tags),
    };

    AttributeSchema::new("tags", tags_type).with_description("A mapping of tags to assign to the resource.")
}

fn validate_tags(value: &Value) -> Result<(), String> {
    let Value::Map(tags) = value else {
        return Err("Expected map".to_string());
    };

    if tags.len() > MAX_TAGS {
        return Err(format!(
            "a maximum of {} tags can be applied to each resource, got {}",
            MAX_TAGS,
            tags.len()
        ));
    }

    for (key, value) in tags {
        if key.len() > MAX_TAG_KEY_LENGTH {
            return Err(format!(
                "the maximum length for a tag key is {} characters: {:?} is {} characters",
                MAX_TAG_KEY_LENGTH,
                key,
                key.len()
            ));
        }
        if let Some(v) = value.as_str()
            && v.len() > MAX_TAG_VALUE_LENGTH
        {
            return Err(format!(
                "the maximum length for a tag value is {} characters: the value for {:?} is {} characters",
                MAX_TAG_VALUE_LENGTH,
                key,
                v.len()
            ));
        }
    }

    Ok(())
}
