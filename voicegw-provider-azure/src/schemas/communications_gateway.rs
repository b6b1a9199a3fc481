//! Argument schema for azurerm_voice_services_communications_gateway

use std::collections::HashMap;

use voicegw_core::resource::Value;
use voicegw_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::types::{location, location_without_force_new, resource_group_name, tags};
use crate::sdk::communications_gateways::{
    AutoGeneratedDomainNameLabelScope, CommunicationsPlatform, Connectivity, E911Type,
    TeamsCodecs,
};

pub const RESOURCE_TYPE: &str = "azurerm_voice_services_communications_gateway";

fn string_set() -> AttributeType {
    AttributeType::Set(Box::new(AttributeType::String))
}

fn service_location_block() -> AttributeType {
    let attributes: HashMap<String, AttributeSchema> = [
        location_without_force_new(),
        AttributeSchema::new("operator_addresses", string_set())
            .required()
            .with_min_items(1),
        AttributeSchema::new("allowed_media_source_address_prefixes", string_set()),
        AttributeSchema::new("allowed_signaling_source_address_prefixes", string_set()),
        AttributeSchema::new("esrp_addresses", string_set()).with_description(
            "Required when e911_type is DirectToEsrp, must be empty when it is Standard.",
        ),
    ]
    .into_iter()
    .map(|a| (a.name.clone(), a))
    .collect();

    AttributeType::Object(attributes)
}

/// Returns the argument schema of the Communications Gateway resource
pub fn arguments() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("Manages a Voice Services Communications Gateway.")
        .attribute(
            AttributeSchema::new(
                "name",
                types::string_match(
                    "^[a-zA-Z0-9-]{3,24}$",
                    "The name can only contain letters, numbers and dashes, the name length must be from 3 to 24 characters.",
                ),
            )
            .required()
            .force_new(),
        )
        .attribute(location())
        .attribute(resource_group_name())
        .attribute(
            AttributeSchema::new(
                "connectivity",
                types::string_in_slice(&Connectivity::possible_values()),
            )
            .required()
            .force_new(),
        )
        .attribute(
            AttributeSchema::new("codecs", types::string_in_slice(&TeamsCodecs::possible_values()))
                .required()
                .with_description("The voice codec sent to and received from Microsoft Teams."),
        )
        .attribute(
            AttributeSchema::new("e911_type", types::string_in_slice(&E911Type::possible_values()))
                .required()
                .with_description("How emergency calls are routed."),
        )
        .attribute(
            AttributeSchema::new(
                "platforms",
                AttributeType::List(Box::new(types::string_in_slice(
                    &CommunicationsPlatform::possible_values(),
                ))),
            )
            .required(),
        )
        .attribute(
            AttributeSchema::new(
                "service_location",
                AttributeType::Set(Box::new(service_location_block())),
            )
            .required(),
        )
        .attribute(
            AttributeSchema::new(
                "auto_generated_domain_name_label_scope",
                types::string_in_slice(&AutoGeneratedDomainNameLabelScope::possible_values()),
            )
            .force_new()
            .with_default(Value::from(AutoGeneratedDomainNameLabelScope::TenantReuse.as_str())),
        )
        .attribute(
            AttributeSchema::new("api_bridge", types::string_is_json())
                .with_description("Details of API bridge functionality, as a JSON document."),
        )
        .attribute(AttributeSchema::new(
            "emergency_dial_strings",
            AttributeType::List(Box::new(AttributeType::String)),
        ))
        .attribute(AttributeSchema::new("on_prem_mcp_enabled", AttributeType::Bool))
        .attribute(tags())
        .attribute(AttributeSchema::new(
            "microsoft_teams_voicemail_pilot_number",
            types::string_is_not_empty(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicegw_core::differ::ChangeSet;
    use voicegw_core::resource::Attributes;

    fn service_location(esrp: &[&str]) -> Value {
        Value::Map(
            [
                ("location".to_string(), Value::from("eastus")),
                (
                    "operator_addresses".to_string(),
                    Value::List(vec![Value::from("10.0.0.1")]),
                ),
                (
                    "esrp_addresses".to_string(),
                    Value::List(esrp.iter().map(|s| Value::from(*s)).collect()),
                ),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn valid_config() -> Attributes {
        [
            ("name", Value::from("abc")),
            ("location", Value::from("East US")),
            ("resource_group_name", Value::from("example-rg")),
            ("connectivity", Value::from("PublicAddress")),
            ("codecs", Value::from("PCMA")),
            ("e911_type", Value::from("Standard")),
            (
                "platforms",
                Value::List(vec![Value::from("OperatorConnect")]),
            ),
            ("service_location", Value::List(vec![service_location(&[])])),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn valid_configuration_passes() {
        let mut config = valid_config();
        arguments().apply_defaults(&mut config);
        assert!(arguments().validate(&config).is_ok());
        assert_eq!(
            config.get("auto_generated_domain_name_label_scope"),
            Some(&Value::from("TenantReuse"))
        );
    }

    #[test]
    fn name_is_validated() {
        let mut config = valid_config();
        config.insert("name".to_string(), Value::from("ab"));
        assert!(arguments().validate(&config).is_err());

        config.insert("name".to_string(), Value::from("under_score"));
        assert!(arguments().validate(&config).is_err());
    }

    #[test]
    fn codecs_must_be_a_known_value() {
        let mut config = valid_config();
        config.insert("codecs".to_string(), Value::from("OPUS"));
        assert!(arguments().validate(&config).is_err());
    }

    #[test]
    fn api_bridge_must_be_json() {
        let mut config = valid_config();
        config.insert("api_bridge".to_string(), Value::from("{bad"));
        assert!(arguments().validate(&config).is_err());
    }

    #[test]
    fn operator_addresses_cannot_be_empty() {
        let mut config = valid_config();
        let mut location = service_location(&[]);
        if let Value::Map(map) = &mut location {
            map.insert("operator_addresses".to_string(), Value::List(vec![]));
        }
        config.insert("service_location".to_string(), Value::List(vec![location]));
        assert!(arguments().validate(&config).is_err());
    }

    #[test]
    fn force_new_attributes() {
        let changes = ChangeSet::from_names([
            "name",
            "codecs",
            "connectivity",
            "auto_generated_domain_name_label_scope",
            "service_location",
        ]);
        assert_eq!(
            arguments().requires_replacement(&changes),
            vec![
                "auto_generated_domain_name_label_scope".to_string(),
                "connectivity".to_string(),
                "name".to_string(),
            ]
        );
    }
}
