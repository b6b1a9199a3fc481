//! Expand the flat model into the wire model and flatten it back
//!
//! The translation is lossy in a few known places:
//! - only the first codec is kept when flattening
//! - an absent and a `null` api bridge both flatten to an empty string
//! - absent address lists flatten to empty lists

use std::str::FromStr;

use voicegw_core::provider::{ProviderError, ProviderResult};

use super::model::{CommunicationsGatewayModel, ServiceRegionPropertiesModel};
use crate::sdk::Nullable;
use crate::sdk::communications_gateways::{
    CommunicationsGateway, CommunicationsGatewayId, CommunicationsGatewayProperties,
    CommunicationsPlatform, PrimaryRegionProperties, ServiceRegionProperties, TeamsCodecs,
    UnknownEnumValue,
};
use crate::utils::normalize_location;

/// Parse an enumeration attribute, naming the attribute on failure
pub fn expand_enum<T>(attribute: &str, value: &str) -> ProviderResult<T>
where
    T: FromStr<Err = UnknownEnumValue>,
{
    value
        .parse()
        .map_err(|e| ProviderError::validation(format!("{}: {}", attribute, e)))
}

/// The model holds a single codec; the API takes a list
pub fn expand_codecs(codecs: &str) -> ProviderResult<Vec<TeamsCodecs>> {
    Ok(vec![expand_enum("codecs", codecs)?])
}

/// An empty list expands to an absent collection
pub fn expand_platforms(platforms: &[String]) -> ProviderResult<Option<Vec<CommunicationsPlatform>>> {
    if platforms.is_empty() {
        return Ok(None);
    }

    platforms
        .iter()
        .map(|p| expand_enum("platforms", p))
        .collect::<ProviderResult<Vec<_>>>()
        .map(Some)
}

pub fn expand_service_locations(
    input: &[ServiceRegionPropertiesModel],
) -> Vec<ServiceRegionProperties> {
    input
        .iter()
        .map(|v| ServiceRegionProperties {
            name: normalize_location(&v.location),
            primary_region_properties: PrimaryRegionProperties {
                allowed_media_source_address_prefixes: Nullable::from_option(
                    v.allowed_media_source_address_prefixes.clone(),
                ),
                allowed_signaling_source_address_prefixes: Nullable::from_option(
                    v.allowed_signaling_source_address_prefixes.clone(),
                ),
                esrp_addresses: Nullable::from_option(v.esrp_addresses.clone()),
                operator_addresses: v.operator_addresses.clone(),
            },
        })
        .collect()
}

/// Parse the api bridge document; an empty string yields `None`
pub fn expand_api_bridge(api_bridge: &str) -> ProviderResult<Option<serde_json::Value>> {
    if api_bridge.is_empty() {
        return Ok(None);
    }

    log::debug!("unmarshalling json for ApiBridge");
    serde_json::from_str(api_bridge)
        .map(Some)
        .map_err(|e| ProviderError::validation(format!("unmarshalling value for ApiBridge: {}", e)))
}

/// Build the complete wire model sent on create
///
/// An empty api bridge is sent as an explicit `null`.
pub fn expand_communications_gateway(
    model: &CommunicationsGatewayModel,
) -> ProviderResult<CommunicationsGateway> {
    let api_bridge = match expand_api_bridge(&model.api_bridge)? {
        Some(value) => Nullable::Value(value),
        None => Nullable::Null,
    };

    let properties = CommunicationsGatewayProperties {
        api_bridge,
        auto_generated_domain_name_label: None,
        auto_generated_domain_name_label_scope: Some(expand_enum(
            "auto_generated_domain_name_label_scope",
            &model.auto_generated_domain_name_label_scope,
        )?),
        codecs: expand_codecs(&model.codecs)?,
        connectivity: expand_enum("connectivity", &model.connectivity)?,
        e911_type: expand_enum("e911_type", &model.e911_type)?,
        emergency_dial_strings: model.emergency_dial_strings.clone(),
        on_prem_mcp_enabled: Some(model.on_prem_mcp_enabled),
        platforms: expand_platforms(&model.platforms)?,
        provisioning_state: None,
        service_locations: expand_service_locations(&model.service_location),
        status: None,
        teams_voicemail_pilot_number: Some(model.microsoft_teams_voicemail_pilot_number.clone()),
    };

    Ok(CommunicationsGateway {
        id: None,
        location: normalize_location(&model.location),
        name: None,
        properties: Some(properties),
        tags: Some(model.tags.clone()),
        resource_type: None,
    })
}

/// First codec, or an empty string when there is none
pub fn flatten_codecs(codecs: &[TeamsCodecs]) -> String {
    codecs
        .first()
        .map(|c| c.as_str().to_string())
        .unwrap_or_default()
}

/// An absent list flattens to an empty one, which the model leaves out of state
pub fn flatten_platforms(platforms: Option<&[CommunicationsPlatform]>) -> Vec<String> {
    platforms
        .unwrap_or_default()
        .iter()
        .map(|p| p.as_str().to_string())
        .collect()
}

pub fn flatten_service_locations(
    input: &[ServiceRegionProperties],
) -> Vec<ServiceRegionPropertiesModel> {
    let flatten_list = |list: &Nullable<Vec<String>>| Some(list.as_value().cloned().unwrap_or_default());

    input
        .iter()
        .map(|region| {
            let v = &region.primary_region_properties;
            ServiceRegionPropertiesModel {
                location: normalize_location(&region.name),
                operator_addresses: v.operator_addresses.clone(),
                allowed_media_source_address_prefixes: flatten_list(
                    &v.allowed_media_source_address_prefixes,
                ),
                allowed_signaling_source_address_prefixes: flatten_list(
                    &v.allowed_signaling_source_address_prefixes,
                ),
                esrp_addresses: flatten_list(&v.esrp_addresses),
            }
        })
        .collect()
}

/// Only a present, non-null document is serialized
pub fn flatten_api_bridge(api_bridge: &Nullable<serde_json::Value>) -> ProviderResult<String> {
    match api_bridge.as_value() {
        Some(value) => serde_json::to_string(value).map_err(|e| {
            ProviderError::Encode(format!("marshalling value for ApiBridge: {}", e))
        }),
        None => Ok(String::new()),
    }
}

/// Rebuild the flat model from the wire model returned by the API
pub fn flatten_communications_gateway(
    id: &CommunicationsGatewayId,
    gateway: &CommunicationsGateway,
) -> ProviderResult<CommunicationsGatewayModel> {
    let mut state = CommunicationsGatewayModel {
        name: id.communications_gateway_name.clone(),
        resource_group_name: id.resource_group_name.clone(),
        location: normalize_location(&gateway.location),
        ..Default::default()
    };

    if let Some(properties) = &gateway.properties {
        state.connectivity = properties.connectivity.as_str().to_string();
        state.codecs = flatten_codecs(&properties.codecs);
        state.e911_type = properties.e911_type.as_str().to_string();
        state.platforms = flatten_platforms(properties.platforms.as_deref());
        state.service_location = flatten_service_locations(&properties.service_locations);

        if let Some(scope) = properties.auto_generated_domain_name_label_scope {
            state.auto_generated_domain_name_label_scope = scope.as_str().to_string();
        }

        state.api_bridge = flatten_api_bridge(&properties.api_bridge)?;
        state.emergency_dial_strings = properties.emergency_dial_strings.clone();
        state.on_prem_mcp_enabled = properties.on_prem_mcp_enabled.unwrap_or(false);
        state.microsoft_teams_voicemail_pilot_number = properties
            .teams_voicemail_pilot_number
            .clone()
            .unwrap_or_default();
    }

    if let Some(tags) = &gateway.tags {
        state.tags = tags.clone();
    }

    Ok(state)
}
