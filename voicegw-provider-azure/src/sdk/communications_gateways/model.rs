//! Wire models for Microsoft.VoiceServices/communicationsGateways

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sdk::Nullable;

/// A string did not match any variant of a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {type_name} value {value:?}")]
pub struct UnknownEnumValue {
    pub type_name: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Wire values of every variant, in declaration order
            pub fn possible_values() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(UnknownEnumValue {
                        type_name: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    AutoGeneratedDomainNameLabelScope {
        NoReuse => "NoReuse",
        ResourceGroupReuse => "ResourceGroupReuse",
        SubscriptionReuse => "SubscriptionReuse",
        TenantReuse => "TenantReuse",
    }
);

string_enum!(
    CommunicationsPlatform {
        OperatorConnect => "OperatorConnect",
        TeamsPhoneMobile => "TeamsPhoneMobile",
    }
);

string_enum!(
    Connectivity {
        PublicAddress => "PublicAddress",
    }
);

string_enum!(
    E911Type {
        DirectToEsrp => "DirectToEsrp",
        Standard => "Standard",
    }
);

string_enum!(
    ProvisioningState {
        Canceled => "Canceled",
        Failed => "Failed",
        Succeeded => "Succeeded",
    }
);

string_enum!(
    Status {
        ChangePending => "ChangePending",
        Complete => "Complete",
    }
);

string_enum!(
    TeamsCodecs {
        GSevenTwoTwo => "G722",
        GSevenTwoTwoTwo => "G722_2",
        Pcma => "PCMA",
        Pcmu => "PCMU",
        SilkEight => "SILK_8",
        SilkOneSix => "SILK_16",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationsGateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CommunicationsGatewayProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationsGatewayProperties {
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub api_bridge: Nullable<serde_json::Value>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generated_domain_name_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generated_domain_name_label_scope: Option<AutoGeneratedDomainNameLabelScope>,
    pub codecs: Vec<TeamsCodecs>,
    pub connectivity: Connectivity,
    pub e911_type: E911Type,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_dial_strings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_prem_mcp_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<CommunicationsPlatform>>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    pub service_locations: Vec<ServiceRegionProperties>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams_voicemail_pilot_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegionProperties {
    pub name: String,
    pub primary_region_properties: PrimaryRegionProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryRegionProperties {
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub allowed_media_source_address_prefixes: Nullable<Vec<String>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub allowed_signaling_source_address_prefixes: Nullable<Vec<String>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub esrp_addresses: Nullable<Vec<String>>,
    pub operator_addresses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_wire_values() {
        assert_eq!(TeamsCodecs::GSevenTwoTwoTwo.as_str(), "G722_2");
        assert_eq!("SILK_16".parse::<TeamsCodecs>(), Ok(TeamsCodecs::SilkOneSix));
        assert_eq!(
            serde_json::to_value(E911Type::DirectToEsrp).unwrap(),
            json!("DirectToEsrp")
        );
        assert_eq!(
            CommunicationsPlatform::possible_values(),
            vec!["OperatorConnect", "TeamsPhoneMobile"]
        );
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = "pcma".parse::<TeamsCodecs>().unwrap_err();
        assert_eq!(err.type_name, "TeamsCodecs");
        assert_eq!(err.to_string(), "unknown TeamsCodecs value \"pcma\"");
    }

    #[test]
    fn deserialize_gateway_response() {
        let body = json!({
            "id": "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.VoiceServices/communicationsGateways/gw",
            "name": "gw",
            "type": "Microsoft.VoiceServices/communicationsGateways",
            "location": "eastus",
            "properties": {
                "provisioningState": "Succeeded",
                "status": "Complete",
                "codecs": ["PCMA", "PCMU"],
                "connectivity": "PublicAddress",
                "e911Type": "Standard",
                "platforms": ["OperatorConnect"],
                "serviceLocations": [{
                    "name": "eastus",
                    "primaryRegionProperties": {
                        "operatorAddresses": ["10.0.0.1"],
                        "esrpAddresses": null
                    }
                }],
                "apiBridge": {"enabled": true}
            }
        });

        let gateway: CommunicationsGateway = serde_json::from_value(body).unwrap();
        let props = gateway.properties.unwrap();
        assert_eq!(props.codecs, vec![TeamsCodecs::Pcma, TeamsCodecs::Pcmu]);
        assert_eq!(props.provisioning_state, Some(ProvisioningState::Succeeded));
        assert_eq!(props.api_bridge, Nullable::Value(json!({"enabled": true})));

        let region = &props.service_locations[0].primary_region_properties;
        assert!(region.esrp_addresses.is_null());
        assert!(region.allowed_media_source_address_prefixes.is_unset());
    }
}
