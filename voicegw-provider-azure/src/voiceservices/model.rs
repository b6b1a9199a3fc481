//! Flat configuration model of a Communications Gateway

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use voicegw_core::provider::{ProviderError, ProviderResult};

use crate::sdk::communications_gateways::{AutoGeneratedDomainNameLabelScope, E911Type};

fn default_domain_name_label_scope() -> String {
    AutoGeneratedDomainNameLabelScope::TenantReuse.as_str().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunicationsGatewayModel {
    pub name: String,
    pub resource_group_name: String,
    #[serde(default)]
    pub api_bridge: String,
    #[serde(default = "default_domain_name_label_scope")]
    pub auto_generated_domain_name_label_scope: String,
    pub codecs: String,
    pub connectivity: String,
    pub e911_type: String,
    #[serde(default)]
    pub emergency_dial_strings: Option<Vec<String>>,
    pub location: String,
    #[serde(default)]
    pub on_prem_mcp_enabled: bool,
    /// Left out of the encoded state when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub service_location: Vec<ServiceRegionPropertiesModel>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub microsoft_teams_voicemail_pilot_number: String,
}

/// One `service_location` block
///
/// The optional address lists are `None` when the block leaves them out and
/// `Some(vec![])` when they are configured empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRegionPropertiesModel {
    pub location: String,
    pub operator_addresses: Vec<String>,
    #[serde(default)]
    pub allowed_media_source_address_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub allowed_signaling_source_address_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub esrp_addresses: Option<Vec<String>>,
}

impl ServiceRegionPropertiesModel {
    pub fn esrp_addresses(&self) -> &[String] {
        self.esrp_addresses.as_deref().unwrap_or_default()
    }
}

impl CommunicationsGatewayModel {
    /// Check `esrp_addresses` of every service location against `e911_type`
    ///
    /// Standard routing takes no ESRP addresses; DirectToEsrp needs them in
    /// every location.
    pub fn validate_service_locations(&self) -> ProviderResult<()> {
        let e911_type: E911Type = self.e911_type.parse().map_err(|e| {
            ProviderError::validation(format!("e911_type: {}", e))
        })?;

        for location in &self.service_location {
            match e911_type {
                E911Type::Standard => {
                    if !location.esrp_addresses().is_empty() {
                        return Err(ProviderError::validation(format!(
                            "the esrp_addresses of {} must not be provided for each service_location when e911_type is set to Standard",
                            self.name
                        )));
                    }
                }
                E911Type::DirectToEsrp => {
                    if location.esrp_addresses().is_empty() {
                        return Err(ProviderError::validation(format!(
                            "the esrp_addresses of {} must be provided for each service_location when e911_type is set to DirectToEsrp",
                            self.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
