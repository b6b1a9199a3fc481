//! Microsoft.VoiceServices/communicationsGateways (API version 2023-01-31)

mod client;
mod id;
mod model;

pub use client::{ClientError, CommunicationsGatewaysClient, GetOperationResponse};
pub use id::{CommunicationsGatewayId, EXAMPLE_ID, IdParseError};
pub use model::{
    AutoGeneratedDomainNameLabelScope, CommunicationsGateway, CommunicationsGatewayProperties,
    CommunicationsPlatform, Connectivity, E911Type, PrimaryRegionProperties, ProvisioningState,
    ServiceRegionProperties, Status, TeamsCodecs, UnknownEnumValue,
};
