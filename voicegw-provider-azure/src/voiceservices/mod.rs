//! Microsoft.VoiceServices resources

pub mod model;
pub mod resource;
pub mod translate;

pub use model::{CommunicationsGatewayModel, ServiceRegionPropertiesModel};
pub use resource::CommunicationsGatewayResource;
