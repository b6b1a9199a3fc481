//! Voicegw Azure Provider
//!
//! Manages Azure Voice Services Communications Gateways.
//!
//! ## Module Structure
//!
//! - `config` - Provider configuration from attributes and environment
//! - `provider` - AzureProvider implementation
//! - `schemas` - Argument schemas and shared validators
//! - `sdk` - Management API models, resource IDs and client traits
//! - `voiceservices` - Communications Gateway model, translation and handlers
//! - `utils` - Helper functions for value normalization

pub mod config;
pub mod provider;
pub mod schemas;
pub mod sdk;
pub mod utils;
pub mod voiceservices;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use config::{ConfigError, ProviderConfig};
pub use provider::AzureProvider;
pub use schemas::all_schemas;
pub use utils::normalize_location;
pub use voiceservices::CommunicationsGatewayResource;
