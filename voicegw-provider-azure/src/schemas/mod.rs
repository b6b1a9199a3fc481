//! Resource schema definitions for the Azure provider

pub mod communications_gateway;
pub mod types;

use voicegw_core::schema::ResourceSchema;

/// Returns all schemas this provider declares
pub fn all_schemas() -> Vec<ResourceSchema> {
    vec![communications_gateway::arguments()]
}
