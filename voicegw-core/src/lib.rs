//! Voicegw Core
//!
//! Host-facing building blocks for resource handlers: attribute values,
//! schemas, change detection and the handler lifecycle.

pub mod differ;
pub mod provider;
pub mod resource;
pub mod schema;
