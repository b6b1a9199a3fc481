//! Azure Resource Manager models and client interfaces
//!
//! Mirrors the shape of the Voice Services management API so the resource
//! code can be tested against an in-memory client.

pub mod communications_gateways;
pub mod nullable;

pub use nullable::Nullable;

/// API version of the Voice Services management API these models follow
pub const API_VERSION: &str = "2023-01-31";
