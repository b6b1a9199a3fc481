//! Client interface for Communications Gateway operations
//!
//! Implementations own the HTTP transport, authentication and the polling of
//! long-running operations. The `*_then_poll` methods return once the remote
//! operation has finished, failed, or the context deadline has passed.

use async_trait::async_trait;
use thiserror::Error;
use voicegw_core::provider::Context;

use super::id::CommunicationsGatewayId;
use super::model::CommunicationsGateway;

/// Errors reported by a Communications Gateways client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("unexpected status 404 (404 Not Found): {message}")]
    NotFound { message: String },

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("polling after {operation}: {message}")]
    PollingFailed {
        operation: &'static str,
        message: String,
    },

    #[error("response did not contain a model")]
    EmptyResponse,

    #[error("sending request: {0}")]
    Transport(String),

    #[error("the context deadline was exceeded")]
    DeadlineExceeded,
}

impl ClientError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Whether the remote side answered 404
    pub fn was_not_found(&self) -> bool {
        match self {
            ClientError::NotFound { .. } => true,
            ClientError::Status { status, .. } => *status == 404,
            _ => false,
        }
    }
}

/// Response of a Get call
#[derive(Debug, Clone, PartialEq)]
pub struct GetOperationResponse {
    pub status: u16,
    pub model: Option<CommunicationsGateway>,
}

impl GetOperationResponse {
    pub fn ok(model: CommunicationsGateway) -> Self {
        Self {
            status: 200,
            model: Some(model),
        }
    }
}

/// Operations on Microsoft.VoiceServices/communicationsGateways
#[async_trait]
pub trait CommunicationsGatewaysClient: Send + Sync {
    async fn get(
        &self,
        ctx: &Context,
        id: &CommunicationsGatewayId,
    ) -> Result<GetOperationResponse, ClientError>;

    /// Create or replace the gateway and wait for the operation to finish
    async fn create_or_update_then_poll(
        &self,
        ctx: &Context,
        id: &CommunicationsGatewayId,
        input: CommunicationsGateway,
    ) -> Result<(), ClientError>;

    /// Delete the gateway and wait for the operation to finish
    async fn delete_then_poll(
        &self,
        ctx: &Context,
        id: &CommunicationsGatewayId,
    ) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        assert!(ClientError::not_found("gone").was_not_found());
        assert!(
            ClientError::Status {
                status: 404,
                message: "gone".to_string()
            }
            .was_not_found()
        );
        assert!(
            !ClientError::Status {
                status: 500,
                message: "boom".to_string()
            }
            .was_not_found()
        );
        assert!(!ClientError::DeadlineExceeded.was_not_found());
    }
}
