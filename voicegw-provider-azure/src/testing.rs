//! In-memory Communications Gateways client for tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use voicegw_core::provider::Context;

use crate::sdk::communications_gateways::{
    ClientError, CommunicationsGateway, CommunicationsGatewayId, CommunicationsGatewaysClient,
    GetOperationResponse, ProvisioningState, Status,
};

/// A call received by [`FakeClient`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    CreateOrUpdate(String, CommunicationsGateway),
    Delete(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::Get(_))
    }
}

/// Stores gateways by rendered ID and records every call
#[derive(Default)]
pub struct FakeClient {
    gateways: Mutex<HashMap<String, CommunicationsGateway>>,
    calls: Mutex<Vec<Call>>,
    next_get: Mutex<Option<Result<GetOperationResponse, ClientError>>>,
    delay: Duration,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mutating call sleeps for `delay` before completing
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn insert(&self, id: &CommunicationsGatewayId, gateway: CommunicationsGateway) {
        self.gateways
            .lock()
            .unwrap()
            .insert(id.to_string(), gateway);
    }

    pub fn stored(&self, id: &CommunicationsGatewayId) -> Option<CommunicationsGateway> {
        self.gateways.lock().unwrap().get(&id.to_string()).cloned()
    }

    /// Make the next `get` fail with `error`
    pub fn fail_next_get(&self, error: ClientError) {
        *self.next_get.lock().unwrap() = Some(Err(error));
    }

    /// Make the next `get` answer with `response` regardless of what is stored
    pub fn respond_next_get(&self, response: GetOperationResponse) {
        *self.next_get.lock().unwrap() = Some(Ok(response));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CommunicationsGatewaysClient for FakeClient {
    async fn get(
        &self,
        _ctx: &Context,
        id: &CommunicationsGatewayId,
    ) -> Result<GetOperationResponse, ClientError> {
        self.record(Call::Get(id.to_string()));

        let scripted = self.next_get.lock().unwrap().take();
        if let Some(response) = scripted {
            return response;
        }

        match self.stored(id) {
            Some(gateway) => Ok(GetOperationResponse::ok(gateway)),
            None => Err(ClientError::not_found(format!("{} does not exist", id))),
        }
    }

    async fn create_or_update_then_poll(
        &self,
        _ctx: &Context,
        id: &CommunicationsGatewayId,
        input: CommunicationsGateway,
    ) -> Result<(), ClientError> {
        self.record(Call::CreateOrUpdate(id.to_string(), input.clone()));
        tokio::time::sleep(self.delay).await;

        let mut stored = input;
        stored.id = Some(id.to_string());
        stored.name = Some(id.communications_gateway_name.clone());
        stored.resource_type = Some("Microsoft.VoiceServices/communicationsGateways".to_string());
        if let Some(properties) = stored.properties.as_mut() {
            properties.provisioning_state = Some(ProvisioningState::Succeeded);
            properties.status = Some(Status::Complete);
            properties.auto_generated_domain_name_label =
                Some(format!("{}.commsgw.azure.example", id.communications_gateway_name));
        }
        self.insert(id, stored);
        Ok(())
    }

    async fn delete_then_poll(
        &self,
        _ctx: &Context,
        id: &CommunicationsGatewayId,
    ) -> Result<(), ClientError> {
        self.record(Call::Delete(id.to_string()));
        tokio::time::sleep(self.delay).await;

        match self.gateways.lock().unwrap().remove(&id.to_string()) {
            Some(_) => Ok(()),
            None => Err(ClientError::not_found(format!("{} does not exist", id))),
        }
    }
}
