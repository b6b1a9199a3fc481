//! AzureProvider - Provider implementation for Azure Resource Manager

use std::sync::Arc;

use voicegw_core::provider::{Provider, ResourceHandler};

use crate::config::ProviderConfig;
use crate::sdk::communications_gateways::CommunicationsGatewaysClient;
use crate::voiceservices::CommunicationsGatewayResource;

/// Azure provider over injected management clients
pub struct AzureProvider {
    config: ProviderConfig,
    communications_gateways: Arc<dyn CommunicationsGatewaysClient>,
}

impl AzureProvider {
    pub fn new(
        config: ProviderConfig,
        communications_gateways: Arc<dyn CommunicationsGatewaysClient>,
    ) -> Self {
        Self {
            config,
            communications_gateways,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl Provider for AzureProvider {
    fn name(&self) -> &'static str {
        "azurerm"
    }

    fn resources(&self) -> Vec<Arc<dyn ResourceHandler>> {
        vec![Arc::new(
            CommunicationsGatewayResource::new(
                self.communications_gateways.clone(),
                &self.config.subscription_id,
            )
            .with_timeouts(self.config.timeouts),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use voicegw_core::provider::{Operation, ProviderError};
    use voicegw_core::resource::{ResourceMetaData, Value};

    use crate::schemas::communications_gateway::RESOURCE_TYPE;
    use crate::testing::FakeClient;

    fn provider(client: Arc<FakeClient>) -> AzureProvider {
        let mut config = ProviderConfig::new("sub-1");
        config.timeouts = config.timeouts.with(Operation::Read, Duration::from_secs(60));
        AzureProvider::new(config, client)
    }

    #[test]
    fn exposes_gateway_resource() {
        let provider = provider(Arc::new(FakeClient::new()));
        assert_eq!(provider.name(), "azurerm");

        let handler = provider.resource(RESOURCE_TYPE).unwrap();
        assert_eq!(handler.timeouts().read, Duration::from_secs(60));
        assert!(handler.arguments().attributes.contains_key("service_location"));
        assert!(provider.resource("azurerm_resource_group").is_none());
    }

    #[tokio::test]
    async fn apply_rejects_name_with_path_separator() {
        let client = Arc::new(FakeClient::new());
        let provider = provider(client.clone());

        let config = [
            ("name", Value::from("a/b")),
            ("location", Value::from("eastus")),
            ("resource_group_name", Value::from("example-rg")),
            ("connectivity", Value::from("PublicAddress")),
            ("codecs", Value::from("PCMA")),
            ("e911_type", Value::from("Standard")),
            ("platforms", Value::List(vec![])),
            ("service_location", Value::List(vec![])),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let mut meta = ResourceMetaData::new(config);

        let err = provider
            .apply(RESOURCE_TYPE, Operation::Create, &mut meta)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Validation(_)));
        assert!(meta.id().is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn apply_dispatches_to_gateway_resource() {
        let client = Arc::new(FakeClient::new());
        let provider = provider(client.clone());

        let config = [
            ("name", Value::from("abc")),
            ("location", Value::from("West Europe")),
            ("resource_group_name", Value::from("example-rg")),
            ("connectivity", Value::from("PublicAddress")),
            ("codecs", Value::from("PCMA")),
            ("e911_type", Value::from("Standard")),
            ("platforms", Value::List(vec![Value::from("OperatorConnect")])),
            ("service_location", Value::List(vec![])),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let mut meta = ResourceMetaData::new(config);

        provider
            .apply(RESOURCE_TYPE, Operation::Create, &mut meta)
            .await
            .unwrap();
        assert_eq!(
            meta.id(),
            Some("/subscriptions/sub-1/resourceGroups/example-rg/providers/Microsoft.VoiceServices/communicationsGateways/abc")
        );

        provider
            .apply(RESOURCE_TYPE, Operation::Read, &mut meta)
            .await
            .unwrap();
        assert_eq!(
            meta.state().unwrap().get("location"),
            Some(&Value::from("westeurope"))
        );
        assert_eq!(client.mutations().len(), 1);

        let err = provider
            .apply("azurerm_resource_group", Operation::Read, &mut meta)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResourceType(_)));
    }
}
