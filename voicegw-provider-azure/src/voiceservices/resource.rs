//! Lifecycle handlers for azurerm_voice_services_communications_gateway

use std::sync::Arc;

use async_trait::async_trait;
use voicegw_core::provider::{
    Context, ProviderError, ProviderResult, ResourceHandler, Timeouts,
};
use voicegw_core::resource::ResourceMetaData;
use voicegw_core::schema::ResourceSchema;

use super::model::CommunicationsGatewayModel;
use super::translate::{
    expand_api_bridge, expand_codecs, expand_communications_gateway, expand_enum,
    expand_platforms, expand_service_locations, flatten_communications_gateway,
};
use crate::schemas::communications_gateway::{self, RESOURCE_TYPE};
use crate::sdk::Nullable;
use crate::sdk::communications_gateways::{
    ClientError, CommunicationsGatewayId, CommunicationsGatewaysClient,
};

/// Attributes an in-place update may change
const UPDATABLE_ATTRIBUTES: &[&str] = &[
    "api_bridge",
    "codecs",
    "e911_type",
    "emergency_dial_strings",
    "microsoft_teams_voicemail_pilot_number",
    "on_prem_mcp_enabled",
    "platforms",
    "service_location",
    "tags",
];

/// Communications Gateway resource backed by a remote client
pub struct CommunicationsGatewayResource {
    client: Arc<dyn CommunicationsGatewaysClient>,
    subscription_id: String,
    timeouts: Timeouts,
}

impl CommunicationsGatewayResource {
    pub fn new(
        client: Arc<dyn CommunicationsGatewaysClient>,
        subscription_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            subscription_id: subscription_id.into(),
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    fn parse_id(meta: &ResourceMetaData) -> ProviderResult<CommunicationsGatewayId> {
        CommunicationsGatewayId::parse(meta.require_id()?)
            .map_err(|e| ProviderError::InvalidId(e.to_string()))
    }

    async fn exists(&self, ctx: &Context, id: &CommunicationsGatewayId) -> ProviderResult<bool> {
        log::debug!("checking for presence of existing {}", id);
        match self.client.get(ctx, id).await {
            Ok(resp) => Ok(resp.status != 404),
            Err(e) if e.was_not_found() => Ok(false),
            Err(e) => Err(ProviderError::remote(
                format!("checking for presence of existing {}", id),
                e,
            )),
        }
    }
}

fn empty_response(id: &CommunicationsGatewayId) -> ProviderError {
    ProviderError::remote(format!("retrieving {}", id), ClientError::EmptyResponse)
}

#[async_trait]
impl ResourceHandler for CommunicationsGatewayResource {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn arguments(&self) -> ResourceSchema {
        communications_gateway::arguments()
    }

    fn validate_id(&self, id: &str) -> Result<(), String> {
        CommunicationsGatewayId::validate(id)
    }

    fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    async fn customize_diff(&self, _ctx: &Context, meta: &ResourceMetaData) -> ProviderResult<()> {
        let model: CommunicationsGatewayModel = meta.decode()?;
        model.validate_service_locations()
    }

    async fn create(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()> {
        let model: CommunicationsGatewayModel = meta.decode()?;
        let id = CommunicationsGatewayId::new(
            &self.subscription_id,
            &model.resource_group_name,
            &model.name,
        );

        model.validate_service_locations()?;
        let gateway = expand_communications_gateway(&model)?;

        if self.exists(ctx, &id).await? {
            return Err(ProviderError::requires_import(RESOURCE_TYPE, &id));
        }

        self.client
            .create_or_update_then_poll(ctx, &id, gateway)
            .await
            .map_err(|e| ProviderError::remote(format!("creating {}", id), e))?;

        log::info!("created {}", id);
        meta.set_id(&id);
        Ok(())
    }

    async fn read(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()> {
        let id = Self::parse_id(meta)?;

        let resp = match self.client.get(ctx, &id).await {
            Ok(resp) if resp.status == 404 => {
                meta.mark_as_gone(&id);
                return Ok(());
            }
            Ok(resp) => resp,
            Err(e) if e.was_not_found() => {
                meta.mark_as_gone(&id);
                return Ok(());
            }
            Err(e) => return Err(ProviderError::remote(format!("retrieving {}", id), e)),
        };

        let gateway = resp.model.ok_or_else(|| empty_response(&id))?;
        let state = flatten_communications_gateway(&id, &gateway)?;

        meta.encode(&state)
    }

    async fn update(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()> {
        let id = Self::parse_id(meta)?;
        let model: CommunicationsGatewayModel = meta.decode()?;
        model.validate_service_locations()?;

        let resp = self
            .client
            .get(ctx, &id)
            .await
            .map_err(|e| ProviderError::remote(format!("retrieving {}", id), e))?;
        let mut existing = resp.model.ok_or_else(|| empty_response(&id))?;

        if meta.has_change("tags") {
            existing.tags = Some(model.tags.clone());
        }

        let properties = existing
            .properties
            .as_mut()
            .ok_or_else(|| empty_response(&id))?;

        if meta.has_change("codecs") {
            properties.codecs = expand_codecs(&model.codecs)?;
        }

        if meta.has_change("e911_type") {
            properties.e911_type = expand_enum("e911_type", &model.e911_type)?;
        }

        if meta.has_change("platforms") {
            properties.platforms = expand_platforms(&model.platforms)?;
        }

        if meta.has_change("service_location") {
            properties.service_locations = expand_service_locations(&model.service_location);
        }

        // An empty document removes the field from the request rather than nulling it
        if meta.has_change("api_bridge") {
            properties.api_bridge = Nullable::from_option(expand_api_bridge(&model.api_bridge)?);
        }

        if meta.has_change("emergency_dial_strings") {
            properties.emergency_dial_strings =
                Some(model.emergency_dial_strings.clone().unwrap_or_default());
        }

        if meta.has_change("on_prem_mcp_enabled") {
            properties.on_prem_mcp_enabled = Some(model.on_prem_mcp_enabled);
        }

        if meta.has_change("microsoft_teams_voicemail_pilot_number") {
            properties.teams_voicemail_pilot_number =
                Some(model.microsoft_teams_voicemail_pilot_number.clone());
        }

        let unchanged: Vec<&str> = UPDATABLE_ATTRIBUTES
            .iter()
            .copied()
            .filter(|attribute| !meta.has_change(attribute))
            .collect();
        if !unchanged.is_empty() {
            log::debug!("keeping the remote values of {:?} for {}", unchanged, id);
        }

        self.client
            .create_or_update_then_poll(ctx, &id, existing)
            .await
            .map_err(|e| ProviderError::remote(format!("updating {}", id), e))?;

        log::info!("updated {}", id);
        Ok(())
    }

    async fn delete(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()> {
        let id = Self::parse_id(meta)?;

        self.client
            .delete_then_poll(ctx, &id)
            .await
            .map_err(|e| ProviderError::remote(format!("deleting {}", id), e))?;

        log::info!("deleted {}", id);
        Ok(())
    }
}
