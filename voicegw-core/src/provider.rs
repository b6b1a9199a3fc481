//! Provider - Traits abstracting resource lifecycle operations
//!
//! A Provider exposes one [`ResourceHandler`] per resource type. Each handler
//! turns host invocations (create, read, update, delete and the plan-time
//! check) into calls against the remote API.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

use crate::resource::ResourceMetaData;
use crate::schema::ResourceSchema;

/// Error type for Provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration rejected locally, before any remote call
    #[error("{0}")]
    Validation(String),

    #[error("decoding: {0}")]
    Decode(String),

    #[error("encoding: {0}")]
    Encode(String),

    #[error("invalid resource ID: {0}")]
    InvalidId(String),

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    /// The remote resource already exists and has to be imported instead
    #[error(
        "A resource with the ID {id:?} already exists - to be managed this resource needs to be imported into the state. Please see the documentation for {resource_type:?} for more information"
    )]
    RequiresImport { resource_type: String, id: String },

    /// Remote call failure, wrapped with the phase and identity
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{operation} did not complete within {timeout:?}")]
    Timeout {
        operation: Operation,
        timeout: Duration,
    },
}

impl ProviderError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn requires_import(resource_type: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::RequiresImport {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    pub fn remote(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Remote {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn is_requires_import(&self) -> bool {
        matches!(self, Self::RequiresImport { .. })
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Lifecycle operation invoked by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    CustomizeDiff,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::CustomizeDiff => "customize diff",
        };
        f.write_str(name)
    }
}

/// Upper bound on how long each operation may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub customize_diff: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            read: Duration::from_secs(5 * 60),
            update: Duration::from_secs(30 * 60),
            delete: Duration::from_secs(30 * 60),
            customize_diff: Duration::from_secs(30 * 60),
        }
    }
}

impl Timeouts {
    pub fn for_operation(&self, operation: Operation) -> Duration {
        match operation {
            Operation::Create => self.create,
            Operation::Read => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
            Operation::CustomizeDiff => self.customize_diff,
        }
    }

    pub fn with(mut self, operation: Operation, timeout: Duration) -> Self {
        match operation {
            Operation::Create => self.create = timeout,
            Operation::Read => self.read = timeout,
            Operation::Update => self.update = timeout,
            Operation::Delete => self.delete = timeout,
            Operation::CustomizeDiff => self.customize_diff = timeout,
        }
        self
    }
}

/// Per-invocation context handed to handlers and on to remote clients
///
/// The deadline is cooperative: clients should stop polling once it passes.
/// [`run`] also stops awaiting the handler at the deadline.
#[derive(Debug, Clone)]
pub struct Context {
    operation: Operation,
    deadline: Instant,
}

impl Context {
    pub fn new(operation: Operation, timeout: Duration) -> Self {
        Self {
            operation,
            deadline: Instant::now() + timeout,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline (zero once it has passed)
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Lifecycle handlers for a single resource type
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Resource type name (e.g., "azurerm_voice_services_communications_gateway")
    fn resource_type(&self) -> &'static str;

    /// Schema of the configurable arguments
    fn arguments(&self) -> ResourceSchema;

    /// Validate the format of a resource ID supplied by the host (e.g., on import)
    fn validate_id(&self, id: &str) -> Result<(), String>;

    fn timeouts(&self) -> Timeouts {
        Timeouts::default()
    }

    /// Plan-time check of the proposed configuration
    async fn customize_diff(&self, _ctx: &Context, _meta: &ResourceMetaData) -> ProviderResult<()> {
        Ok(())
    }

    async fn create(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()>;

    async fn read(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()>;

    async fn update(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()>;

    async fn delete(&self, ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()>;
}

/// Fill in schema defaults and reject configuration the schema does not accept
fn check_arguments(schema: &ResourceSchema, meta: &mut ResourceMetaData) -> ProviderResult<()> {
    schema.apply_defaults(meta.config_mut());
    schema.validate(meta.config()).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        ProviderError::validation(format!(
            "invalid configuration for {}: {}",
            schema.resource_type,
            messages.join("; ")
        ))
    })
}

/// Run one lifecycle operation of a handler under its timeout
///
/// Create, Update and the plan-time check first validate the configuration
/// against the handler's argument schema.
pub async fn run(
    handler: &dyn ResourceHandler,
    operation: Operation,
    meta: &mut ResourceMetaData,
) -> ProviderResult<()> {
    if operation != Operation::Create
        && operation != Operation::CustomizeDiff
        && let Some(id) = meta.id()
    {
        handler.validate_id(id).map_err(ProviderError::InvalidId)?;
    }

    if matches!(
        operation,
        Operation::Create | Operation::Update | Operation::CustomizeDiff
    ) {
        check_arguments(&handler.arguments(), meta)?;
    }

    let timeout = handler.timeouts().for_operation(operation);
    let ctx = Context::new(operation, timeout);
    let ctx_ref = &ctx;

    let work = async move {
        match operation {
            Operation::Create => handler.create(ctx_ref, meta).await,
            Operation::Read => handler.read(ctx_ref, meta).await,
            Operation::Update => handler.update(ctx_ref, meta).await,
            Operation::Delete => handler.delete(ctx_ref, meta).await,
            Operation::CustomizeDiff => handler.customize_diff(ctx_ref, meta).await,
        }
    };

    match tokio::time::timeout_at(ctx.deadline(), work).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout { operation, timeout }),
    }
}

/// Main Provider trait
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "azurerm")
    fn name(&self) -> &'static str;

    /// Handlers for every resource type this Provider manages
    fn resources(&self) -> Vec<Arc<dyn ResourceHandler>>;

    fn resource(&self, resource_type: &str) -> Option<Arc<dyn ResourceHandler>> {
        self.resources()
            .into_iter()
            .find(|r| r.resource_type() == resource_type)
    }

    /// Dispatch an operation to the handler for `resource_type`
    fn apply<'a>(
        &'a self,
        resource_type: &'a str,
        operation: Operation,
        meta: &'a mut ResourceMetaData,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            let handler = self
                .resource(resource_type)
                .ok_or_else(|| ProviderError::UnknownResourceType(resource_type.to_string()))?;
            run(handler.as_ref(), operation, meta).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Attributes, Value};
    use crate::schema::{AttributeSchema, AttributeType, types};

    // Mock handler for testing
    struct MockHandler {
        delay: Duration,
    }

    #[async_trait]
    impl ResourceHandler for MockHandler {
        fn resource_type(&self) -> &'static str {
            "mock"
        }

        fn arguments(&self) -> ResourceSchema {
            ResourceSchema::new("mock")
                .attribute(AttributeSchema::new(
                    "name",
                    types::string_match("^[a-z0-9-]{3,24}$", "invalid name"),
                ))
                .attribute(
                    AttributeSchema::new("mode", AttributeType::String)
                        .with_default(Value::from("standard")),
                )
        }

        fn validate_id(&self, id: &str) -> Result<(), String> {
            if id.starts_with("mock-") {
                Ok(())
            } else {
                Err(format!("{} is not a mock ID", id))
            }
        }

        fn timeouts(&self) -> Timeouts {
            Timeouts::default().with(Operation::Read, Duration::from_secs(1))
        }

        async fn create(&self, _ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()> {
            meta.set_id("mock-id-123");
            let config = meta.config().clone();
            meta.encode(&crate::resource::attributes_to_json(&config))
        }

        async fn read(&self, _ctx: &Context, meta: &mut ResourceMetaData) -> ProviderResult<()> {
            tokio::time::sleep(self.delay).await;
            meta.encode(&serde_json::json!({"name": "example"}))
        }

        async fn update(&self, _ctx: &Context, _meta: &mut ResourceMetaData) -> ProviderResult<()> {
            Ok(())
        }

        async fn delete(&self, _ctx: &Context, _meta: &mut ResourceMetaData) -> ProviderResult<()> {
            Ok(())
        }
    }

    struct MockProvider;

    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn resources(&self) -> Vec<Arc<dyn ResourceHandler>> {
            vec![Arc::new(MockHandler {
                delay: Duration::ZERO,
            })]
        }
    }

    #[test]
    fn default_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.for_operation(Operation::Create), Duration::from_secs(1800));
        assert_eq!(timeouts.for_operation(Operation::Read), Duration::from_secs(300));
        assert_eq!(timeouts.for_operation(Operation::Delete), Duration::from_secs(1800));
    }

    #[tokio::test]
    async fn run_create_sets_id() {
        let handler = MockHandler {
            delay: Duration::ZERO,
        };
        let mut meta = ResourceMetaData::default();
        run(&handler, Operation::Create, &mut meta).await.unwrap();
        assert_eq!(meta.id(), Some("mock-id-123"));
    }

    #[tokio::test]
    async fn run_validates_configuration_before_create() {
        let handler = MockHandler {
            delay: Duration::ZERO,
        };
        let mut config = Attributes::new();
        config.insert("name".to_string(), Value::from("a/b"));
        let mut meta = ResourceMetaData::new(config);

        let err = run(&handler, Operation::Create, &mut meta).await.unwrap_err();

        assert!(matches!(err, ProviderError::Validation(_)));
        assert!(err.to_string().contains("name"));
        assert!(meta.id().is_none());
    }

    #[tokio::test]
    async fn run_rejects_unknown_attributes_at_plan_time() {
        let handler = MockHandler {
            delay: Duration::ZERO,
        };
        let mut config = Attributes::new();
        config.insert("bogus".to_string(), Value::Bool(true));
        let mut meta = ResourceMetaData::new(config);

        let err = run(&handler, Operation::CustomizeDiff, &mut meta)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[tokio::test]
    async fn run_applies_schema_defaults() {
        let handler = MockHandler {
            delay: Duration::ZERO,
        };
        let mut config = Attributes::new();
        config.insert("name".to_string(), Value::from("gw-1"));
        let mut meta = ResourceMetaData::new(config);

        run(&handler, Operation::Create, &mut meta).await.unwrap();

        assert_eq!(meta.config().get("mode"), Some(&Value::from("standard")));
        assert_eq!(meta.state().unwrap().get("mode"), Some(&Value::from("standard")));
    }

    #[tokio::test]
    async fn run_rejects_malformed_id() {
        let handler = MockHandler {
            delay: Duration::ZERO,
        };
        let mut meta = ResourceMetaData::default().with_id("bogus");
        let err = run(&handler, Operation::Read, &mut meta).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidId(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn run_times_out() {
        let handler = MockHandler {
            delay: Duration::from_secs(5),
        };
        let mut meta = ResourceMetaData::default().with_id("mock-1");
        let err = run(&handler, Operation::Read, &mut meta).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Timeout {
                operation: Operation::Read,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn provider_dispatches_by_type() {
        let provider = MockProvider;
        let mut meta = ResourceMetaData::default().with_id("mock-1");
        provider
            .apply("mock", Operation::Read, &mut meta)
            .await
            .unwrap();
        assert_eq!(meta.state().unwrap().get("name"), Some(&Value::from("example")));

        let err = provider
            .apply("unknown", Operation::Read, &mut meta)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResourceType(_)));
    }

    #[test]
    fn remote_error_keeps_source() {
        let io = std::io::Error::other("connection reset");
        let err = ProviderError::remote("retrieving gateway", io);
        assert_eq!(err.to_string(), "retrieving gateway: connection reset");
        assert!(std::error::Error::source(&err).is_some());
    }
}
