use crate::adapters::http::ReqwestTransport;
use crate::config::ClientConfig;
use crate::core::executor::RequestExecutor;
use crate::domain::ports::Transport;
use crate::resources::{RowResources, SearchResources, SheetColumnResources, SheetResources};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Entry point: owns the request execution core and hands out resource
/// facades. Cheap to clone the facades; the core is shared.
pub struct GridClient {
    executor: Arc<RequestExecutor>,
}

impl GridClient {
    /// Build a client with the production HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Self::with_transport(config, transport)
    }

    /// Build a client over a caller-supplied transport (used by tests to
    /// substitute stubs).
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        // 驗證配置
        config.validate()?;
        let executor = Arc::new(RequestExecutor::new(&config, transport)?);
        tracing::info!("🚀 gridhub client initialized for {}", config.base_url);
        Ok(Self { executor })
    }

    pub fn sheets(&self) -> SheetResources {
        SheetResources::new(self.executor.clone())
    }

    pub fn columns(&self) -> SheetColumnResources {
        SheetColumnResources::new(self.executor.clone())
    }

    pub fn rows(&self) -> RowResources {
        RowResources::new(self.executor.clone())
    }

    pub fn search(&self) -> SearchResources {
        SearchResources::new(self.executor.clone())
    }
}
