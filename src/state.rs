use std::{sync::Arc, time::Duration};

use crate::{
    backend::{alchemy::AlchemyProvider, mock::MockProvider, ReceiptProvider},
    config::{BackendKind, Config},
};

pub struct AppState {
    pub provider: Arc<dyn ReceiptProvider>,
    pub provider_timeout: Duration,
}

impl AppState {
    pub fn new(provider: Arc<dyn ReceiptProvider>, provider_timeout: Duration) -> Self {
        Self {
            provider,
            provider_timeout,
        }
    }

    pub fn init(config: &Config) -> Self {
        let provider: Arc<dyn ReceiptProvider> = match config.backend {
            BackendKind::Alchemy => Arc::new(AlchemyProvider::new()),
            BackendKind::Mock => Arc::new(MockProvider::demo()),
        };

        tracing::info!("Using {} receipt provider", provider.name());

        Self::new(provider, config.provider_timeout())
    }
}
