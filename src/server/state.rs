use std::sync::Arc;

use thiserror::Error;

use crate::config::Settings;
use crate::directory::{DirectoryError, InMemoryDirectory};
use crate::localization::{CatalogLocalizer, LocalizationError, Localizer};
use crate::messaging::{create_transport, OutboxTransport};
use crate::operation::GoodsReturnOperation;

/// Errors raised while building the application state
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Localization(#[from] LocalizationError),
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub directory: Arc<InMemoryDirectory>,
    pub operation: Arc<GoodsReturnOperation>,
    /// Present when the outbox transport is configured
    pub outbox: Option<Arc<OutboxTransport>>,
}

impl AppState {
    /// Build the state from settings, loading seed and catalog files when configured
    pub fn new(settings: Settings) -> Result<Self, StateError> {
        let directory = match &settings.directory.seed_file {
            Some(path) => InMemoryDirectory::load_seed_file(path)?,
            None => {
                tracing::warn!("No directory seed configured, starting with an empty directory");
                InMemoryDirectory::new()
            }
        };

        let localizer = match &settings.localization.catalog_file {
            Some(path) => CatalogLocalizer::load_catalog_file(path)?,
            None => CatalogLocalizer::new(),
        };

        Ok(Self::with_components(
            settings,
            Arc::new(directory),
            Arc::new(localizer),
        ))
    }

    /// Build the state around an existing directory and localizer
    pub fn with_components(
        settings: Settings,
        directory: Arc<InMemoryDirectory>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        let transports = create_transport(&settings.notification);

        let operation = Arc::new(GoodsReturnOperation::from_parts(
            directory.clone(),
            localizer,
            transports.messages,
            transports.sms,
            settings.notification.employee_event.clone(),
        ));

        Self {
            settings: Arc::new(settings),
            directory,
            operation,
            outbox: transports.outbox,
        }
    }
}
