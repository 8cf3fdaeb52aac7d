//! Session-wide data shared by every screen.

use std::sync::Arc;

use crate::api::{ApiError, CatalogApi};
use crate::models::EnumCatalog;

/// Read-only data loaded once after authentication succeeds.
///
/// Cloning is cheap; every clone shares the same catalog.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    catalog: Arc<EnumCatalog>,
}

impl AppContext {
    pub fn new(catalog: EnumCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Fetches the enum catalog.
    pub async fn load<A: CatalogApi>(api: &A) -> Result<Self, ApiError> {
        let catalog = api.fetch_enums().await?;
        tracing::debug!(
            "Loaded enum catalog ({} occupancy statuses)",
            catalog.occupancy_status.len()
        );
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &EnumCatalog {
        &self.catalog
    }
}
