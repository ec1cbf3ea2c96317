use std::sync::Arc;

use fahm_core::AccessGate;
use fahm_core::model::Catalog;
use storage::catalog::CatalogConfig;
use storage::repository::Storage;

use crate::Clock;
use crate::account_service::AccountService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend and catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    gate: Arc<AccessGate>,
    dashboard: Arc<DashboardService>,
    accounts: Arc<AccountService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Wire services over an already-built storage aggregate.
    #[must_use]
    pub fn new(storage: &Storage, config: CatalogConfig, clock: Clock) -> Self {
        let catalog = Arc::new(config.catalog);
        let gate = Arc::new(AccessGate::new(config.tiers));

        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&catalog),
            Arc::clone(&gate),
            Arc::clone(&storage.accounts),
            Arc::clone(&storage.progress),
        ));
        let accounts = Arc::new(AccountService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&storage.accounts),
        ));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&gate),
            Arc::clone(&storage.accounts),
            Arc::clone(&storage.progress),
        ));

        Self {
            catalog,
            gate,
            dashboard,
            accounts,
            progress,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: CatalogConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, config, clock))
    }

    /// Services over fresh in-memory repositories.
    #[must_use]
    pub fn in_memory(config: CatalogConfig, clock: Clock) -> Self {
        Self::new(&Storage::in_memory(), config, clock)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn gate(&self) -> Arc<AccessGate> {
        Arc::clone(&self.gate)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
