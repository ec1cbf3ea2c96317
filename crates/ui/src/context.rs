use std::sync::Arc;

use fahm_core::model::LearnerId;
use services::{AccountService, DashboardService};

pub trait UiApp: Send + Sync {
    fn learner_id(&self) -> LearnerId;

    fn dashboard(&self) -> Arc<DashboardService>;
    fn accounts(&self) -> Arc<AccountService>;
}

#[derive(Clone)]
pub struct AppContext {
    learner_id: LearnerId,
    dashboard: Arc<DashboardService>,
    accounts: Arc<AccountService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            learner_id: app.learner_id(),
            dashboard: app.dashboard(),
            accounts: app.accounts(),
        }
    }

    #[must_use]
    pub fn learner_id(&self) -> LearnerId {
        self.learner_id
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
