use std::sync::Arc;

use fahm_core::access::select_exam_or_default;
use fahm_core::model::{Catalog, ExamId, LearnerId, Tier, TierPlan};
use fahm_core::{AccessGate, UnitState};
use storage::repository::{AccountRepository, ProgressRepository};
use tracing::{debug, warn};

use crate::error::DashboardError;

/// One entry of the exam switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamTab {
    pub id: ExamId,
    pub name: String,
    pub selected: bool,
}

/// Everything the dashboard needs for one render, computed from current
/// account, catalog and progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub learner_id: LearnerId,
    pub display_name: Option<String>,
    pub exam_id: ExamId,
    pub exam_name: String,
    pub tier: Tier,
    pub plan: Option<TierPlan>,
    pub unlocked_count: usize,
    /// Requested exam id that was missing from the catalog, if any.
    pub fell_back_from: Option<ExamId>,
    pub units: Vec<UnitState>,
    pub exam_tabs: Vec<ExamTab>,
    /// Plans above the learner's tier, cheapest first.
    pub upgrade_options: Vec<TierPlan>,
}

impl Dashboard {
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.units
            .iter()
            .filter(|state| state.progress.is_completed())
            .count()
    }
}

/// Assembles dashboards from the catalog, the account provider and progress.
#[derive(Clone)]
pub struct DashboardService {
    catalog: Arc<Catalog>,
    gate: Arc<AccessGate>,
    accounts: Arc<dyn AccountRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        gate: Arc<AccessGate>,
        accounts: Arc<dyn AccountRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            catalog,
            gate,
            accounts,
            progress,
        }
    }

    #[must_use]
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Build the dashboard for `learner`.
    ///
    /// The exam is chosen from `requested`, then the account's saved
    /// selection, then the catalog default. An id that is not in the catalog
    /// falls back to the default instead of failing. A missing account or
    /// unknown tier is treated as `free`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Config` if the tier table has no plan for the
    /// learner's tier, or `DashboardError::Storage` if a repository fails.
    pub async fn load(
        &self,
        learner: LearnerId,
        requested: Option<&ExamId>,
    ) -> Result<Dashboard, DashboardError> {
        let account = self.accounts.get_account(learner).await?;
        let tier = account.as_ref().map_or(Tier::Free, |acc| acc.tier());
        if let Some(raw) = account.as_ref().and_then(|acc| acc.tier.as_deref()) {
            if raw.parse::<Tier>().is_err() {
                warn!(%learner, tier = raw, "unknown tier on account; treating as free");
            }
        }

        let saved = account.as_ref().and_then(|acc| acc.selected_exam());
        let wanted = requested.cloned().or(saved);
        let (exam, fell_back) = select_exam_or_default(wanted.as_ref(), &self.catalog);
        let fell_back_from = if fell_back {
            warn!(
                %learner,
                requested = %wanted.as_ref().map_or("", ExamId::as_str),
                fallback = %exam.id(),
                "exam not in catalog; showing default"
            );
            wanted
        } else {
            None
        };

        let progress = self.progress.get_progress(learner, exam.id()).await?;
        let units = self
            .gate
            .compute_unit_states(exam.units(), tier, &progress)?;
        let unlocked_count = self.gate.unlocked_count(exam.len(), tier)?;

        let table = self.gate.table();
        let upgrade_options = table
            .plans()
            .iter()
            .filter(|plan| plan.tier > tier)
            .cloned()
            .collect();
        let exam_tabs = self
            .catalog
            .exams()
            .iter()
            .map(|candidate| ExamTab {
                id: candidate.id().clone(),
                name: candidate.name().to_owned(),
                selected: candidate.id() == exam.id(),
            })
            .collect();

        debug!(%learner, exam = %exam.id(), %tier, unlocked_count, "dashboard loaded");

        Ok(Dashboard {
            learner_id: learner,
            display_name: account.and_then(|acc| acc.display_name),
            exam_id: exam.id().clone(),
            exam_name: exam.name().to_owned(),
            tier,
            plan: table.plan(tier).cloned(),
            unlocked_count,
            fell_back_from,
            units,
            exam_tabs,
            upgrade_options,
        })
    }
}
