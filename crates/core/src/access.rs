//! Tier-based gating of exam units.
//!
//! Everything here is a pure projection of `(tier table, tier, units, progress)`.
//! Nothing is cached, so a tier change is visible on the very next call and a
//! downgrade re-locks units immediately while their progress stays intact.

use thiserror::Error;

use crate::model::{Catalog, Exam, ExamId, ProgressMap, Tier, TierTable, Unit, UnitProgress};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// The tier table has no cap for a tier. Indicates a misconfigured table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no unlock cap configured for tier `{0}`")]
    UnknownTier(Tier),
}

/// The requested exam id is not part of the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("exam `{exam_id}` is not in the catalog")]
pub struct NotFoundError {
    pub exam_id: ExamId,
}

//
// ─── UNIT STATE ────────────────────────────────────────────────────────────────
//

/// A unit annotated with its access decision and the learner's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitState {
    pub unit: Unit,
    pub locked: bool,
    pub progress: UnitProgress,
    /// Lowest configured tier that would unlock this unit, for locked units.
    pub unlocked_by: Option<Tier>,
}

//
// ─── GATE ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGate {
    table: TierTable,
}

impl AccessGate {
    #[must_use]
    pub fn new(table: TierTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &TierTable {
        &self.table
    }

    /// Configured unlock cap for `tier`, before clamping to any exam.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTier` if the table has no plan for `tier`.
    pub fn max_unlocked(&self, tier: Tier) -> Result<u32, ConfigError> {
        self.table.cap(tier).ok_or(ConfigError::UnknownTier(tier))
    }

    /// Number of units a learner on `tier` can open out of `unit_count`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTier` if the table has no plan for `tier`.
    pub fn unlocked_count(&self, unit_count: usize, tier: Tier) -> Result<usize, ConfigError> {
        let cap = usize::try_from(self.max_unlocked(tier)?).unwrap_or(usize::MAX);
        Ok(cap.min(unit_count))
    }

    /// Whether the unit at `position` is locked for `tier`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTier` if the table has no plan for `tier`.
    pub fn is_locked(&self, tier: Tier, position: u32) -> Result<bool, ConfigError> {
        Ok(position >= self.max_unlocked(tier)?)
    }

    /// Annotate every unit with its lock state, keeping input order.
    ///
    /// Locked units still carry their recorded progress.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTier` if the table has no plan for `tier`.
    pub fn compute_unit_states(
        &self,
        units: &[Unit],
        tier: Tier,
        progress: &ProgressMap,
    ) -> Result<Vec<UnitState>, ConfigError> {
        let unlocked = self.unlocked_count(units.len(), tier)?;

        Ok(units
            .iter()
            .enumerate()
            .map(|(index, unit)| {
                let locked = index >= unlocked;
                UnitState {
                    unit: unit.clone(),
                    locked,
                    progress: progress.get(unit.position()),
                    unlocked_by: if locked {
                        self.unlocking_tier(index)
                    } else {
                        None
                    },
                }
            })
            .collect())
    }

    /// Lowest tier in the table whose cap reaches the unit at `index`.
    #[must_use]
    pub fn unlocking_tier(&self, index: usize) -> Option<Tier> {
        self.table
            .plans()
            .iter()
            .find(|plan| usize::try_from(plan.max_unlocked).is_ok_and(|cap| cap > index))
            .map(|plan| plan.tier)
    }
}

/// Look up an exam by id.
///
/// # Errors
///
/// Returns `NotFoundError` if the catalog has no exam with this id.
pub fn select_exam<'a>(exam_id: &ExamId, catalog: &'a Catalog) -> Result<&'a Exam, NotFoundError> {
    catalog.get(exam_id).ok_or_else(|| NotFoundError {
        exam_id: exam_id.clone(),
    })
}

/// Resolve the exam to show, falling back to the catalog default.
///
/// The returned flag is `true` when a requested id was not found.
#[must_use]
pub fn select_exam_or_default<'a>(exam_id: Option<&ExamId>, catalog: &'a Catalog) -> (&'a Exam, bool) {
    match exam_id.map(|id| select_exam(id, catalog)) {
        Some(Ok(exam)) => (exam, false),
        Some(Err(_)) => (catalog.default_exam(), true),
        None => (catalog.default_exam(), false),
    }
}

/// Upgrades move strictly up the `free < basic < premium` ordering.
#[must_use]
pub fn upgrade_allowed(from: Tier, to: Tier) -> bool {
    to.rank() > from.rank()
}
