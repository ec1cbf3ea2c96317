use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Tier;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TierTableError {
    #[error("tier table must contain at least one plan")]
    Empty,

    #[error("tier `{0}` is configured more than once")]
    DuplicateTier(Tier),

    #[error("tier `{higher}` unlocks fewer units than `{lower}`")]
    DecreasingCap { lower: Tier, higher: Tier },

    #[error("plan for tier `{0}` has an empty display name")]
    EmptyDisplayName(Tier),
}

//
// ─── PLANS ─────────────────────────────────────────────────────────────────────
//

/// One row of the tier configuration: the unlock cap plus what the pricing
/// page shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierPlan {
    pub tier: Tier,
    pub max_unlocked: u32,
    pub display_name: String,
    #[serde(default)]
    pub price_sar: u32,
    #[serde(default)]
    pub duration_months: Option<u32>,
}

impl TierPlan {
    #[must_use]
    pub fn new(tier: Tier, max_unlocked: u32, display_name: impl Into<String>) -> Self {
        Self {
            tier,
            max_unlocked,
            display_name: display_name.into(),
            price_sar: 0,
            duration_months: None,
        }
    }

    #[must_use]
    pub fn with_price(mut self, price_sar: u32, duration_months: Option<u32>) -> Self {
        self.price_sar = price_sar;
        self.duration_months = duration_months;
        self
    }

    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.price_sar > 0
    }
}

/// Validated tier → unlock cap mapping.
///
/// Plans are kept sorted by tier rank and caps never decrease along that
/// order, so a higher tier always unlocks at least as much as a lower one.
/// The table does not have to cover every `Tier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    plans: Vec<TierPlan>,
}

impl TierTable {
    /// Build a table from configured plans.
    ///
    /// # Errors
    ///
    /// Returns `TierTableError` if the table is empty, repeats a tier, has an
    /// empty display name or a cap that decreases as the tier rises.
    pub fn new(mut plans: Vec<TierPlan>) -> Result<Self, TierTableError> {
        if plans.is_empty() {
            return Err(TierTableError::Empty);
        }
        plans.sort_by_key(|plan| plan.tier);

        for plan in &plans {
            if plan.display_name.trim().is_empty() {
                return Err(TierTableError::EmptyDisplayName(plan.tier));
            }
        }
        for pair in plans.windows(2) {
            let (lower, higher) = (&pair[0], &pair[1]);
            if lower.tier == higher.tier {
                return Err(TierTableError::DuplicateTier(higher.tier));
            }
            if higher.max_unlocked < lower.max_unlocked {
                return Err(TierTableError::DecreasingCap {
                    lower: lower.tier,
                    higher: higher.tier,
                });
            }
        }

        Ok(Self { plans })
    }

    /// The shipped plans: free trial covers worlds 1-2, basic 1-5, premium 1-10.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            plans: vec![
                TierPlan::new(Tier::Free, 2, "Free Practice"),
                TierPlan::new(Tier::Basic, 5, "Basic").with_price(199, Some(3)),
                TierPlan::new(Tier::Premium, 10, "Premium").with_price(299, Some(6)),
            ],
        }
    }

    #[must_use]
    pub fn plans(&self) -> &[TierPlan] {
        &self.plans
    }

    #[must_use]
    pub fn plan(&self, tier: Tier) -> Option<&TierPlan> {
        self.plans.iter().find(|plan| plan.tier == tier)
    }

    #[must_use]
    pub fn cap(&self, tier: Tier) -> Option<u32> {
        self.plan(tier).map(|plan| plan.max_unlocked)
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}
