use fahm_core::model::{Tier, TierPlan, TierTable};

use crate::vm::dashboard_vm::capitalize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanAction {
    Current,
    Upgrade(Tier),
    Included,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingCardVm {
    pub tier: Tier,
    pub name: String,
    pub price_line: String,
    pub access_line: String,
    pub action: PlanAction,
}

impl PricingCardVm {
    fn from_plan(plan: &TierPlan, current: Tier) -> Self {
        let price_line = if plan.is_paid() {
            match plan.duration_months {
                Some(1) => format!("SAR {} / month", plan.price_sar),
                Some(months) => format!("SAR {} / {months} months", plan.price_sar),
                None => format!("SAR {}", plan.price_sar),
            }
        } else {
            "Free".to_owned()
        };
        let access_line = match plan.max_unlocked {
            0 => "No worlds included".to_owned(),
            1 => "World 1".to_owned(),
            n => format!("Worlds 1-{n}"),
        };
        let action = match plan.tier.cmp(&current) {
            std::cmp::Ordering::Equal => PlanAction::Current,
            std::cmp::Ordering::Greater => PlanAction::Upgrade(plan.tier),
            std::cmp::Ordering::Less => PlanAction::Included,
        };
        Self {
            tier: plan.tier,
            name: plan.display_name.clone(),
            price_line,
            access_line,
            action,
        }
    }

    #[must_use]
    pub fn action_label(&self) -> String {
        match self.action {
            PlanAction::Current => "Current plan".to_owned(),
            PlanAction::Upgrade(tier) => format!("Upgrade to {}", capitalize(tier.as_str())),
            PlanAction::Included => "Included".to_owned(),
        }
    }
}

#[must_use]
pub fn map_pricing(table: &TierTable, current: Tier) -> Vec<PricingCardVm> {
    table
        .plans()
        .iter()
        .map(|plan| PricingCardVm::from_plan(plan, current))
        .collect()
}
