mod dashboard_state;
mod dashboard_vm;
mod demo_vm;
mod pricing_vm;

pub use dashboard_state::DashboardState;
pub use dashboard_vm::{
    DashboardVm, ExamTabVm, UpgradePromptVm, WorldAction, WorldCardVm, map_dashboard,
};
pub use demo_vm::{DEMO_QUESTIONS, DemoOption, DemoQuestion, DemoQuiz, Language, Localized, OptionMark};
pub use pricing_vm::{PlanAction, PricingCardVm, map_pricing};
