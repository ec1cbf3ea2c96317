mod dashboard;
mod demo;
mod pricing;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use demo::DemoView;
pub use pricing::PricingView;
pub use state::{ViewError, ViewState, view_state_from_resource};
