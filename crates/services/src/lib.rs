#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_services;
pub mod dashboard_service;
pub mod error;
pub mod progress_service;

pub use fahm_core::Clock;

pub use account_service::AccountService;
pub use app_services::AppServices;
pub use dashboard_service::{Dashboard, DashboardService, ExamTab};
pub use error::{AccountServiceError, AppServicesError, DashboardError, ProgressServiceError};
pub use progress_service::ProgressService;
