//! Shared error types for the services crate.

use thiserror::Error;

use fahm_core::model::{ExamId, ProgressError, Tier};
use fahm_core::{ConfigError, NotFoundError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AccountService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountServiceError {
    #[error("cannot upgrade from {from} to {to}")]
    NotAnUpgrade { from: Tier, to: Tier },
    #[error(transparent)]
    UnknownExam(#[from] NotFoundError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    UnknownExam(#[from] NotFoundError),
    #[error("exam `{exam_id}` has no unit at position {position}")]
    UnknownUnit { exam_id: ExamId, position: u32 },
    #[error("unit {position} is locked on the {tier} tier")]
    Locked { position: u32, tier: Tier },
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
