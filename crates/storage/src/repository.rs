use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fahm_core::model::{ExamId, LearnerId, ProgressMap, Tier, UnitProgress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Persisted shape of a learner account as the account provider hands it over.
///
/// `tier` and `selected_exam` are kept raw: the account provider may hold
/// values this build does not know, and they are resolved (fail closed) by
/// the caller rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub learner_id: LearnerId,
    pub display_name: Option<String>,
    pub tier: Option<String>,
    pub selected_exam: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRecord {
    #[must_use]
    pub fn new(learner_id: LearnerId, tier: Tier, updated_at: DateTime<Utc>) -> Self {
        Self {
            learner_id,
            display_name: None,
            tier: Some(tier.as_str().to_owned()),
            selected_exam: None,
            updated_at,
        }
    }

    /// Effective tier; unknown or missing values resolve to `Tier::Free`.
    #[must_use]
    pub fn tier(&self) -> Tier {
        Tier::resolve(self.tier.as_deref())
    }

    /// Preferred exam, if the stored value is a well-formed id.
    #[must_use]
    pub fn selected_exam(&self) -> Option<ExamId> {
        self.selected_exam
            .as_deref()
            .and_then(|raw| ExamId::new(raw).ok())
    }
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch an account. `Ok(None)` when the learner has no record yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_account(&self, learner: LearnerId) -> Result<Option<AccountRecord>, StorageError>;

    /// Insert or replace an account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the account cannot be stored.
    async fn upsert_account(&self, account: &AccountRecord) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Progress of `learner` across the units of `exam`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_progress(
        &self,
        learner: LearnerId,
        exam: &ExamId,
    ) -> Result<ProgressMap, StorageError>;

    /// Store progress for one unit, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn upsert_progress(
        &self,
        learner: LearnerId,
        exam: &ExamId,
        position: u32,
        progress: UnitProgress,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

type ProgressKey = (LearnerId, ExamId);

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    accounts: Arc<Mutex<HashMap<LearnerId, AccountRecord>>>,
    progress: Arc<Mutex<HashMap<ProgressKey, ProgressMap>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryRepository {
    async fn get_account(&self, learner: LearnerId) -> Result<Option<AccountRecord>, StorageError> {
        let guard = self
            .accounts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&learner).cloned())
    }

    async fn upsert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(account.learner_id, account.clone());
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(
        &self,
        learner: LearnerId,
        exam: &ExamId,
    ) -> Result<ProgressMap, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(&(learner, exam.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_progress(
        &self,
        learner: LearnerId,
        exam: &ExamId,
        position: u32,
        progress: UnitProgress,
        _at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .entry((learner, exam.clone()))
            .or_default()
            .insert(position, progress);
        Ok(())
    }
}

/// Aggregates account and progress repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub accounts: Arc<dyn AccountRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let accounts: Arc<dyn AccountRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { accounts, progress }
    }
}
