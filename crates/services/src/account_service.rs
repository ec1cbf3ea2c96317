use std::sync::Arc;

use fahm_core::access::{select_exam, upgrade_allowed};
use fahm_core::model::{Catalog, ExamId, LearnerId, Tier};
use storage::repository::{AccountRecord, AccountRepository};
use tracing::info;

use crate::Clock;
use crate::error::AccountServiceError;

/// Reads and updates the learner fields the dashboard depends on.
#[derive(Clone)]
pub struct AccountService {
    clock: Clock,
    catalog: Arc<Catalog>,
    accounts: Arc<dyn AccountRepository>,
}

impl AccountService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self {
            clock,
            catalog,
            accounts,
        }
    }

    /// Current effective tier; `free` when there is no account.
    ///
    /// # Errors
    ///
    /// Returns `AccountServiceError::Storage` if the account cannot be read.
    pub async fn tier(&self, learner: LearnerId) -> Result<Tier, AccountServiceError> {
        let account = self.accounts.get_account(learner).await?;
        Ok(account.map_or(Tier::Free, |acc| acc.tier()))
    }

    /// Move the learner to a strictly higher tier.
    ///
    /// # Errors
    ///
    /// Returns `AccountServiceError::NotAnUpgrade` if `target` is not above the
    /// current tier, or `AccountServiceError::Storage` on repository failure.
    pub async fn upgrade(
        &self,
        learner: LearnerId,
        target: Tier,
    ) -> Result<Tier, AccountServiceError> {
        let current = self.tier(learner).await?;
        if !upgrade_allowed(current, target) {
            return Err(AccountServiceError::NotAnUpgrade {
                from: current,
                to: target,
            });
        }
        self.change_tier(learner, target).await
    }

    /// Set the tier unconditionally, e.g. when billing reports a lapsed
    /// subscription. Units above the new cap lock on the next dashboard load.
    ///
    /// # Errors
    ///
    /// Returns `AccountServiceError::Storage` on repository failure.
    pub async fn change_tier(
        &self,
        learner: LearnerId,
        tier: Tier,
    ) -> Result<Tier, AccountServiceError> {
        let mut account = self.load_or_new(learner).await?;
        let previous = account.tier();
        account.tier = Some(tier.as_str().to_owned());
        account.updated_at = self.clock.now();
        self.accounts.upsert_account(&account).await?;
        info!(%learner, from = %previous, to = %tier, "tier changed");
        Ok(tier)
    }

    /// Remember which exam the learner last chose.
    ///
    /// # Errors
    ///
    /// Returns `AccountServiceError::UnknownExam` if the exam is not in the
    /// catalog, or `AccountServiceError::Storage` on repository failure.
    pub async fn select_exam(
        &self,
        learner: LearnerId,
        exam_id: &ExamId,
    ) -> Result<(), AccountServiceError> {
        select_exam(exam_id, &self.catalog)?;
        let mut account = self.load_or_new(learner).await?;
        account.selected_exam = Some(exam_id.as_str().to_owned());
        account.updated_at = self.clock.now();
        self.accounts.upsert_account(&account).await?;
        Ok(())
    }

    /// Create or rename an account, keeping its tier.
    ///
    /// # Errors
    ///
    /// Returns `AccountServiceError::Storage` on repository failure.
    pub async fn set_display_name(
        &self,
        learner: LearnerId,
        name: Option<String>,
    ) -> Result<(), AccountServiceError> {
        let mut account = self.load_or_new(learner).await?;
        account.display_name = name
            .map(|val| val.trim().to_owned())
            .filter(|val| !val.is_empty());
        account.updated_at = self.clock.now();
        self.accounts.upsert_account(&account).await?;
        Ok(())
    }

    async fn load_or_new(&self, learner: LearnerId) -> Result<AccountRecord, AccountServiceError> {
        Ok(self
            .accounts
            .get_account(learner)
            .await?
            .unwrap_or_else(|| AccountRecord::new(learner, Tier::Free, self.clock.now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fahm_core::model::Exam;
    use fahm_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> AccountService {
        let id = ExamId::new("qudurat").unwrap();
        let catalog = Catalog::new(vec![Exam::new(id.clone(), "Qudurat", Vec::new()).unwrap()], &id)
            .unwrap();
        AccountService::new(
            Clock::fixed(fixed_now()),
            Arc::new(catalog),
            Arc::new(repo.clone()),
        )
    }

    #[tokio::test]
    async fn upgrade_moves_up_only() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let learner = LearnerId::new(1);

        assert_eq!(svc.tier(learner).await.unwrap(), Tier::Free);
        assert_eq!(svc.upgrade(learner, Tier::Basic).await.unwrap(), Tier::Basic);
        assert_eq!(svc.tier(learner).await.unwrap(), Tier::Basic);

        let err = svc.upgrade(learner, Tier::Free).await.unwrap_err();
        assert!(matches!(
            err,
            AccountServiceError::NotAnUpgrade {
                from: Tier::Basic,
                to: Tier::Free
            }
        ));
        assert!(svc.upgrade(learner, Tier::Basic).await.is_err());
    }

    #[tokio::test]
    async fn change_tier_allows_downgrade() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let learner = LearnerId::new(2);
        svc.change_tier(learner, Tier::Premium).await.unwrap();
        svc.change_tier(learner, Tier::Free).await.unwrap();
        assert_eq!(svc.tier(learner).await.unwrap(), Tier::Free);
    }

    #[tokio::test]
    async fn writes_stamp_updated_at_from_clock() {
        let repo = InMemoryRepository::new();
        let later = fixed_now() + chrono::Duration::days(30);
        let svc = AccountService {
            clock: Clock::fixed(later),
            ..service(&repo)
        };
        let learner = LearnerId::new(5);
        svc.change_tier(learner, Tier::Basic).await.unwrap();
        let account = repo.get_account(learner).await.unwrap().unwrap();
        assert_eq!(account.updated_at, later);
    }

    #[tokio::test]
    async fn select_exam_requires_catalog_entry() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let learner = LearnerId::new(3);

        let missing = ExamId::new("ib_diploma").unwrap();
        assert!(matches!(
            svc.select_exam(learner, &missing).await,
            Err(AccountServiceError::UnknownExam(_))
        ));

        let qudurat = ExamId::new("qudurat").unwrap();
        svc.select_exam(learner, &qudurat).await.unwrap();
        let account = repo.get_account(learner).await.unwrap().unwrap();
        assert_eq!(account.selected_exam(), Some(qudurat));
        assert_eq!(account.tier(), Tier::Free);
    }

    #[tokio::test]
    async fn display_name_is_trimmed() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let learner = LearnerId::new(4);
        svc.set_display_name(learner, Some("  Lina ".into()))
            .await
            .unwrap();
        let account = repo.get_account(learner).await.unwrap().unwrap();
        assert_eq!(account.display_name.as_deref(), Some("Lina"));

        svc.set_display_name(learner, Some("   ".into())).await.unwrap();
        let account = repo.get_account(learner).await.unwrap().unwrap();
        assert!(account.display_name.is_none());
    }
}
