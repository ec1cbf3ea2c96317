use std::sync::Arc;

use fahm_core::AccessGate;
use fahm_core::access::select_exam;
use fahm_core::model::{Catalog, ExamId, LearnerId, Tier, UnitProgress};
use storage::repository::{AccountRepository, ProgressRepository};
use tracing::debug;

use crate::Clock;
use crate::error::ProgressServiceError;

/// Records practice results against units the learner can currently open.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    catalog: Arc<Catalog>,
    gate: Arc<AccessGate>,
    accounts: Arc<dyn AccountRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<Catalog>,
        gate: Arc<AccessGate>,
        accounts: Arc<dyn AccountRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            gate,
            accounts,
            progress,
        }
    }

    /// Record `percent` for the unit at `position`, keeping the best result.
    ///
    /// Returns the stored progress after merging.
    ///
    /// # Errors
    ///
    /// - `UnknownExam` / `UnknownUnit` if the target does not exist.
    /// - `Locked` if the unit is above the learner's current cap.
    /// - `Progress` if `percent` is above 100.
    /// - `Config` / `Storage` for tier-table or repository failures.
    pub async fn record(
        &self,
        learner: LearnerId,
        exam_id: &ExamId,
        position: u32,
        percent: u32,
    ) -> Result<UnitProgress, ProgressServiceError> {
        let exam = select_exam(exam_id, &self.catalog)?;
        if exam.unit(position).is_none() {
            return Err(ProgressServiceError::UnknownUnit {
                exam_id: exam_id.clone(),
                position,
            });
        }
        let progress = UnitProgress::new(percent)?;

        let tier = self
            .accounts
            .get_account(learner)
            .await?
            .map_or(Tier::Free, |acc| acc.tier());
        if self.gate.is_locked(tier, position)? {
            return Err(ProgressServiceError::Locked { position, tier });
        }

        let existing = self.progress.get_progress(learner, exam_id).await?;
        let merged = existing.get(position).best(progress);
        self.progress
            .upsert_progress(learner, exam_id, position, merged, self.clock.now())
            .await?;
        debug!(%learner, exam = %exam_id, position, percent = merged.percent(), "progress recorded");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fahm_core::model::{Exam, TierTable, UnitDraft};
    use fahm_core::time::fixed_now;
    use storage::repository::{AccountRecord, InMemoryRepository};

    fn qudurat() -> ExamId {
        ExamId::new("qudurat").unwrap()
    }

    fn service(repo: &InMemoryRepository) -> ProgressService {
        let exam = Exam::from_drafts(
            qudurat(),
            "Qudurat",
            (0..10).map(|i| UnitDraft::new(format!("w{i}"), format!("World {i}"), "Math", 100)),
        )
        .unwrap();
        ProgressService::new(
            Clock::fixed(fixed_now()),
            Arc::new(Catalog::new(vec![exam], &qudurat()).unwrap()),
            Arc::new(AccessGate::new(TierTable::standard())),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    #[tokio::test]
    async fn records_best_result() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let learner = LearnerId::new(1);

        assert_eq!(svc.record(learner, &qudurat(), 0, 60).await.unwrap().percent(), 60);
        assert_eq!(svc.record(learner, &qudurat(), 0, 30).await.unwrap().percent(), 60);
        assert!(svc.record(learner, &qudurat(), 0, 100).await.unwrap().is_completed());

        let map = repo.get_progress(learner, &qudurat()).await.unwrap();
        assert!(map.get(0).is_completed());
    }

    #[tokio::test]
    async fn rejects_locked_units_for_free_learners() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let err = svc
            .record(LearnerId::new(1), &qudurat(), 2, 10)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProgressServiceError::Locked {
                position: 2,
                tier: Tier::Free
            }
        ));
    }

    #[tokio::test]
    async fn premium_learner_can_record_last_unit() {
        let repo = InMemoryRepository::new();
        let learner = LearnerId::new(5);
        repo.upsert_account(&AccountRecord::new(learner, Tier::Premium, fixed_now()))
            .await
            .unwrap();
        let svc = service(&repo);
        assert_eq!(svc.record(learner, &qudurat(), 9, 15).await.unwrap().percent(), 15);
    }

    #[tokio::test]
    async fn rejects_unknown_targets_and_bad_percent() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let learner = LearnerId::new(1);

        let missing = ExamId::new("nafs_g3").unwrap();
        assert!(matches!(
            svc.record(learner, &missing, 0, 10).await,
            Err(ProgressServiceError::UnknownExam(_))
        ));
        assert!(matches!(
            svc.record(learner, &qudurat(), 10, 10).await,
            Err(ProgressServiceError::UnknownUnit { position: 10, .. })
        ));
        assert!(matches!(
            svc.record(learner, &qudurat(), 0, 150).await,
            Err(ProgressServiceError::Progress(_))
        ));
    }
}
