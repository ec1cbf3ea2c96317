use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fahm_core::model::{ExamId, LearnerId, ProgressMap, UnitProgress};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{learner_id_to_i64, position_from_i64, progress_from_i64, ser};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(
        &self,
        learner: LearnerId,
        exam: &ExamId,
    ) -> Result<ProgressMap, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT position, percent
            FROM unit_progress
            WHERE learner_id = ?1 AND exam_id = ?2
            ORDER BY position ASC
            ",
        )
        .bind(learner_id_to_i64(learner)?)
        .bind(exam.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter()
            .map(|row| -> Result<(u32, UnitProgress), StorageError> {
                let position = position_from_i64(row.try_get("position").map_err(ser)?)?;
                let progress = progress_from_i64(row.try_get("percent").map_err(ser)?)?;
                Ok((position, progress))
            })
            .collect()
    }

    async fn upsert_progress(
        &self,
        learner: LearnerId,
        exam: &ExamId,
        position: u32,
        progress: UnitProgress,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO unit_progress (learner_id, exam_id, position, percent, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(learner_id, exam_id, position) DO UPDATE SET
                percent = excluded.percent,
                updated_at = excluded.updated_at
            ",
        )
        .bind(learner_id_to_i64(learner)?)
        .bind(exam.as_str())
        .bind(i64::from(position))
        .bind(i64::from(progress.percent()))
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
