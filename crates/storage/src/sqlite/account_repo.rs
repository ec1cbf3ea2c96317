use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fahm_core::model::LearnerId;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{learner_id_from_i64, learner_id_to_i64, ser};
use crate::repository::{AccountRecord, AccountRepository, StorageError};

#[async_trait]
impl AccountRepository for SqliteRepository {
    async fn get_account(&self, learner: LearnerId) -> Result<Option<AccountRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT learner_id, display_name, tier, selected_exam, updated_at
            FROM accounts
            WHERE learner_id = ?1
            ",
        )
        .bind(learner_id_to_i64(learner)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let learner_id = learner_id_from_i64(row.try_get("learner_id").map_err(ser)?)?;
        let display_name: Option<String> = row.try_get("display_name").map_err(ser)?;
        let tier: Option<String> = row.try_get("tier").map_err(ser)?;
        let selected_exam: Option<String> = row.try_get("selected_exam").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;

        Ok(Some(AccountRecord {
            learner_id,
            display_name,
            tier,
            selected_exam,
            updated_at,
        }))
    }

    async fn upsert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO accounts (learner_id, display_name, tier, selected_exam, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(learner_id) DO UPDATE SET
                display_name = excluded.display_name,
                tier = excluded.tier,
                selected_exam = excluded.selected_exam,
                updated_at = excluded.updated_at
            ",
        )
        .bind(learner_id_to_i64(account.learner_id)?)
        .bind(account.display_name.as_deref())
        .bind(account.tier.as_deref())
        .bind(account.selected_exam.as_deref())
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
