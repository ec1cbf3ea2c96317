use fahm_core::model::{LearnerId, UnitProgress};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn learner_id_to_i64(id: LearnerId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("learner_id overflow".into()))
}

pub(crate) fn learner_id_from_i64(v: i64) -> Result<LearnerId, StorageError> {
    u64::try_from(v)
        .map(LearnerId::new)
        .map_err(|_| StorageError::Serialization("learner_id sign overflow".into()))
}

pub(crate) fn position_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid position: {v}")))
}

pub(crate) fn progress_from_i64(v: i64) -> Result<UnitProgress, StorageError> {
    let percent =
        u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid percent: {v}")))?;
    UnitProgress::new(percent).map_err(ser)
}
