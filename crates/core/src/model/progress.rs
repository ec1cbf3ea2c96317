use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("progress must be between 0 and 100, got {0}")]
    OutOfRange(u32),
}

/// A learner's progress through one unit. Completed iff 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnitProgress {
    percent: u8,
}

impl UnitProgress {
    pub const NONE: UnitProgress = UnitProgress { percent: 0 };
    pub const COMPLETE: UnitProgress = UnitProgress { percent: 100 };

    /// # Errors
    ///
    /// Returns `ProgressError::OutOfRange` if `percent` is above 100.
    pub fn new(percent: u32) -> Result<Self, ProgressError> {
        if percent > 100 {
            return Err(ProgressError::OutOfRange(percent));
        }
        let percent = u8::try_from(percent).map_err(|_| ProgressError::OutOfRange(percent))?;
        Ok(Self { percent })
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.percent
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        self.percent == 100
    }

    /// Keep the better of two results. Completion is never reverted.
    #[must_use]
    pub fn best(self, other: Self) -> Self {
        Self {
            percent: self.percent.max(other.percent),
        }
    }
}

/// Per-unit progress for one learner and one exam, keyed by unit position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMap {
    entries: BTreeMap<u32, UnitProgress>,
}

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress for `position`; untouched units read as `UnitProgress::NONE`.
    #[must_use]
    pub fn get(&self, position: u32) -> UnitProgress {
        self.entries.get(&position).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, position: u32, progress: UnitProgress) {
        self.entries.insert(position, progress);
    }
}

impl FromIterator<(u32, UnitProgress)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (u32, UnitProgress)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
