use std::ops::Range;

use thiserror::Error;

use crate::model::level;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnitError {
    #[error("unit key cannot be empty")]
    EmptyKey,

    #[error("unit title cannot be empty")]
    EmptyTitle,

    #[error("unit subject cannot be empty")]
    EmptySubject,

    #[error("unit item count must be > 0")]
    ZeroItemCount,
}

/// Unvalidated unit definition as it comes out of catalog configuration.
#[derive(Clone, Debug, Default)]
pub struct UnitDraft {
    pub key: String,
    pub title: String,
    pub subject: String,
    pub item_count: u32,
}

impl UnitDraft {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
        item_count: u32,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            subject: subject.into(),
            item_count,
        }
    }

    /// Validate the draft and place it at `position` within its exam.
    ///
    /// # Errors
    ///
    /// Returns `UnitError` if a text field is blank or the item count is zero.
    pub fn validate(self, position: u32) -> Result<Unit, UnitError> {
        let key = required(self.key, UnitError::EmptyKey)?;
        let title = required(self.title, UnitError::EmptyTitle)?;
        let subject = required(self.subject, UnitError::EmptySubject)?;
        if self.item_count == 0 {
            return Err(UnitError::ZeroItemCount);
        }

        Ok(Unit {
            position,
            key,
            title,
            subject,
            item_count: self.item_count,
        })
    }
}

/// An ordered content block ("world") within an exam.
///
/// Holds only static content; learner progress lives in `ProgressMap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    position: u32,
    key: String,
    title: String,
    subject: String,
    item_count: u32,
}

impl Unit {
    /// 0-based position within the exam.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// 1-based number shown to learners ("World 3").
    #[must_use]
    pub fn number(&self) -> u32 {
        self.position + 1
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    #[must_use]
    pub fn questions_per_level(&self) -> u32 {
        level::questions_per_level(self.item_count)
    }

    /// Level (1-based) that the question at `index` belongs to.
    #[must_use]
    pub fn level_of(&self, index: u32) -> Option<u32> {
        level::level_of(index, self.item_count)
    }

    /// Cumulative question indices delivered for `level`.
    #[must_use]
    pub fn level_range(&self, level: u32) -> Option<Range<u32>> {
        level::cumulative_range(level, self.item_count)
    }
}

fn required(value: String, err: UnitError) -> Result<String, UnitError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_fields() {
        let unit = UnitDraft::new(" math_100 ", " Math Basics ", "Math", 100)
            .validate(0)
            .unwrap();
        assert_eq!(unit.key(), "math_100");
        assert_eq!(unit.title(), "Math Basics");
        assert_eq!(unit.position(), 0);
        assert_eq!(unit.number(), 1);
    }

    #[test]
    fn validate_rejects_blank_and_zero() {
        assert_eq!(
            UnitDraft::new("", "T", "S", 1).validate(0).unwrap_err(),
            UnitError::EmptyKey
        );
        assert_eq!(
            UnitDraft::new("k", " ", "S", 1).validate(0).unwrap_err(),
            UnitError::EmptyTitle
        );
        assert_eq!(
            UnitDraft::new("k", "T", "", 1).validate(0).unwrap_err(),
            UnitError::EmptySubject
        );
        assert_eq!(
            UnitDraft::new("k", "T", "S", 0).validate(0).unwrap_err(),
            UnitError::ZeroItemCount
        );
    }

    #[test]
    fn level_helpers_follow_item_count() {
        let unit = UnitDraft::new("verbal_150", "Verbal", "Verbal", 150)
            .validate(6)
            .unwrap();
        assert_eq!(unit.questions_per_level(), 15);
        assert_eq!(unit.level_of(0), Some(1));
        assert_eq!(unit.level_of(149), Some(10));
        assert_eq!(unit.level_of(150), None);
        assert_eq!(unit.level_range(2), Some(0..30));
    }
}
