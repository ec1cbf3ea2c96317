use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::ExamId;
use crate::model::unit::{Unit, UnitDraft, UnitError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("exam name cannot be empty")]
    EmptyName,

    #[error("unit at index {index} has position {found}")]
    NonContiguousPosition { index: usize, found: u32 },

    #[error("unit key `{0}` appears more than once")]
    DuplicateUnitKey(String),

    #[error("exam has too many units")]
    TooManyUnits,

    #[error("invalid unit at position {position}: {source}")]
    Unit {
        position: u32,
        #[source]
        source: UnitError,
    },
}

/// A named assessment track with its units in difficulty order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    id: ExamId,
    name: String,
    units: Vec<Unit>,
}

impl Exam {
    /// Build an exam from already-validated units.
    ///
    /// # Errors
    ///
    /// Returns `ExamError` if the name is blank, positions are not exactly
    /// `0..n` in order, or two units share a key.
    pub fn new(id: ExamId, name: impl Into<String>, units: Vec<Unit>) -> Result<Self, ExamError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ExamError::EmptyName);
        }

        let mut keys = HashSet::with_capacity(units.len());
        for (index, unit) in units.iter().enumerate() {
            if usize::try_from(unit.position()).ok() != Some(index) {
                return Err(ExamError::NonContiguousPosition {
                    index,
                    found: unit.position(),
                });
            }
            if !keys.insert(unit.key()) {
                return Err(ExamError::DuplicateUnitKey(unit.key().to_owned()));
            }
        }

        Ok(Self { id, name, units })
    }

    /// Build an exam from drafts, assigning positions from iteration order.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Unit` for the first invalid draft, or any error
    /// from [`Exam::new`].
    pub fn from_drafts(
        id: ExamId,
        name: impl Into<String>,
        drafts: impl IntoIterator<Item = UnitDraft>,
    ) -> Result<Self, ExamError> {
        let units = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                let position = u32::try_from(index).map_err(|_| ExamError::TooManyUnits)?;
                draft
                    .validate(position)
                    .map_err(|source| ExamError::Unit { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(id, name, units)
    }

    #[must_use]
    pub fn id(&self) -> &ExamId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[must_use]
    pub fn unit(&self, position: u32) -> Option<&Unit> {
        self.units.get(usize::try_from(position).ok()?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
