use std::collections::HashSet;

use thiserror::Error;

use crate::model::exam::Exam;
use crate::model::ids::ExamId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one exam")]
    Empty,

    #[error("exam `{0}` appears more than once")]
    DuplicateExam(ExamId),

    #[error("default exam `{0}` is not in the catalog")]
    MissingDefault(ExamId),
}

/// Static exam → units mapping, loaded once per session.
///
/// Exam order is the order the dashboard lists them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    exams: Vec<Exam>,
    default_index: usize,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns `CatalogError` if there are no exams, an id repeats, or the
    /// default id is not one of the exams.
    pub fn new(exams: Vec<Exam>, default_exam: &ExamId) -> Result<Self, CatalogError> {
        if exams.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(exams.len());
        for exam in &exams {
            if !seen.insert(exam.id()) {
                return Err(CatalogError::DuplicateExam(exam.id().clone()));
            }
        }
        let default_index = exams
            .iter()
            .position(|exam| exam.id() == default_exam)
            .ok_or_else(|| CatalogError::MissingDefault(default_exam.clone()))?;

        Ok(Self {
            exams,
            default_index,
        })
    }

    #[must_use]
    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    #[must_use]
    pub fn get(&self, id: &ExamId) -> Option<&Exam> {
        self.exams.iter().find(|exam| exam.id() == id)
    }

    #[must_use]
    pub fn default_exam(&self) -> &Exam {
        &self.exams[self.default_index]
    }

    #[must_use]
    pub fn default_exam_id(&self) -> &ExamId {
        self.default_exam().id()
    }
}
