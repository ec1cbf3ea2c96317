mod catalog;
mod exam;
mod ids;
pub mod level;
mod progress;
mod tier;
mod tier_table;
mod unit;

pub use catalog::{Catalog, CatalogError};
pub use exam::{Exam, ExamError};
pub use ids::{ExamId, LearnerId, ParseIdError};
pub use progress::{ProgressError, ProgressMap, UnitProgress};
pub use tier::{Tier, TierParseError};
pub use tier_table::{TierPlan, TierTable, TierTableError};
pub use unit::{Unit, UnitDraft, UnitError};
