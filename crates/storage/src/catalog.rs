//! Catalog provider: exam/unit definitions and the tier table, loaded from JSON.
//!
//! Unit positions come from array order in the file.

use std::path::Path;

use fahm_core::model::{Catalog, Exam, ExamId, TierPlan, TierTable, UnitDraft};
use serde::Deserialize;
use tracing::{debug, info};

use crate::repository::StorageError;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    default_exam: String,
    #[serde(default)]
    tiers: Option<Vec<TierPlan>>,
    exams: Vec<ExamEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExamEntry {
    id: String,
    name: String,
    units: Vec<UnitEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitEntry {
    key: String,
    title: String,
    subject: String,
    item_count: u32,
}

/// Everything the access gate needs from static configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub catalog: Catalog,
    pub tiers: TierTable,
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// The catalog compiled into the binary.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the embedded JSON is invalid.
pub fn builtin_catalog() -> Result<CatalogConfig, StorageError> {
    parse_catalog(BUILTIN_CATALOG)
}

/// Read a catalog from disk.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, or
/// `StorageError::Serialization` if its content is invalid.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<CatalogConfig, StorageError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let config = parse_catalog(&raw)?;
    info!(
        path = %path.display(),
        exams = config.catalog.exams().len(),
        "loaded catalog"
    );
    Ok(config)
}

/// Parse and validate a catalog document.
///
/// Without a `tiers` section the standard tier table is used.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or any domain
/// validation failure (bad ids, invalid units, unknown default exam,
/// inconsistent tier caps).
pub fn parse_catalog(json: &str) -> Result<CatalogConfig, StorageError> {
    let file: CatalogFile = serde_json::from_str(json).map_err(ser)?;

    let exams = file
        .exams
        .into_iter()
        .map(|entry| {
            let id = ExamId::new(&entry.id).map_err(ser)?;
            let drafts = entry.units.into_iter().map(|unit| {
                UnitDraft::new(unit.key, unit.title, unit.subject, unit.item_count)
            });
            Exam::from_drafts(id, entry.name, drafts)
                .map_err(|err| StorageError::Serialization(format!("exam `{}`: {err}", entry.id)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let default_exam = ExamId::new(&file.default_exam).map_err(ser)?;
    let catalog = Catalog::new(exams, &default_exam).map_err(ser)?;

    let tiers = match file.tiers {
        Some(plans) => TierTable::new(plans).map_err(ser)?,
        None => {
            debug!("catalog has no tier section; using standard tiers");
            TierTable::standard()
        }
    };

    Ok(CatalogConfig { catalog, tiers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fahm_core::model::Tier;

    #[test]
    fn builtin_catalog_matches_dashboard_tracks() {
        let config = builtin_catalog().unwrap();
        let ids: Vec<&str> = config
            .catalog
            .exams()
            .iter()
            .map(|exam| exam.id().as_str())
            .collect();
        assert_eq!(ids, vec!["nafs_g3", "nafs_g6", "nafs_g9", "qudurat", "tahsili"]);
        assert_eq!(config.catalog.default_exam_id().as_str(), "qudurat");
        assert!(config.catalog.exams().iter().all(|exam| exam.len() == 10));
        assert_eq!(config.tiers, TierTable::standard());
    }

    #[test]
    fn builtin_qudurat_order() {
        let config = builtin_catalog().unwrap();
        let qudurat = config.catalog.default_exam();
        assert_eq!(qudurat.unit(0).unwrap().key(), "math_100");
        assert_eq!(qudurat.unit(5).unwrap().key(), "verbal_100");
        assert_eq!(qudurat.unit(9).unwrap().item_count(), 300);
    }

    #[test]
    fn tiers_section_is_optional() {
        let json = r#"{
            "default_exam": "demo",
            "exams": [{ "id": "demo", "name": "Demo", "units": [] }]
        }"#;
        let config = parse_catalog(json).unwrap();
        assert_eq!(config.tiers.cap(Tier::Basic), Some(5));
        assert!(config.catalog.default_exam().is_empty());
    }

    #[test]
    fn custom_tiers_are_validated() {
        let json = r#"{
            "default_exam": "demo",
            "tiers": [
                { "tier": "free", "max_unlocked": 4, "display_name": "Free" },
                { "tier": "basic", "max_unlocked": 3, "display_name": "Basic" }
            ],
            "exams": [{ "id": "demo", "name": "Demo", "units": [] }]
        }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn misspelled_tier_field_is_rejected() {
        let json = r#"{
            "default_exam": "demo",
            "tiers": [
                { "tier": "free", "max_unlocked": 2, "display_name": "Free" },
                { "tier": "basic", "max_unlocked": 5, "display_name": "Basic", "price": 199 }
            ],
            "exams": [{ "id": "demo", "name": "Demo", "units": [] }]
        }"#;
        assert!(matches!(
            parse_catalog(json),
            Err(StorageError::Serialization(msg)) if msg.contains("price")
        ));
    }

    #[test]
    fn rejects_invalid_unit_and_unknown_default() {
        let zero_items = r#"{
            "default_exam": "demo",
            "exams": [{ "id": "demo", "name": "Demo", "units": [
                { "key": "k", "title": "T", "subject": "S", "item_count": 0 }
            ] }]
        }"#;
        assert!(parse_catalog(zero_items).is_err());

        let missing_default = r#"{
            "default_exam": "ib_diploma",
            "exams": [{ "id": "demo", "name": "Demo", "units": [] }]
        }"#;
        assert!(parse_catalog(missing_default).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();
        let config = load_catalog_file(&path).unwrap();
        assert_eq!(config.catalog.exams().len(), 5);

        let missing = load_catalog_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(StorageError::Io(_))));
    }
}
