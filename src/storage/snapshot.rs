//! Persisted tracker layout
//!
//! The on-disk JSON holds a `categories` list and a `records` list. Each
//! record embeds a copy of its category; only the name is used to link it
//! back to the registry on load.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TrackerResult;
use crate::models::{Category, Record, DEFAULT_CATEGORY_NAME};
use crate::services::{CategoryRegistry, RecordStore};

/// Whole-file representation of the tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerFile {
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub records: Vec<RecordEntry>,
}

/// A persisted category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default = "shown_by_default")]
    pub is_shown: bool,
    #[serde(default)]
    pub is_default: bool,
}

fn shown_by_default() -> bool {
    true
}

/// A persisted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEntry {
    pub title: String,
    pub amount: f64,
    pub category: CategoryEntry,
    pub time_added: String,
}

impl From<&Category> for CategoryEntry {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name().to_string(),
            is_shown: category.visible,
            is_default: category.is_default(),
        }
    }
}

impl TrackerFile {
    /// Snapshot a registry and its store, keeping both orders
    pub fn capture(registry: &CategoryRegistry, store: &RecordStore) -> Self {
        Self {
            categories: registry.iter().map(CategoryEntry::from).collect(),
            records: store
                .records()
                .iter()
                .map(|record| RecordEntry {
                    title: record.title().to_string(),
                    amount: record.amount(),
                    category: CategoryEntry::from(registry.resolve(record.category_id())),
                    time_added: record.time_added_iso(),
                })
                .collect(),
        }
    }

    /// Rebuild the registry and store
    ///
    /// The entry named like the synthesized default is merged into it,
    /// keeping its shown flag. If that entry was saved as an ordinary
    /// category, the loaded default takes over and the synthesized one stays
    /// registered in its saved position. Records naming an unknown category
    /// land in the default. The duplicate-default fix-up runs once
    /// everything has been parsed.
    pub fn restore(&self) -> TrackerResult<(CategoryRegistry, RecordStore)> {
        let mut registry = CategoryRegistry::new();
        let synthesized = registry.default_category().id;
        let mut demoted_at = None;

        for entry in &self.categories {
            if entry.name.trim() == DEFAULT_CATEGORY_NAME {
                registry.set_visible(synthesized, entry.is_shown)?;
                if !entry.is_default && demoted_at.is_none() {
                    demoted_at = Some(registry.len() - 1);
                }
                continue;
            }
            registry.add(Category::with_flags(
                &entry.name,
                entry.is_shown,
                entry.is_default,
            )?);
        }
        if let Some(position) = demoted_at {
            registry.demote_synthesized(position);
        }

        let mut store = RecordStore::new();
        for entry in &self.records {
            let category = registry.by_name(&entry.category.name);
            let mut record = Record::new(&entry.title, entry.amount, category)?;
            record.set_time_added(&entry.time_added)?;
            store.push_back(&registry, record)?;
        }

        registry.reconcile_defaults(&mut store);
        debug!(
            categories = registry.len(),
            records = store.len(),
            "restored tracker file"
        );
        Ok((registry, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;

    fn sample() -> (CategoryRegistry, RecordStore) {
        let mut registry = CategoryRegistry::new();
        let food = registry.create("Food").unwrap();
        let travel = registry.create("Travel").unwrap();
        registry.set_visible(travel.id, false).unwrap();

        let mut store = RecordStore::new();
        for (title, amount, category, ts) in [
            ("Bread", 3.5, &food, "2024-03-01T08:15:00"),
            ("Train", 42.0, &travel, "2024-03-02T17:45:30.250"),
            ("Cheese", 7.25, &food, "2024-04-11T12:00:00.000000001"),
        ] {
            let mut record = Record::new(title, amount, category).unwrap();
            record.set_time_added(ts).unwrap();
            store.add_record(&registry, record).unwrap();
        }
        (registry, store)
    }

    #[test]
    fn test_json_layout() {
        let (registry, store) = sample();
        let file = TrackerFile::capture(&registry, &store);
        let json = serde_json::to_value(&file).unwrap();

        assert_eq!(json["categories"][0]["name"], "default");
        assert_eq!(json["categories"][0]["isDefault"], true);
        assert_eq!(json["categories"][2]["isShown"], false);
        assert_eq!(json["records"][0]["title"], "Cheese");
        assert_eq!(json["records"][0]["category"]["name"], "Food");
        assert_eq!(json["records"][0]["timeAdded"], "2024-04-11T12:00:00.000000001");
        assert_eq!(json["records"][1]["timeAdded"], "2024-03-02T17:45:30.250");
    }

    #[test]
    fn test_round_trip_preserves_store() {
        let (registry, store) = sample();
        let json = serde_json::to_string(&TrackerFile::capture(&registry, &store)).unwrap();

        let parsed: TrackerFile = serde_json::from_str(&json).unwrap();
        let (restored_registry, restored_store) = parsed.restore().unwrap();

        assert_eq!(restored_registry.names(), registry.names());
        assert_eq!(
            TrackerFile::capture(&restored_registry, &restored_store),
            TrackerFile::capture(&registry, &store)
        );
        let titles: Vec<_> = restored_store.records().iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Cheese", "Train", "Bread"]);
    }

    #[test]
    fn test_restore_reconciles_loaded_default() {
        let json = r#"{
            "categories": [
                { "name": "Misc", "isShown": true, "isDefault": true },
                { "name": "Food", "isShown": true, "isDefault": false }
            ],
            "records": [
                { "title": "Gum", "amount": 1.5,
                  "category": { "name": "Misc", "isShown": true, "isDefault": true },
                  "timeAdded": "2024-02-02T10:00:00" }
            ]
        }"#;
        let file: TrackerFile = serde_json::from_str(json).unwrap();
        let (registry, store) = file.restore().unwrap();

        assert_eq!(registry.default_category().name(), "Misc");
        assert_eq!(registry.names(), vec!["Misc", "Food"]);
        assert_eq!(
            store.records()[0].category_id(),
            registry.default_category().id
        );
    }

    #[test]
    fn test_unknown_record_category_falls_back_to_default() {
        let json = r#"{
            "categories": [],
            "records": [
                { "title": "Lost", "amount": 9.0,
                  "category": { "name": "Gone" },
                  "timeAdded": "2024-02-02T10:00:00" }
            ]
        }"#;
        let file: TrackerFile = serde_json::from_str(json).unwrap();
        let (registry, store) = file.restore().unwrap();

        let category = registry.resolve(store.records()[0].category_id());
        assert_eq!(category.name(), DEFAULT_CATEGORY_NAME);
    }

    #[test]
    fn test_restore_surfaces_semantic_errors() {
        let json = r#"{
            "records": [
                { "title": "Refund", "amount": -3.0,
                  "category": { "name": "default" },
                  "timeAdded": "2024-02-02T10:00:00" }
            ]
        }"#;
        let file: TrackerFile = serde_json::from_str(json).unwrap();
        assert!(matches!(
            file.restore(),
            Err(TrackerError::NonPositiveAmount(_))
        ));
    }

    fn round_trip(
        registry: &CategoryRegistry,
        store: &RecordStore,
    ) -> (CategoryRegistry, RecordStore) {
        let json = serde_json::to_string(&TrackerFile::capture(registry, store)).unwrap();
        let parsed: TrackerFile = serde_json::from_str(&json).unwrap();
        parsed.restore().unwrap()
    }

    #[test]
    fn test_hidden_default_stays_hidden() {
        let mut registry = CategoryRegistry::new();
        let default_id = registry.default_category().id;
        registry.set_visible(default_id, false).unwrap();

        let (restored, _) = round_trip(&registry, &RecordStore::new());

        assert!(!restored.default_category().visible);
        assert_eq!(restored.visible_names(), Vec::<&str>::new());
    }

    #[test]
    fn test_previous_default_survives_reload() {
        let mut registry = CategoryRegistry::new();
        let misc = registry.create("Misc").unwrap();
        registry.create("Food").unwrap();
        let mut store = RecordStore::new();
        let mut gum = Record::new("Gum", 1.5, registry.default_category()).unwrap();
        gum.set_time_added("2024-02-02T10:00:00").unwrap();
        store.add_record(&registry, gum).unwrap();
        registry.set_default(misc.id).unwrap();
        assert_eq!(registry.names(), vec!["Misc", "default", "Food"]);

        let (restored, restored_store) = round_trip(&registry, &store);

        assert_eq!(restored.names(), vec!["Misc", "default", "Food"]);
        assert_eq!(restored.default_category().name(), "Misc");
        assert_eq!(restored.iter().filter(|c| c.is_default()).count(), 1);
        let category = restored.resolve(restored_store.records()[0].category_id());
        assert_eq!(category.name(), DEFAULT_CATEGORY_NAME);
        assert_eq!(
            TrackerFile::capture(&restored, &restored_store),
            TrackerFile::capture(&registry, &store)
        );
    }
}
