//! Category registry
//!
//! Owns the set of valid categories and the single protected default. All
//! rename and deletion logic lives here so records, which only hold a
//! [`CategoryId`], never go stale.

use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::category::validate_name;
use crate::models::{Category, CategoryId};
use crate::services::RecordStore;

/// The set of categories records may reference
///
/// The current default is kept apart from the other categories and always
/// iterates first.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    default: Category,
    others: Vec<Category>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRegistry {
    /// Create a registry holding only the synthesized "default" category
    pub fn new() -> Self {
        Self {
            default: Category::synthesized_default(),
            others: Vec::new(),
        }
    }

    /// Create a category from a user-supplied name
    ///
    /// If an equal category already exists it is returned instead and the
    /// registry is unchanged.
    pub fn create(&mut self, name: &str) -> TrackerResult<Category> {
        let category = Category::new(name)?;
        if let Some(existing) = self.find_equal(&category) {
            return Ok(existing.clone());
        }

        debug!(category = category.name(), "created category");
        self.others.push(category.clone());
        Ok(category)
    }

    /// Add a category, keeping its flags; no-op if an equal one is present
    pub fn add(&mut self, category: Category) {
        if self.find_equal(&category).is_none() {
            self.others.push(category);
        }
    }

    /// Remove a category, moving its records to the default
    ///
    /// Removing the default (or an unknown category) does nothing. Returns
    /// whether a category was removed.
    pub fn remove(&mut self, id: CategoryId, store: &mut RecordStore) -> bool {
        if id == self.default.id {
            return false;
        }
        let Some(position) = self.others.iter().position(|c| c.id == id) else {
            return false;
        };
        if self.others[position].is_default() {
            return false;
        }

        let moved = store.reassign_category(id, self.default.id);
        let removed = self.others.remove(position);
        debug!(
            category = removed.name(),
            reassigned = moved,
            "removed category"
        );
        true
    }

    /// Rename a category in place, keeping its identity
    pub fn rename(&mut self, id: CategoryId, new_name: &str) -> TrackerResult<()> {
        let new_name = validate_name(new_name)?;

        if self.iter().any(|c| c.id != id && c.name() == new_name) {
            return Err(TrackerError::DuplicateName(new_name));
        }

        let category = self
            .get_mut(id)
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;
        debug!(from = category.name(), to = %new_name, "renamed category");
        category.set_name(&new_name)
    }

    /// Look up a category by name, falling back to the default
    pub fn by_name(&self, name: &str) -> &Category {
        let name = name.trim();
        self.iter()
            .find(|c| c.name() == name)
            .unwrap_or(&self.default)
    }

    /// Look up a category by name without the default fallback
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.iter().find(|c| c.name() == name)
    }

    /// All category names, default first
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|c| c.name()).collect()
    }

    /// Names of the categories flagged visible
    pub fn visible_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|c| c.visible)
            .map(|c| c.name())
            .collect()
    }

    /// Make another registered category the default
    ///
    /// The previous default stays registered, taking the new default's
    /// place in display order.
    pub fn set_default(&mut self, id: CategoryId) -> TrackerResult<()> {
        if id == self.default.id {
            return Ok(());
        }
        let position = self
            .others
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;

        let mut previous = std::mem::replace(&mut self.default, self.others.remove(position));
        previous.set_default_flag(false);
        self.default.set_default_flag(true);
        debug!(
            from = previous.name(),
            to = self.default.name(),
            "changed default category"
        );
        self.others.insert(position, previous);
        Ok(())
    }

    /// Replace every non-default category with `categories`
    ///
    /// The current default is kept first. Categories whose name is already
    /// registered keep their identity; records left pointing at a dropped
    /// category move to the default.
    pub fn replace_all(&mut self, categories: Vec<Category>, store: &mut RecordStore) {
        let previous = std::mem::take(&mut self.others);

        for mut incoming in categories {
            if self.find_equal(&incoming).is_some() {
                continue;
            }
            match previous.iter().find(|c| **c == incoming) {
                Some(existing) => {
                    let mut kept = existing.clone();
                    kept.visible = incoming.visible;
                    kept.set_default_flag(false);
                    self.others.push(kept);
                }
                None => {
                    incoming.set_default_flag(false);
                    self.others.push(incoming);
                }
            }
        }

        let mut moved = 0;
        for dropped in previous.iter().filter(|c| !self.contains(c.id)) {
            moved += store.reassign_category(dropped.id, self.default.id);
        }
        debug!(
            categories = self.len(),
            reassigned = moved,
            "replaced categories"
        );
    }

    /// Load-time fix-up for a registry restored from persisted state
    ///
    /// When exactly two categories carry the default flag (the synthesized
    /// one plus one loaded from disk), the loaded one becomes the default and
    /// the synthesized one is removed. Any other count is left alone.
    /// Returns whether a fix-up happened.
    pub fn reconcile_defaults(&mut self, store: &mut RecordStore) -> bool {
        let flagged: Vec<CategoryId> = self
            .iter()
            .filter(|c| c.is_default())
            .map(|c| c.id)
            .collect();
        if flagged.len() != 2 {
            return false;
        }

        let synthesized = self.default.id;
        let Some(&loaded) = flagged.iter().find(|&&id| id != synthesized) else {
            return false;
        };
        if self.set_default(loaded).is_err() {
            return false;
        }
        self.remove(synthesized, store);
        info!(default = self.default.name(), "reconciled default category");
        true
    }

    /// Hand the default role to the one loaded category flagged default,
    /// keeping the synthesized default registered at `position`
    ///
    /// Used on load when the persisted "default" entry was saved as an
    /// ordinary category. Does nothing unless exactly one other category
    /// carries the default flag.
    pub(crate) fn demote_synthesized(&mut self, position: usize) -> bool {
        let flagged: Vec<usize> = self
            .others
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_default())
            .map(|(index, _)| index)
            .collect();
        let [index] = flagged[..] else {
            return false;
        };

        let promoted = self.others.remove(index);
        let mut previous = std::mem::replace(&mut self.default, promoted);
        previous.set_default_flag(false);
        let position = if index < position { position - 1 } else { position };
        debug!(
            from = previous.name(),
            to = self.default.name(),
            "restored persisted default"
        );
        self.others.insert(position.min(self.others.len()), previous);
        true
    }

    /// Toggle whether a category is shown in selection lists
    pub fn set_visible(&mut self, id: CategoryId, visible: bool) -> TrackerResult<()> {
        let category = self
            .get_mut(id)
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;
        category.visible = visible;
        Ok(())
    }

    /// The current default category
    pub fn default_category(&self) -> &Category {
        &self.default
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.iter().find(|c| c.id == id)
    }

    /// Category for `id`, or the default if it is not registered
    pub fn resolve(&self, id: CategoryId) -> &Category {
        self.get(id).unwrap_or(&self.default)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate categories, default first, then in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        std::iter::once(&self.default).chain(self.others.iter())
    }

    pub fn len(&self) -> usize {
        self.others.len() + 1
    }

    /// A registry always holds its default, so it is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    fn get_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        std::iter::once(&mut self.default)
            .chain(self.others.iter_mut())
            .find(|c| c.id == id)
    }

    fn find_equal(&self, category: &Category) -> Option<&Category> {
        self.iter().find(|c| *c == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, DEFAULT_CATEGORY_NAME};

    fn registry_with(names: &[&str]) -> CategoryRegistry {
        let mut registry = CategoryRegistry::new();
        for name in names {
            registry.create(name).unwrap();
        }
        registry
    }

    #[test]
    fn test_new_registry_has_default() {
        let registry = CategoryRegistry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.default_category().name(), DEFAULT_CATEGORY_NAME);
        assert!(registry.default_category().is_default());
    }

    #[test]
    fn test_create_trims_and_is_idempotent() {
        let mut registry = CategoryRegistry::new();
        let first = registry.create("  Food ").unwrap();
        let second = registry.create("Food").unwrap();

        assert_eq!(first.name(), "Food");
        assert_eq!(first.id, second.id);
        assert_eq!(registry.names(), vec!["default", "Food"]);
    }

    #[test]
    fn test_create_blank_name_fails() {
        let mut registry = CategoryRegistry::new();
        let err = registry.create("   ").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidName(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_equal_category_is_noop() {
        let mut registry = registry_with(&["Food"]);
        registry.add(Category::new("Food").unwrap());
        registry.add(Category::new("Travel").unwrap());
        assert_eq!(registry.names(), vec!["default", "Food", "Travel"]);
    }

    #[test]
    fn test_remove_default_is_noop() {
        let mut registry = registry_with(&["Food"]);
        let mut store = RecordStore::new();
        let default = registry.default_category().clone();
        store
            .add_record(&registry, Record::new("Misc", 5.0, &default).unwrap())
            .unwrap();
        let before = store.clone();

        assert!(!registry.remove(default.id, &mut store));
        assert_eq!(registry.len(), 2);
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_reassigns_records_to_default() {
        let mut registry = registry_with(&["Food", "Travel"]);
        let food = registry.by_name("Food").clone();
        let travel = registry.by_name("Travel").clone();
        let mut store = RecordStore::new();
        store
            .add_record(&registry, Record::new("Lunch", 12.0, &food).unwrap())
            .unwrap();
        store
            .add_record(&registry, Record::new("Train", 30.0, &travel).unwrap())
            .unwrap();
        store
            .add_record(&registry, Record::new("Dinner", 25.0, &food).unwrap())
            .unwrap();

        assert!(registry.remove(food.id, &mut store));

        assert_eq!(registry.len(), 2);
        assert!(!registry.contains(food.id));
        let default_id = registry.default_category().id;
        let categories: Vec<_> = store.records().iter().map(|r| r.category_id()).collect();
        assert_eq!(categories, vec![default_id, travel.id, default_id]);
    }

    #[test]
    fn test_rename_keeps_identity() {
        let mut registry = registry_with(&["Food"]);
        let food = registry.by_name("Food").clone();

        registry.rename(food.id, " Groceries ").unwrap();

        let renamed = registry.get(food.id).unwrap();
        assert_eq!(renamed.name(), "Groceries");
        assert_eq!(registry.names(), vec!["default", "Groceries"]);
    }

    #[test]
    fn test_rename_rejects_blank_and_duplicate() {
        let mut registry = registry_with(&["Food", "Travel"]);
        let food = registry.by_name("Food").clone();

        let err = registry.rename(food.id, "  ").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidName(_)));

        let err = registry.rename(food.id, "Travel").unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName(_)));
        assert_eq!(registry.get(food.id).unwrap().name(), "Food");

        // Renaming to its own name is not a collision
        registry.rename(food.id, "Food").unwrap();
    }

    #[test]
    fn test_by_name_falls_back_to_default() {
        let registry = registry_with(&["Food"]);
        assert_eq!(registry.by_name(" Food ").name(), "Food");
        assert_eq!(registry.by_name("Nope").name(), DEFAULT_CATEGORY_NAME);
        assert!(registry.find_by_name("Nope").is_none());
    }

    #[test]
    fn test_set_default_keeps_previous() {
        let mut registry = registry_with(&["Food", "Misc"]);
        let misc = registry.by_name("Misc").clone();

        registry.set_default(misc.id).unwrap();

        assert_eq!(registry.default_category().id, misc.id);
        assert!(registry.default_category().is_default());
        assert_eq!(registry.names(), vec!["Misc", "Food", "default"]);
        let flagged = registry.iter().filter(|c| c.is_default()).count();
        assert_eq!(flagged, 1);
    }

    #[test]
    fn test_set_default_unknown_category() {
        let mut registry = CategoryRegistry::new();
        let stranger = Category::new("Stranger").unwrap();
        assert!(registry.set_default(stranger.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_replace_all_keeps_default_first() {
        let mut registry = registry_with(&["Food", "Travel"]);
        let food = registry.by_name("Food").clone();
        let travel = registry.by_name("Travel").clone();
        let mut store = RecordStore::new();
        store
            .add_record(&registry, Record::new("Flight", 300.0, &travel).unwrap())
            .unwrap();

        let incoming = vec![
            Category::new("Rent").unwrap(),
            Category::new("Food").unwrap(),
            Category::new("default").unwrap(),
        ];
        registry.replace_all(incoming, &mut store);

        assert_eq!(registry.names(), vec!["default", "Rent", "Food"]);
        assert_eq!(registry.by_name("Food").id, food.id);
        assert_eq!(
            store.records()[0].category_id(),
            registry.default_category().id
        );
    }

    #[test]
    fn test_reconcile_two_defaults() {
        let mut registry = CategoryRegistry::new();
        let synthesized = registry.default_category().clone();
        registry.add(Category::with_flags("Other", true, true).unwrap());
        registry.add(Category::new("Food").unwrap());
        let mut store = RecordStore::new();
        store
            .add_record(&registry, Record::new("Gum", 1.0, &synthesized).unwrap())
            .unwrap();

        assert!(registry.reconcile_defaults(&mut store));

        assert_eq!(registry.default_category().name(), "Other");
        assert!(!registry.contains(synthesized.id));
        assert_eq!(registry.names(), vec!["Other", "Food"]);
        assert_eq!(
            store.records()[0].category_id(),
            registry.default_category().id
        );
    }

    #[test]
    fn test_reconcile_ignores_other_counts() {
        let mut store = RecordStore::new();

        let mut single = registry_with(&["Food"]);
        assert!(!single.reconcile_defaults(&mut store));
        assert_eq!(single.len(), 2);

        let mut triple = CategoryRegistry::new();
        triple.add(Category::with_flags("A", true, true).unwrap());
        triple.add(Category::with_flags("B", true, true).unwrap());
        assert!(!triple.reconcile_defaults(&mut store));
        assert_eq!(triple.default_category().name(), DEFAULT_CATEGORY_NAME);
        assert_eq!(triple.len(), 3);
    }

    #[test]
    fn test_visibility() {
        let mut registry = registry_with(&["Food", "Hidden"]);
        let hidden = registry.by_name("Hidden").id;
        registry.set_visible(hidden, false).unwrap();
        assert_eq!(registry.visible_names(), vec!["default", "Food"]);
    }

    #[test]
    fn test_demote_synthesized_keeps_position() {
        let mut registry = CategoryRegistry::new();
        registry.add(Category::with_flags("Misc", true, true).unwrap());
        registry.add(Category::with_flags("Food", true, false).unwrap());
        registry.add(Category::with_flags("Rent", true, false).unwrap());
        let synthesized = registry.default_category().id;

        assert!(registry.demote_synthesized(2));

        assert_eq!(registry.names(), vec!["Misc", "Food", "default", "Rent"]);
        assert!(registry.default_category().is_default());
        let previous = registry.get(synthesized).unwrap();
        assert!(!previous.is_default());
        assert_eq!(registry.iter().filter(|c| c.is_default()).count(), 1);
    }

    #[test]
    fn test_demote_synthesized_needs_one_flagged() {
        let mut registry = registry_with(&["Food"]);
        assert!(!registry.demote_synthesized(1));
        assert_eq!(registry.default_category().name(), DEFAULT_CATEGORY_NAME);
    }
}
