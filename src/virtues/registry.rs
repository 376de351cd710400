//! Virtue registry merging the predefined catalog with user-defined virtues.

use chrono::Utc;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult, StorageResult};
use crate::storage::VirtueStore;

use super::{builtins, Virtue};

/// Single source of truth for which virtues exist.
///
/// Predefined virtues are compiled in and immutable; user-defined virtues
/// are loaded from the injected store at construction and written back on
/// every mutation. Mutations are read-modify-write from one execution
/// context: two clients over the same store are last-write-wins (the
/// single-user, single-tab assumption of the application).
pub struct VirtueRegistry {
    store: Box<dyn VirtueStore>,
    builtin: Vec<Virtue>,
    custom: Vec<Virtue>,
    /// Highest timestamp ever minted into an id, including deleted ones.
    last_minted: i64,
}

impl VirtueRegistry {
    /// Create a registry over the given store.
    ///
    /// # Errors
    /// Returns an error if the stored custom set cannot be read.
    pub fn new(store: impl VirtueStore + 'static) -> StorageResult<Self> {
        let store = Box::new(store);
        let mut custom = store.load()?;
        // Everything in the store is custom by definition; the flag is
        // forced so a hand-edited document cannot smuggle in a builtin.
        for virtue in &mut custom {
            virtue.is_custom = true;
        }

        let last_minted = custom
            .iter()
            .filter_map(|v| v.id.strip_prefix("custom-"))
            .filter_map(|millis| millis.parse().ok())
            .max()
            .unwrap_or(0);

        debug!(custom = custom.len(), "Loaded virtue registry");
        Ok(Self {
            store,
            builtin: builtins::predefined(),
            custom,
            last_minted,
        })
    }

    /// All virtues: predefined in declaration order, then custom in
    /// creation order.
    pub fn get_all(&self) -> Vec<Virtue> {
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .cloned()
            .collect()
    }

    /// Look up a virtue by id.
    pub fn get(&self, id: &str) -> Option<&Virtue> {
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .find(|v| v.id == id)
    }

    /// Whether a virtue with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The user-defined subset, in creation order.
    pub fn custom(&self) -> &[Virtue] {
        &self.custom
    }

    /// Total number of virtues.
    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    /// Whether the registry holds no virtues.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a user-defined virtue.
    ///
    /// Name and description are trimmed. The new virtue is appended after
    /// the existing custom set and the full set is persisted before the
    /// registry is updated, so a failed save leaves the registry unchanged.
    ///
    /// # Errors
    /// `EmptyName` when the trimmed name is empty, `DuplicateName` when any
    /// virtue already uses the name (case-insensitive), `Store` when the
    /// save fails.
    pub fn add(&mut self, name: &str, description: &str) -> RegistryResult<Virtue> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.name_taken(name, None) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        let virtue = Virtue::custom(self.mint_id(), name, description);

        let mut next = self.custom.clone();
        next.push(virtue.clone());
        self.store.save(&next)?;
        self.custom = next;

        debug!(virtue_id = %virtue.id, name = %virtue.name, "Added custom virtue");
        Ok(virtue)
    }

    /// Rename or redescribe a user-defined virtue.
    ///
    /// # Errors
    /// `NotFound` when the id is absent or names a predefined virtue,
    /// `EmptyName`/`DuplicateName` under the same rules as [`add`]
    /// (excluding the record under edit), `Store` when the save fails.
    ///
    /// [`add`]: VirtueRegistry::add
    pub fn update(&mut self, id: &str, name: &str, description: &str) -> RegistryResult<()> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let pos = self
            .custom
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| RegistryError::NotFound {
                virtue_id: id.to_string(),
            })?;
        if self.name_taken(name, Some(id)) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut next = self.custom.clone();
        next[pos].name = name.to_string();
        next[pos].description = description.to_string();
        self.store.save(&next)?;
        self.custom = next;

        debug!(virtue_id = %id, "Updated custom virtue");
        Ok(())
    }

    /// Delete a user-defined virtue.
    ///
    /// The id is retired for good: freshly minted ids are timestamps, so a
    /// later [`add`] never resurrects it. Callers purge dependent state
    /// (priority selections, cached score rows) afterwards, e.g. via
    /// [`UserGoals::retain_known`].
    ///
    /// # Errors
    /// `NotFound` when the id is absent or names a predefined virtue,
    /// `Store` when the save fails.
    ///
    /// [`add`]: VirtueRegistry::add
    /// [`UserGoals::retain_known`]: super::UserGoals::retain_known
    pub fn remove(&mut self, id: &str) -> RegistryResult<()> {
        let pos = self
            .custom
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| RegistryError::NotFound {
                virtue_id: id.to_string(),
            })?;

        let mut next = self.custom.clone();
        next.remove(pos);
        self.store.save(&next)?;
        self.custom = next;

        debug!(virtue_id = %id, "Removed custom virtue");
        Ok(())
    }

    /// Whether a name is already in use, case-insensitively.
    pub fn name_taken(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let needle = name.trim().to_lowercase();
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .filter(|v| Some(v.id.as_str()) != exclude_id)
            .any(|v| v.name.to_lowercase() == needle)
    }

    /// Mint a fresh custom virtue id from the creation timestamp.
    ///
    /// Minted timestamps only move forward, so two adds inside the same
    /// millisecond cannot collide and a deleted id is never handed out
    /// again.
    fn mint_id(&mut self) -> String {
        let millis = Utc::now().timestamp_millis().max(self.last_minted + 1);
        self.last_minted = millis;
        format!("custom-{millis}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn test_registry() -> VirtueRegistry {
        VirtueRegistry::new(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_registry_new_has_builtins() {
        let registry = test_registry();
        assert_eq!(registry.len(), 10);
        assert!(registry.get("courage").is_some());
        assert!(registry.get("empathy").is_some());
        assert!(registry.custom().is_empty());
    }

    #[test]
    fn test_add_appends_after_builtins() {
        let mut registry = test_registry();
        let virtue = registry.add("Patience", "Calm endurance.").unwrap();

        assert!(virtue.is_custom);
        assert!(virtue.id.starts_with("custom-"));

        let all = registry.get_all();
        assert_eq!(all.len(), 11);
        assert_eq!(all.last().unwrap().id, virtue.id);
        assert_eq!(
            all.iter().filter(|v| v.id == virtue.id).count(),
            1,
            "New virtue appears exactly once"
        );
    }

    #[test]
    fn test_add_trims_input() {
        let mut registry = test_registry();
        let virtue = registry.add("  Patience  ", "  Calm endurance.  ").unwrap();
        assert_eq!(virtue.name, "Patience");
        assert_eq!(virtue.description, "Calm endurance.");
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut registry = test_registry();
        let result = registry.add("   ", "whatever");
        assert!(matches!(result, Err(RegistryError::EmptyName)));
    }

    #[test]
    fn test_add_duplicate_name_fails_case_insensitive() {
        let mut registry = test_registry();
        registry.add("Patience", "Calm endurance.").unwrap();

        let result = registry.add("pAtIeNcE", "Again");
        assert!(matches!(result, Err(RegistryError::DuplicateName { .. })));
        assert_eq!(registry.len(), 11, "Failed add leaves registry unchanged");
    }

    #[test]
    fn test_add_duplicate_of_builtin_fails() {
        let mut registry = test_registry();
        let result = registry.add("courage", "Mine now");
        assert!(matches!(result, Err(RegistryError::DuplicateName { .. })));
    }

    #[test]
    fn test_add_mints_unique_ids() {
        let mut registry = test_registry();
        let a = registry.add("Patience", "One").unwrap();
        let b = registry.add("Gratitude", "Two").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_custom_virtue() {
        let mut registry = test_registry();
        let virtue = registry.add("Patience", "Calm endurance.").unwrap();

        registry
            .update(&virtue.id, "Serenity", "Unshaken calm.")
            .unwrap();

        let updated = registry.get(&virtue.id).unwrap();
        assert_eq!(updated.name, "Serenity");
        assert_eq!(updated.description, "Unshaken calm.");
    }

    #[test]
    fn test_update_keeping_own_name_is_allowed() {
        let mut registry = test_registry();
        let virtue = registry.add("Patience", "Calm endurance.").unwrap();
        registry
            .update(&virtue.id, "Patience", "New description")
            .unwrap();
        assert_eq!(registry.get(&virtue.id).unwrap().description, "New description");
    }

    #[test]
    fn test_update_builtin_fails_not_found() {
        let mut registry = test_registry();
        let result = registry.update("courage", "Bravado", "Nope");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
        assert_eq!(registry.get("courage").unwrap().name, "Courage");
    }

    #[test]
    fn test_update_to_colliding_name_fails() {
        let mut registry = test_registry();
        registry.add("Patience", "One").unwrap();
        let other = registry.add("Gratitude", "Two").unwrap();

        let result = registry.update(&other.id, "patience", "Two");
        assert!(matches!(result, Err(RegistryError::DuplicateName { .. })));
    }

    #[test]
    fn test_remove_custom_virtue_persists() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let mut registry = VirtueRegistry::new(store).unwrap();

        let virtue = registry.add("Patience", "Calm endurance.").unwrap();
        assert_eq!(handle.stored().len(), 1);

        registry.remove(&virtue.id).unwrap();
        assert!(!registry.contains(&virtue.id));
        assert!(handle.stored().is_empty());
    }

    #[test]
    fn test_remove_builtin_fails_not_found() {
        let mut registry = test_registry();
        let result = registry.remove("courage");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_remove_unknown_id_fails_not_found() {
        let mut registry = test_registry();
        let result = registry.remove("custom-999");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn test_registry_reloads_persisted_set() {
        let store = MemoryStore::new();
        {
            let mut registry = VirtueRegistry::new(store.clone()).unwrap();
            registry.add("Patience", "Calm endurance.").unwrap();
        }

        let reloaded = VirtueRegistry::new(store).unwrap();
        assert_eq!(reloaded.custom().len(), 1);
        assert_eq!(reloaded.custom()[0].name, "Patience");
    }

    #[test]
    fn test_load_forces_custom_flag() {
        let mut seeded = Virtue::custom("custom-1", "Patience", "Calm endurance.");
        seeded.is_custom = false;
        let store = MemoryStore::with_virtues(vec![seeded]);

        let registry = VirtueRegistry::new(store).unwrap();
        assert!(registry.get("custom-1").unwrap().is_custom);
    }
}
