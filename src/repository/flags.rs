use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use super::RepositoryError;
use crate::evaluation::FlagDefinition;

/// A stored flag: the definition the engine evaluates plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagRecord {
    #[serde(flatten)]
    pub definition: FlagDefinition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub trait FlagRepository: Send + Sync {
    fn get_flag(&self, key: &str) -> Result<Arc<FlagRecord>, RepositoryError>;

    /// All flags ordered by key.
    fn list_flags(&self) -> Result<Vec<Arc<FlagRecord>>, RepositoryError>;

    /// Stores a new flag, failing if the key is taken.
    fn create_flag(&self, definition: FlagDefinition) -> Result<Arc<FlagRecord>, RepositoryError>;

    /// Replaces an existing flag, keeping its creation time.
    fn update_flag(&self, definition: FlagDefinition) -> Result<Arc<FlagRecord>, RepositoryError>;

    /// Creates or replaces.
    fn put_flag(&self, definition: FlagDefinition) -> Result<Arc<FlagRecord>, RepositoryError>;

    fn delete_flag(&self, key: &str) -> Result<(), RepositoryError>;
}

type FlagMap = BTreeMap<String, Arc<FlagRecord>>;

#[derive(Debug, Default)]
pub struct InMemoryFlagRepository {
    flags: RwLock<FlagMap>,
}

impl InMemoryFlagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FlagMap>, RepositoryError> {
        self.flags.read().map_err(|_| RepositoryError::Poisoned("flag"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, FlagMap>, RepositoryError> {
        self.flags.write().map_err(|_| RepositoryError::Poisoned("flag"))
    }
}

fn new_record(definition: FlagDefinition, created_at: DateTime<Utc>) -> Arc<FlagRecord> {
    Arc::new(FlagRecord {
        definition,
        created_at,
        updated_at: Utc::now(),
    })
}

impl FlagRepository for InMemoryFlagRepository {
    fn get_flag(&self, key: &str) -> Result<Arc<FlagRecord>, RepositoryError> {
        self.read()?
            .get(key)
            .cloned()
            .ok_or_else(|| RepositoryError::FlagNotFound(key.to_string()))
    }

    fn list_flags(&self) -> Result<Vec<Arc<FlagRecord>>, RepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn create_flag(&self, definition: FlagDefinition) -> Result<Arc<FlagRecord>, RepositoryError> {
        let mut flags = self.write()?;
        if flags.contains_key(&definition.key) {
            return Err(RepositoryError::FlagExists(definition.key));
        }

        let key = definition.key.clone();
        let record = new_record(definition, Utc::now());
        flags.insert(key.clone(), Arc::clone(&record));
        info!(flag_key = %key, "flag created");
        Ok(record)
    }

    fn update_flag(&self, definition: FlagDefinition) -> Result<Arc<FlagRecord>, RepositoryError> {
        let mut flags = self.write()?;
        let created_at = match flags.get(&definition.key) {
            Some(existing) => existing.created_at,
            None => return Err(RepositoryError::FlagNotFound(definition.key)),
        };

        let key = definition.key.clone();
        let record = new_record(definition, created_at);
        flags.insert(key.clone(), Arc::clone(&record));
        info!(flag_key = %key, "flag updated");
        Ok(record)
    }

    fn put_flag(&self, definition: FlagDefinition) -> Result<Arc<FlagRecord>, RepositoryError> {
        let mut flags = self.write()?;
        let created_at = flags
            .get(&definition.key)
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);

        let key = definition.key.clone();
        let record = new_record(definition, created_at);
        flags.insert(key, Arc::clone(&record));
        Ok(record)
    }

    fn delete_flag(&self, key: &str) -> Result<(), RepositoryError> {
        match self.write()?.remove(key) {
            Some(_) => {
                info!(flag_key = %key, "flag deleted");
                Ok(())
            }
            None => Err(RepositoryError::FlagNotFound(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{FlagValue, Variation};

    fn flag(key: &str, enabled: bool) -> FlagDefinition {
        FlagDefinition {
            id: format!("{key}-id"),
            key: key.to_string(),
            name: key.to_string(),
            description: None,
            enabled,
            variations: vec![Variation::new("var-1", "On", FlagValue::Boolean(true))],
            default_variation_id: "var-1".to_string(),
            rules: vec![],
        }
    }

    #[test]
    fn test_create_and_get() {
        let repo = InMemoryFlagRepository::new();
        repo.create_flag(flag("beta", true)).unwrap();

        let record = repo.get_flag("beta").unwrap();
        assert_eq!(record.definition.key, "beta");
        assert_eq!(repo.get_flag("gamma"), Err(RepositoryError::FlagNotFound("gamma".into())));
    }

    #[test]
    fn test_create_duplicate_key() {
        let repo = InMemoryFlagRepository::new();
        repo.create_flag(flag("beta", true)).unwrap();
        assert_eq!(
            repo.create_flag(flag("beta", false)),
            Err(RepositoryError::FlagExists("beta".into()))
        );
    }

    #[test]
    fn test_update_keeps_created_at() {
        let repo = InMemoryFlagRepository::new();
        let created = repo.create_flag(flag("beta", true)).unwrap();
        let updated = repo.update_flag(flag("beta", false)).unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert!(!updated.definition.enabled);

        assert_eq!(
            repo.update_flag(flag("gamma", true)),
            Err(RepositoryError::FlagNotFound("gamma".into()))
        );
    }

    #[test]
    fn test_snapshot_survives_update() {
        let repo = InMemoryFlagRepository::new();
        repo.put_flag(flag("beta", true)).unwrap();

        let snapshot = repo.get_flag("beta").unwrap();
        repo.put_flag(flag("beta", false)).unwrap();
        repo.delete_flag("beta").unwrap();

        assert!(snapshot.definition.enabled);
    }

    #[test]
    fn test_list_is_ordered_by_key() {
        let repo = InMemoryFlagRepository::new();
        for key in ["zeta", "alpha", "mu"] {
            repo.put_flag(flag(key, true)).unwrap();
        }

        let keys: Vec<_> = repo
            .list_flags()
            .unwrap()
            .iter()
            .map(|r| r.definition.key.clone())
            .collect();
        assert_eq!(keys, ["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_delete() {
        let repo = InMemoryFlagRepository::new();
        repo.put_flag(flag("beta", true)).unwrap();

        repo.delete_flag("beta").unwrap();
        assert_eq!(repo.delete_flag("beta"), Err(RepositoryError::FlagNotFound("beta".into())));
    }
}
