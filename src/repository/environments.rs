use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::info;

use super::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub trait EnvironmentRepository: Send + Sync {
    fn get_environment(&self, id: &str) -> Result<Arc<Environment>, RepositoryError>;

    fn list_environments(&self) -> Result<Vec<Arc<Environment>>, RepositoryError>;

    /// Creates or replaces the environment stored under its id.
    fn put_environment(&self, environment: Environment) -> Result<Arc<Environment>, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryEnvironmentRepository {
    environments: RwLock<BTreeMap<String, Arc<Environment>>>,
}

impl InMemoryEnvironmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnvironmentRepository for InMemoryEnvironmentRepository {
    fn get_environment(&self, id: &str) -> Result<Arc<Environment>, RepositoryError> {
        self.environments
            .read()
            .map_err(|_| RepositoryError::Poisoned("environment"))?
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::EnvironmentNotFound(id.to_string()))
    }

    fn list_environments(&self) -> Result<Vec<Arc<Environment>>, RepositoryError> {
        let environments = self
            .environments
            .read()
            .map_err(|_| RepositoryError::Poisoned("environment"))?;
        Ok(environments.values().cloned().collect())
    }

    fn put_environment(&self, environment: Environment) -> Result<Arc<Environment>, RepositoryError> {
        let environment = Arc::new(environment);
        self.environments
            .write()
            .map_err(|_| RepositoryError::Poisoned("environment"))?
            .insert(environment.id.clone(), Arc::clone(&environment));
        info!(environment_id = %environment.id, "environment stored");
        Ok(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let repo = InMemoryEnvironmentRepository::new();
        repo.put_environment(Environment {
            id: "prod".into(),
            name: "Production".into(),
            description: None,
        })
        .unwrap();

        assert_eq!(repo.get_environment("prod").unwrap().name, "Production");
        assert_eq!(
            repo.get_environment("staging"),
            Err(RepositoryError::EnvironmentNotFound("staging".into()))
        );
        assert_eq!(repo.list_environments().unwrap().len(), 1);
    }
}
