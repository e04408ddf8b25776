//! In-memory collaborators for testing.
//!
//! Provide [`Workspace`] and [`EnvironmentStore`] implementations that keep
//! everything in memory, so commands can be exercised without a workspace on
//! disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::environment::{Environment, EnvironmentStore};
use crate::error::{StoreError, StoreResult};
use crate::workspace::Workspace;

/// In-memory workspace holding raw manifests by application name.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspace {
    manifests: BTreeMap<String, String>,
    project: Option<String>,
    fail_listing: Option<String>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an application with its raw manifest.
    pub fn with_app(mut self, name: impl Into<String>, manifest: impl Into<String>) -> Self {
        self.manifests.insert(name.into(), manifest.into());
        self
    }

    /// Record a project in the workspace summary.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Make `app_names` fail with the given message.
    pub fn fail_listing(mut self, message: impl Into<String>) -> Self {
        self.fail_listing = Some(message.into());
        self
    }
}

impl Workspace for MemoryWorkspace {
    fn app_names(&self) -> StoreResult<Vec<String>> {
        if let Some(message) = &self.fail_listing {
            return Err(StoreError::Io(std::io::Error::other(message.clone())));
        }
        Ok(self.manifests.keys().cloned().collect())
    }

    fn manifest_file_name(&self, app_name: &str) -> PathBuf {
        PathBuf::from(format!("{}-app.yml", app_name))
    }

    fn read_manifest_file(&self, path: &Path) -> StoreResult<Vec<u8>> {
        let file_name = path.to_string_lossy();
        file_name
            .strip_suffix("-app.yml")
            .and_then(|name| self.manifests.get(name))
            .map(|m| m.as_bytes().to_vec())
            .ok_or_else(|| StoreError::ManifestNotFound(path.to_path_buf()))
    }

    fn project_name(&self) -> StoreResult<Option<String>> {
        Ok(self.project.clone())
    }
}

/// In-memory environment store.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironmentStore {
    envs: Vec<Environment>,
}

impl MemoryEnvironmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, env: Environment) -> Self {
        self.envs.push(env);
        self
    }
}

impl EnvironmentStore for MemoryEnvironmentStore {
    fn get_environment(&self, project: &str, env: &str) -> StoreResult<Environment> {
        self.envs
            .iter()
            .find(|e| e.project == project && e.name == env)
            .cloned()
            .ok_or_else(|| StoreError::EnvironmentNotFound {
                project: project.to_string(),
                env: env.to_string(),
            })
    }

    fn list_environments(&self, project: &str) -> StoreResult<Vec<Environment>> {
        let mut envs: Vec<_> = self
            .envs
            .iter()
            .filter(|e| e.project == project)
            .cloned()
            .collect();
        envs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(envs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_workspace_round_trip() {
        let ws = MemoryWorkspace::new().with_app("frontend", "name: frontend");
        let path = ws.manifest_file_name("frontend");
        assert_eq!(ws.read_manifest_file(&path).unwrap(), b"name: frontend");
        assert!(ws.read_manifest_file(Path::new("api-app.yml")).is_err());
    }

    #[test]
    fn test_memory_store_scopes_by_project() {
        let store = MemoryEnvironmentStore::new()
            .with_environment(Environment::new("demo", "test", "1", "us-east-1"))
            .with_environment(Environment::new("other", "test", "2", "us-east-1"));

        assert_eq!(store.list_environments("demo").unwrap().len(), 1);
        assert_eq!(store.get_environment("other", "test").unwrap().account_id, "2");
        assert!(store.get_environment("demo", "prod").is_err());
    }
}
