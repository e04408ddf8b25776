//! Environment records and the store that holds them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};

/// A deployment environment of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Name of the project the environment belongs to
    pub project: String,
    /// Name of the environment (e.g., "test", "prod")
    pub name: String,
    /// Cloud account the environment is deployed in
    pub account_id: String,
    /// Region the environment is deployed in
    pub region: String,
    /// Whether the environment serves production traffic
    #[serde(default)]
    pub prod: bool,
}

impl Environment {
    pub fn new(
        project: impl Into<String>,
        name: impl Into<String>,
        account_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
            account_id: account_id.into(),
            region: region.into(),
            prod: false,
        }
    }

    pub fn production(mut self) -> Self {
        self.prod = true;
        self
    }
}

/// Read access to the environments of a project.
pub trait EnvironmentStore {
    /// Look up one environment by name.
    fn get_environment(&self, project: &str, env: &str) -> StoreResult<Environment>;

    /// List every environment of the project, ordered by name.
    fn list_environments(&self, project: &str) -> StoreResult<Vec<Environment>>;
}

/// Environment store backed by YAML records on disk.
///
/// Layout: `{root}/{project}/environments/{env}.yml`.
pub struct FileEnvironmentStore {
    root: PathBuf,
}

impl FileEnvironmentStore {
    /// Directory under the project holding environment records.
    pub const ENVIRONMENTS_DIR: &'static str = "environments";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn environments_dir(&self, project: &str) -> PathBuf {
        self.root.join(project).join(Self::ENVIRONMENTS_DIR)
    }

    fn environment_path(&self, project: &str, env: &str) -> PathBuf {
        self.environments_dir(project).join(format!("{}.yml", env))
    }

    /// Write an environment record, replacing any existing one.
    pub fn create_environment(&self, env: &Environment) -> StoreResult<PathBuf> {
        let dir = self.environments_dir(&env.project);
        fs::create_dir_all(&dir)?;

        let path = self.environment_path(&env.project, &env.name);
        fs::write(&path, serde_yaml::to_string(env)?)?;

        info!("Stored environment {} of project {}", env.name, env.project);
        Ok(path)
    }

    fn read_record(&self, path: &Path) -> StoreResult<Environment> {
        debug!("Reading environment record from {:?}", path);
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| StoreError::InvalidEnvironment {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl EnvironmentStore for FileEnvironmentStore {
    fn get_environment(&self, project: &str, env: &str) -> StoreResult<Environment> {
        let path = self.environment_path(project, env);
        if !path.exists() {
            return Err(StoreError::EnvironmentNotFound {
                project: project.to_string(),
                env: env.to_string(),
            });
        }
        self.read_record(&path)
    }

    fn list_environments(&self, project: &str) -> StoreResult<Vec<Environment>> {
        let dir = self.environments_dir(project);
        let mut envs = Vec::new();

        if !dir.exists() {
            return Ok(envs);
        }

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| StoreError::Walk {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().map_or(false, |ext| ext == "yml") {
                envs.push(self.read_record(path)?);
            }
        }

        Ok(envs)
    }
}
