//! Workspace discovery and manifest access.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};

/// Access to the applications of the current workspace.
pub trait Workspace {
    /// Names of every application that has a manifest, sorted.
    fn app_names(&self) -> StoreResult<Vec<String>>;

    /// File name of the manifest for `app_name`.
    fn manifest_file_name(&self, app_name: &str) -> PathBuf;

    /// Raw contents of a manifest file returned by [`Workspace::manifest_file_name`].
    fn read_manifest_file(&self, path: &Path) -> StoreResult<Vec<u8>>;

    /// Project recorded in the workspace summary, if any.
    fn project_name(&self) -> StoreResult<Option<String>> {
        Ok(None)
    }
}

/// Contents of the workspace summary file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    #[serde(default)]
    pub project: Option<String>,
}

/// A workspace on the local filesystem.
///
/// Manifests live in `ecs-project/{app}-app.yml` below the workspace root.
pub struct FsWorkspace {
    root_path: PathBuf,
}

impl FsWorkspace {
    /// Directory name holding manifests and the workspace summary.
    pub const WORKSPACE_DIR: &'static str = "ecs-project";
    /// Summary file inside the workspace directory.
    pub const SUMMARY_FILE: &'static str = ".workspace.yml";
    /// Suffix shared by every manifest file name.
    pub const MANIFEST_SUFFIX: &'static str = "-app.yml";

    /// Check if a workspace exists at the given path.
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().join(Self::WORKSPACE_DIR).is_dir()
    }

    /// Find the workspace root by walking up the directory tree.
    pub fn find_root(start_path: impl AsRef<Path>) -> Option<PathBuf> {
        let mut current = start_path.as_ref().to_path_buf();
        loop {
            if Self::exists(&current) {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Open the workspace containing `start_path`.
    pub fn discover(start_path: impl AsRef<Path>) -> StoreResult<Self> {
        let start = start_path.as_ref();
        let root_path = Self::find_root(start)
            .ok_or_else(|| StoreError::WorkspaceNotFound(start.to_path_buf()))?;
        debug!("Using workspace at {:?}", root_path);
        Ok(Self { root_path })
    }

    /// Open a workspace rooted exactly at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let root_path = path.as_ref().to_path_buf();
        if !Self::exists(&root_path) {
            return Err(StoreError::WorkspaceNotFound(root_path));
        }
        Ok(Self { root_path })
    }

    /// Create the workspace directory structure at `path`.
    pub fn init(path: impl AsRef<Path>, project: Option<&str>) -> StoreResult<Self> {
        let root_path = path.as_ref().to_path_buf();
        let ws = Self { root_path };
        fs::create_dir_all(ws.workspace_dir())?;

        let summary = WorkspaceSummary {
            project: project.map(str::to_string),
        };
        fs::write(ws.summary_path(), serde_yaml::to_string(&summary)?)?;
        Ok(ws)
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn workspace_dir(&self) -> PathBuf {
        self.root_path.join(Self::WORKSPACE_DIR)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.workspace_dir().join(Self::SUMMARY_FILE)
    }

    /// Read the workspace summary; a missing file is an empty summary.
    pub fn summary(&self) -> StoreResult<WorkspaceSummary> {
        let path = self.summary_path();
        if !path.exists() {
            return Ok(WorkspaceSummary::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write a manifest for `app_name`, returning its path.
    pub fn write_manifest(&self, app_name: &str, content: &str) -> StoreResult<PathBuf> {
        let path = self.workspace_dir().join(self.manifest_file_name(app_name));
        fs::write(&path, content)?;
        Ok(path)
    }
}

impl Workspace for FsWorkspace {
    fn app_names(&self) -> StoreResult<Vec<String>> {
        let dir = self.workspace_dir();
        let mut names = Vec::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| StoreError::Walk {
                path: dir.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if let Some(name) = file_name.strip_suffix(Self::MANIFEST_SUFFIX) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn manifest_file_name(&self, app_name: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", app_name, Self::MANIFEST_SUFFIX))
    }

    fn read_manifest_file(&self, path: &Path) -> StoreResult<Vec<u8>> {
        let full_path = self.workspace_dir().join(path);
        debug!("Reading manifest from {:?}", full_path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::ManifestNotFound(full_path),
            _ => StoreError::Io(e),
        })
    }

    fn project_name(&self) -> StoreResult<Option<String>> {
        Ok(self.summary()?.project)
    }
}
