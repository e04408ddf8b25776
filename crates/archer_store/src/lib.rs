//! # archer_store
//!
//! Workspace and environment store collaborators for archer.
//!
//! - [`Workspace`]: lists applications and reads their manifests
//! - [`EnvironmentStore`]: looks up the environments of a project
//! - [`ProjectContext`]: the project an invocation operates on
//!
//! The `mock` module provides in-memory implementations of both traits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use archer_store::{EnvironmentStore, FileEnvironmentStore, FsWorkspace, Workspace};
//!
//! let ws = FsWorkspace::discover(std::env::current_dir().unwrap()).unwrap();
//! let apps = ws.app_names().unwrap();
//!
//! let store = FileEnvironmentStore::new(ws.root_path().join(".archer"));
//! let envs = store.list_environments("demo").unwrap();
//! ```

pub mod environment;
pub mod error;
pub mod mock;
pub mod project;
pub mod workspace;

pub use environment::{Environment, EnvironmentStore, FileEnvironmentStore};
pub use error::{StoreError, StoreResult};
pub use mock::{MemoryEnvironmentStore, MemoryWorkspace};
pub use project::ProjectContext;
pub use workspace::{FsWorkspace, Workspace, WorkspaceSummary};
