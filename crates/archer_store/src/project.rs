//! The project a command operates on.

use tracing::debug;

use crate::error::StoreResult;
use crate::workspace::Workspace;

/// Project selected for the current invocation.
///
/// Passed explicitly to every step instead of being read from process-wide
/// state, so a missing project is visible at the call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    name: Option<String>,
}

impl ProjectContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// A context with no project selected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve the project: an explicit name wins, then the workspace summary.
    pub fn resolve(explicit: Option<String>, ws: &dyn Workspace) -> StoreResult<Self> {
        if let Some(name) = explicit.filter(|n| !n.trim().is_empty()) {
            debug!("Using project {} from command line", name);
            return Ok(Self::new(name));
        }
        let name = ws.project_name()?.filter(|n| !n.trim().is_empty());
        if let Some(name) = &name {
            debug!("Using project {} from workspace summary", name);
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
