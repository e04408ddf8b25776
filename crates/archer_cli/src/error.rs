//! Errors raised by the CLI itself, before any collaborator is involved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("could not find a project in the workspace, set --project or ARCHER_PROJECT")]
    NoProjectInWorkspace,

    #[error("there are no applications in the workspace, run `archer init` first")]
    NoApplicationsFound,

    #[error("there are no environments in project {0}, run `archer env init` first")]
    NoEnvironmentsFound(String),

    #[error("application '{0}' does not exist in the workspace")]
    UnknownApplication(String),

    #[error("'{0}' cannot be used in an output file name")]
    InvalidFileName(String),

    #[error("{0} is required")]
    MissingInput(&'static str),
}
