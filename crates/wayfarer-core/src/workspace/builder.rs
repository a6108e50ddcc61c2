//! Builder for creating and configuring Workspace instances.

use std::path::{Path, PathBuf};

use super::{blocking, Workspace};
use crate::{
    db::Database,
    error::{IoResultExt, Result, WayfarerError},
};

/// Builder for creating and configuring Workspace instances.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceBuilder {
    plan_path: Option<PathBuf>,
    mirror_path: Option<PathBuf>,
}

impl WorkspaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom plan document path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wayfarer/plan.json` or
    /// `~/.local/share/wayfarer/plan.json`
    pub fn with_plan_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.plan_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Enables the SQLite mirror at `path`.
    pub fn with_mirror_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.mirror_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured workspace.
    ///
    /// The plan document itself need not exist yet; its directory is created
    /// and, when a mirror is configured, the mirror schema is initialized.
    ///
    /// # Errors
    ///
    /// Returns `WayfarerError::XdgDirectory` if no default path can be placed
    /// Returns `WayfarerError::FileSystem` if a directory cannot be created
    /// Returns `WayfarerError::Database` if mirror initialization fails
    pub async fn build(self) -> Result<Workspace> {
        let plan_path = match self.plan_path {
            Some(path) => path,
            None => Self::default_plan_path()?,
        };

        for path in std::iter::once(&plan_path).chain(self.mirror_path.as_ref()) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).fs_context(parent)?;
            }
        }

        if let Some(mirror_path) = self.mirror_path.clone() {
            blocking(move || Database::new(&mirror_path).map(|_| ())).await?;
        }

        Ok(Workspace::new(plan_path, self.mirror_path))
    }

    /// Returns the default plan path following the XDG Base Directory
    /// specification.
    fn default_plan_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wayfarer")
            .place_data_file("plan.json")
            .map_err(|e| WayfarerError::XdgDirectory(e.to_string()))
    }
}
