//! Cascade runs for the Workspace.

use super::{blocking, writer_for, Workspace};
use crate::{
    cascade::{RunOptions, RunResult, Runner},
    error::Result,
    params::RunCascade,
    store::JsonFileStore,
};

impl Workspace {
    /// Runs one cascade pass over the document.
    ///
    /// `input` and `output` in `params` override the workspace's plan path
    /// for this run only. The mirror, when configured, follows whatever was
    /// written.
    pub async fn run_cascade(&self, params: &RunCascade) -> Result<RunResult> {
        let options = RunOptions::from(params);
        let mirror_path = self.mirror_path.clone();
        let locator = self.locator();

        blocking(move || {
            let runner = Runner::new(JsonFileStore, writer_for(mirror_path.as_deref()), locator);
            runner.run(&options)
        })
        .await
    }
}
