use crate::{CommandKind, Engine, FsError, FsResult};
use tracing::{debug, instrument};

impl Engine {
    /// Changes the working directory; no path (or `/`) means the root.
    #[instrument(skip(self))]
    pub fn cd(&mut self, path: Option<&str>) -> FsResult<()> {
        debug!("op: cd()");

        let Some(path) = path else {
            self.cwd = self.tree.root();
            return Ok(());
        };

        let target = self
            .resolve_target(CommandKind::Cd, path)?
            .ok_or_else(|| FsError::PathNotFound(path.into()))?;

        if !self.tree.kind(target)?.is_dir() {
            return Err(FsError::NotADirectory(path.into()));
        }

        self.cwd = target;

        Ok(())
    }
}
