use super::validate_name;
use crate::{Engine, FsError, FsResult};
use tracing::{debug, instrument};

impl Engine {
    /// Removes given file or directory (directories go away together with
    /// everything inside).
    #[instrument(skip(self))]
    pub fn rm(&mut self, path: &str) -> FsResult<()> {
        debug!("op: rm()");

        let (parent, name) = self.resolver().split(path)?;

        validate_name(&name, path)?;

        let child = self
            .tree
            .find_child(parent, &name)?
            .ok_or_else(|| FsError::NotFound(path.into()))?;

        self.evacuate(child, parent)?;
        self.tree.remove(parent, &name)?;

        Ok(())
    }
}
