use crate::{CommandKind, Engine, FsResult};
use tracing::{debug, instrument};

impl Engine {
    /// Lists given directory (or the working one).
    ///
    /// Paths that don't resolve (or point at files) list as empty instead of
    /// failing.
    #[instrument(skip(self))]
    pub fn ls(&self, path: Option<&str>) -> FsResult<String> {
        debug!("op: ls()");

        let target = match path {
            Some(path) => self.resolve_target(CommandKind::Ls, path)?,
            None => Some(self.cwd),
        };

        let listing = match target {
            Some(id) => self.tree.listing(id, None),
            None => Default::default(),
        };

        Ok(listing.join("\n"))
    }
}
