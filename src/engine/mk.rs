use super::validate_name;
use crate::{Engine, FsError, FsResult, NodeId, NodeKind};
use tracing::{debug, instrument};

impl Engine {
    #[instrument(skip(self))]
    pub fn touch(&mut self, path: &str) -> FsResult<NodeId> {
        debug!("op: touch()");

        self.mk(path, NodeKind::File)
    }

    #[instrument(skip(self))]
    pub fn mkdir(&mut self, path: &str) -> FsResult<NodeId> {
        debug!("op: mkdir()");

        self.mk(path, NodeKind::Directory)
    }

    fn mk(&mut self, path: &str, kind: NodeKind) -> FsResult<NodeId> {
        let (parent, name) = self.resolver().split(path)?;

        validate_name(&name, path)?;

        if self.tree.find_child(parent, &name)?.is_some() {
            return Err(FsError::AlreadyExists(path.into()));
        }

        match kind {
            NodeKind::File => self.tree.create_file(parent, &name),
            NodeKind::Directory => self.tree.create_directory(parent, &name),
        }
    }
}
