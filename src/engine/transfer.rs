use super::validate_name;
use crate::{Engine, FsError, FsResult, NodeId};
use tracing::{debug, instrument};

impl Engine {
    #[instrument(skip(self))]
    pub fn mv(&mut self, src: &str, dst: &str) -> FsResult<NodeId> {
        debug!("op: mv()");

        self.transfer(Transfer::Move, src, dst)
    }

    #[instrument(skip(self))]
    pub fn cp(&mut self, src: &str, dst: &str) -> FsResult<NodeId> {
        debug!("op: cp()");

        self.transfer(Transfer::Copy, src, dst)
    }

    fn transfer(&mut self, op: Transfer, src: &str, dst: &str) -> FsResult<NodeId> {
        let Plan { source, dir, name } = self.plan(op, src, dst)?;

        debug!(?source, ?dir, %name, "... planned");

        match op {
            Transfer::Move => {
                self.tree.detach(source)?;
                self.tree.rename(source, &name)?;
                self.tree.attach_child(dir, source)?;

                Ok(source)
            }

            Transfer::Copy => {
                let copy = self.tree.deep_clone(source)?;

                self.tree.rename(copy, &name)?;

                if let Err(err) = self.tree.attach_child(dir, copy) {
                    self.tree.discard(copy);
                    return Err(err);
                }

                Ok(copy)
            }
        }
    }

    /// Resolves both sides of a transfer without touching the tree.
    ///
    /// When the destination is an existing directory, the source lands inside
    /// of it under its own name; otherwise the destination's leaf becomes the
    /// new name. `.`, `..` and `/` as the destination's leaf all name
    /// directories.
    fn plan(&self, op: Transfer, src: &str, dst: &str) -> FsResult<Plan> {
        let resolver = self.resolver();
        let (src_parent, src_name) = resolver.split(src)?;

        validate_name(&src_name, src)?;

        let source = self
            .tree
            .find_child(src_parent, &src_name)?
            .ok_or_else(|| FsError::NotFound(src.into()))?;

        let (dst_parent, dst_name) = resolver.split(dst)?;

        let (dir, name) = match dst_name.as_str() {
            "" | "." => (dst_parent, src_name),
            ".." => (self.tree.up(dst_parent)?, src_name),

            _ => match self.tree.find_child(dst_parent, &dst_name)? {
                Some(existing) if self.tree.kind(existing)?.is_dir() => (existing, src_name),
                Some(_) => return Err(FsError::InvalidDestination(dst.into())),
                None => (dst_parent, dst_name),
            },
        };

        if op == Transfer::Move && self.tree.is_ancestor(source, dir)? {
            return Err(FsError::InvalidDestination(dst.into()));
        }

        if self.tree.find_child(dir, &name)?.is_some() {
            return Err(FsError::AlreadyExists(dst.into()));
        }

        Ok(Plan { source, dir, name })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transfer {
    Move,
    Copy,
}

#[derive(Debug)]
struct Plan {
    source: NodeId,
    dir: NodeId,
    name: String,
}
