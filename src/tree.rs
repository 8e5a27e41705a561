use crate::{FsError, FsResult, Node, NodeId, NodeKind};
use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::{instrument, trace};

/// Arena holding a single file tree.
///
/// Nodes refer to each other through [`NodeId`]s; the root is always
/// [`NodeId::ROOT`] and has no parent.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_id: NodeId,
}

#[allow(clippy::len_without_is_empty)]
impl Tree {
    /// Label that makes any directory behave as a root, see [`Tree::is_root`]
    pub const ROOT_LABEL: &'static str = "root";

    pub fn new(root_name: impl Into<String>) -> Self {
        let nodes = HashMap::from_iter([(
            NodeId::ROOT,
            Node::new(root_name, NodeKind::Directory, None),
        )]);

        Self {
            nodes,
            next_id: NodeId::new(2),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(&id)
            .with_context(|| format!("{:?} is dead", id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .with_context(|| format!("{:?} is dead", id))
    }

    pub fn name(&self, id: NodeId) -> Result<&str> {
        Ok(&self.get(id)?.name)
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        Ok(self.get(id)?.kind)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// Returns node's children in name order; files yield an empty slice.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.get(id)?.children.as_deref().unwrap_or_default())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// A node is a root when it has no parent or when it's literally called
    /// [`Tree::ROOT_LABEL`] - the latter means that a nested directory named
    /// `root` refuses to go `..` as well.
    pub fn is_root(&self, id: NodeId) -> Result<bool> {
        let node = self.get(id)?;

        Ok(node.parent.is_none() || node.name == Self::ROOT_LABEL)
    }

    /// Where `..` leads to from given node.
    pub fn up(&self, id: NodeId) -> Result<NodeId> {
        if self.is_root(id)? {
            return Ok(id);
        }

        Ok(self.parent(id)?.unwrap_or(id))
    }

    /// Absolute path of given node; the root itself is `/` and its label is
    /// not part of any path.
    pub fn path(&self, id: NodeId) -> Result<String> {
        let mut names = Vec::new();
        let mut cursor = self.get(id)?;

        while let Some(parent) = cursor.parent {
            names.push(cursor.name.as_str());
            cursor = self.get(parent)?;
        }

        names.reverse();

        Ok(format!("/{}", names.join("/")))
    }

    pub fn find_child(&self, dir: NodeId, name: &str) -> Result<Option<NodeId>> {
        for &child in self.children(dir)? {
            if self.get(child)?.name == name {
                return Ok(Some(child));
            }
        }

        Ok(None)
    }

    /// Returns whether `ancestor` lies on the way from `id` up to its root
    /// (a node counts as its own ancestor).
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool> {
        let mut cursor = Some(id);

        while let Some(id) = cursor {
            if id == ancestor {
                return Ok(true);
            }

            cursor = self.parent(id)?;
        }

        Ok(false)
    }

    pub fn create_directory(&mut self, dir: NodeId, name: &str) -> FsResult<NodeId> {
        self.create(dir, name, NodeKind::Directory)
    }

    pub fn create_file(&mut self, dir: NodeId, name: &str) -> FsResult<NodeId> {
        self.create(dir, name, NodeKind::File)
    }

    #[instrument(skip(self))]
    fn create(&mut self, dir: NodeId, name: &str, kind: NodeKind) -> FsResult<NodeId> {
        self.ensure_vacant(dir, name)?;

        let id = self.alloc(Node::new(name, kind, None))?;

        self.insert_child(dir, id)?;

        Ok(id)
    }

    /// Detaches named child and frees its entire subtree; calling this on a
    /// file is a no-op.
    #[instrument(skip(self))]
    pub fn remove(&mut self, dir: NodeId, name: &str) -> FsResult<()> {
        if !self.get(dir)?.is_dir() {
            return Ok(());
        }

        let child = self
            .find_child(dir, name)?
            .ok_or_else(|| FsError::NotFound(name.into()))?;

        self.free(child);

        Ok(())
    }

    /// Lists directory's children (`name/` for directories).
    ///
    /// When `name` is given, lists that immediate child instead; anything that
    /// doesn't resolve to a directory yields an empty listing.
    pub fn listing(&self, dir: NodeId, name: Option<&str>) -> Vec<String> {
        let target = match name {
            Some(name) => self.find_child(dir, name).ok().flatten(),
            None => Some(dir),
        };

        let Some(node) = target.and_then(|id| self.nodes.get(&id)) else {
            return Default::default();
        };

        node.children
            .iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
            .map(|child| {
                if child.is_dir() {
                    format!("{}/", child.name)
                } else {
                    child.name.clone()
                }
            })
            .collect()
    }

    /// Re-parents `child` under `dir`, keeping `dir`'s children sorted.
    ///
    /// Nothing is modified when `dir` can't take the child (it's a file, it
    /// has a same-named child or it lies inside `child`).
    #[instrument(skip(self))]
    pub fn attach_child(&mut self, dir: NodeId, child: NodeId) -> FsResult<()> {
        let name = self.get(child)?.name.clone();

        if self.is_ancestor(child, dir)? {
            return Err(FsError::InvalidDestination(name));
        }

        if self.find_child(dir, &name)? != Some(child) {
            self.ensure_vacant(dir, &name)?;
        }

        self.detach(child)?;
        self.insert_child(dir, child)?;

        Ok(())
    }

    /// Unlinks node from its parent; the node stays alive in the arena as a
    /// detached subtree.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.get(id)?.parent else {
            return Ok(());
        };

        if let Some(children) = &mut self.get_mut(parent)?.children {
            children.retain(|child| *child != id);
        }

        self.get_mut(id)?.parent = None;

        Ok(())
    }

    /// Renames a detached node (attached nodes would break their parent's
    /// ordering).
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<()> {
        let node = self.get_mut(id)?;

        anyhow::ensure!(node.parent.is_none(), "{:?} must be detached to be renamed", id);

        node.name = name.into();

        Ok(())
    }

    /// Copies given subtree into a brand-new tree, whose root becomes the copy
    /// of `id`.
    pub fn extract(&self, id: NodeId) -> Result<Tree> {
        let node = self.get(id)?;
        let mut tree = Tree::new(node.name.clone());

        tree.get_mut(NodeId::ROOT)?.kind = node.kind;

        if !node.is_dir() {
            tree.get_mut(NodeId::ROOT)?.children = None;
        }

        for &child in self.children(id)? {
            tree.copy_subtree(self, child, NodeId::ROOT)?;
        }

        Ok(tree)
    }

    /// Copies `src_id` (with everything beneath it) out of `src` into this
    /// arena, yielding a detached node.
    pub fn graft(&mut self, src: &Tree, src_id: NodeId) -> Result<NodeId> {
        let node = src.get(src_id)?;
        let id = self.alloc(Node::new(node.name.clone(), node.kind, None))?;

        for &child in src.children(src_id)? {
            self.copy_subtree(src, child, id)?;
        }

        Ok(id)
    }

    /// Duplicates given subtree with fresh identities; the copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let snapshot = self.extract(id)?;

        self.graft(&snapshot, snapshot.root())
    }

    /// Frees a detached node that's not going to be attached anywhere.
    pub fn discard(&mut self, id: NodeId) {
        self.free(id);
    }

    fn copy_subtree(&mut self, src: &Tree, src_id: NodeId, parent: NodeId) -> Result<()> {
        let node = src.get(src_id)?;
        let id = self.alloc(Node::new(node.name.clone(), node.kind, Some(parent)))?;

        // Source children are already sorted, so pushing keeps the order
        self.get_mut(parent)?
            .children
            .get_or_insert_with(Default::default)
            .push(id);

        for &child in src.children(src_id)? {
            self.copy_subtree(src, child, id)?;
        }

        Ok(())
    }

    fn ensure_vacant(&self, dir: NodeId, name: &str) -> FsResult<()> {
        let node = self.get(dir)?;

        if !node.is_dir() {
            return Err(FsError::NotADirectory(node.name.clone()));
        }

        if self.find_child(dir, name)?.is_some() {
            return Err(FsError::AlreadyExists(name.into()));
        }

        Ok(())
    }

    fn insert_child(&mut self, dir: NodeId, child: NodeId) -> Result<()> {
        let name = self.get(child)?.name.clone();

        let idx = self
            .children(dir)?
            .partition_point(|sibling| self.nodes.get(sibling).map_or(true, |s| s.name <= name));

        self.get_mut(dir)?
            .children
            .get_or_insert_with(Default::default)
            .insert(idx, child);

        self.get_mut(child)?.parent = Some(dir);

        Ok(())
    }

    #[instrument(skip(self, node))]
    fn alloc(&mut self, node: Node) -> Result<NodeId> {
        let id = self.next_id.fetch_add()?;

        self.nodes.insert(id, node);

        trace!("allocated node {:?}", id);

        Ok(id)
    }

    #[instrument(skip(self))]
    fn free(&mut self, id: NodeId) {
        trace!("freeing node");

        let Some(node) = self.nodes.remove(&id) else {
            return;
        };

        if let Some(parent) = node.parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            if let Some(children) = &mut parent.children {
                children.retain(|child| *child != id);
            }
        }

        for child in node.children.into_iter().flatten() {
            self.free(child);
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Self::ROOT_LABEL)
    }
}
