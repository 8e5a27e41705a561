use crate::{NodeId, NodeKind, Tree};
use anyhow::{anyhow, bail, Context, Result};

/// Description of a tree as a list of absolute paths.
///
/// A trailing `/` marks a directory; missing intermediate directories are
/// created along the way, so `/door/off` alone yields both `door/` and `off`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blueprint {
    paths: Vec<String>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>) -> Result<()> {
        let path = path.into();

        Self::validate(&path).with_context(|| format!("invalid blueprint path: {}", path))?;

        self.paths.push(path);

        Ok(())
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn build(&self, root_name: &str) -> Result<Tree> {
        let mut tree = Tree::new(root_name);

        for path in &self.paths {
            Self::build_path(&mut tree, path)
                .with_context(|| format!("couldn't build path: {}", path))?;
        }

        Ok(tree)
    }

    fn build_path(tree: &mut Tree, path: &str) -> Result<()> {
        let leaf_kind = if path.ends_with('/') {
            NodeKind::Directory
        } else {
            NodeKind::File
        };

        let names: Vec<_> = path.split('/').filter(|name| !name.is_empty()).collect();
        let mut cursor = tree.root();

        for (idx, name) in names.iter().enumerate() {
            let kind = if idx + 1 == names.len() {
                leaf_kind
            } else {
                NodeKind::Directory
            };

            cursor = Self::ensure(tree, cursor, name, kind)?;
        }

        Ok(())
    }

    fn ensure(tree: &mut Tree, dir: NodeId, name: &str, kind: NodeKind) -> Result<NodeId> {
        if let Some(existing) = tree.find_child(dir, name)? {
            if tree.kind(existing)? != kind {
                bail!("{} exists already as a {:?}", name, tree.kind(existing)?);
            }

            return Ok(existing);
        }

        let id = match kind {
            NodeKind::Directory => tree.create_directory(dir, name),
            NodeKind::File => tree.create_file(dir, name),
        };

        id.map_err(|err| anyhow!("{}", err))
    }

    fn validate(path: &str) -> Result<()> {
        if !path.starts_with('/') {
            bail!("path must be absolute");
        }

        if path == "/" {
            bail!("root is implied");
        }

        if path
            .split('/')
            .any(|name| name == "." || name == ".." || name.chars().any(char::is_whitespace))
        {
            bail!("path must not contain `.`, `..` or whitespace");
        }

        Ok(())
    }
}
