use crate::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    pub fn is_dir(self) -> bool {
        self == NodeKind::Directory
    }
}

/// File or directory living inside a [`crate::Tree`].
///
/// `parent` is a plain id into the same arena - it never owns anything;
/// ownership flows strictly through `children`.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,

    /// Always `Some` for directories (kept sorted by name), always `None` for
    /// files
    pub children: Option<Vec<NodeId>>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            children: kind.is_dir().then(Vec::new),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}
