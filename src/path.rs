use crate::{FsError, FsResult, NodeId, Tree};
use tracing::instrument;

/// Translates textual paths into nodes of a tree, relative to a working
/// directory.
#[derive(Clone, Copy, Debug)]
pub struct PathResolver<'a> {
    tree: &'a Tree,
    cwd: NodeId,
}

impl<'a> PathResolver<'a> {
    pub fn new(tree: &'a Tree, cwd: NodeId) -> Self {
        Self { tree, cwd }
    }

    /// Walks the entire path and returns the node it points at.
    ///
    /// `..` never fails (it stays put at a root) and `.` is a no-op. Only the
    /// last segment may name a file.
    #[instrument(skip(self))]
    pub fn resolve(&self, path: &str) -> FsResult<NodeId> {
        let mut cursor = self.start(path);

        for segment in segments(path) {
            if !self.tree.kind(cursor)?.is_dir() {
                return Err(FsError::PathNotFound(path.into()));
            }

            cursor = match segment {
                ".." => self.tree.up(cursor)?,
                "." => cursor,

                name => self
                    .tree
                    .find_child(cursor, name)?
                    .ok_or_else(|| FsError::PathNotFound(path.into()))?,
            };
        }

        Ok(cursor)
    }

    /// Same as [`Self::resolve()`], but additionally requires the target to be
    /// a directory.
    pub fn resolve_dir(&self, path: &str) -> FsResult<NodeId> {
        let id = self.resolve(path)?;

        if self.tree.kind(id)?.is_dir() {
            Ok(id)
        } else {
            Err(FsError::NotADirectory(path.into()))
        }
    }

    /// Splits path into its parent directory and the (unresolved) leaf name.
    ///
    /// All segments but the last one must name existing directories; whether
    /// the leaf exists is up to the caller. Paths without any segments (`/`,
    /// empty) yield an empty leaf.
    #[instrument(skip(self))]
    pub fn split(&self, path: &str) -> FsResult<(NodeId, String)> {
        let mut segments: Vec<_> = segments(path).collect();
        let leaf = segments.pop().unwrap_or_default();
        let mut cursor = self.start(path);

        for segment in segments {
            cursor = match segment {
                ".." => self.tree.up(cursor)?,

                name => match self.tree.find_child(cursor, name)? {
                    Some(id) if self.tree.kind(id)?.is_dir() => id,
                    _ => return Err(FsError::PathNotFound(path.into())),
                },
            };
        }

        Ok((cursor, leaf.into()))
    }

    fn start(&self, path: &str) -> NodeId {
        if path.is_empty() || path.starts_with('/') {
            self.tree.root()
        } else {
            self.cwd
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsErrorKind;
    use pretty_assertions::assert_eq;

    struct Fixture {
        tree: Tree,
        b: NodeId,
        c: NodeId,
        d: NodeId,
    }

    /// ```text
    /// /
    ///   a
    ///   b/
    ///     c/
    ///       d.txt
    /// ```
    fn fixture() -> Fixture {
        let mut tree = Tree::default();
        let root = tree.root();

        tree.create_file(root, "a").unwrap();

        let b = tree.create_directory(root, "b").unwrap();
        let c = tree.create_directory(b, "c").unwrap();
        let d = tree.create_file(c, "d.txt").unwrap();

        Fixture { tree, b, c, d }
    }

    fn err_kind<T: std::fmt::Debug>(result: FsResult<T>) -> FsErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn resolve_absolute_and_relative() {
        let fx = fixture();
        let at_root = PathResolver::new(&fx.tree, fx.tree.root());
        let at_b = PathResolver::new(&fx.tree, fx.b);

        assert_eq!(fx.d, at_root.resolve("/b/c/d.txt").unwrap());
        assert_eq!(fx.d, at_root.resolve("b/c/d.txt").unwrap());
        assert_eq!(fx.d, at_b.resolve("c/d.txt").unwrap());
        assert_eq!(fx.d, at_b.resolve("/b/c/d.txt").unwrap());
    }

    #[test]
    fn repeated_slashes_collapse() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.tree.root());

        assert_eq!(fx.c, resolver.resolve("//b///c/").unwrap());
    }

    #[test]
    fn root_aliases() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.c);

        assert_eq!(fx.tree.root(), resolver.resolve("/").unwrap());
        assert_eq!(fx.tree.root(), resolver.resolve("").unwrap());
    }

    #[test]
    fn dot_dot_never_escapes_root() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.tree.root());

        assert_eq!(fx.tree.root(), resolver.resolve("..").unwrap());
        assert_eq!(fx.tree.root(), resolver.resolve("../../..").unwrap());
        assert_eq!(fx.b, resolver.resolve("../b/c/..").unwrap());
    }

    #[test]
    fn single_dot_stays_put() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.b);

        assert_eq!(fx.b, resolver.resolve(".").unwrap());
        assert_eq!(fx.c, resolver.resolve("./c/.").unwrap());
    }

    #[test]
    fn every_node_round_trips_through_its_path() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.c);

        for (id, _) in fx.tree.iter() {
            let path = fx.tree.path(id).unwrap();

            assert_eq!(id, resolver.resolve(&path).unwrap(), "path: {}", path);
        }
    }

    #[test]
    fn files_cannot_be_walked_through() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.tree.root());

        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.resolve("a/..")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.resolve("a/../b")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.resolve("a/.")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.resolve("/b/c/d.txt/..")));
        assert_eq!(fx.d, resolver.resolve("b/../b/c/d.txt").unwrap());
    }

    #[test]
    fn resolve_dir_rejects_files() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.tree.root());

        assert_eq!(FsErrorKind::NotADirectory, err_kind(resolver.resolve_dir("a")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.resolve_dir("nope")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.resolve_dir("a/x")));
    }

    #[test]
    fn split_walks_all_but_the_leaf() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.c);

        assert_eq!((fx.c, "new".to_string()), resolver.split("new").unwrap());
        assert_eq!((fx.b, "x".to_string()), resolver.split("../x").unwrap());
        assert_eq!((fx.c, "d.txt".to_string()), resolver.split("/b/c/d.txt").unwrap());
        assert_eq!((fx.c, "..".to_string()), resolver.split("..").unwrap());
        assert_eq!((fx.tree.root(), String::new()), resolver.split("/").unwrap());
    }

    #[test]
    fn split_requires_existing_directories() {
        let fx = fixture();
        let resolver = PathResolver::new(&fx.tree, fx.tree.root());

        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.split("nope/x")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.split("a/x")));
        assert_eq!(FsErrorKind::PathNotFound, err_kind(resolver.split("./x")));
    }
}
