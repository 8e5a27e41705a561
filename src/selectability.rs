use crate::{CommandKind, NodeId, Tree};

/// Decides which names a button-driven UI may offer as the argument of a
/// pending command, and explains why the others are greyed out.
#[derive(Clone, Copy, Debug)]
pub struct Advisor<'a> {
    tree: &'a Tree,
    dir: NodeId,
}

impl<'a> Advisor<'a> {
    pub fn new(tree: &'a Tree, dir: NodeId) -> Self {
        Self { tree, dir }
    }

    pub fn is_selectable(&self, name: &str, pending: Option<CommandKind>) -> bool {
        let Some(pending) = pending else {
            return false;
        };

        match pending {
            CommandKind::Touch | CommandKind::Mkdir => {
                self.is_dir()
                    && !self.has(name)
                    && name != "."
                    && !(self.is_root() && name == "..")
            }

            CommandKind::Cd => {
                if name == ".." {
                    !self.is_root()
                } else {
                    self.is_dir() && self.child_is_dir(name)
                }
            }

            CommandKind::Rm => self.is_dir() && self.has(name) && name != ".." && name != ".",

            _ => false,
        }
    }

    /// Explains why [`Self::is_selectable()`] refuses given name.
    ///
    /// Checks run in a fixed order - existence comes before special names - so
    /// that the same message wins whenever several of them apply.
    pub fn rejection_reason(
        &self,
        name: &str,
        pending: Option<CommandKind>,
    ) -> Option<&'static str> {
        let Some(pending) = pending else {
            return Some("No command selected");
        };

        match pending {
            CommandKind::Touch | CommandKind::Mkdir => {
                if self.has(name) {
                    return Some("File already exists");
                }

                if name == ".." && self.is_root() {
                    return Some("Cannot create file named '..'");
                }

                if name == "." {
                    return Some("Cannot create file named '.'");
                }
            }

            CommandKind::Cd => {
                if name == ".." && self.is_root() {
                    return Some("Already at root directory");
                }

                if name != ".." && !self.has(name) {
                    return Some("Directory does not exist");
                }

                if name != ".." && !self.child_is_dir(name) {
                    return Some("Not a directory");
                }
            }

            CommandKind::Rm => {
                if !self.has(name) {
                    return Some("File does not exist");
                }

                if name == ".." || name == "." {
                    return Some("Cannot remove special directory");
                }
            }

            _ => return Some("Command takes no selectable names"),
        }

        None
    }

    /// Lists the names worth offering for given command: `..` (when it's
    /// selectable and can actually be acted upon) followed by the selectable
    /// children.
    pub fn selectable_names(&self, pending: Option<CommandKind>) -> Vec<String> {
        let creates = matches!(pending, Some(CommandKind::Touch | CommandKind::Mkdir));

        let dot_dot = Some("..").filter(|name| !creates && self.is_selectable(name, pending));

        let children = self
            .tree
            .children(self.dir)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.tree.name(*id).ok())
            .filter(|name| self.is_selectable(name, pending));

        dot_dot.into_iter().chain(children).map(Into::into).collect()
    }

    fn is_dir(&self) -> bool {
        self.tree.kind(self.dir).map_or(false, |kind| kind.is_dir())
    }

    fn is_root(&self) -> bool {
        self.tree.is_root(self.dir).unwrap_or(true)
    }

    fn has(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    fn child_is_dir(&self, name: &str) -> bool {
        self.child(name)
            .and_then(|id| self.tree.kind(id).ok())
            .map_or(false, |kind| kind.is_dir())
    }

    fn child(&self, name: &str) -> Option<NodeId> {
        self.tree.find_child(self.dir, name).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TOUCH: Option<CommandKind> = Some(CommandKind::Touch);
    const MKDIR: Option<CommandKind> = Some(CommandKind::Mkdir);
    const CD: Option<CommandKind> = Some(CommandKind::Cd);
    const RM: Option<CommandKind> = Some(CommandKind::Rm);

    /// ```text
    /// /
    ///   a
    ///   b/
    ///     c/
    ///     root/
    /// ```
    fn tree() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new("top");
        let root = tree.root();

        tree.create_file(root, "a").unwrap();

        let b = tree.create_directory(root, "b").unwrap();

        tree.create_directory(b, "c").unwrap();

        let nested_root = tree.create_directory(b, "root").unwrap();

        (tree, b, nested_root)
    }

    #[test]
    fn nothing_is_selectable_without_a_command() {
        let (tree, _, _) = tree();
        let advisor = Advisor::new(&tree, tree.root());

        assert!(!advisor.is_selectable("a", None));
        assert!(!advisor.is_selectable("b", None));
        assert_eq!(Some("No command selected"), advisor.rejection_reason("a", None));
        assert!(advisor.selectable_names(None).is_empty());
    }

    #[test]
    fn touch_and_mkdir() {
        let (tree, b, _) = tree();
        let at_root = Advisor::new(&tree, tree.root());
        let at_b = Advisor::new(&tree, b);

        for pending in [TOUCH, MKDIR] {
            assert!(at_root.is_selectable("new", pending));
            assert!(!at_root.is_selectable("a", pending));
            assert!(!at_root.is_selectable(".", pending));
            assert!(!at_root.is_selectable("..", pending));
            assert!(at_b.is_selectable("..", pending));

            assert_eq!(None, at_root.rejection_reason("new", pending));
            assert_eq!(Some("File already exists"), at_root.rejection_reason("a", pending));

            assert_eq!(
                Some("Cannot create file named '..'"),
                at_root.rejection_reason("..", pending)
            );

            assert_eq!(
                Some("Cannot create file named '.'"),
                at_root.rejection_reason(".", pending)
            );
        }
    }

    #[test]
    fn cd() {
        let (tree, b, _) = tree();
        let at_root = Advisor::new(&tree, tree.root());
        let at_b = Advisor::new(&tree, b);

        assert!(at_root.is_selectable("b", CD));
        assert!(!at_root.is_selectable("a", CD));
        assert!(!at_root.is_selectable("nope", CD));
        assert!(!at_root.is_selectable("..", CD));
        assert!(at_b.is_selectable("..", CD));

        assert_eq!(None, at_root.rejection_reason("b", CD));
        assert_eq!(None, at_b.rejection_reason("..", CD));
        assert_eq!(Some("Not a directory"), at_root.rejection_reason("a", CD));
        assert_eq!(Some("Directory does not exist"), at_root.rejection_reason("nope", CD));
        assert_eq!(Some("Already at root directory"), at_root.rejection_reason("..", CD));
    }

    #[test]
    fn rm() {
        let (tree, _, _) = tree();
        let advisor = Advisor::new(&tree, tree.root());

        assert!(advisor.is_selectable("a", RM));
        assert!(advisor.is_selectable("b", RM));
        assert!(!advisor.is_selectable("nope", RM));
        assert!(!advisor.is_selectable("..", RM));

        assert_eq!(None, advisor.rejection_reason("b", RM));
        assert_eq!(Some("File does not exist"), advisor.rejection_reason("nope", RM));

        // Existence is checked first, so `..` reads as missing
        assert_eq!(Some("File does not exist"), advisor.rejection_reason("..", RM));
    }

    #[test]
    fn special_name_wins_only_when_it_exists() {
        let mut tree = Tree::default();
        let root = tree.root();

        // Can't be created through the engine, but the advisor doesn't care
        tree.create_file(root, ".").unwrap();

        let advisor = Advisor::new(&tree, root);

        assert!(!advisor.is_selectable(".", RM));

        assert_eq!(
            Some("Cannot remove special directory"),
            advisor.rejection_reason(".", RM)
        );

        assert_eq!(Some("File already exists"), advisor.rejection_reason(".", TOUCH));
    }

    #[test]
    fn other_commands_take_no_names() {
        let (tree, _, _) = tree();
        let advisor = Advisor::new(&tree, tree.root());

        for pending in [CommandKind::Ls, CommandKind::Mv, CommandKind::Cp, CommandKind::Clear] {
            assert!(!advisor.is_selectable("b", Some(pending)));
            assert!(advisor.rejection_reason("b", Some(pending)).is_some());
        }
    }

    #[test]
    fn directory_named_root_disables_dot_dot() {
        let (tree, _, nested_root) = tree();
        let advisor = Advisor::new(&tree, nested_root);

        assert!(!advisor.is_selectable("..", CD));
        assert_eq!(Some("Already at root directory"), advisor.rejection_reason("..", CD));
        assert!(!advisor.is_selectable("..", TOUCH));
    }

    #[test]
    fn selectable_names() {
        let (tree, b, _) = tree();
        let at_root = Advisor::new(&tree, tree.root());
        let at_b = Advisor::new(&tree, b);

        assert_eq!(vec!["b"], at_root.selectable_names(CD));
        assert_eq!(vec!["..", "c", "root"], at_b.selectable_names(CD));
        assert_eq!(vec!["a", "b"], at_root.selectable_names(RM));
        assert_eq!(vec!["c", "root"], at_b.selectable_names(RM));
        assert!(at_root.selectable_names(TOUCH).is_empty());
        assert!(at_b.selectable_names(TOUCH).is_empty());
        assert!(at_b.selectable_names(MKDIR).is_empty());
    }
}
