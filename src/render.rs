use crate::{NodeId, Tree};
use std::fmt::{self, Write};

impl Tree {
    /// Renders the whole tree as indented text, one node per line:
    ///
    /// ```text
    /// factory/
    ///   door/
    ///     off
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing into a `String` can't fail
        let _ = self.render_node(&mut out, self.root(), 0);

        out
    }

    fn render_node(&self, out: &mut String, id: NodeId, depth: usize) -> fmt::Result {
        let Ok(node) = self.get(id) else {
            return Ok(());
        };

        let suffix = if node.is_dir() { "/" } else { "" };

        writeln!(out, "{:indent$}{}{}", "", node.name, suffix, indent = depth * 2)?;

        for &child in self.children(id).unwrap_or_default() {
            self.render_node(out, child, depth + 1)?;
        }

        Ok(())
    }
}
