use crate::{NodeId, Tree};

impl Tree {
    /// Compares two subtrees (possibly living in different arenas) by names,
    /// kinds and shape; the order in which children were inserted doesn't
    /// matter.
    pub fn structural_eq(&self, id: NodeId, other: &Tree, other_id: NodeId) -> bool {
        let (Ok(lhs), Ok(rhs)) = (self.get(id), other.get(other_id)) else {
            return false;
        };

        if lhs.name != rhs.name || lhs.kind != rhs.kind {
            return false;
        }

        if !lhs.is_dir() {
            return true;
        }

        let lhs_children = self.sorted_children(id);
        let rhs_children = other.sorted_children(other_id);

        lhs_children.len() == rhs_children.len()
            && lhs_children
                .iter()
                .zip(&rhs_children)
                .all(|(&lhs, &rhs)| self.structural_eq(lhs, other, rhs))
    }

    /// Whether this tree has the same shape as `goal`, starting from both
    /// roots.
    pub fn matches(&self, goal: &Tree) -> bool {
        self.structural_eq(self.root(), goal, goal.root())
    }

    fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).unwrap_or_default().to_vec();

        children.sort_by_key(|child| self.name(*child).unwrap_or_default());
        children
    }
}
