pub mod add_chips;
pub mod filter;
pub mod flatten;
pub mod simplify_names;

pub use add_chips::AddChips;
pub use filter::{Filter, Predicate};
pub use flatten::FlattenChildren;
pub use simplify_names::SimplifyNames;

use crate::node::DiffNode;

/// A pure tree→tree transformation applied to a root node.
///
/// Operations are stateless between invocations; any traversal state an
/// operation needs (e.g. the reverse-reference index of [`AddChips`]) lives
/// inside a single `apply` call.
pub trait Operation<N: DiffNode> {
    fn apply(&self, node: &mut N);
}

/// An ordered list of operations applied left-to-right to a root.
///
/// Rebuilt fresh per formatting call by the presenters.
#[derive(Default)]
pub struct TreeFormatter<N: DiffNode> {
    operations: Vec<Box<dyn Operation<N>>>,
}

impl<N: DiffNode> TreeFormatter<N> {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    pub fn add_operation(&mut self, operation: Box<dyn Operation<N>>) -> &mut Self {
        self.operations.push(operation);
        self
    }

    pub fn format(&self, root: &mut N) {
        for operation in &self.operations {
            operation.apply(root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treescope_protocol::HierarchyNode;

    struct Suffix(&'static str);

    impl Operation<HierarchyNode> for Suffix {
        fn apply(&self, node: &mut HierarchyNode) {
            node.name.push_str(self.0);
        }
    }

    #[test]
    fn operations_run_in_insertion_order() {
        let mut formatter = TreeFormatter::new();
        formatter
            .add_operation(Box::new(Suffix("-a")))
            .add_operation(Box::new(Suffix("-b")));
        let mut root = HierarchyNode::new("r", "r");
        formatter.format(&mut root);
        assert_eq!(root.name, "r-a-b");
    }

    #[test]
    fn empty_chain_is_identity() {
        let formatter: TreeFormatter<HierarchyNode> = TreeFormatter::new();
        let mut root = HierarchyNode::new("r", "r");
        formatter.format(&mut root);
        assert_eq!(root.name, "r");
    }
}
