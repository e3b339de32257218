use crate::node::DiffNode;
use crate::ops::Operation;

/// A node predicate used by [`Filter`]; predicates on one filter are ANDed.
pub type Predicate<N> = Box<dyn Fn(&N) -> bool>;

/// Predicate-based pruning with two retention modes.
///
/// With `keep_ancestors_of_matches`, a non-matching node survives solely as
/// a path to a matching descendant, and a matching node keeps its whole
/// subtree verbatim. Without it, a failing child is removed unconditionally:
/// a match buried under a non-matching ancestor is lost, and a match does
/// not protect its own non-matching descendants. The strict mode is used for
/// value-level pruning (e.g. hiding default properties), not for search.
pub struct Filter<N> {
    predicates: Vec<Predicate<N>>,
    keep_ancestors_of_matches: bool,
}

impl<N: DiffNode> Filter<N> {
    pub fn new(predicates: Vec<Predicate<N>>, keep_ancestors_of_matches: bool) -> Self {
        Self {
            predicates,
            keep_ancestors_of_matches,
        }
    }

    fn matches(&self, node: &N) -> bool {
        self.predicates.iter().all(|p| p(node))
    }

    fn filter_keeping_paths(&self, node: &mut N) {
        let mut kept = Vec::new();
        for mut child in node.take_children() {
            if self.matches(&child) {
                // A matching subtree is kept verbatim.
                kept.push(child);
                continue;
            }
            if child.children().is_empty() {
                continue;
            }
            self.filter_keeping_paths(&mut child);
            if !child.children().is_empty() {
                kept.push(child);
            }
        }
        *node.children_mut() = kept;
    }

    fn filter_strict(&self, node: &mut N) {
        let mut kept = Vec::new();
        for mut child in node.take_children() {
            if self.matches(&child) {
                self.filter_strict(&mut child);
                kept.push(child);
            }
        }
        *node.children_mut() = kept;
    }
}

impl<N: DiffNode> Operation<N> for Filter<N> {
    fn apply(&self, node: &mut N) {
        if self.keep_ancestors_of_matches {
            self.filter_keeping_paths(node);
        } else {
            self.filter_strict(node);
        }
    }
}
