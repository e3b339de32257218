pub mod hierarchy;
pub mod property;

pub use hierarchy::HierarchyModifiedCheck;
pub use property::PropertyModifiedCheck;

use std::collections::{HashMap, HashSet};

use treescope_protocol::DiffType;

use crate::node::{DiffNode, clear_diffs};

/// Modified-state strategy supplied to the diff engine, so one traversal
/// serves node shapes with different value semantics.
pub trait ModifiedCheck<N> {
    /// Whether an identity-aligned node pair counts as modified.
    fn is_modified(&self, new: &N, old: &N, denylist: &[String]) -> bool;

    /// Hook invoked on the annotated node after it is classified
    /// [`DiffType::Modified`].
    fn on_modified(&self, _new: &mut N, _old: &N) {}
}

/// Compares two snapshots of an identity-keyed tree and produces a fresh
/// annotated tree: every node carries a [`DiffType`], and tombstone nodes
/// are synthesized where the old snapshot had nodes the new one lacks.
///
/// The root is never classified. When `old_root` is absent the engine
/// short-circuits: the result is a copy of `new_root` with every node
/// classified [`DiffType::None`] and no tombstones.
pub fn diff_trees<N, C>(new_root: &N, old_root: Option<&N>, check: &C, denylist: &[String]) -> N
where
    N: DiffNode,
    C: ModifiedCheck<N>,
{
    let mut fallback = new_root.clone();
    clear_diffs(&mut fallback);

    let Some(old_root) = old_root else {
        return fallback;
    };

    let mut new_ids = HashSet::new();
    if !collect_ids(new_root, &mut new_ids) {
        return fallback;
    }
    let mut old_index = HashMap::new();
    if !collect_index(old_root, &mut old_index) {
        return fallback;
    }

    let differ = Differ {
        check,
        denylist,
        new_ids,
        old_index,
    };
    let mut results = differ.diff_node(
        Some(new_root),
        Some(old_root),
        &[new_root.id()],
        &[old_root.id()],
        true,
    );
    match results.pop() {
        Some(root) if results.is_empty() => root,
        _ => {
            log::error!("diff produced no single root; returning unclassified tree");
            fallback
        }
    }
}

/// Collects every id of the subtree. Duplicate ids are a data-integrity
/// error: logged, and the whole diff pass becomes a no-op.
fn collect_ids<'t, N: DiffNode>(node: &'t N, acc: &mut HashSet<&'t str>) -> bool {
    if !acc.insert(node.id()) {
        log::error!("duplicate node id '{}' in snapshot; skipping diff", node.id());
        return false;
    }
    node.children().iter().all(|child| collect_ids(child, acc))
}

fn collect_index<'t, N: DiffNode>(node: &'t N, acc: &mut HashMap<&'t str, &'t N>) -> bool {
    if acc.insert(node.id(), node).is_some() {
        log::error!("duplicate node id '{}' in snapshot; skipping diff", node.id());
        return false;
    }
    node.children().iter().all(|child| collect_index(child, acc))
}

struct Differ<'t, N, C> {
    check: &'t C,
    denylist: &'t [String],
    /// Every id anywhere in the new snapshot; answers the move-detection
    /// question for old-side nodes.
    new_ids: HashSet<&'t str>,
    /// Every node of the old snapshot by id; answers move detection for
    /// new-side nodes and supplies the counterpart to keep diffing against.
    old_index: HashMap<&'t str, &'t N>,
}

impl<'t, N, C> Differ<'t, N, C>
where
    N: DiffNode,
    C: ModifiedCheck<N>,
{
    /// Visits one position of the co-traversal. The sibling-id lists are the
    /// id sets of the current level on each side, used to tell repositioning
    /// within a level apart from cross-level moves.
    fn diff_node(
        &self,
        new: Option<&'t N>,
        old: Option<&'t N>,
        new_sibling_ids: &[&str],
        old_sibling_ids: &[&str],
        is_root: bool,
    ) -> Vec<N> {
        let mut out = Vec::new();
        match (new, old) {
            (Some(new_node), _) => {
                let mut shell = new_node.clone_node();
                shell.set_diff_type(DiffType::None);
                let mut next_old = old;

                if !is_root && Some(new_node.id()) != old.map(DiffNode::id) {
                    next_old = None;

                    if !old_sibling_ids.contains(&new_node.id()) {
                        if let Some(counterpart) = self.old_index.get(new_node.id()) {
                            // The counterpart position emits the DELETED_MOVE
                            // tombstone; keep diffing children against it.
                            shell.set_diff_type(DiffType::AddedMove);
                            next_old = Some(*counterpart);
                        } else {
                            shell.set_diff_type(DiffType::Added);
                        }
                    }

                    // The position-aligned old node may itself be gone.
                    if let Some(old_node) = old
                        && !new_sibling_ids.contains(&old_node.id())
                    {
                        let moved = self.new_ids.contains(old_node.id());
                        if moved {
                            // Its new position handles the comparison.
                            next_old = None;
                        }
                        out.push(self.tombstone(old_node, moved));
                    }
                } else if !is_root
                    && let Some(old_node) = old
                    && self.check.is_modified(new_node, old_node, self.denylist)
                {
                    shell.set_diff_type(DiffType::Modified);
                    self.check.on_modified(&mut shell, old_node);
                }

                *shell.children_mut() = self.visit_children(Some(new_node), next_old);
                out.push(shell);
            }
            (None, Some(old_node)) => {
                // Present in old only. If the id still exists at this level
                // it was merely repositioned and its new position tags it.
                if !new_sibling_ids.contains(&old_node.id()) {
                    let moved = self.new_ids.contains(old_node.id());
                    out.push(self.tombstone(old_node, moved));
                }
            }
            (None, None) => {
                log::error!("diff visited a position with neither a new nor an old node");
            }
        }
        out
    }

    /// Synthesizes a deletion marker from an old-side node, recursively
    /// classifying the orphaned subtree so grandchildren are tagged too.
    fn tombstone(&self, old_node: &'t N, moved: bool) -> N {
        let mut tomb = old_node.clone_node();
        tomb.set_diff_type(if moved {
            DiffType::DeletedMove
        } else {
            DiffType::Deleted
        });
        *tomb.children_mut() = self.visit_children(None, Some(old_node));
        tomb
    }

    /// Pairs children by index. When the new side has a child with no old
    /// child at the same index (an insertion shifted alignment), falls back
    /// to locating an old child by name before treating it as unmatched.
    fn visit_children(&self, new: Option<&'t N>, old: Option<&'t N>) -> Vec<N> {
        let empty: &[N] = &[];
        let new_kids = new.map_or(empty, DiffNode::children);
        let old_kids = old.map_or(empty, DiffNode::children);
        let new_ids: Vec<&str> = new_kids.iter().map(DiffNode::id).collect();
        let old_ids: Vec<&str> = old_kids.iter().map(DiffNode::id).collect();

        let mut out = Vec::new();
        for i in 0..new_kids.len().max(old_kids.len()) {
            let new_child = new_kids.get(i);
            let mut old_child = old_kids.get(i);
            if let Some(nc) = new_child
                && old_child.is_none()
            {
                old_child = old_kids.iter().find(|oc| oc.name() == nc.name());
            }
            out.extend(self.diff_node(new_child, old_child, &new_ids, &old_ids, false));
        }
        out
    }
}
