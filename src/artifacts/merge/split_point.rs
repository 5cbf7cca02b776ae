//! Split-point discovery on the commit DAG
//!
//! The split point of two branch tips is their most recent common ancestor.
//! The finder gathers the full ancestor set of the current tip by DFS over
//! both parents, then breadth-first-searches from the given tip; the first
//! vertex already in the ancestor set is the split point. Disjoint
//! histories have none.
//!
//! The finder is parameterized over a parent-loader function so the same
//! algorithm runs against the on-disk database and the in-memory graphs the
//! unit tests build.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Finds split points and answers ancestry queries
///
/// `ParentLoaderFn` maps a commit id to its parent ids (empty for the
/// root), whatever the backing store.
pub struct SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        SplitPointFinder { parent_loader }
    }

    /// Every commit reachable from `tip` over both parents, `tip` included
    pub fn ancestors(&self, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![tip.clone()];

        while let Some(commit_id) = stack.pop() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            for parent_id in (self.parent_loader)(&commit_id)? {
                stack.push(parent_id);
            }
        }

        Ok(visited)
    }

    /// Most recent common ancestor of the two tips, None when disjoint
    pub fn find_split_point(
        &self,
        current_tip: &ObjectId,
        given_tip: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let current_ancestors = self.ancestors(current_tip)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([given_tip.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            if current_ancestors.contains(&commit_id) {
                return Ok(Some(commit_id));
            }

            for parent_id in (self.parent_loader)(&commit_id)? {
                queue.push_back(parent_id);
            }
        }

        Ok(None)
    }

    /// Whether `ancestor` is reachable from `descendant` over both parents
    pub fn is_ancestor(
        &self,
        ancestor: &ObjectId,
        descendant: &ObjectId,
    ) -> anyhow::Result<bool> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([descendant.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            if &commit_id == ancestor {
                return Ok(true);
            }

            for parent_id in (self.parent_loader)(&commit_id)? {
                queue.push_back(parent_id);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::collections::HashMap;

    /// In-memory commit graph for testing
    #[derive(Debug, Default)]
    struct InMemoryGraph {
        parents: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryGraph {
        fn add_commit(&mut self, commit_id: ObjectId, parents: Vec<ObjectId>) {
            self.parents.insert(commit_id, parents);
        }

        fn load_parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
            self.parents
                .get(commit_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("commit {} not in test graph", commit_id))
        }
    }

    fn create_oid(id: &str) -> ObjectId {
        // Deterministic 40-char hex id encoding the test name
        let mut hex_string = String::new();
        for byte in id.as_bytes() {
            hex_string.push_str(&format!("{:02x}", byte));
        }
        while hex_string.len() < 40 {
            hex_string.push('0');
        }
        hex_string.truncate(40);

        ObjectId::try_parse(hex_string).expect("Invalid test ObjectId")
    }

    #[fixture]
    fn linear_history() -> InMemoryGraph {
        // A <- B <- C <- D
        let mut graph = InMemoryGraph::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let d = create_oid("commit_d");

        graph.add_commit(a.clone(), vec![]);
        graph.add_commit(b.clone(), vec![a]);
        graph.add_commit(c.clone(), vec![b]);
        graph.add_commit(d, vec![c]);

        graph
    }

    #[fixture]
    fn simple_divergence() -> InMemoryGraph {
        //     A
        //    / \
        //   B   C
        let mut graph = InMemoryGraph::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");

        graph.add_commit(a.clone(), vec![]);
        graph.add_commit(b, vec![a.clone()]);
        graph.add_commit(c, vec![a]);

        graph
    }

    #[fixture]
    fn merged_history() -> InMemoryGraph {
        //     A
        //    / \
        //   B   C
        //    \ / \
        //     D   E     D merges B and C
        let mut graph = InMemoryGraph::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let d = create_oid("commit_d");
        let e = create_oid("commit_e");

        graph.add_commit(a.clone(), vec![]);
        graph.add_commit(b.clone(), vec![a.clone()]);
        graph.add_commit(c.clone(), vec![a]);
        graph.add_commit(d, vec![b, c.clone()]);
        graph.add_commit(e, vec![c]);

        graph
    }

    #[rstest]
    fn split_point_of_linear_tips_is_the_older_tip(linear_history: InMemoryGraph) {
        let b = create_oid("commit_b");
        let d = create_oid("commit_d");

        let finder = SplitPointFinder::new(|oid: &ObjectId| linear_history.load_parents(oid));

        assert_eq!(finder.find_split_point(&d, &b).unwrap(), Some(b.clone()));
        assert_eq!(finder.find_split_point(&b, &d).unwrap(), Some(b));
    }

    #[rstest]
    fn split_point_of_identical_tips_is_the_tip(linear_history: InMemoryGraph) {
        let c = create_oid("commit_c");

        let finder = SplitPointFinder::new(|oid: &ObjectId| linear_history.load_parents(oid));

        assert_eq!(finder.find_split_point(&c, &c).unwrap(), Some(c));
    }

    #[rstest]
    fn split_point_of_divergent_tips_is_the_fork(simple_divergence: InMemoryGraph) {
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");

        let finder = SplitPointFinder::new(|oid: &ObjectId| simple_divergence.load_parents(oid));

        assert_eq!(finder.find_split_point(&b, &c).unwrap(), Some(a));
    }

    #[rstest]
    fn split_point_walks_through_second_parents(merged_history: InMemoryGraph) {
        let c = create_oid("commit_c");
        let d = create_oid("commit_d");
        let e = create_oid("commit_e");

        let finder = SplitPointFinder::new(|oid: &ObjectId| merged_history.load_parents(oid));

        // D reaches C through its second parent, so C is the split point.
        assert_eq!(finder.find_split_point(&d, &e).unwrap(), Some(c));
    }

    #[rstest]
    fn disjoint_roots_have_no_split_point() {
        let mut graph = InMemoryGraph::default();
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let x = create_oid("commit_x");
        let y = create_oid("commit_y");

        graph.add_commit(a.clone(), vec![]);
        graph.add_commit(b.clone(), vec![a]);
        graph.add_commit(x.clone(), vec![]);
        graph.add_commit(y.clone(), vec![x]);

        let finder = SplitPointFinder::new(|oid: &ObjectId| graph.load_parents(oid));

        assert_eq!(finder.find_split_point(&b, &y).unwrap(), None);
    }

    #[rstest]
    fn ancestry_follows_both_parents(merged_history: InMemoryGraph) {
        let a = create_oid("commit_a");
        let b = create_oid("commit_b");
        let c = create_oid("commit_c");
        let d = create_oid("commit_d");
        let e = create_oid("commit_e");

        let finder = SplitPointFinder::new(|oid: &ObjectId| merged_history.load_parents(oid));

        assert!(finder.is_ancestor(&b, &d).unwrap());
        assert!(finder.is_ancestor(&c, &d).unwrap());
        assert!(finder.is_ancestor(&a, &e).unwrap());
        assert!(!finder.is_ancestor(&d, &e).unwrap());
        assert!(!finder.is_ancestor(&e, &d).unwrap());
    }
}
