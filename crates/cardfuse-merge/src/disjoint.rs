//! Disjoint-set (union-find) grouping over record indices.
//!
//! Matching is consolidated through an explicit structure instead of
//! recursive comparison so grouping cost stays near-linear in the number
//! of matched pairs.

/// Union-find with path compression and union by rank.
#[derive(Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Returns the representative of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets containing `a` and `b`.
    pub fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    /// Returns all sets as index groups, ordered by each group's
    /// first-seen member, members in index order.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let len = self.parent.len();
        let mut by_root: Vec<Vec<usize>> = Vec::new();
        let mut root_slot: Vec<Option<usize>> = vec![None; len];

        for i in 0..len {
            let root = self.find(i);
            if let Some(slot) = root_slot[root] {
                by_root[slot].push(i);
            } else {
                root_slot[root] = Some(by_root.len());
                by_root.push(vec![i]);
            }
        }

        by_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_by_default() {
        let mut set = DisjointSet::new(3);
        assert_eq!(set.groups(), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn union_merges_sets() {
        let mut set = DisjointSet::new(4);
        set.union(0, 2);
        assert_eq!(set.find(0), set.find(2));
        assert_ne!(set.find(0), set.find(1));
        assert_eq!(set.groups(), vec![vec![0, 2], vec![1], vec![3]]);
    }

    #[test]
    fn union_is_transitive() {
        let mut set = DisjointSet::new(5);
        set.union(0, 1);
        set.union(1, 4);
        assert_eq!(set.find(0), set.find(4));
        assert_eq!(set.groups(), vec![vec![0, 1, 4], vec![2], vec![3]]);
    }

    #[test]
    fn union_is_idempotent() {
        let mut set = DisjointSet::new(2);
        set.union(0, 1);
        set.union(1, 0);
        set.union(0, 1);
        assert_eq!(set.groups(), vec![vec![0, 1]]);
    }

    #[test]
    fn groups_ordered_by_first_member() {
        let mut set = DisjointSet::new(5);
        set.union(3, 4);
        set.union(1, 2);
        assert_eq!(set.groups(), vec![vec![0], vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn empty_set() {
        let mut set = DisjointSet::new(0);
        assert!(set.groups().is_empty());
    }
}
