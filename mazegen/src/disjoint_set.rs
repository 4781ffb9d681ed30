//! Union-find over dense element ids, with union by rank and path compression.

#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `n` singleton sets, each element its own root with rank 0.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the root of the set containing `node`, pointing every visited node directly at it.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the sets of `a` and `b`, returns `false` if they already were one set.
    ///
    /// The lower-ranked root is attached under the higher-ranked one. On a tie the root of `a`
    /// goes under the root of `b`, whose rank is bumped.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let a = self.find(a);
        let b = self.find(b);
        if a == b {
            return false;
        }

        let (rank_a, rank_b) = (self.rank[a], self.rank[b]);
        if rank_a > rank_b {
            self.parent[b] = a;
        } else {
            self.parent[a] = b;
            if rank_a == rank_b {
                self.rank[b] = rank_b.saturating_add(1);
            }
        }

        true
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .count()
    }
}
