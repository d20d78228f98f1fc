//! Connected components over faces.

/// Union-find with path halving and union by size.
struct DisjointSet {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl DisjointSet {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra as usize] >= self.size[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }
}

const UNSET: u32 = u32::MAX;

/// Dense component labels, numbered in order of each component's lowest
/// vertex index. A vertex used by no face is its own component.
#[allow(clippy::cast_possible_truncation)]
// Truncation: vertex indices are u32
pub(crate) fn label_components(vertex_count: usize, faces: &[[u32; 3]]) -> (Vec<u32>, usize) {
    let mut set = DisjointSet::new(vertex_count);
    for &[a, b, c] in faces {
        set.union(a, b);
        set.union(b, c);
    }

    let mut root_label = vec![UNSET; vertex_count];
    let mut labels = Vec::with_capacity(vertex_count);
    let mut next = 0u32;
    for v in 0..vertex_count as u32 {
        let root = set.find(v) as usize;
        if root_label[root] == UNSET {
            root_label[root] = next;
            next += 1;
        }
        labels.push(root_label[root]);
    }
    (labels, next as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_islands_and_an_orphan() {
        let faces = [[0, 1, 2], [4, 5, 6], [2, 1, 3]];
        let (labels, count) = label_components(8, &faces);
        assert_eq!(count, 3); // {0,1,2,3}, {4,5,6}, {7}
        assert_eq!(labels, vec![0, 0, 0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn chain_merges_into_one() {
        let faces = [[0, 1, 2], [3, 4, 5], [2, 3, 6]];
        let (labels, count) = label_components(7, &faces);
        assert_eq!(count, 1);
        assert!(labels.iter().all(|&l| l == 0));
    }
}
