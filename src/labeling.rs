//! Utilities for preparing maximal simplices
//! whose vertices are arbitrary values rather than integer labels.

use itertools::Itertools;

use crate::VertexLabel;

/// An assignment of contiguous labels `0..n` to a set of vertices,
/// in sorted order of the vertices.
///
/// ```
/// # use simplex_homology::{SimplicialComplex, VertexLabels};
/// let triangles = vec![vec!["ab", "abab", "aabb"], vec!["ab", "aabb", "abba"]];
/// let labels = VertexLabels::from_simplices(&triangles);
/// assert_eq!(labels.label(&"aabb"), Some(0));
///
/// let complex = SimplicialComplex::new(labels.relabel(&triangles).unwrap())?;
/// assert_eq!(complex.chain_rank(0), 4);
/// # Ok::<(), simplex_homology::ComplexError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexLabels<T> {
    /// sorted and deduplicated, so the label of a vertex is its position
    vertices: Vec<T>,
}

impl<T: Ord + Clone> VertexLabels<T> {
    /// Label every distinct vertex in the given iterator.
    pub fn new(vertices: impl IntoIterator<Item = T>) -> Self {
        Self {
            vertices: vertices.into_iter().sorted().dedup().collect(),
        }
    }

    /// Label every distinct vertex appearing in a set of simplices.
    pub fn from_simplices(simplices: &[Vec<T>]) -> Self {
        Self::new(simplices.iter().flatten().cloned())
    }

    /// Get the label of a vertex, or `None` if it wasn't labeled.
    pub fn label(&self, vertex: &T) -> Option<VertexLabel> {
        self.vertices.binary_search(vertex).ok()
    }

    /// Get the vertex corresponding to a label.
    pub fn vertex(&self, label: VertexLabel) -> Option<&T> {
        self.vertices.get(label)
    }

    /// Number of labeled vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether there are no labeled vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Replace every vertex of every simplex with its label,
    /// preserving the order of vertices within each simplex.
    ///
    /// Returns `None` if any vertex wasn't labeled.
    pub fn relabel(&self, simplices: &[Vec<T>]) -> Option<Vec<Vec<VertexLabel>>> {
        simplices
            .iter()
            .map(|simplex| {
                simplex
                    .iter()
                    .map(|v| self.label(v))
                    .collect::<Option<Vec<_>>>()
            })
            .collect()
    }
}

/// Add every edge of a graph that isn't already contained in some simplex
/// as a maximal 1-simplex.
///
/// Edges are checked in order against the simplices added so far,
/// so an edge given in both directions is only added once.
/// ```
/// # use simplex_homology::add_uncovered_edges;
/// let mut simplices = vec![vec![0, 1, 2]];
/// add_uncovered_edges(&mut simplices, [(0, 1), (2, 3), (3, 2), (1, 2)]);
/// assert_eq!(simplices, vec![vec![0, 1, 2], vec![2, 3]]);
/// ```
pub fn add_uncovered_edges<T: PartialEq>(
    simplices: &mut Vec<Vec<T>>,
    edges: impl IntoIterator<Item = (T, T)>,
) {
    for (from, to) in edges {
        let covered = simplices
            .iter()
            .any(|simplex| simplex.contains(&from) && simplex.contains(&to));
        if !covered {
            simplices.push(vec![from, to]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimplicialComplex;

    /// Labels follow the sorted order of vertices.
    #[test]
    fn labels_are_sorted_and_contiguous() {
        let labels = VertexLabels::new(["c", "a", "b", "a", "d"]);
        assert_eq!(labels.len(), 4);
        assert!(!labels.is_empty());
        itertools::assert_equal(
            ["a", "b", "c", "d"].iter().map(|v| labels.label(v)),
            (0..4usize).map(Some),
        );
        assert_eq!(labels.vertex(2), Some(&"c"));
        assert_eq!(labels.vertex(4), None);
        assert_eq!(labels.label(&"e"), None);
    }

    /// Relabeling keeps vertex order within simplices
    /// and fails on unknown vertices.
    #[test]
    fn relabeling() {
        let simplices = vec![vec![30, 10, 20], vec![20, 40]];
        let labels = VertexLabels::from_simplices(&simplices);
        assert_eq!(
            labels.relabel(&simplices),
            Some(vec![vec![2, 0, 1], vec![1, 3]])
        );
        assert_eq!(labels.relabel(&[vec![10, 50]]), None);
    }

    /// Uncovered graph edges close a loop that the triangles alone don't have.
    #[test]
    fn uncovered_edges_add_homology() {
        let mut simplices = vec![vec!["u", "v", "w"]];
        let graph = [("u", "v"), ("v", "w"), ("w", "x"), ("x", "u"), ("u", "x")];
        add_uncovered_edges(&mut simplices, graph);
        assert_eq!(simplices.len(), 3);

        let labels = VertexLabels::from_simplices(&simplices);
        let complex = SimplicialComplex::new(labels.relabel(&simplices).unwrap()).unwrap();
        itertools::assert_equal(complex.betti_numbers(2), [1, 1, 0]);
    }
}
