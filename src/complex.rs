//! The simplicial complex and its boundary operators.

/// Low-level complex construction and corresponding tests.
mod construction;
/// re-export the testing complex for use in other modules' tests
#[doc(hidden)]
pub use construction::tiny_complex;

//

use itertools::Itertools;
use nalgebra_sparse as nas;

use crate::{reduction::reduce_matrix, Gf2Matrix, SparseGf2Matrix};

/// Label of a single vertex.
///
/// Labels are expected to be small integers,
/// typically produced by a relabeling pass such as [`VertexLabels`][crate::VertexLabels].
/// They don't need to be contiguous.
pub type VertexLabel = usize;

/// Error in constructing a complex from maximal simplices.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplexError {
    /// No maximal simplices were given.
    #[error("Invalid complex: no maximal simplices")]
    NoSimplices,
    /// A maximal simplex has no vertices.
    #[error("Invalid maximal simplex {index}: no vertices")]
    EmptySimplex {
        /// Position of the offending simplex in the input list.
        index: usize,
    },
    /// A maximal simplex contains the same vertex more than once.
    #[error("Invalid maximal simplex {index}: vertex {vertex} appears more than once")]
    DuplicateVertex {
        /// Position of the offending simplex in the input list.
        index: usize,
        /// The repeated vertex label.
        vertex: VertexLabel,
    },
}

/// A simplicial complex generated by a set of maximal simplices.
///
/// Every order-preserving subsequence of every maximal simplex
/// is a simplex of the complex, including the empty sequence,
/// which is the unique simplex of dimension -1.
/// The complex is immutable after construction.
#[derive(Clone, Debug)]
pub struct SimplicialComplex {
    /// The maximal simplices as given to the constructor.
    maximal_simplices: Vec<Vec<VertexLabel>>,
    /// Simplices grouped by dimension.
    /// Level `k` holds the simplices of dimension `k - 1`,
    /// so the root is alone on level 0.
    /// Position within a level is the stable index of a simplex.
    pub(crate) levels: Vec<Vec<Simplex>>,
    dimension: usize,
}

/// Storage for a single simplex.
///
/// Other simplices are referred to by their index
/// in the level above or below this one;
/// the dimension is always implied by the relation.
#[derive(Clone, Debug, Default)]
pub(crate) struct Simplex {
    pub vertices: Vec<VertexLabel>,
    /// the simplex this was created from in the face trie,
    /// i.e. the one with the last vertex removed.
    /// `None` only for the root
    pub parent: Option<usize>,
    /// trie edges as (next vertex, child index) pairs in insertion order
    pub children: Vec<(VertexLabel, usize)>,
    /// facets (one vertex omitted), indices into the level below
    pub faces: Vec<usize>,
    /// simplices this is a facet of, indices into the level above
    pub cofaces: Vec<usize>,
}

impl Simplex {
    #[inline]
    pub fn child(&self, vertex: VertexLabel) -> Option<usize> {
        self.children
            .iter()
            .find(|(v, _)| *v == vertex)
            .map(|(_, idx)| *idx)
    }
}

impl SimplicialComplex {
    /// Build a complex from its maximal simplices.
    ///
    /// Each maximal simplex must be non-empty and free of repeated vertices;
    /// violations are rejected with a [`ComplexError`]
    /// rather than producing a degenerate face lattice.
    pub fn new(maximal_simplices: Vec<Vec<VertexLabel>>) -> Result<Self, ComplexError> {
        validate_maximal_simplices(&maximal_simplices)?;
        Ok(construction::build_complex(maximal_simplices))
    }

    /// Get the dimension of the complex,
    /// i.e. the dimension of its largest maximal simplex.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get the maximal simplices this complex was built from.
    #[inline]
    pub fn maximal_simplices(&self) -> &[Vec<VertexLabel>] {
        &self.maximal_simplices
    }

    /// Number of `p`-simplices, i.e. the rank of the chain group `C_p`.
    ///
    /// This is zero for any dimension with no simplices,
    /// and one for `p = -1` (the empty simplex).
    #[inline]
    pub fn chain_rank(&self, p: isize) -> usize {
        self.level(p).map_or(0, |level| level.len())
    }

    /// Number of `DIM`-simplices. Shorthand for [`chain_rank`][Self::chain_rank]
    /// with a nonnegative dimension.
    #[inline]
    pub fn simplex_count(&self, dim: usize) -> usize {
        dim.checked_add(1)
            .and_then(|l| self.levels.get(l))
            .map_or(0, |level| level.len())
    }

    /// Iterate over all `p`-simplices in stable index order.
    pub fn simplices(&self, p: isize) -> SimplexIter<'_> {
        SimplexIter {
            complex: self,
            level: level_of(p).unwrap_or(usize::MAX),
            index: 0,
            len: self.chain_rank(p),
        }
    }

    /// Get a view of the `idx`-th simplex of dimension `p`, if it exists.
    pub fn get_simplex_by_index(&self, p: isize, idx: usize) -> Option<SimplexView<'_>> {
        let level = level_of(p)?;
        if idx >= self.chain_rank(p) {
            return None;
        }
        Some(SimplexView {
            complex: self,
            level,
            index: idx,
        })
    }

    /// Look up a simplex by its vertex sequence.
    ///
    /// The lookup follows the face trie from the empty simplex,
    /// so the vertices must be given in the same order
    /// as they appear in a maximal simplex.
    /// Returns `None` if the sequence is not a face of the complex.
    /// ```
    /// # use simplex_homology::complex::tiny_complex;
    /// let complex = tiny_complex();
    /// assert!(complex.get_simplex(&[0, 2, 3]).is_some());
    /// assert!(complex.get_simplex(&[0, 2, 4]).is_none());
    /// assert!(complex.get_simplex(&[3, 2]).is_none());
    /// ```
    pub fn get_simplex(&self, address: &[VertexLabel]) -> Option<SimplexView<'_>> {
        let index = self.resolve(address)?;
        Some(SimplexView {
            complex: self,
            level: address.len(),
            index,
        })
    }

    /// Follow trie edges from the root, returning the index of the simplex
    /// on level `address.len()`.
    #[inline]
    pub(crate) fn resolve(&self, address: &[VertexLabel]) -> Option<usize> {
        construction::resolve_in(&self.levels, address)
    }

    #[inline]
    fn level(&self, p: isize) -> Option<&[Simplex]> {
        level_of(p)
            .and_then(|l| self.levels.get(l))
            .map(|l| l.as_slice())
    }

    /// Assemble the boundary operator `∂_p: C_p → C_{p-1}` as a dense matrix.
    ///
    /// Columns correspond to `p`-simplices and rows to `(p-1)`-simplices,
    /// both in stable index order.
    /// An entry is 1 if the row simplex is a facet of the column simplex.
    ///
    /// If `p` is outside `0..=skeleton`, the chain group is zero
    /// and an empty 0×0 matrix is returned.
    /// For `p = 0` the single row corresponds to the empty simplex.
    pub fn get_boundary_matrix(&self, p: isize, skeleton: usize) -> Gf2Matrix {
        if !in_skeleton(p, skeleton) {
            return Gf2Matrix::zeros(0, 0);
        }
        let mut mat = Gf2Matrix::zeros(self.chain_rank(p - 1), self.chain_rank(p));
        for (col, simplex) in self.level(p).unwrap_or_default().iter().enumerate() {
            for &face in &simplex.faces {
                mat[(face, col)] = 1;
            }
        }
        log::trace!(
            "assembled {}x{} boundary matrix for p = {p}",
            mat.nrows(),
            mat.ncols()
        );
        mat
    }

    /// Assemble the same boundary operator as [`get_boundary_matrix`][Self::get_boundary_matrix]
    /// in compressed sparse row format.
    ///
    /// Boundary matrices are very sparse
    /// (a `p`-simplex has exactly `p + 1` facets),
    /// so this is the preferable form for storage and reporting.
    pub fn boundary_map(&self, p: isize, skeleton: usize) -> SparseGf2Matrix {
        if !in_skeleton(p, skeleton) {
            return SparseGf2Matrix::zeros(0, 0);
        }
        let mut coo = nas::CooMatrix::new(self.chain_rank(p - 1), self.chain_rank(p));
        for (col, simplex) in self.level(p).unwrap_or_default().iter().enumerate() {
            for &face in &simplex.faces {
                coo.push(face, col, 1);
            }
        }
        SparseGf2Matrix::from(&coo)
    }

    /// Dimension of the image of `∂_{p+1}`, i.e. the number of independent `p`-boundaries.
    ///
    /// Zero if `p < 0` or `p >= skeleton`,
    /// since there are no `(p+1)`-chains in the skeleton to take the boundary of.
    pub fn boundary_rank(&self, p: isize, skeleton: usize) -> usize {
        let skeleton = self.clamp_skeleton(skeleton);
        match usize::try_from(p) {
            Ok(dim) if dim < skeleton => {
                reduce_matrix(self.get_boundary_matrix(p + 1, skeleton)).rank
            }
            _ => 0,
        }
    }

    /// Dimension of the kernel of `∂_p`, i.e. the number of independent `p`-cycles.
    ///
    /// Every 0-chain counts as a cycle, so for `p = 0` this is simply the number of vertices.
    /// Zero if `p` is outside `0..=skeleton`.
    pub fn cycle_rank(&self, p: isize, skeleton: usize) -> usize {
        if p == 0 {
            return self.chain_rank(0);
        }
        let skeleton = self.clamp_skeleton(skeleton);
        if !in_skeleton(p, skeleton) {
            return 0;
        }
        reduce_matrix(self.get_boundary_matrix(p, skeleton)).nullity
    }

    /// The `p`-th Betti number of the `skeleton`-skeleton over GF(2),
    /// i.e. the number of independent `p`-dimensional holes.
    ///
    /// Note that `p = skeleton` counts cycles which would be filled in
    /// by simplices above the skeleton;
    /// e.g. the 2-skeleton of a filled tetrahedron is a hollow sphere.
    pub fn betti_number(&self, p: isize, skeleton: usize) -> usize {
        // im ∂_{p+1} is a subspace of ker ∂_p, so this never underflows
        let betti = self.cycle_rank(p, skeleton) - self.boundary_rank(p, skeleton);
        log::debug!("betti number {p} = {betti} (skeleton {skeleton})");
        betti
    }

    /// Betti numbers for every dimension `0..=skeleton`,
    /// stopping at the dimension of the complex
    /// since every Betti number above it is zero.
    pub fn betti_numbers(&self, skeleton: usize) -> Vec<usize> {
        (0..=skeleton.min(self.dimension))
            .map(|p| self.betti_number(p as isize, skeleton))
            .collect()
    }

    /// Every query gives the same result for any skeleton above the top dimension,
    /// so large values (e.g. `usize::MAX` for "no truncation") are cut down to size.
    #[inline]
    fn clamp_skeleton(&self, skeleton: usize) -> usize {
        skeleton.min(self.dimension + 1)
    }

    /// Euler characteristic of the `skeleton`-skeleton,
    /// the alternating sum of chain ranks over dimensions `0..=skeleton`.
    ///
    /// This equals the alternating sum of [`betti_numbers`][Self::betti_numbers],
    /// but doesn't require any matrix reduction.
    pub fn euler_characteristic(&self, skeleton: usize) -> i64 {
        (0..=skeleton.min(self.dimension))
            .map(|p| {
                let rank = self.simplex_count(p) as i64;
                if p % 2 == 0 {
                    rank
                } else {
                    -rank
                }
            })
            .sum()
    }
}

#[inline]
fn level_of(p: isize) -> Option<usize> {
    p.checked_add(1).and_then(|l| usize::try_from(l).ok())
}

#[inline]
fn in_skeleton(p: isize, skeleton: usize) -> bool {
    matches!(usize::try_from(p), Ok(dim) if dim <= skeleton)
}

/// Reject maximal simplices that would produce a degenerate face lattice.
fn validate_maximal_simplices(maximal_simplices: &[Vec<VertexLabel>]) -> Result<(), ComplexError> {
    if maximal_simplices.is_empty() {
        return Err(ComplexError::NoSimplices);
    }
    for (index, simplex) in maximal_simplices.iter().enumerate() {
        if simplex.is_empty() {
            return Err(ComplexError::EmptySimplex { index });
        }
        if let Some(&vertex) = simplex.iter().duplicates().next() {
            return Err(ComplexError::DuplicateVertex { index, vertex });
        }
    }
    Ok(())
}

/// A view into a single simplex's data.
#[derive(Clone, Copy, Debug)]
pub struct SimplexView<'a> {
    complex: &'a SimplicialComplex,
    level: usize,
    index: usize,
}

impl<'a> PartialEq for SimplexView<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.complex, other.complex)
            && self.level == other.level
            && self.index == other.index
    }
}
impl<'a> Eq for SimplexView<'a> {}

impl<'a> SimplexView<'a> {
    #[inline]
    fn data(&self) -> &'a Simplex {
        &self.complex.levels[self.level][self.index]
    }

    /// The vertex labels of this simplex, in order.
    #[inline]
    pub fn vertices(&self) -> &'a [VertexLabel] {
        &self.data().vertices
    }

    /// Dimension of the simplex, one less than its number of vertices.
    #[inline]
    pub fn dimension(&self) -> isize {
        self.level as isize - 1
    }

    /// Get the index of this simplex in the ordering of simplices of its dimension.
    /// This is also its row or column in boundary matrices.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Iterate over the facets of this simplex.
    pub fn faces(&self) -> impl 'a + Iterator<Item = SimplexView<'a>> {
        let complex = self.complex;
        let level = self.level.wrapping_sub(1);
        self.data().faces.iter().map(move |&index| SimplexView {
            complex,
            level,
            index,
        })
    }

    /// Iterate over the simplices this is a facet of.
    pub fn cofaces(&self) -> impl 'a + Iterator<Item = SimplexView<'a>> {
        let complex = self.complex;
        let level = self.level + 1;
        self.data().cofaces.iter().map(move |&index| SimplexView {
            complex,
            level,
            index,
        })
    }

    /// A human-readable label for the simplex, e.g. `[0, 2, 3]`.
    pub fn label(&self) -> String {
        format!("[{}]", self.vertices().iter().join(", "))
    }
}

impl<'a> std::fmt::Display for SimplexView<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Iterator over the simplices of one dimension in a complex.
#[derive(Clone, Debug)]
pub struct SimplexIter<'a> {
    complex: &'a SimplicialComplex,
    level: usize,
    index: usize,
    len: usize,
}

impl<'a> Iterator for SimplexIter<'a> {
    type Item = SimplexView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let view = SimplexView {
            complex: self.complex,
            level: self.level,
            index: self.index,
        };
        self.index += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for SimplexIter<'a> {}
