//! Simplicial homology over the two-element field GF(2).
//!
//! A [`SimplicialComplex`] is built once from a list of maximal simplices,
//! each an ordered sequence of small integer vertex labels.
//! Every order-preserving subsequence of a maximal simplex becomes a face of the complex,
//! and boundary operators between adjacent dimensions
//! can then be assembled as 0/1 matrices and reduced
//! to obtain Betti numbers.
//!
//! ```
//! # use simplex_homology::SimplicialComplex;
//! // a filled tetrahedron with two extra edges closing a loop through vertex 4
//! let complex = SimplicialComplex::new(vec![vec![0, 1, 2, 3], vec![0, 4], vec![2, 4]])?;
//! assert_eq!(complex.chain_rank(0), 5);
//! assert_eq!(complex.betti_number(0, 3), 1);
//! assert_eq!(complex.betti_number(1, 3), 1);
//! assert_eq!(complex.betti_number(2, 3), 0);
//! # Ok::<(), simplex_homology::ComplexError>(())
//! ```
//!
//! The skeleton parameter accepted by most queries truncates the complex
//! to simplices of dimension at most `skeleton`.
//! Chain groups outside `0..=skeleton` are treated as zero,
//! so out-of-range queries return empty matrices and zero ranks rather than errors.
//!
//! Computation cost grows exponentially with the size of the largest maximal simplex
//! (every subset becomes a face) and polynomially with the number of simplices
//! (dense matrix reduction). Bounding both is up to the caller.

#![warn(missing_docs)]

pub mod complex;
#[doc(inline)]
pub use complex::{ComplexError, SimplexIter, SimplexView, SimplicialComplex, VertexLabel};

pub mod reduction;
#[doc(inline)]
pub use reduction::{reduce_matrix, Reduction};

pub mod homology;
#[doc(inline)]
pub use homology::{DimensionReport, HomologyReport};

pub mod labeling;
#[doc(inline)]
pub use labeling::{add_uncovered_edges, VertexLabels};

// nalgebra re-exports of the matrix types used in the public API

pub use nalgebra as na;
pub use nalgebra_sparse as nas;
/// Dense matrix over GF(2), with every entry either 0 or 1.
pub type Gf2Matrix = na::DMatrix<u8>;
/// Sparse matrix over GF(2) in compressed row format.
pub type SparseGf2Matrix = nas::CsrMatrix<u8>;
