//! Rank computation for matrices over GF(2).
//!
//! The reduction moves a nonzero pivot onto each successive diagonal position
//! by swapping rows and columns,
//! then clears the rest of the pivot's row and column with XOR,
//! which is both addition and subtraction in GF(2).
//! The number of pivots found is the rank of the matrix.

use crate::Gf2Matrix;

/// Result of reducing a matrix with [`reduce_matrix`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The reduced matrix.
    /// It has the same shape as the original
    /// with ones on the first `rank` diagonal entries
    /// and zeros everywhere else.
    pub matrix: Gf2Matrix,
    /// The rank of the matrix, i.e. the number of pivots found.
    pub rank: usize,
    /// Dimension of the kernel of the matrix acting on column vectors,
    /// i.e. the number of columns minus the rank.
    pub nullity: usize,
}

/// Reduce a matrix over GF(2) to diagonal form and compute its rank and nullity.
///
/// Entries are taken modulo 2.
/// Pivots are searched in row-major order starting from each diagonal position,
/// so the sequence of row and column swaps is deterministic.
///
/// A matrix with no entries has rank and nullity 0
/// (even if it has columns but no rows, or vice versa).
/// ```
/// # use simplex_homology::{reduce_matrix, Gf2Matrix};
/// #[rustfmt::skip]
/// let mat = Gf2Matrix::from_row_slice(3, 3, &[
///     1, 1, 0,
///     0, 1, 1,
///     1, 0, 1,
/// ]);
/// let red = reduce_matrix(mat);
/// assert_eq!(red.rank, 2);
/// assert_eq!(red.nullity, 1);
/// ```
pub fn reduce_matrix(mut matrix: Gf2Matrix) -> Reduction {
    if matrix.is_empty() {
        return Reduction {
            matrix,
            rank: 0,
            nullity: 0,
        };
    }
    matrix.apply(|e| *e &= 1);

    let (rows, cols) = matrix.shape();
    let mut rank = 0;
    // `rank` is also the diagonal position being filled
    while let Some((pivot_row, pivot_col)) = find_pivot(&matrix, rank) {
        let x = rank;
        matrix.swap_rows(x, pivot_row);
        matrix.swap_columns(x, pivot_col);

        for row in x + 1..rows {
            if matrix[(row, x)] == 1 {
                for col in x..cols {
                    let pivot_entry = matrix[(x, col)];
                    matrix[(row, col)] ^= pivot_entry;
                }
            }
        }
        // after the row pass the pivot is the only nonzero in column `x`,
        // so clearing row `x` only touches row `x` itself
        for col in x + 1..cols {
            if matrix[(x, col)] == 1 {
                for row in x..rows {
                    let pivot_entry = matrix[(row, x)];
                    matrix[(row, col)] ^= pivot_entry;
                }
            }
        }

        rank += 1;
    }

    log::trace!("reduced a {rows}x{cols} matrix to rank {rank}");

    Reduction {
        matrix,
        rank,
        nullity: cols - rank,
    }
}

/// Find the first nonzero entry in the submatrix below and right of `(x, x)`,
/// scanning row by row.
fn find_pivot(matrix: &Gf2Matrix, x: usize) -> Option<(usize, usize)> {
    let (rows, cols) = matrix.shape();
    if x >= rows || x >= cols {
        return None;
    }
    (x..rows).find_map(|row| {
        (x..cols)
            .find(|&col| matrix[(row, col)] == 1)
            .map(|col| (row, col))
    })
}
