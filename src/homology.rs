//! Summaries of the homology of a complex across several dimensions,
//! for reporting and diagnostics.

use itertools::Itertools;

use crate::{reduction::reduce_matrix, Gf2Matrix, SimplicialComplex};

/// Homology data of a complex for dimensions `0..=max_dim`.
///
/// Construct with [`SimplicialComplex::homology_report`].
/// The `Display` implementation prints each dimension's boundary matrix,
/// its reduced form, and the Betti number.
#[derive(Clone, Debug)]
pub struct HomologyReport {
    /// The skeleton the complex was truncated to.
    pub skeleton: usize,
    /// One entry per dimension, starting from 0.
    pub dimensions: Vec<DimensionReport>,
}

/// Homology data for a single dimension `p`.
#[derive(Clone, Debug)]
pub struct DimensionReport {
    /// The dimension `p`.
    pub dimension: usize,
    /// The `p`-th Betti number.
    pub betti: usize,
    /// The boundary operator `∂_p`.
    pub boundary: Gf2Matrix,
    /// `∂_p` reduced to diagonal form.
    pub reduced: Gf2Matrix,
    /// Rank of `∂_p`.
    pub rank: usize,
    /// Nullity of `∂_p`.
    pub nullity: usize,
}

impl HomologyReport {
    /// Betti numbers of every dimension in the report.
    pub fn betti_numbers(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.betti).collect()
    }
}

impl SimplicialComplex {
    /// Compute boundary matrices, their reductions, and Betti numbers
    /// for every dimension in `0..=max_dim`.
    ///
    /// `max_dim` may exceed `skeleton`,
    /// in which case the extra dimensions have empty matrices and zero Betti numbers.
    pub fn homology_report(&self, max_dim: usize, skeleton: usize) -> HomologyReport {
        let dimensions = (0..=max_dim)
            .map(|dimension| {
                let p = isize::try_from(dimension).unwrap_or(isize::MAX);
                let boundary = self.get_boundary_matrix(p, skeleton);
                let red = reduce_matrix(boundary.clone());
                DimensionReport {
                    dimension,
                    betti: self.betti_number(p, skeleton),
                    boundary,
                    reduced: red.matrix,
                    rank: red.rank,
                    nullity: red.nullity,
                }
            })
            .collect();
        HomologyReport {
            skeleton,
            dimensions,
        }
    }
}

impl std::fmt::Display for HomologyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for dim in &self.dimensions {
            let p = dim.dimension;
            writeln!(f, "Boundary matrix of dimension {p}")?;
            write_matrix(f, &dim.boundary)?;
            writeln!(f, "Reduced boundary matrix of dimension {p}")?;
            write_matrix(f, &dim.reduced)?;
            writeln!(f, "Betti number {p} = {}", dim.betti)?;
            writeln!(f, "--------------------------")?;
        }
        Ok(())
    }
}

/// Write a 0/1 matrix one row per line, or `[]` if it has no entries.
fn write_matrix(f: &mut std::fmt::Formatter<'_>, mat: &Gf2Matrix) -> std::fmt::Result {
    if mat.is_empty() {
        return writeln!(f, "[]");
    }
    for row in mat.row_iter() {
        writeln!(f, "[{}]", row.iter().join(" "))?;
    }
    Ok(())
}
