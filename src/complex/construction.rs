use itertools::Itertools;

use super::{Simplex, SimplicialComplex, VertexLabel};

/// Construct a complex from validated maximal simplices.
///
/// Every maximal simplex is inserted into a face trie rooted at the empty simplex,
/// producing one simplex per distinct order-preserving subsequence.
/// Facet relations are then resolved level by level.
pub fn build_complex(maximal_simplices: Vec<Vec<VertexLabel>>) -> SimplicialComplex {
    let dimension = maximal_simplices
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
        .saturating_sub(1);

    // one level per dimension from -1 up to the top,
    // with the empty simplex as the root on level 0
    let mut levels: Vec<Vec<Simplex>> = vec![Vec::new(); dimension + 2];
    levels[0].push(Simplex::default());

    for simplex in &maximal_simplices {
        log::trace!("inserting maximal simplex {simplex:?}");
        insert_subsequences(&mut levels, 0, 0, simplex);
    }

    resolve_adjacency(&mut levels);

    log::debug!(
        "built a {dimension}-dimensional complex from {} maximal simplices, simplex counts [{}]",
        maximal_simplices.len(),
        levels.iter().skip(1).map(|l| l.len()).join(", ")
    );

    SimplicialComplex {
        maximal_simplices,
        levels,
        dimension,
    }
}

/// Insert every order-preserving subsequence of `vertices`
/// below the trie node at (`level`, `node`).
///
/// At each step, every remaining vertex is tried as the next one,
/// followed by the vertices after it,
/// so the whole power set is generated rather than just the facets.
fn insert_subsequences(
    levels: &mut [Vec<Simplex>],
    level: usize,
    node: usize,
    vertices: &[VertexLabel],
) {
    for (i, &vertex) in vertices.iter().enumerate() {
        let child = get_or_create_child(levels, level, node, vertex);
        insert_subsequences(levels, level + 1, child, &vertices[i + 1..]);
    }
}

/// Get the child of a trie node along the edge for `vertex`,
/// creating it if it doesn't exist yet.
///
/// A newly created child gets the next stable index on its level,
/// and its trie parent is recorded as its first facet.
fn get_or_create_child(
    levels: &mut [Vec<Simplex>],
    level: usize,
    node: usize,
    vertex: VertexLabel,
) -> usize {
    if let Some(child) = levels[level][node].child(vertex) {
        return child;
    }

    let (lower, upper) = levels.split_at_mut(level + 1);
    let parent = &mut lower[level][node];
    let child_level = &mut upper[0];
    let child_idx = child_level.len();

    let mut child_vertices = Vec::with_capacity(parent.vertices.len() + 1);
    child_vertices.extend_from_slice(&parent.vertices);
    child_vertices.push(vertex);

    child_level.push(Simplex {
        vertices: child_vertices,
        parent: Some(node),
        children: Vec::new(),
        faces: vec![node],
        cofaces: Vec::new(),
    });
    parent.children.push((vertex, child_idx));
    parent.cofaces.push(child_idx);

    child_idx
}

/// Link every simplex to all of its facets, not just its trie parent.
///
/// A facet is reached from the root by omitting one vertex,
/// which generally leads down a different trie path than the simplex itself,
/// so these links can't be recorded during insertion.
fn resolve_adjacency(levels: &mut [Vec<Simplex>]) {
    // vertices only have the root as a facet, which is already their parent
    for level in 2..levels.len() {
        // buffer to hold the facet currently being resolved
        let mut candidate: Vec<VertexLabel> = Vec::with_capacity(level - 1);

        for simplex_idx in 0..levels[level].len() {
            let simplex = &levels[level][simplex_idx];
            let mut new_faces: Vec<usize> = Vec::with_capacity(level - 1);
            for omit in 0..simplex.vertices.len() {
                candidate.clear();
                candidate.extend(
                    simplex
                        .vertices
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != omit)
                        .map(|(_, v)| *v),
                );
                let face = resolve_in(levels, &candidate).unwrap_or_else(|| {
                    panic!(
                        "Facet {candidate:?} of simplex {:?} missing from the face trie. \
                        This is a bug in simplex-homology",
                        simplex.vertices
                    )
                });
                if Some(face) != simplex.parent {
                    new_faces.push(face);
                }
            }

            for face in new_faces {
                add_face_coface(levels, level, face, simplex_idx);
            }
        }
    }
}

/// Look up a vertex sequence in the face trie,
/// returning its index on level `address.len()`.
pub(super) fn resolve_in(levels: &[Vec<Simplex>], address: &[VertexLabel]) -> Option<usize> {
    let mut index = 0;
    for (level, &vertex) in address.iter().enumerate() {
        index = levels.get(level)?[index].child(vertex)?;
    }
    Some(index)
}

/// Record a facet relation between `coface` on `level` and `face` on the level below.
/// Does nothing if the relation already exists.
fn add_face_coface(levels: &mut [Vec<Simplex>], level: usize, face: usize, coface: usize) {
    let (lower, upper) = levels.split_at_mut(level);
    let face_simplex = &mut lower[level - 1][face];
    let coface_simplex = &mut upper[0][coface];
    if coface_simplex.faces.contains(&face) {
        return;
    }
    coface_simplex.faces.push(face);
    face_simplex.cofaces.push(coface);
}

/// A small complex used in tests:
/// a filled tetrahedron `[0, 1, 2, 3]` plus the edges `[0, 4]` and `[2, 4]`.
///
/// The edges `[0, 2]`, `[0, 4]` and `[2, 4]` form a loop
/// that isn't filled in by any triangle.
pub fn tiny_complex() -> SimplicialComplex {
    let maximal_simplices = vec![vec![0, 1, 2, 3], vec![0, 4], vec![2, 4]];
    SimplicialComplex::new(maximal_simplices).expect("tiny_complex input is valid")
}
