use crate::bitset::Bitset;

/// An immutable descriptor of one graph vertex, built once at construction
/// and never mutated during search.
///
/// Owns its adjacency bitset (with its own bit set, the reflexive
/// convention the search relies on: after a vertex is selected, exactly one
/// bit remains set in its part). Candidates carry an index into the
/// template vector (see [`crate::weighted::Candidate`]) rather than a
/// borrowed pointer to one of these.
pub(crate) struct VertexTemplate {
    pub(crate) adjacency: Bitset,
    pub(crate) part: usize,
    pub(crate) index: usize,
}

impl VertexTemplate {
    pub(crate) fn new(row: &[bool], n_vertices: usize, part: usize, index: usize) -> Self {
        let mut adjacency = Bitset::new(n_vertices, false);
        for (u, &adjacent) in row.iter().enumerate() {
            if adjacent {
                adjacency.set(u);
            }
        }
        // Reflexive: a vertex is always adjacent to itself, so that once it
        // is selected, its own part's active-vertex count drops to exactly one.
        adjacency.set(index);
        VertexTemplate {
            adjacency,
            part,
            index,
        }
    }
}
