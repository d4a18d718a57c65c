use crate::error::KCliqueError;
use crate::vertex::VertexTemplate;

/// The immutable, strategy-independent part of the problem: vertex count,
/// part boundaries, per-vertex templates, and the precision-depth knob.
///
/// Built once by [`crate::KPartiteKClique::new`] / [`crate::FindClique::new`]
/// through [`Shared::build`], then held for the lifetime of the search.
pub(crate) struct Shared {
    pub(crate) n_vertices: usize,
    pub(crate) k: usize,
    /// Length `k + 1`, `parts[0] == 0`, `parts[k] == n_vertices`, strictly increasing.
    pub(crate) parts: Vec<usize>,
    pub(crate) templates: Vec<VertexTemplate>,
    pub(crate) prec_depth: usize,
}

impl Shared {
    /// Validates the construction contract common to both strategies and
    /// builds one [`VertexTemplate`] per vertex. Does *not* check
    /// k-partiteness — that check is strategy-A-only (see
    /// `KPartiteKClique::new`).
    pub(crate) fn build(
        incidences: &[Vec<bool>],
        n_vertices: usize,
        first_per_part: &[usize],
        prec_depth: usize,
    ) -> Result<Shared, KCliqueError> {
        let k = first_per_part.len();
        if k == 0 {
            return Err(KCliqueError::InvalidArgument("k must be at least 1"));
        }
        if n_vertices == 0 {
            return Err(KCliqueError::InvalidArgument("n_vertices must be positive"));
        }
        if first_per_part[0] != 0 {
            return Err(KCliqueError::InvalidArgument(
                "first_per_part[0] must be 0",
            ));
        }

        let mut parts = Vec::with_capacity(k + 1);
        parts.extend_from_slice(first_per_part);
        parts.push(n_vertices);
        for i in 0..k {
            if parts[i + 1] <= parts[i] {
                return Err(KCliqueError::InvalidArgument(
                    "parts must be strictly increasing and non-empty",
                ));
            }
        }

        if incidences.len() != n_vertices {
            return Err(KCliqueError::InvalidArgument(
                "incidences must have exactly n_vertices rows",
            ));
        }

        let mut templates = Vec::with_capacity(n_vertices);
        let mut current_part = 0;
        for (v, row) in incidences.iter().enumerate() {
            while current_part < k - 1 && v >= parts[current_part + 1] {
                current_part += 1;
            }
            templates.push(VertexTemplate::new(row, n_vertices, current_part, v));
        }

        Ok(Shared {
            n_vertices,
            k,
            parts,
            templates,
            prec_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_incidences(n: usize) -> Vec<Vec<bool>> {
        vec![vec![false; n]; n]
    }

    #[test]
    fn rejects_zero_parts() {
        let err = Shared::build(&empty_incidences(1), 1, &[], 5).unwrap_err();
        assert_eq!(err, KCliqueError::InvalidArgument("k must be at least 1"));
    }

    #[test]
    fn rejects_non_increasing_parts() {
        let err = Shared::build(&empty_incidences(4), 4, &[0, 2, 2], 5).unwrap_err();
        assert!(matches!(err, KCliqueError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_first_part_not_starting_at_zero() {
        let err = Shared::build(&empty_incidences(4), 4, &[1, 2], 5).unwrap_err();
        assert!(matches!(err, KCliqueError::InvalidArgument(_)));
    }

    #[test]
    fn assigns_parts_by_boundary() {
        let shared = Shared::build(&empty_incidences(6), 6, &[0, 2, 4], 5).unwrap();
        assert_eq!(shared.k, 3);
        let parts: Vec<usize> = shared.templates.iter().map(|t| t.part).collect();
        assert_eq!(parts, vec![0, 0, 1, 1, 2, 2]);
    }
}
