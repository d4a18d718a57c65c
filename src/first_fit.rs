//! Strategy B: smallest-part, first-fit branching.
//!
//! No per-vertex candidate list is kept; at each depth, the part with the
//! fewest active vertices is chosen and its first active vertex is branched
//! on. Parts that shrink to size one are forced choices, discovered eagerly
//! both at construction (trivial parts) and during search.

use crate::bitset::Bitset;
use crate::cancel::check_interrupt;
use crate::error::KCliqueError;
use crate::shared::Shared;
use crate::KCliqueEngine;

/// Sentinel: some part of this subgraph is empty; the branch is dead.
const DEAD: isize = -2;
/// Sentinel: every part is already pinned to size one; no choice remains.
const FINISHED: isize = -1;

struct FirstFitSubgraph {
    active_vertices: Bitset,
    part_sizes: Vec<usize>,
    selected_part: isize,
}

impl FirstFitSubgraph {
    fn new(shared: &Shared, fill: bool) -> Self {
        let part_sizes = (0..shared.k)
            .map(|i| shared.parts[i + 1] - shared.parts[i])
            .collect();
        FirstFitSubgraph {
            active_vertices: Bitset::new(shared.n_vertices, fill),
            part_sizes,
            selected_part: FINISHED,
        }
    }

    fn is_valid(&self) -> bool {
        self.selected_part >= 0
    }

    fn first_in_part(&self, shared: &Shared, part: usize) -> Option<usize> {
        let start = shared.parts[part];
        let stop = shared.parts[part + 1];
        let found = self.active_vertices.first(start);
        if found < stop {
            Some(found)
        } else {
            None
        }
    }
}

/// Recounts every part not already pinned to size one; short-circuits on
/// the first empty (dead) or singleton (forced) part found, otherwise
/// tracks the running minimum.
fn set_part_sizes(shared: &Shared, subgraph: &mut FirstFitSubgraph) -> bool {
    let mut min_so_far = shared.n_vertices;
    subgraph.selected_part = FINISHED;
    for part in 0..shared.k {
        if subgraph.part_sizes[part] == 1 {
            continue;
        }
        let count = subgraph
            .active_vertices
            .count(shared.parts[part], shared.parts[part + 1]);
        subgraph.part_sizes[part] = count;
        if count == 0 {
            subgraph.selected_part = DEAD;
            return false;
        }
        if count == 1 {
            subgraph.selected_part = part as isize;
            return true;
        }
        if count < min_so_far {
            min_so_far = count;
            subgraph.selected_part = part as isize;
        }
    }
    true
}

/// Enumerates k-cliques in a k-partite graph by always branching on the
/// smallest remaining part. Does not validate k-partiteness; an input with
/// edges inside a part is accepted, and may simply yield fewer (or
/// differently shaped) cliques than expected.
pub struct FindClique {
    shared: Shared,
    subgraphs: Vec<FirstFitSubgraph>,
    k_clique: Vec<usize>,
    current_depth: usize,
    n_trivial_parts: usize,
    exhausted: bool,
    cancelled: bool,
    nodes_explored: usize,
}

impl FindClique {
    /// Default precision depth. `FindClique` never recomputes weights, so
    /// this knob has no effect on its own search quality; it is accepted
    /// (and stored on [`Shared`]) purely so both engines share one
    /// constructor signature.
    pub const DEFAULT_PREC_DEPTH: usize = 5;

    pub fn new(
        incidences: &[Vec<bool>],
        n_vertices: usize,
        first_per_part: &[usize],
        prec_depth: usize,
    ) -> Result<Self, KCliqueError> {
        let shared = Shared::build(incidences, n_vertices, first_per_part, prec_depth)?;
        let k = shared.k;

        let mut subgraphs = Vec::with_capacity(k);
        for depth in 0..k {
            subgraphs.push(FirstFitSubgraph::new(&shared, depth == 0));
        }

        let mut k_clique = vec![0; k];
        let mut n_trivial_parts = 0;
        let mut dead = false;

        for part in 0..k {
            if shared.parts[part + 1] - shared.parts[part] == 1 {
                let lone_vertex = shared.parts[part];
                let adjacency = &shared.templates[lone_vertex].adjacency;
                subgraphs[0].active_vertices.intersect_with(adjacency);
                n_trivial_parts += 1;
                k_clique[part] = lone_vertex;

                if !subgraphs[0].active_vertices.has(lone_vertex) {
                    // A previously selected trivial vertex isn't connected
                    // to this one: the cascade itself is unsatisfiable.
                    dead = true;
                    break;
                }
            }
        }

        if dead {
            subgraphs[0].selected_part = DEAD;
            n_trivial_parts = k;
        } else if !set_part_sizes(&shared, &mut subgraphs[0]) {
            n_trivial_parts = k;
        }

        Ok(FindClique {
            k_clique,
            shared,
            subgraphs,
            current_depth: 0,
            n_trivial_parts,
            exhausted: false,
            cancelled: false,
            nodes_explored: 0,
        })
    }

    /// Number of `select()` descents attempted so far.
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    fn select(&mut self) -> bool {
        self.nodes_explored += 1;
        let selected_part = self.subgraphs[self.current_depth].selected_part;
        debug_assert!(selected_part >= 0);
        let selected_part = selected_part as usize;

        if self.subgraphs[self.current_depth].part_sizes[selected_part] == 0 {
            return false;
        }

        let Some(v) = self.subgraphs[self.current_depth].first_in_part(&self.shared, selected_part) else {
            return false;
        };

        let (current_slice, next_slice) = self.subgraphs.split_at_mut(self.current_depth + 1);
        let current = &mut current_slice[self.current_depth];
        let next = &mut next_slice[0];

        next.part_sizes.copy_from_slice(&current.part_sizes);
        next.part_sizes[selected_part] = 1;

        next.active_vertices
            .intersection_assign(&self.shared.templates[v].adjacency, &current.active_vertices);

        current.active_vertices.unset(v);
        current.part_sizes[selected_part] -= 1;

        self.k_clique[selected_part] = v;
        self.current_depth += 1;

        set_part_sizes(&self.shared, next)
    }

    fn backtrack(&mut self) -> bool {
        while self.current_depth >= 1 {
            self.current_depth -= 1;
            if self.subgraphs[self.current_depth].is_valid() {
                return true;
            }
        }
        false
    }

    fn success_depth(&self) -> usize {
        self.shared.k - 1 - self.n_trivial_parts
    }
}

impl FindClique {
    /// Advances to the next clique. An inherent method, not just the
    /// [`KCliqueEngine`] trait method: this type also implements
    /// [`Iterator`], and inherent methods take priority over trait methods
    /// in method-call syntax, so `engine.next()` always means this
    /// boolean-returning form, never `Iterator::next`.
    pub fn next(&mut self) -> Result<bool, KCliqueError> {
        if self.exhausted {
            return Ok(false);
        }
        if self.cancelled {
            return Err(KCliqueError::Cancelled);
        }

        if self.n_trivial_parts == self.shared.k {
            // Every part was trivial (or the forced cascade died). There is
            // at most one candidate clique, already fully written to
            // `k_clique` by construction.
            if self.subgraphs[0].selected_part == DEAD {
                self.exhausted = true;
                return Ok(false);
            }
            self.subgraphs[0].selected_part = DEAD;
            return Ok(true);
        }

        let success_depth = self.success_depth();
        loop {
            if check_interrupt().is_err() {
                self.cancelled = true;
                return Err(KCliqueError::Cancelled);
            }

            if self.subgraphs[self.current_depth].selected_part == DEAD
                || (self.current_depth < success_depth && !self.select())
            {
                if !self.backtrack() {
                    self.exhausted = true;
                    return Ok(false);
                }
            } else if self.current_depth == success_depth {
                let selected_part = self.subgraphs[self.current_depth].selected_part as usize;
                let emitted = if self.subgraphs[self.current_depth].part_sizes[selected_part] > 0 {
                    self.subgraphs[self.current_depth].first_in_part(&self.shared, selected_part)
                } else {
                    None
                };
                match emitted {
                    Some(v) => {
                        self.k_clique[selected_part] = v;
                        self.subgraphs[self.current_depth].active_vertices.unset(v);
                        self.subgraphs[self.current_depth].part_sizes[selected_part] -= 1;
                        return Ok(true);
                    }
                    None => {
                        if !self.backtrack() {
                            self.exhausted = true;
                            return Ok(false);
                        }
                    }
                }
            }
        }
    }

    /// The most recently found clique. See [`KCliqueEngine::k_clique`].
    pub fn k_clique(&self) -> &[usize] {
        &self.k_clique
    }
}

impl KCliqueEngine for FindClique {
    fn next(&mut self) -> Result<bool, KCliqueError> {
        FindClique::next(self)
    }

    fn k_clique(&self) -> &[usize] {
        FindClique::k_clique(self)
    }
}

impl Iterator for FindClique {
    type Item = Result<Vec<usize>, KCliqueError>;

    fn next(&mut self) -> Option<Self::Item> {
        match FindClique::next(self) {
            Ok(true) => Some(Ok(self.k_clique.clone())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_trivial_parts_yield_single_clique() {
        let n = 3;
        let mut incidences = vec![vec![false; n]; n];
        for &(u, v) in &[(0usize, 1usize), (1, 2), (0, 2)] {
            incidences[u][v] = true;
            incidences[v][u] = true;
        }
        let parts = vec![0, 1, 2];
        let mut engine = FindClique::new(&incidences, n, &parts, 5).unwrap();
        assert!(engine.next().unwrap());
        assert_eq!(engine.k_clique(), &[0, 1, 2]);
        assert_eq!(engine.next().unwrap(), false);
        // Idempotent past exhaustion.
        assert_eq!(engine.next().unwrap(), false);
    }

    #[test]
    fn missing_edge_between_trivial_parts_yields_nothing() {
        let n = 3;
        let incidences = vec![vec![false; n]; n];
        let parts = vec![0, 1, 2];
        let mut engine = FindClique::new(&incidences, n, &parts, 5).unwrap();
        assert_eq!(engine.next().unwrap(), false);
    }

    #[test]
    fn sparse_triangle_yields_single_clique() {
        let n = 4;
        let mut incidences = vec![vec![false; n]; n];
        incidences[0][2] = true;
        incidences[2][0] = true;
        let parts = vec![0, 2];
        let mut engine = FindClique::new(&incidences, n, &parts, 5).unwrap();
        assert!(engine.next().unwrap());
        assert_eq!(engine.k_clique(), &[0, 2]);
        assert_eq!(engine.next().unwrap(), false);
    }

    #[test]
    fn accepts_within_part_edges_unlike_strategy_a() {
        let n = 4;
        let mut incidences = vec![vec![false; n]; n];
        // Edge within part 0 ({0,1}) - not k-partite, but FindClique does
        // not validate this.
        incidences[0][1] = true;
        incidences[1][0] = true;
        incidences[0][2] = true;
        incidences[2][0] = true;
        let parts = vec![0, 2];
        assert!(FindClique::new(&incidences, n, &parts, 5).is_ok());
    }
}
