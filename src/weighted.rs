//! Strategy A: weight-ordered obstruction search.
//!
//! At each depth, branch on the candidate vertex with the fewest available
//! neighbours (highest "obstruction"). Candidates are kept in a `Vec` sorted
//! descending by weight so the next pick is always a cheap `pop()`.

use crate::bitset::Bitset;
use crate::cancel::check_interrupt;
use crate::error::KCliqueError;
use crate::shared::Shared;
use crate::KCliqueEngine;

/// A candidate vertex at some depth: an index into `Shared::templates` plus
/// a recomputable weight. Replaces the original's borrowed-bitset-pointer
/// handle, which has no safe Rust equivalent without tying every candidate
/// to the template vector's lifetime.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    template_index: usize,
    weight: usize,
}

struct WeightedSubgraph {
    active_vertices: Bitset,
    part_sizes: Vec<usize>,
    vertices: Vec<Candidate>,
}

impl WeightedSubgraph {
    fn new(shared: &Shared, fill: bool) -> Self {
        let part_sizes = (0..shared.k)
            .map(|i| shared.parts[i + 1] - shared.parts[i])
            .collect();
        WeightedSubgraph {
            active_vertices: Bitset::new(shared.n_vertices, fill),
            part_sizes,
            vertices: Vec::with_capacity(shared.n_vertices),
        }
    }

    fn is_valid(&self) -> bool {
        self.part_sizes.iter().all(|&size| size > 0)
    }
}

/// `set_weight` needs the vertex's part, which lives on `Shared`, not on the
/// candidate itself; threaded through explicitly rather than caching it a
/// second time on `Candidate` (a single array lookup away already).
fn set_weight(shared: &Shared, depth: usize, active_vertices: &mut Bitset, candidate: &mut Candidate) -> bool {
    let template = &shared.templates[candidate.template_index];
    if !active_vertices.has(template.index) {
        candidate.weight = 0;
        return false;
    }
    if depth > shared.prec_depth {
        candidate.weight = 1;
        return false;
    }
    let mut counter = 0usize;
    for part in 0..shared.k {
        let c = template
            .adjacency
            .intersection_count(active_vertices, shared.parts[part], shared.parts[part + 1]);
        if c == 0 {
            candidate.weight = 0;
            active_vertices.unset(template.index);
            return true;
        }
        counter += c;
    }
    candidate.weight = counter;
    false
}

fn set_weights(shared: &Shared, depth: usize, active_vertices: &mut Bitset, vertices: &mut [Candidate]) -> bool {
    let mut new_knowledge = false;
    for candidate in vertices.iter_mut() {
        new_knowledge |= set_weight(shared, depth, active_vertices, candidate);
    }
    new_knowledge
}

fn sort_by_weight_desc(vertices: &mut [Candidate]) {
    vertices.sort_unstable_by(|a, b| b.weight.cmp(&a.weight));
}

/// Removes the last candidate from `vertices`, correcting `part_sizes` and
/// `active_vertices` to match: `part_sizes[part]` only ever tracks "active
/// candidates still in `vertices`", and a candidate can sit in `vertices`
/// with its bit already cleared (by `set_weight`'s `c_i==0` branch, or by
/// the bitset simply no longer containing it after an ancestor's
/// intersection) for a while before it is finally popped here. The `unset`
/// below is therefore sometimes a no-op, but the `part_sizes` decrement
/// must still happen exactly once, at pop time, regardless.
fn pop_last_vertex(shared: &Shared, subgraph: &mut WeightedSubgraph) -> Candidate {
    let v = subgraph.vertices.pop().expect("pop_last_vertex on empty vertex list");
    let template = &shared.templates[v.template_index];
    subgraph.active_vertices.unset(template.index);
    subgraph.part_sizes[template.part] -= 1;
    v
}

/// Strips exhausted (weight-0) candidates off the back, returning the last
/// viable one without popping it. Every stripped candidate goes through
/// `pop_last_vertex`, so `part_sizes` is restored to the true
/// `active_vertices` count by the time this returns (weight-0 candidates
/// are always sorted to the tail, so nothing in the middle is missed).
fn last_vertex(shared: &Shared, subgraph: &mut WeightedSubgraph) -> Option<Candidate> {
    while let Some(&last) = subgraph.vertices.last() {
        if last.weight == 0 {
            pop_last_vertex(shared, subgraph);
        } else {
            return Some(last);
        }
    }
    None
}

/// Enumerates k-cliques in a k-partite graph by always branching on the most
/// obstructed remaining candidate.
///
/// Rejects non-k-partite input at construction; for graphs that are merely
/// not known to be k-partite, use [`crate::FindClique`] instead.
pub struct KPartiteKClique {
    shared: Shared,
    subgraphs: Vec<WeightedSubgraph>,
    k_clique: Vec<usize>,
    current_depth: usize,
    exhausted: bool,
    cancelled: bool,
    nodes_explored: usize,
}

impl KPartiteKClique {
    /// Default precision depth, matching the original's tuned constant.
    pub const DEFAULT_PREC_DEPTH: usize = 5;

    pub fn new(
        incidences: &[Vec<bool>],
        n_vertices: usize,
        first_per_part: &[usize],
        prec_depth: usize,
    ) -> Result<Self, KCliqueError> {
        let shared = Shared::build(incidences, n_vertices, first_per_part, prec_depth)?;

        for template in &shared.templates {
            let own_part_count = template
                .adjacency
                .count(shared.parts[template.part], shared.parts[template.part + 1]);
            if own_part_count != 1 {
                return Err(KCliqueError::InvalidArgument(
                    "graph is not k-partite: a vertex has a neighbour within its own part",
                ));
            }
        }

        let k = shared.k;
        let mut subgraphs = Vec::with_capacity(k);
        for depth in 0..k {
            subgraphs.push(WeightedSubgraph::new(&shared, depth == 0));
        }

        subgraphs[0].vertices = (0..n_vertices)
            .map(|template_index| Candidate {
                template_index,
                weight: 0,
            })
            .collect();

        if set_weights(
            &shared,
            0,
            &mut subgraphs[0].active_vertices,
            &mut subgraphs[0].vertices,
        ) {
            set_weights(
                &shared,
                0,
                &mut subgraphs[0].active_vertices,
                &mut subgraphs[0].vertices,
            );
        }
        sort_by_weight_desc(&mut subgraphs[0].vertices);

        Ok(KPartiteKClique {
            k_clique: vec![0; k],
            shared,
            subgraphs,
            current_depth: 0,
            exhausted: false,
            cancelled: false,
            nodes_explored: 0,
        })
    }

    /// Number of `select()` descents attempted so far. Exposed for
    /// embedders who want visibility into search cost without pulling in a
    /// logging dependency.
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    fn select(&mut self) -> bool {
        self.nodes_explored += 1;
        let Some(v) = last_vertex(&self.shared, &mut self.subgraphs[self.current_depth]) else {
            return false;
        };

        let (current_slice, next_slice) = self.subgraphs.split_at_mut(self.current_depth + 1);
        let current = &mut current_slice[self.current_depth];
        let next = &mut next_slice[0];

        next.part_sizes.copy_from_slice(&current.part_sizes);

        let template = &self.shared.templates[v.template_index];
        let part = template.part;
        self.k_clique[part] = template.index;

        next.active_vertices
            .intersection_assign(&template.adjacency, &current.active_vertices);

        // Remove v from `current`: it is guaranteed to be `vertices.last()`
        // again, since `last_vertex` above only ever popped weight-0 entries.
        let popped = pop_last_vertex(&self.shared, current);
        debug_assert_eq!(popped.template_index, v.template_index);

        next.vertices.clear();
        next.vertices.extend_from_slice(&current.vertices);

        if current.part_sizes[part] == 1 {
            set_weights(
                &self.shared,
                self.current_depth,
                &mut current.active_vertices,
                &mut current.vertices,
            );
            sort_by_weight_desc(&mut current.vertices);
        } else if current.part_sizes[part] == 0 {
            current.vertices.clear();
        }

        self.current_depth += 1;

        let new_knowledge = set_weights(
            &self.shared,
            self.current_depth,
            &mut next.active_vertices,
            &mut next.vertices,
        );
        if self.current_depth < self.shared.prec_depth && new_knowledge {
            set_weights(
                &self.shared,
                self.current_depth,
                &mut next.active_vertices,
                &mut next.vertices,
            );
        }
        sort_by_weight_desc(&mut next.vertices);

        true
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
}

impl KPartiteKClique {
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

        let success_depth = self.shared.k - 1;
        loop {
            if check_interrupt().is_err() {
                self.cancelled = true;
                return Err(KCliqueError::Cancelled);
            }

            if self.current_depth < success_depth {
                if !self.select() && !self.backtrack() {
                    self.exhausted = true;
                    return Ok(false);
                }
            } else {
                match last_vertex(&self.shared, &mut self.subgraphs[self.current_depth]) {
                    None => {
                        if !self.backtrack() {
                            self.exhausted = true;
                            return Ok(false);
                        }
                    }
                    Some(v) => {
                        let template = &self.shared.templates[v.template_index];
                        self.k_clique[template.part] = template.index;
                        pop_last_vertex(&self.shared, &mut self.subgraphs[self.current_depth]);
                        return Ok(true);
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

impl KCliqueEngine for KPartiteKClique {
    fn next(&mut self) -> Result<bool, KCliqueError> {
        KPartiteKClique::next(self)
    }

    fn k_clique(&self) -> &[usize] {
        KPartiteKClique::k_clique(self)
    }
}

impl Iterator for KPartiteKClique {
    type Item = Result<Vec<usize>, KCliqueError>;

    fn next(&mut self) -> Option<Self::Item> {
        match KPartiteKClique::next(self) {
            Ok(true) => Some(Ok(self.k_clique.clone())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
