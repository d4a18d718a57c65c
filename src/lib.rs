//! Enumerates k-cliques in a k-partite graph using two bitset-backed
//! backtracking strategies.
//!
//! A k-partite graph partitions its vertices into k disjoint, non-empty
//! parts with edges running only between parts. A k-clique of such a graph
//! contains exactly one vertex per part. [`KPartiteKClique`] and
//! [`FindClique`] both enumerate these cliques one at a time, on demand,
//! via [`KCliqueEngine::next`] or the standard [`Iterator`] they implement:
//!
//! ```
//! use kpartite_kclique::{FindClique, KCliqueEngine};
//!
//! // Three size-2 parts {0,1}, {2,3}, {4,5}; the only edges are 0-2, 0-4,
//! // 2-4, so 1/3/5 are unused padding and (0, 2, 4) is the one triangle.
//! let mut incidences = vec![vec![false; 6]; 6];
//! for &(u, v) in &[(0usize, 2usize), (0, 4), (2, 4)] {
//!     incidences[u][v] = true;
//!     incidences[v][u] = true;
//! }
//! let parts = [0, 2, 4];
//!
//! let mut engine = FindClique::new(&incidences, 6, &parts, 5).unwrap();
//! assert!(engine.next().unwrap());
//! assert_eq!(engine.k_clique(), &[0, 2, 4]);
//! assert_eq!(engine.next().unwrap(), false);
//! ```
//!
//! The two strategies differ only in their vertex-selection heuristic:
//! [`KPartiteKClique`] always branches on the most-constrained candidate
//! vertex (and additionally rejects non-k-partite input at construction);
//! [`FindClique`] always branches on the smallest remaining part, and does
//! not validate k-partiteness. Both produce the same *set* of cliques for
//! the same input, but generally in a different order, since they branch on
//! different criteria.

mod bitset;
pub mod cancel;
mod error;
mod first_fit;
mod shared;
mod vertex;
mod weighted;

pub use cancel::request_interrupt;
pub use error::KCliqueError;
pub use first_fit::FindClique;
pub use weighted::KPartiteKClique;

/// The external surface shared by both search strategies.
pub trait KCliqueEngine {
    /// Advances to the next clique.
    ///
    /// Returns `Ok(true)` with [`KCliqueEngine::k_clique`] populated,
    /// `Ok(false)` once the search is exhausted (and on every call after
    /// that), or `Err(KCliqueError::Cancelled)` if the ambient interrupt
    /// flag (see [`cancel`]) was observed. Once cancelled, the engine must
    /// not be used again.
    fn next(&mut self) -> Result<bool, KCliqueError>;

    /// The most recently found clique, one vertex index per part.
    ///
    /// Only meaningful immediately after a call to
    /// [`KCliqueEngine::next`] that returned `Ok(true)`.
    fn k_clique(&self) -> &[usize];
}
