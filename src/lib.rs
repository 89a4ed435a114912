//! Rolling-row sequence engines.
//!
//! Three independent algorithmic cores over in-memory byte sequences,
//! sharing one discipline: never materialize the full DP table or graph
//! bookkeeping that a textbook formulation implies. One or two score
//! rows (plus a handful of scalar caches) or an id-indexed arena is all
//! that is ever live.
//!
//! ## Engines
//! - [`LcsEngine`]: longest common subsequence in O(n·m) time and
//!   O(min(n, m)) space via Hirschberg's divide-and-conquer.
//! - [`AlignmentEngine`]: affine-gap global alignment score (Gotoh's
//!   three coupled matrices, double-buffered into rolling rows).
//! - [`ReconstructionEngine`]: rebuilds a string from overlapping
//!   k-mer fragments via an Eulerian path over a de Bruijn graph.
//!
//! ## Quick start
//! ```
//! use seq_engines::{AlignmentEngine, LcsEngine, ReconstructionEngine};
//!
//! let mut lcs = LcsEngine::new();
//! assert_eq!(lcs.lcs(b"ACCG", b"ACGC"), b"ACG");
//!
//! let mut align = AlignmentEngine::default();
//! assert_eq!(align.score(b"ACGT", b"ACGT"), 12);
//!
//! let mut glue = ReconstructionEngine::new();
//! let pieces = [b"TAAG", b"AAGC", b"AGCA", b"GCAT"];
//! assert_eq!(glue.reconstruct(&pieces).unwrap(), b"TAAGCAT");
//! ```
//!
//! ## Scratch reuse
//! Engines hold their working buffers across calls and reset them on
//! entry, so a long-lived engine instance amortizes allocation to zero
//! without any state leaking between invocations. Pooling is opt-out
//! via [`LcsEngineBuilder`].
//!
//! ## Features
//! - `parallel`: the two independent halves of a Hirschberg split run
//!   under `rayon::join`. Output is byte-identical to serial execution.
//! - `tracing`: spans around engine entry points and the recursion.

pub mod builder;
pub mod engines;
pub mod scratch;
pub mod utils;

pub use crate::builder::{AlignmentEngineBuilder, LcsEngineBuilder};
pub use crate::engines::alignment::{AffineScoring, AlignmentEngine};
pub use crate::engines::lcs::LcsEngine;
pub use crate::engines::reconstruct::{ReconstructionEngine, ReconstructionError};
