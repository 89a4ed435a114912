//! The three sequence engines.
//!
//! Independent of each other, unified only by technique: a rolling-row
//! dynamic program (or edge-consuming graph walk) over borrowed byte
//! slices, with scratch storage reused across invocations.
//!
//! - [`lcs`]         : longest common subsequence, Hirschberg split.
//! - [`alignment`]   : affine-gap global alignment score (Gotoh).
//! - [`reconstruct`] : Eulerian-path reassembly of k-mer fragments.

pub mod alignment;
pub mod lcs;
pub mod reconstruct;
