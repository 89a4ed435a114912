//! Longest common subsequence via Hirschberg's divide-and-conquer.
//!
//! The full O(n·m) table never exists. Each recursion level runs two
//! single-row sweeps (forward, and reversed over the back half) to find
//! an optimal split of the second sequence, then solves the two halves
//! independently. Time stays O(n·m); live memory stays O(n).
//!
//! Shared prefixes and suffixes are peeled off before every split: both
//! belong to any LCS, and stripping them early keeps the recursion and
//! the row sweeps short.

use crate::scratch::BufferPool;
use crate::utils::{common_prefix_len, common_suffix_len};
#[cfg(feature = "parallel")]
use rayon::join;

/// Minimum remaining `a` length before a split is worth a rayon task pair.
#[cfg(feature = "parallel")]
const PARALLEL_CUTOFF: usize = 64;

/// Linear-space LCS engine.
///
/// The engine owns a row pool reused across invocations; otherwise it is
/// stateless and one instance may serve any number of calls.
///
/// ```
/// use seq_engines::LcsEngine;
///
/// let mut engine = LcsEngine::new();
/// assert_eq!(engine.lcs(b"ACCG", b"ACGC"), b"ACG");
/// assert_eq!(engine.lcs(b"GATTACA", b"GCATGCU"), b"GATC");
/// assert!(engine.lcs(b"", b"ANY").is_empty());
/// ```
pub struct LcsEngine {
    parallel: bool,
    pool: BufferPool<u32>,
}

impl LcsEngine {
    /// A serial engine with row pooling enabled.
    pub fn new() -> Self {
        Self::with_options(false, true)
    }

    pub(crate) fn with_options(parallel: bool, pooling: bool) -> Self {
        Self {
            parallel,
            pool: if pooling {
                BufferPool::new()
            } else {
                BufferPool::disabled()
            },
        }
    }

    /// Whether the engine splits recursion across rayon workers.
    ///
    /// Only meaningful when the crate is built with the `parallel`
    /// feature; without it the flag is inert and execution is serial.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Compute one longest common subsequence of `a` and `b`.
    ///
    /// When several subsequences of maximal length exist, which one is
    /// returned follows from the leftmost-split rule and is stable
    /// across calls and across serial/parallel execution; only the
    /// length is part of the contract.
    pub fn lcs(&mut self, a: &[u8], b: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        self.lcs_into(a, b, &mut out);
        out
    }

    /// Append one LCS of `a` and `b` to a caller-owned sink.
    pub fn lcs_into(&mut self, a: &[u8], b: &[u8], out: &mut Vec<u8>) {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("lcs", n = a.len(), m = b.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        solve(a, b, &mut self.pool, out, self.parallel);
    }

    /// LCS length only: a single forward sweep, no recursion.
    ///
    /// Sweeps over the longer sequence so the row covers the shorter
    /// one, keeping memory at O(min(n, m)).
    pub fn lcs_len(&mut self, a: &[u8], b: &[u8]) -> u32 {
        let (a, b) = if b.len() <= a.len() { (a, b) } else { (b, a) };
        let mut row = self.pool.take(b.len() + 1, 0);
        row_sweep(a, b, false, &mut row);
        let len = row[b.len()];
        self.pool.put_back(row);
        len
    }
}

impl Default for LcsEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn solve(a: &[u8], b: &[u8], pool: &mut BufferPool<u32>, out: &mut Vec<u8>, parallel: bool) {
    if a.is_empty() || b.is_empty() {
        return;
    }

    // A shared prefix is part of any LCS; emit it right away.
    let prefix = common_prefix_len(a, b);
    out.extend_from_slice(&a[..prefix]);
    let (a, b) = (&a[prefix..], &b[prefix..]);
    if a.is_empty() || b.is_empty() {
        return;
    }

    // A shared suffix is too, but only after the middle has contributed.
    let sfx = common_suffix_len(a, b);
    let suffix = &a[a.len() - sfx..];
    let (a, b) = (&a[..a.len() - sfx], &b[..b.len() - sfx]);

    if a.is_empty() || b.is_empty() {
        out.extend_from_slice(suffix);
        return;
    }

    if a.len() == 1 {
        // Trivial base case: the single symbol either occurs in b or not.
        if b.contains(&a[0]) {
            out.push(a[0]);
        }
        out.extend_from_slice(suffix);
        return;
    }

    let ai = a.len() / 2;
    let n = b.len();

    let mut fwd = pool.take(n + 1, 0);
    row_sweep(&a[..ai], b, false, &mut fwd);
    let mut bwd = pool.take(n + 1, 0);
    row_sweep(&a[ai..], b, true, &mut bwd);

    // Split b at the leftmost j maximizing fwd[j] + bwd[n-j]; strict `>`
    // during a left-to-right scan keeps the first maximum.
    let mut best_j = 0usize;
    let mut best = 0u32;
    for (j, &f) in fwd.iter().enumerate() {
        let v = f + bwd[n - j];
        if v > best {
            best = v;
            best_j = j;
        }
    }
    pool.put_back(fwd);
    pool.put_back(bwd);

    recurse_halves(
        &a[..ai],
        &b[..best_j],
        &a[ai..],
        &b[best_j..],
        pool,
        out,
        parallel,
    );

    out.extend_from_slice(suffix);
}

/// One pass of the LCS length recurrence over a single row.
///
/// `row` must hold `b.len() + 1` zeroed cells. On return, `row[j]` is the
/// LCS length of the full `a` range against the first `j` symbols of `b`
/// (the last `j` symbols when `rev` is set, with `a` read back to front).
///
/// A second row is unnecessary: `diag` carries the up-left cell that the
/// in-place write would otherwise destroy.
fn row_sweep(a: &[u8], b: &[u8], rev: bool, row: &mut [u32]) {
    let n = b.len();
    debug_assert_eq!(row.len(), n + 1);

    for i in 0..a.len() {
        let ca = if rev { a[a.len() - 1 - i] } else { a[i] };
        let mut diag = 0u32;
        let mut left = 0u32;
        for j in 1..=n {
            let cb = if rev { b[n - j] } else { b[j - 1] };
            let up = row[j];
            left = if ca == cb { diag + 1 } else { left.max(up) };
            row[j] = left;
            diag = up;
        }
    }
}

#[cfg(feature = "parallel")]
fn recurse_halves(
    a_left: &[u8],
    b_left: &[u8],
    a_right: &[u8],
    b_right: &[u8],
    pool: &mut BufferPool<u32>,
    out: &mut Vec<u8>,
    parallel: bool,
) {
    if parallel && a_left.len() + a_right.len() >= PARALLEL_CUTOFF {
        // The halves share no mutable state; each side gets its own pool
        // and buffer, concatenated left-then-right so the output is
        // byte-identical to the serial order.
        let (left, right) = join(
            || {
                #[cfg(feature = "tracing")]
                let span = tracing::trace_span!("lcs_left_half", rows = a_left.len());
                #[cfg(feature = "tracing")]
                let _enter = span.enter();
                let mut pool = BufferPool::new();
                let mut buf = Vec::new();
                solve(a_left, b_left, &mut pool, &mut buf, parallel);
                buf
            },
            || {
                #[cfg(feature = "tracing")]
                let span = tracing::trace_span!("lcs_right_half", rows = a_right.len());
                #[cfg(feature = "tracing")]
                let _enter = span.enter();
                let mut pool = BufferPool::new();
                let mut buf = Vec::new();
                solve(a_right, b_right, &mut pool, &mut buf, parallel);
                buf
            },
        );
        out.extend_from_slice(&left);
        out.extend_from_slice(&right);
    } else {
        solve(a_left, b_left, pool, out, parallel);
        solve(a_right, b_right, pool, out, parallel);
    }
}

#[cfg(not(feature = "parallel"))]
fn recurse_halves(
    a_left: &[u8],
    b_left: &[u8],
    a_right: &[u8],
    b_right: &[u8],
    pool: &mut BufferPool<u32>,
    out: &mut Vec<u8>,
    parallel: bool,
) {
    solve(a_left, b_left, pool, out, parallel);
    solve(a_right, b_right, pool, out, parallel);
}
