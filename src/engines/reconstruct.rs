//! Fragment reassembly over a de Bruijn graph.
//!
//! Every k-length fragment becomes a directed edge between its two
//! (k-1)-length end nodes. With fragments that tile one underlying
//! string, exactly one node ends up with more outgoing than incoming
//! edges (or none does, and the string wraps onto itself); walking an
//! Eulerian path from that node and gluing one fresh symbol per step
//! reproduces the string.
//!
//! Nodes are interned into an indexed arena and the whole traversal
//! speaks `u32` ids — edges, balances, the Hierholzer stack. Content is
//! only touched again when the output is assembled.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReconstructionError {
    #[error("no fragments supplied")]
    Empty,

    #[error("fragment {index} has length {len}; fragments must have at least 2 symbols")]
    ShortFragment { index: usize, len: usize },

    #[error("fragment {index} has length {len}, expected {expected}")]
    UnevenFragment {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("no unique reconstruction: {unbalanced} nodes have unbalanced degree")]
    NoEulerianPath { unbalanced: usize },

    #[error("overlap graph is disconnected: placed {placed} of {total} fragments")]
    Disconnected { placed: usize, total: usize },
}

/// Eulerian-path fragment reassembly engine.
///
/// All working tables (node arena, interner, adjacency, balances,
/// traversal stacks) live on the engine and are cleared — capacity
/// kept — at the start of every call.
///
/// ```
/// use seq_engines::ReconstructionEngine;
///
/// let mut engine = ReconstructionEngine::new();
/// let pieces = [b"TAAG", b"AAGC", b"AGCA", b"GCAT"];
/// assert_eq!(engine.reconstruct(&pieces).unwrap(), b"TAAGCAT");
/// ```
pub struct ReconstructionEngine {
    ids: HashMap<Vec<u8>, u32>,
    nodes: Vec<Vec<u8>>,
    adjacency: Vec<Vec<u32>>,
    balance: Vec<i32>,
    stack: Vec<u32>,
    path: Vec<u32>,
}

impl ReconstructionEngine {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            nodes: Vec::new(),
            adjacency: Vec::new(),
            balance: Vec::new(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Reassemble the string tiled by `fragments` under a (k-1)-symbol
    /// overlap, k being the shared fragment length.
    ///
    /// Fragment order does not matter: edges are identified by content.
    /// The inputs are expected to admit exactly one Eulerian path;
    /// violations are reported as errors rather than silently producing
    /// a partial answer.
    pub fn reconstruct<S: AsRef<[u8]>>(
        &mut self,
        fragments: &[S],
    ) -> Result<Vec<u8>, ReconstructionError> {
        let first = fragments.first().ok_or(ReconstructionError::Empty)?;
        let k = first.as_ref().len();
        if k < 2 {
            return Err(ReconstructionError::ShortFragment { index: 0, len: k });
        }

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("reconstruct", fragments = fragments.len(), k);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.reset();

        for (index, fragment) in fragments.iter().enumerate() {
            let fragment = fragment.as_ref();
            if fragment.len() != k {
                return Err(ReconstructionError::UnevenFragment {
                    index,
                    len: fragment.len(),
                    expected: k,
                });
            }
            let left = self.intern(&fragment[..k - 1]);
            let right = self.intern(&fragment[1..]);
            self.adjacency[left as usize].push(right);
            self.balance[left as usize] -= 1;
            self.balance[right as usize] += 1;
        }

        let head = self.find_head(fragments[0].as_ref(), k)?;
        self.walk(head);

        // Every fragment is one edge; a complete path visits them all.
        let placed = self.path.len() - 1;
        if placed != fragments.len() {
            return Err(ReconstructionError::Disconnected {
                placed,
                total: fragments.len(),
            });
        }

        // Consecutive path nodes overlap in k-2 symbols: the head
        // contributes all of its k-1, every later node one fresh symbol.
        let mut out = Vec::with_capacity(fragments.len() + k - 1);
        out.extend_from_slice(&self.nodes[self.path[0] as usize]);
        for &id in &self.path[1..] {
            let node = &self.nodes[id as usize];
            out.push(node[node.len() - 1]);
        }
        Ok(out)
    }

    fn reset(&mut self) {
        self.ids.clear();
        self.nodes.clear();
        self.adjacency.clear();
        self.balance.clear();
        self.stack.clear();
        self.path.clear();
    }

    fn intern(&mut self, content: &[u8]) -> u32 {
        if let Some(&id) = self.ids.get(content) {
            return id;
        }
        let id = self.nodes.len() as u32;
        self.ids.insert(content.to_vec(), id);
        self.nodes.push(content.to_vec());
        self.adjacency.push(Vec::new());
        self.balance.push(0);
        id
    }

    /// Locate the unique start of the Eulerian path.
    ///
    /// An edge contributes -1 to its source and +1 to its target, so a
    /// path-shaped graph has exactly one node at -1 (the head) and one
    /// at +1 (the tail); a circuit-shaped graph is fully balanced and
    /// the walk may start at the first fragment's left node.
    fn find_head(&self, first: &[u8], k: usize) -> Result<u32, ReconstructionError> {
        let negatives: Vec<u32> = (0..self.balance.len() as u32)
            .filter(|&id| self.balance[id as usize] < 0)
            .collect();
        let positives = self
            .balance
            .iter()
            .filter(|&&bal| bal > 0)
            .count();

        match negatives.as_slice() {
            [] if positives == 0 => Ok(self.ids[&first[..k - 1]]),
            [head]
                if self.balance[*head as usize] == -1 && positives == 1 =>
            {
                Ok(*head)
            }
            _ => Err(ReconstructionError::NoEulerianPath {
                unbalanced: negatives.len() + positives,
            }),
        }
    }

    /// Hierholzer's algorithm with an explicit stack.
    ///
    /// Follows unused out-edges (last recorded first) until the current
    /// node is exhausted, then emits it and backtracks. The emitted
    /// order is the Eulerian path reversed, so it is flipped before use.
    fn walk(&mut self, head: u32) {
        let mut current = head;
        loop {
            if let Some(next) = self.adjacency[current as usize].pop() {
                self.stack.push(current);
                current = next;
            } else {
                self.path.push(current);
                match self.stack.pop() {
                    Some(previous) => current = previous,
                    None => break,
                }
            }
        }
        self.path.reverse();
    }
}

impl Default for ReconstructionEngine {
    fn default() -> Self {
        Self::new()
    }
}
