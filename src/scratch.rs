//! Reusable DP-row storage.
//!
//! The engines allocate one or two score rows per sweep and a sweep runs
//! once per recursion level, so on hot call-in-a-loop workloads the
//! allocator becomes the bottleneck. `BufferPool` keeps returned rows and
//! hands them back out, reset, on the next checkout.
//!
//! Pooling is a performance policy only: every checkout is cleared and
//! refilled before use, so results are identical with pooling on or off.

/// A pool of `Vec<T>` buffers reused across engine invocations.
#[derive(Debug)]
pub struct BufferPool<T> {
    free: Vec<Vec<T>>,
    enabled: bool,
}

impl<T: Clone> BufferPool<T> {
    /// A pool that retains returned buffers.
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            enabled: true,
        }
    }

    /// A pool that never retains anything; every checkout is a fresh
    /// allocation. Used to take pooling out of the picture entirely.
    pub fn disabled() -> Self {
        Self {
            free: Vec::new(),
            enabled: false,
        }
    }

    /// Check out a buffer of exactly `len` elements, all set to `fill`.
    ///
    /// The buffer may have been used by a previous invocation; it is
    /// cleared and refilled here so no state can leak between calls.
    pub fn take(&mut self, len: usize, fill: T) -> Vec<T> {
        let mut buf = if self.enabled {
            self.free.pop().unwrap_or_default()
        } else {
            Vec::new()
        };
        buf.clear();
        buf.resize(len, fill);
        buf
    }

    /// Return a buffer to the pool (dropped immediately when disabled).
    pub fn put_back(&mut self, buf: Vec<T>) {
        if self.enabled {
            self.free.push(buf);
        }
    }

    /// Number of buffers currently held by the pool.
    pub fn idle(&self) -> usize {
        self.free.len()
    }
}

impl<T: Clone> Default for BufferPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::BufferPool;

    #[test]
    fn take_resets_contents() {
        let mut pool = BufferPool::new();
        let mut row = pool.take(4, 0u32);
        row.copy_from_slice(&[9, 9, 9, 9]);
        pool.put_back(row);

        // Same storage comes back, but zeroed and at the requested length.
        let row = pool.take(3, 0u32);
        assert_eq!(row, vec![0, 0, 0]);
    }

    #[test]
    fn pool_retains_and_reuses() {
        let mut pool = BufferPool::new();
        let row = pool.take(8, 0i32);
        pool.put_back(row);
        assert_eq!(pool.idle(), 1);
        let _row = pool.take(8, 0i32);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn disabled_pool_drops_returns() {
        let mut pool = BufferPool::disabled();
        let row = pool.take(8, 0u32);
        pool.put_back(row);
        assert_eq!(pool.idle(), 0);
    }
}
