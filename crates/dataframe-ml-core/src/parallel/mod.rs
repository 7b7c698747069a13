//! Parallel execution gate.
//!
//! Decides whether an elementwise loop runs sequentially or is split into
//! contiguous chunks and forked onto a rayon pool. The pool is owned by the
//! caller (or is rayon's global pool); the gate never spawns threads itself.
//!
//! Both paths evaluate the same per-element closure, so their results agree
//! up to floating-point reassociation in the caller's own arithmetic.

use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::config::constants::parallel::{MIN_PARALLEL_LEN, MIN_THREAD_LEVEL};
use crate::config::ParallelConfig;
use crate::error::VisitorResult;

#[cfg(test)]
mod tests;

/// Sequential/chunked-parallel dispatcher for elementwise loops.
///
/// # Example
///
/// ```
/// use dataframe_ml_core::parallel::ParallelGate;
///
/// let gate = ParallelGate::sequential();
/// let mut squares = vec![0usize; 5];
/// gate.for_each_mut(&mut squares, |i, v| *v = i * i);
/// assert_eq!(squares, vec![0, 1, 4, 9, 16]);
/// ```
#[derive(Debug, Clone)]
pub struct ParallelGate {
    pool: Option<Arc<ThreadPool>>,
    thread_level: usize,
    min_len: usize,
}

impl Default for ParallelGate {
    /// Gate over rayon's global pool with the default size threshold.
    fn default() -> Self {
        Self {
            pool: None,
            thread_level: rayon::current_num_threads(),
            min_len: MIN_PARALLEL_LEN,
        }
    }
}

impl ParallelGate {
    /// Gate that always runs loops on the calling thread.
    pub fn sequential() -> Self {
        Self {
            pool: None,
            thread_level: 1,
            min_len: MIN_PARALLEL_LEN,
        }
    }

    /// Gate over rayon's global pool.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn from_config(config: &ParallelConfig) -> VisitorResult<Self> {
        config.validate()?;
        Ok(Self {
            pool: None,
            thread_level: config
                .thread_level
                .unwrap_or_else(rayon::current_num_threads),
            min_len: config.min_parallel_len,
        })
    }

    /// Gate over a caller-owned pool.
    ///
    /// Without an override the concurrency level is the pool's thread count.
    ///
    /// # Errors
    ///
    /// Returns `VisitorError::InvalidParameter` if the configuration is invalid.
    pub fn with_pool(pool: Arc<ThreadPool>, config: &ParallelConfig) -> VisitorResult<Self> {
        config.validate()?;
        let thread_level = config
            .thread_level
            .unwrap_or_else(|| pool.current_num_threads());
        Ok(Self {
            pool: Some(pool),
            thread_level,
            min_len: config.min_parallel_len,
        })
    }

    /// Configured concurrency level.
    #[inline]
    pub fn thread_level(&self) -> usize {
        self.thread_level
    }

    /// Minimum loop length for parallel dispatch.
    #[inline]
    pub fn min_parallel_len(&self) -> usize {
        self.min_len
    }

    /// True if a loop of `len` elements would be split across the pool.
    #[inline]
    pub fn is_parallel(&self, len: usize) -> bool {
        self.thread_level > MIN_THREAD_LEVEL && len >= self.min_len
    }

    /// Elements per chunk when `len` elements are dispatched.
    #[inline]
    pub fn chunk_size(&self, len: usize) -> usize {
        len.div_ceil(self.thread_level.max(1)).max(1)
    }

    /// Contiguous, disjoint chunks covering `0..len`.
    ///
    /// The partition depends only on `len` and the concurrency level.
    pub fn chunk_ranges(&self, len: usize) -> Vec<Range<usize>> {
        let chunk = self.chunk_size(len);
        (0..len)
            .step_by(chunk)
            .map(|start| start..(start + chunk).min(len))
            .collect()
    }

    /// Call `f(position, &mut element)` for every element of `data`.
    ///
    /// Returns once every element has been visited. When the loop is
    /// dispatched in parallel each chunk writes only its own elements, and
    /// `f` can only read what it captures.
    pub fn for_each_mut<T, F>(&self, data: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        self.for_each_mut_gated(data.len(), data, f);
    }

    /// Like [`for_each_mut`](Self::for_each_mut), but the sequential or
    /// parallel decision is made for a loop of `gate_len` elements.
    ///
    /// Scratch buffers sized from a transform length (padded convolution
    /// arrays, half-length twiddle tables) follow the decision taken for
    /// that transform length rather than their own.
    pub fn for_each_mut_gated<T, F>(&self, gate_len: usize, data: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        let len = data.len();
        if !self.is_parallel(gate_len) {
            for (i, item) in data.iter_mut().enumerate() {
                f(i, item);
            }
            return;
        }

        let chunk = self.chunk_size(len);
        tracing::trace!(
            len,
            gate_len,
            chunk,
            thread_level = self.thread_level,
            "Dispatching chunked parallel loop"
        );

        let mut run = move || {
            data.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(c, slice)| {
                    let base = c * chunk;
                    for (offset, item) in slice.iter_mut().enumerate() {
                        f(base + offset, item);
                    }
                });
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
