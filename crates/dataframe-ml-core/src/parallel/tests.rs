//! Tests for the parallel execution gate.

use std::sync::Arc;

use rayon::ThreadPoolBuilder;

use super::*;
use crate::error::VisitorError;

fn pool(threads: usize) -> Arc<ThreadPool> {
    Arc::new(
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("test pool"),
    )
}

// ============================================================================
// Gate decisions
// ============================================================================

#[test]
fn test_sequential_gate_never_parallel() {
    let gate = ParallelGate::sequential();
    assert_eq!(gate.thread_level(), 1);
    assert!(!gate.is_parallel(0));
    assert!(!gate.is_parallel(usize::MAX));

    println!("[PASS] Sequential gate never dispatches");
}

#[test]
fn test_gate_requires_level_above_floor() {
    let config = ParallelConfig::default()
        .with_thread_level(MIN_THREAD_LEVEL)
        .with_min_parallel_len(1);
    let gate = ParallelGate::from_config(&config).expect("valid config");
    assert!(!gate.is_parallel(1_000_000));

    let config = config.with_thread_level(MIN_THREAD_LEVEL + 1);
    let gate = ParallelGate::from_config(&config).expect("valid config");
    assert!(gate.is_parallel(1_000_000));

    println!("[PASS] Concurrency level must exceed the floor");
}

#[test]
fn test_gate_requires_minimum_length() {
    let config = ParallelConfig::default().with_thread_level(8);
    let gate = ParallelGate::from_config(&config).expect("valid config");
    assert!(!gate.is_parallel(MIN_PARALLEL_LEN - 1));
    assert!(gate.is_parallel(MIN_PARALLEL_LEN));
}

#[test]
fn test_from_config_rejects_zero_level() {
    let config = ParallelConfig::default().with_thread_level(0);
    let err = ParallelGate::from_config(&config).unwrap_err();
    assert!(matches!(err, VisitorError::InvalidParameter { .. }));
}

#[test]
fn test_with_pool_uses_pool_thread_count() {
    let gate = ParallelGate::with_pool(pool(3), &ParallelConfig::default())
        .expect("valid config");
    assert_eq!(gate.thread_level(), 3);

    let gate = ParallelGate::with_pool(pool(3), &ParallelConfig::default().with_thread_level(6))
        .expect("valid config");
    assert_eq!(gate.thread_level(), 6);
}

// ============================================================================
// Chunking
// ============================================================================

#[test]
fn test_chunk_ranges_cover_range_disjointly() {
    let gate = ParallelGate::from_config(&ParallelConfig::default().with_thread_level(4))
        .expect("valid config");

    for len in [0usize, 1, 3, 4, 5, 17, 100, 101] {
        let ranges = gate.chunk_ranges(len);
        assert!(ranges.len() <= 4, "len {} produced {} chunks", len, ranges.len());

        let mut expected_start = 0;
        for range in &ranges {
            assert_eq!(range.start, expected_start);
            assert!(range.end > range.start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, len);
    }

    assert_eq!(gate.chunk_ranges(10), vec![0..3, 3..6, 6..9, 9..10]);

    println!("[PASS] Chunk partition is contiguous, disjoint and deterministic");
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_for_each_mut_parallel_matches_sequential() {
    let config = ParallelConfig::default()
        .with_thread_level(4)
        .with_min_parallel_len(1);
    let parallel = ParallelGate::with_pool(pool(4), &config).expect("valid config");
    let sequential = ParallelGate::sequential();

    let source: Vec<f64> = (0..1_003).map(|i| (i as f64 * 0.37).sin()).collect();
    let mut a = vec![0.0f64; source.len()];
    let mut b = vec![0.0f64; source.len()];

    assert!(parallel.is_parallel(a.len()));
    parallel.for_each_mut(&mut a, |i, v| *v = source[i] * 2.0 + i as f64);
    sequential.for_each_mut(&mut b, |i, v| *v = source[i] * 2.0 + i as f64);

    assert_eq!(a, b);

    println!("[PASS] Parallel and sequential loops produce identical elementwise output");
}

#[test]
fn test_for_each_mut_on_global_pool() {
    let config = ParallelConfig::default()
        .with_thread_level(4)
        .with_min_parallel_len(1);
    let gate = ParallelGate::from_config(&config).expect("valid config");

    let mut data = vec![0usize; 257];
    gate.for_each_mut(&mut data, |i, v| *v = i);
    assert!(data.iter().enumerate().all(|(i, &v)| i == v));
}

#[test]
fn test_for_each_mut_empty_slice() {
    let gate = ParallelGate::default();
    let mut data: Vec<u8> = Vec::new();
    gate.for_each_mut(&mut data, |_, v| *v = 1);
    assert!(data.is_empty());
}

#[test]
fn test_gated_loop_follows_gate_len_not_slice_len() {
    let config = ParallelConfig::default()
        .with_thread_level(4)
        .with_min_parallel_len(100);
    let gate = ParallelGate::with_pool(pool(4), &config).expect("valid config");

    // Workers report Some(index); the calling test thread is outside the pool.
    let mut below = vec![Some(usize::MAX); 1_000];
    gate.for_each_mut_gated(10, &mut below, |_, v| *v = rayon::current_thread_index());
    assert!(below.iter().all(Option::is_none));

    let mut above = vec![None; 1_000];
    gate.for_each_mut_gated(100, &mut above, |_, v| *v = rayon::current_thread_index());
    assert!(above.iter().all(Option::is_some));

    let mut plain = vec![None; 1_000];
    gate.for_each_mut(&mut plain, |_, v| *v = rayon::current_thread_index());
    assert!(plain.iter().all(Option::is_some));

    println!("[PASS] Gated loop decides on the supplied length");
}
