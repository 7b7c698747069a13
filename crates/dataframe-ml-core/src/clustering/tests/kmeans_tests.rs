//! Tests for KMeansVisitor.

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clustering::{KMeansConfig, KMeansVisitor};
use crate::error::VisitorError;
use crate::visitor::ColumnVisitor;

use super::helpers::{index_for, sorted};

fn spread_column() -> Vec<f64> {
    vec![0.0, 0.0, 1.0, 10.0, 11.0, 10.0]
}

#[test]
fn test_kmeans_two_groups_converge() {
    let column = spread_column();
    let index = index_for(column.len());

    for seed in 0..10 {
        let mut visitor =
            KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(seed)).expect("valid");
        visitor.apply(&index, &column).expect("apply");

        let centroids = sorted(visitor.result());
        assert_abs_diff_eq!(centroids[0], 1.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(centroids[1], 31.0 / 3.0, epsilon = 1e-9);
        assert!(visitor.converged());
        assert!(visitor.iterations() <= 5);
    }

    println!("[PASS] K=2 centroids settle at 0.33 and 10.33 for every seed");
}

#[test]
fn test_kmeans_points_assigned_to_nearest_centroid() {
    let column = spread_column();
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(3)).expect("valid");
    visitor.apply(&index, &column).expect("apply");

    let centroids = *visitor.result();
    let clusters = visitor.clusters();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.total_points(), column.len());

    for (c, members) in clusters.iter().enumerate() {
        for &p in members {
            let own = (column[p] - centroids[c]).powi(2);
            let other = (column[p] - centroids[1 - c]).powi(2);
            assert!(own <= other, "position {} is closer to the other centroid", p);
        }
    }

    let low = if centroids[0] < centroids[1] { 0 } else { 1 };
    assert_eq!(clusters.members(low), Some(&[0usize, 1, 2][..]));
    assert_eq!(clusters.members(1 - low), Some(&[3usize, 4, 5][..]));
}

#[test]
fn test_kmeans_single_centroid_is_mean() {
    let column = vec![2.0, 4.0, 6.0, 8.0];
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<1, f64>::new(KMeansConfig::default().with_seed(11)).expect("valid");
    visitor.apply(&index, &column).expect("apply");

    assert_abs_diff_eq!(visitor.result()[0], 5.0, epsilon = 1e-12);
    assert!(visitor.converged());
    assert!(visitor.iterations() <= 2);
}

#[test]
fn test_kmeans_skips_missing_values() {
    let column = vec![0.0, f64::NAN, 1.0, 10.0, f64::NAN, 11.0];
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(5)).expect("valid");
    visitor.apply(&index, &column).expect("apply");

    assert!(visitor.result().iter().all(|c| !c.is_nan()));
    let clusters = visitor.clusters();
    assert_eq!(clusters.total_points(), 4);
    let assignments = clusters.assignments(column.len());
    assert_eq!(assignments[1], None);
    assert_eq!(assignments[4], None);

    println!("[PASS] Missing values never reach a centroid or a cluster");
}

#[test]
fn test_kmeans_same_seed_is_reproducible() {
    let column: Vec<f64> = (0..40).map(|i| ((i * 37) % 23) as f64).collect();
    let index = index_for(column.len());
    let config = KMeansConfig::default().with_seed(2024);

    let mut a = KMeansVisitor::<3, f64>::new(config.clone()).expect("valid");
    let mut b = KMeansVisitor::<3, f64>::new(config).expect("valid");
    a.apply(&index, &column).expect("apply");
    b.apply(&index, &column).expect("apply");

    assert_eq!(a.result(), b.result());
    assert_eq!(a.clusters(), b.clusters());
    assert_eq!(a.iterations(), b.iterations());
}

#[test]
fn test_kmeans_apply_with_injected_rng() {
    let column = spread_column();
    let index = index_for(column.len());
    let mut visitor = KMeansVisitor::<2, f64>::new(KMeansConfig::default()).expect("valid");

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    visitor
        .apply_with_rng(&index, &column, &mut rng)
        .expect("apply");
    let first = *visitor.result();

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    visitor
        .apply_with_rng(&index, &column, &mut rng)
        .expect("apply");
    assert_eq!(*visitor.result(), first);
}

#[test]
fn test_kmeans_custom_distance() {
    let column = spread_column();
    let index = index_for(column.len());
    let mut visitor = KMeansVisitor::<2, f64, _>::with_distance(
        KMeansConfig::default().with_seed(1),
        |a: &f64, b: &f64| (a - b).abs(),
    )
    .expect("valid");
    visitor.apply(&index, &column).expect("apply");

    let centroids = sorted(visitor.result());
    assert_abs_diff_eq!(centroids[0], 1.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(centroids[1], 31.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_kmeans_integer_column() {
    let column: Vec<i32> = vec![0, 0, 1, 10, 11, 10];
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<2, i32>::new(KMeansConfig::default().with_seed(8)).expect("valid");
    visitor.apply(&index, &column).expect("apply");

    let mut centroids = *visitor.result();
    centroids.sort_unstable();
    assert_eq!(centroids, [0, 10]);
}

#[test]
fn test_kmeans_respects_iteration_budget() {
    let column: Vec<f64> = (0..50).map(|i| (i as f64).sqrt()).collect();
    let index = index_for(column.len());
    let mut visitor = KMeansVisitor::<4, f64>::new(
        KMeansConfig::default().with_seed(4).with_max_iterations(1),
    )
    .expect("valid");
    visitor.apply(&index, &column).expect("apply");

    assert_eq!(visitor.iterations(), 1);
}

#[test]
fn test_kmeans_without_cluster_materialisation() {
    let column = spread_column();
    let index = index_for(column.len());
    let mut visitor = KMeansVisitor::<2, f64>::new(
        KMeansConfig::default().with_seed(6).with_calc_clusters(false),
    )
    .expect("valid");
    visitor.apply(&index, &column).expect("apply");

    assert!(visitor.clusters().is_empty());
    assert_eq!(sorted(visitor.result()).len(), 2);
}

#[test]
fn test_kmeans_empty_column_is_insufficient_data() {
    let column: Vec<f64> = Vec::new();
    let index: Vec<usize> = Vec::new();
    let mut visitor =
        KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(0)).expect("valid");

    let err = visitor.apply(&index, &column).unwrap_err();
    assert_eq!(err, VisitorError::insufficient_data(1, 0));
    assert!(!err.is_configuration_error());

    println!("[PASS] Empty column rejected with InsufficientData");
}

#[test]
fn test_kmeans_empty_cluster_falls_back_to_default() {
    let column = vec![4.0, 4.0, 4.0, 4.0];
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(1)).expect("valid");
    visitor.apply(&index, &column).expect("apply");

    // Both centroids seed at 4.0; ties go to the first, leaving the second empty.
    assert_eq!(*visitor.result(), [4.0, 0.0]);
    assert!(visitor.converged());
    assert_eq!(visitor.iterations(), 2);
    assert_eq!(visitor.clusters().members(0), Some(&[0usize, 1, 2, 3][..]));
    assert_eq!(visitor.clusters().members(1), Some(&[][..]));

    println!("[PASS] Empty cluster centroid becomes the default value");
}

#[test]
fn test_kmeans_sub_epsilon_move_is_not_applied() {
    let column = vec![0.0, 1e-4];
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<1, f64>::new(KMeansConfig::default().with_seed(3)).expect("valid");
    visitor.apply(&index, &column).expect("apply");

    // The mean is 5e-5 from either seed, a squared move of 2.5e-9.
    let centroid = visitor.result()[0];
    assert!(centroid == 0.0 || centroid == 1e-4, "centroid moved to {}", centroid);
    assert!(visitor.converged());
    assert_eq!(visitor.iterations(), 1);
}

#[test]
fn test_kmeans_zero_clusters_rejected() {
    let result = KMeansVisitor::<0, f64>::new(KMeansConfig::default());
    assert!(matches!(result, Err(VisitorError::InvalidParameter { .. })));
}

#[test]
fn test_kmeans_reset_clears_state() {
    let column = spread_column();
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(12)).expect("valid");
    visitor.apply(&index, &column).expect("apply");
    assert!(visitor.iterations() > 0);

    visitor.reset();
    assert_eq!(visitor.iterations(), 0);
    assert!(!visitor.converged());
    assert!(visitor.clusters().is_empty());
    assert_eq!(*visitor.result(), [0.0, 0.0]);
}

#[test]
fn test_kmeans_visit_runs_full_lifecycle() {
    let column = spread_column();
    let index = index_for(column.len());
    let mut visitor =
        KMeansVisitor::<2, f64>::new(KMeansConfig::default().with_seed(21)).expect("valid");

    let centroids = sorted(visitor.visit(&index, &column).expect("visit"));
    assert_abs_diff_eq!(centroids[0], 1.0 / 3.0, epsilon = 1e-9);
}
