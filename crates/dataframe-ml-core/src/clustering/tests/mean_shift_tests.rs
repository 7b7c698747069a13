//! Tests for MeanShiftVisitor.

use approx::assert_abs_diff_eq;

use crate::clustering::{MeanShiftConfig, MeanShiftVisitor};
use crate::config::constants::clustering::DEFAULT_MEAN_SHIFT_ITERATIONS;
use crate::error::VisitorError;
use crate::functor::MeanShiftKernel;
use crate::visitor::ColumnVisitor;

use super::helpers::{index_for, sorted, tight_group, two_runs};

fn run(column: &[f64], config: MeanShiftConfig) -> MeanShiftVisitor<f64> {
    let mut visitor = MeanShiftVisitor::<f64>::new(config).expect("valid");
    visitor
        .apply(&index_for(column.len()), column)
        .expect("apply");
    visitor
}

#[test]
fn test_mean_shift_tight_group_single_cluster() {
    let column = tight_group();
    let visitor = run(&column, MeanShiftConfig::new(0.5, 0.05));

    assert_eq!(visitor.result().len(), 1);
    assert_eq!(visitor.result().members(0), Some(&[0usize, 1, 2, 3, 4][..]));
    assert_eq!(visitor.centroids().len(), 1);

    println!("[PASS] Five points within 0.1 collapse into one cluster");
}

#[test]
fn test_mean_shift_tight_group_every_kernel() {
    let column = tight_group();
    for kernel in MeanShiftKernel::ALL {
        let visitor = run(&column, MeanShiftConfig::new(0.5, 0.05).with_kernel(kernel));
        assert_eq!(
            visitor.result().len(),
            1,
            "kernel {} split a tight group",
            kernel
        );
        assert_eq!(visitor.result().total_points(), column.len());
    }

    println!("[PASS] All 11 kernels keep a tight group together");
}

#[test]
fn test_mean_shift_two_runs_find_two_modes() {
    let column = two_runs();
    let visitor = run(&column, MeanShiftConfig::new(1.0, 0.01));

    let clusters = visitor.result();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.members(0), Some(&[0usize, 1, 2, 3, 4][..]));
    assert_eq!(clusters.members(1), Some(&[5usize, 6, 7, 8, 9][..]));

    let modes = sorted(visitor.centroids());
    assert_abs_diff_eq!(modes[0], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(modes[1], 11.0, epsilon = 1e-6);

    // The outer points never get within 0.01 of their starting value.
    assert_eq!(visitor.iterations(), DEFAULT_MEAN_SHIFT_ITERATIONS);
}

#[test]
fn test_mean_shift_bounded_kernel_keeps_fragments() {
    let column = two_runs();
    let visitor = run(
        &column,
        MeanShiftConfig::new(1.0, 0.01).with_kernel(MeanShiftKernel::Uniform),
    );

    assert_eq!(visitor.result().len(), 6);
    assert_eq!(visitor.result().total_points(), column.len());
}

#[test]
fn test_mean_shift_iteration_budget() {
    let column = two_runs();
    let visitor = run(&column, MeanShiftConfig::new(1.0, 0.01).with_max_iterations(1));

    assert_eq!(visitor.iterations(), 1);
    // After one round no two shifted points are within the merge radius.
    assert_eq!(visitor.result().len(), column.len());
}

#[test]
fn test_mean_shift_centroid_is_first_member_position() {
    let column = tight_group();
    let visitor = run(&column, MeanShiftConfig::new(0.5, 0.05));

    let centroid = visitor.centroids()[0];
    assert!(centroid >= 1.0 && centroid <= 1.1);
}

#[test]
fn test_mean_shift_zero_weight_freezes_point() {
    // Every pair lies outside the search radius, so no point carries weight.
    let column = vec![1.0, 2.0, 3.0];
    let mut visitor = MeanShiftVisitor::<f64, _>::with_distance(
        MeanShiftConfig::new(0.1, 0.01).with_kernel(MeanShiftKernel::Uniform),
        |_: &f64, _: &f64| 10.0,
    )
    .expect("valid");
    visitor
        .apply(&index_for(column.len()), &column)
        .expect("apply");

    assert_eq!(visitor.iterations(), 1);
    assert_eq!(visitor.centroids(), &[1.0, 2.0, 3.0][..]);
    assert_eq!(visitor.result().len(), 3);

    println!("[PASS] Zero kernel weight freezes points instead of producing NaN");
}

#[test]
fn test_mean_shift_empty_column() {
    let column: Vec<f64> = Vec::new();
    let visitor = run(&column, MeanShiftConfig::new(1.0, 0.1));

    assert!(visitor.result().is_empty());
    assert!(visitor.centroids().is_empty());
    assert_eq!(visitor.iterations(), 0);
}

#[test]
fn test_mean_shift_reset_and_reapply() {
    let column = two_runs();
    let mut visitor = MeanShiftVisitor::<f64>::new(MeanShiftConfig::new(1.0, 0.01)).expect("valid");
    let index = index_for(column.len());

    visitor.apply(&index, &column).expect("apply");
    let first = visitor.result().clone();
    visitor.apply(&index, &column).expect("apply");
    assert_eq!(visitor.result(), &first);

    visitor.reset();
    assert!(visitor.result().is_empty());
    assert_eq!(visitor.iterations(), 0);
}

#[test]
fn test_mean_shift_invalid_config_rejected() {
    let result = MeanShiftVisitor::<f64>::new(MeanShiftConfig::new(-1.0, 0.1));
    assert!(matches!(result, Err(VisitorError::InvalidParameter { .. })));
}
