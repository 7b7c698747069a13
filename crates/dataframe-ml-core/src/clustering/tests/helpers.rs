//! Column builders for clustering tests (real data, no mocks).

/// Positional index matching a column of `len` values.
pub fn index_for(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Two groups of three, one unit apart inside a group.
pub fn two_groups() -> Vec<f64> {
    vec![1.0, 2.0, 3.0, 101.0, 102.0, 103.0]
}

/// Five points spread over 0.1.
pub fn tight_group() -> Vec<f64> {
    vec![1.0, 1.02, 1.05, 1.07, 1.1]
}

/// Two evenly spaced runs of five points, centred on 1 and 11.
pub fn two_runs() -> Vec<f64> {
    vec![0.0, 0.5, 1.0, 1.5, 2.0, 10.0, 10.5, 11.0, 11.5, 12.0]
}

/// Values sorted ascending, for order-independent centroid checks.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}
