//! Tests for the clustering visitors.
//!
//! # Test Organization
//!
//! - `helpers` - Column builders shared by the suites
//! - `config_tests` - Configuration defaults, validation and serde
//! - `kmeans_tests` - KMeansVisitor
//! - `affinity_tests` - AffinityPropVisitor
//! - `dbscan_tests` - DbscanVisitor
//! - `mean_shift_tests` - MeanShiftVisitor
//! - `partition_tests` - ClusterPartition and PointLabel

mod helpers;

mod kmeans_tests;
mod mean_shift_tests;
