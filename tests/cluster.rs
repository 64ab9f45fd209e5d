//! Scenarios for clustering (§4.5): grouping breakends by event tag, mate
//! linkage, and same-chromosome proximity.

mod common;

use common::bnd;
use derive_chromo::{cluster, BreakendSet, Direction};
use pretty_assertions::assert_eq;

/// Clustering groups a mate pair together even with no event tag, and keeps
/// a distant unrelated breakend in its own singleton cluster.
#[test]
fn cluster_groups_mates_and_isolates_unrelated_breakends() {
	let set = BreakendSet::new(vec![
		bnd("a", "chr1", 1000, Direction::Right, Some("b"), "chr1", 2000, Direction::Left),
		bnd("b", "chr1", 2000, Direction::Left, Some("a"), "chr1", 1000, Direction::Right),
		bnd("z", "chr9", 500_000, Direction::Right, None, "chr9", 500_000, Direction::Right),
	]);
	let clusters = cluster(&set, 5000);
	assert_eq!(clusters.len(), 2);
	assert_eq!(clusters[0], vec!["a".to_string(), "b".to_string()]);
	assert_eq!(clusters[1], vec!["z".to_string()]);
}

/// Clustering an empty breakend set yields no clusters and doesn't panic.
#[test]
fn empty_breakend_set_clusters_cleanly() {
	let set = BreakendSet::new(vec![]);
	assert!(cluster(&set, 5000).is_empty());
}
