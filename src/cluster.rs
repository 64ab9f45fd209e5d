//! Clustering (§4.5): groups breakends by event tag, mate linkage, and
//! same-chromosome proximity. Informational only — does not feed the walker
//! or chaining engine.

use std::collections::HashMap;

use itertools::Itertools;

use crate::breakend::BreakendSet;

/// Union-find over breakend indices, merging by lowest-id representative so
/// output cluster identity is a deterministic function of the input.
struct UnionFind {
	parent: Vec<usize>,
}

impl UnionFind {
	fn new(n: usize) -> Self {
		Self { parent: (0..n).collect() }
	}

	fn find(&mut self, x: usize) -> usize {
		if self.parent[x] != x {
			self.parent[x] = self.find(self.parent[x]);
		}
		self.parent[x]
	}

	fn union(&mut self, a: usize, b: usize) {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra != rb {
			if ra < rb {
				self.parent[rb] = ra;
			} else {
				self.parent[ra] = rb;
			}
		}
	}
}

/// Partitions a breakend set into clusters: first by shared `event` tag,
/// then by mate linkage, then by same-chromosome proximity (default window
/// 5000). Returns cluster membership as lists of breakend ids, ordered by
/// each cluster's lowest member id.
pub fn cluster(breakends: &BreakendSet, proximity_threshold: i64) -> Vec<Vec<String>> {
	let n = breakends.len();
	if n == 0 {
		return Vec::new();
	}
	let mut uf = UnionFind::new(n);
	let all: Vec<_> = breakends.iter().collect();

	let by_event: HashMap<&str, Vec<usize>> = all
		.iter()
		.enumerate()
		.filter_map(|(i, b)| b.event.as_deref().map(|event| (event, i)))
		.into_group_map();
	for group in by_event.values() {
		for w in group.windows(2) {
			uf.union(w[0], w[1]);
		}
	}

	for (i, b) in all.iter().enumerate() {
		if let Some(mate) = breakends.mate_of(b) {
			if let Some(j) = breakends.index_of(&mate.id) {
				uf.union(i, j);
			}
		}
	}

	let mut by_chr: HashMap<&str, Vec<usize>> = all.iter().enumerate().map(|(i, b)| (b.chr.as_str(), i)).into_group_map();
	for indices in by_chr.values_mut() {
		indices.sort_by_key(|&i| all[i].pos);
		for w in indices.windows(2) {
			if (all[w[1]].pos - all[w[0]].pos).abs() <= proximity_threshold {
				uf.union(w[0], w[1]);
			}
		}
	}

	let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
	for i in 0..n {
		let root = uf.find(i);
		groups.entry(root).or_default().push(i);
	}

	let mut clusters: Vec<Vec<String>> = groups
		.into_values()
		.map(|mut indices| {
			indices.sort_by(|&a, &b| all[a].id.cmp(&all[b].id));
			indices.into_iter().map(|i| all[i].id.clone()).collect::<Vec<String>>()
		})
		.collect();
	clusters.sort_by(|a, b| a[0].cmp(&b[0]));
	clusters
}
