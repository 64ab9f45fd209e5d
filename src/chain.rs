//! The chaining engine: the heuristic reconstructor for ambiguous TI-edge
//! inputs, driven by a descending-score worklist (a `PriorityQueue::push`/
//! `pop` loop), generalized from "closest open node" to "highest-priority
//! still-applicable edge".

use std::collections::{BTreeMap, HashMap, HashSet};

use noisy_float::prelude::n64;
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};

use crate::breakend::{Breakend, BreakendId, BreakendSet, Direction};
use crate::builder::{build_links, Link};
use crate::cn::{filter_ti_edges, CnSegment};
use crate::model::{Chain, ChainEnd, OpenEnd, Orientation, WalkSegment};
use crate::options::RunOptions;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeriveResult {
	pub chains: Vec<Chain>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum EdgeSide {
	B1,
	B2,
}

/// Runs the greedy chaining engine (§4.3).
pub fn derive(breakends: &BreakendSet, cn_segments: &[CnSegment], options: &RunOptions) -> DeriveResult {
	let graph = build_links(breakends);
	let ti_edges = filter_ti_edges(graph.ti_edges, breakends, cn_segments, options.background_ploidy, options.zero_jcn_threshold);

	let mut chains: Vec<Chain> = graph.sv_edges.iter().map(|e| seed_chain(breakends, e)).collect();

	let counts = endpoint_edge_counts(&ti_edges);
	let adjacent = adjacent_pairs(breakends);
	let scored: Vec<(f64, Link)> = ti_edges
		.into_iter()
		.map(|e| {
			let s = score_edge(&e, breakends, &counts, &adjacent);
			(s, e)
		})
		.collect();

	let mut used: HashSet<BreakendId> = HashSet::new();
	let mut next_index = 0usize;

	// Each round re-drains the full worklist highest-score-first, applying the
	// first still-matching edge and discarding the rest; a round that applies
	// nothing means the fixed point is reached.
	loop {
		let mut q = PriorityQueue::new();
		for (i, (score, _)) in scored.iter().enumerate() {
			q.push(i, n64(*score));
		}
		let mut applied = false;
		while let Some((i, _)) = q.pop() {
			let edge = &scored[i].1;
			if used.contains(&edge.b1) && used.contains(&edge.b2) {
				continue;
			}
			if apply_edge(&mut chains, breakends, edge, &mut used, &mut next_index) {
				applied = true;
				break;
			}
		}
		if !applied {
			break;
		}
	}

	DeriveResult { chains }
}

fn seed_chain(breakends: &BreakendSet, edge: &Link) -> Chain {
	let a = breakends.get(&edge.b1).expect("sv edge references a known breakend");
	let b = breakends.get(&edge.b2).expect("sv edge references a known breakend");
	Chain::open(Vec::new(), (ChainEnd::Breakend(make_open_end(a)), ChainEnd::Breakend(make_open_end(b))))
}

fn make_open_end(b: &Breakend) -> OpenEnd {
	OpenEnd { breakend_id: b.id.clone(), chr: b.chr.clone(), pos: b.pos, dir: b.dir }
}

fn end_id(end: &ChainEnd) -> Option<&str> {
	match end {
		ChainEnd::Breakend(e) => Some(&e.breakend_id),
		ChainEnd::Stub { .. } => None,
	}
}

/// Finds the (chain index, end index) whose open end is `id`, if any.
fn find_end(chains: &[Chain], id: &str) -> Option<(usize, usize)> {
	for (ci, c) in chains.iter().enumerate() {
		if c.is_closed {
			continue;
		}
		if let Some((e0, e1)) = &c.open_ends {
			if end_id(e0) == Some(id) {
				return Some((ci, 0));
			}
			if end_id(e1) == Some(id) {
				return Some((ci, 1));
			}
		}
	}
	None
}

fn reversed(chain: Chain) -> Chain {
	let mut segs = chain.segments;
	segs.reverse();
	for s in segs.iter_mut() {
		s.orientation = match s.orientation {
			Orientation::Forward => Orientation::Reverse,
			Orientation::Reverse => Orientation::Forward,
		};
	}
	let open_ends = chain.open_ends.map(|(a, b)| (b, a));
	Chain { segments: segs, is_closed: chain.is_closed, open_ends }
}

/// Orients `chain` so its end at `idx` becomes the tail (`open_ends.1`).
fn to_tail(chain: Chain, idx: usize) -> Chain {
	if idx == 1 {
		chain
	} else {
		reversed(chain)
	}
}

/// Orients `chain` so its end at `idx` becomes the head (`open_ends.0`).
fn to_head(chain: Chain, idx: usize) -> Chain {
	if idx == 0 {
		chain
	} else {
		reversed(chain)
	}
}

fn normalize_closure(chain: Chain) -> Chain {
	if chain.is_closed {
		return chain;
	}
	if let Some((a, b)) = &chain.open_ends {
		if let (ChainEnd::Breakend(ea), ChainEnd::Breakend(eb)) = (a, b) {
			if ea.breakend_id == eb.breakend_id {
				return Chain::closed(chain.segments);
			}
		}
	}
	chain
}

/// A bridging ref segment between two breakends on an applied TI edge.
/// Reverse-oriented iff the lower-position endpoint faces RIGHT and the
/// upper-position endpoint faces LEFT — a deletion-bridge-shaped interval
/// (§4.3 "Orientation of a spliced ref segment").
fn spliced_segment(a: &Breakend, b: &Breakend, ref_index: usize) -> WalkSegment {
	if a.chr == b.chr {
		let (lower, upper) = if a.pos <= b.pos { (a, b) } else { (b, a) };
		let orientation = if lower.dir == Direction::Right && upper.dir == Direction::Left {
			Orientation::Reverse
		} else {
			Orientation::Forward
		};
		WalkSegment { ref_index, chr: lower.chr.clone(), start: lower.pos, end: upper.pos, orientation }
	} else {
		WalkSegment { ref_index, chr: a.chr.clone(), start: a.pos, end: a.pos, orientation: Orientation::Forward }
	}
}

/// Attempts to apply one TI edge against the current chain set. Returns
/// `true` (and mutates `chains`/`used`) iff the edge matched at least one
/// chain's open end (§4.3 steps 2a-2c).
fn apply_edge(
	chains: &mut Vec<Chain>,
	breakends: &BreakendSet,
	edge: &Link,
	used: &mut HashSet<BreakendId>,
	next_index: &mut usize,
) -> bool {
	let m1 = find_end(chains, &edge.b1);
	let m2 = find_end(chains, &edge.b2);
	let a = breakends.get(&edge.b1).expect("ti edge references a known breakend");
	let b = breakends.get(&edge.b2).expect("ti edge references a known breakend");

	match (m1, m2) {
		(Some((i1, _)), Some((i2, _))) if i1 == i2 => {
			let chain = chains.remove(i1);
			let mut segs = chain.segments;
			segs.push(spliced_segment(a, b, *next_index));
			*next_index += 1;
			chains.push(Chain::closed(segs));
			used.insert(edge.b1.clone());
			used.insert(edge.b2.clone());
			true
		}
		(Some((i1, e1)), Some((i2, e2))) => {
			let mut by_side = HashMap::new();
			let mut ordered = vec![(i1, e1, EdgeSide::B1), (i2, e2, EdgeSide::B2)];
			ordered.sort_by(|x, y| y.0.cmp(&x.0));
			for (idx, _end, side) in ordered {
				by_side.insert(side, chains.remove(idx));
			}
			let chain1 = to_tail(by_side.remove(&EdgeSide::B1).unwrap(), e1);
			let chain2 = to_head(by_side.remove(&EdgeSide::B2).unwrap(), e2);
			let seg = spliced_segment(a, b, *next_index);
			*next_index += 1;
			let mut combined = chain1.segments;
			combined.push(seg);
			combined.extend(chain2.segments);
			let head = chain1.open_ends.unwrap().0;
			let tail = chain2.open_ends.unwrap().1;
			chains.push(normalize_closure(Chain::open(combined, (head, tail))));
			used.insert(edge.b1.clone());
			used.insert(edge.b2.clone());
			true
		}
		(Some((i1, e1)), None) => {
			append_one(chains, i1, e1, a, b, next_index);
			used.insert(edge.b1.clone());
			true
		}
		(None, Some((i2, e2))) => {
			append_one(chains, i2, e2, b, a, next_index);
			used.insert(edge.b2.clone());
			true
		}
		(None, None) => false,
	}
}

/// Appends `spliced_segment(matched, far)` to the chain at `idx` whose end
/// `end_idx` carries `matched`'s id, replacing that end with `far` (§4.3
/// step 2b, "one chain matches").
fn append_one(chains: &mut Vec<Chain>, idx: usize, end_idx: usize, matched: &Breakend, far: &Breakend, next_index: &mut usize) {
	let chain = chains.remove(idx);
	let mut segs = chain.segments;
	let open_ends = chain.open_ends.unwrap();
	let seg = spliced_segment(matched, far, *next_index);
	*next_index += 1;
	let new_end = ChainEnd::Breakend(make_open_end(far));
	let new_open_ends = if end_idx == 1 {
		segs.push(seg);
		(open_ends.0, new_end)
	} else {
		let mut new_segs = vec![seg];
		new_segs.extend(segs);
		segs = new_segs;
		(new_end, open_ends.1)
	};
	chains.push(normalize_closure(Chain::open(segs, new_open_ends)));
}

fn endpoint_edge_counts(edges: &[Link]) -> HashMap<BreakendId, usize> {
	let mut counts = HashMap::new();
	for e in edges {
		*counts.entry(e.b1.clone()).or_insert(0) += 1;
		*counts.entry(e.b2.clone()).or_insert(0) += 1;
	}
	counts
}

fn normalize_pair(a: &str, b: &str) -> (String, String) {
	if a <= b {
		(a.to_string(), b.to_string())
	} else {
		(b.to_string(), a.to_string())
	}
}

/// Pairs of breakend ids that are immediately consecutive on the same
/// chromosome when ALL breakends are sorted by `(chr, pos)` (§4.3 `ADJACENT`).
fn adjacent_pairs(breakends: &BreakendSet) -> HashSet<(String, String)> {
	let mut by_chr: BTreeMap<String, Vec<&Breakend>> = BTreeMap::new();
	for b in breakends.iter() {
		by_chr.entry(b.chr.clone()).or_default().push(b);
	}
	let mut pairs = HashSet::new();
	for list in by_chr.values_mut() {
		list.sort_by_key(|b| b.pos);
		for w in list.windows(2) {
			pairs.insert(normalize_pair(&w[0].id, &w[1].id));
		}
	}
	pairs
}

fn score_edge(edge: &Link, breakends: &BreakendSet, counts: &HashMap<BreakendId, usize>, adjacent: &HashSet<(String, String)>) -> f64 {
	let a = breakends.get(&edge.b1).expect("ti edge references a known breakend");
	let b = breakends.get(&edge.b2).expect("ti edge references a known breakend");
	let count_a = counts.get(&a.id).copied().unwrap_or(0);
	let count_b = counts.get(&b.id).copied().unwrap_or(0);
	if count_a == 1 || count_b == 1 {
		return 4.0;
	}
	if adjacent.contains(&normalize_pair(&a.id, &b.id)) {
		return 3.0;
	}
	if let (Some(ja), Some(jb)) = (a.jcn, b.jcn) {
		let tolerance = (0.5f64).max(a.jcn_uncertainty() + b.jcn_uncertainty());
		if (ja - jb).abs() < tolerance {
			return 2.0;
		}
	}
	1.0 / (1.0 + (a.pos - b.pos).abs() as f64)
}
