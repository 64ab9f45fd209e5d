//! The segment-graph walker: the deterministic reconstructor.
//!
//! Generalizes a half-edge graph model (`p1`/`p2`/`other`) to a
//! node-with-two-ports model, and a `strongly_connected_components`/
//! `is_orphan` pairing to a "free-port walk, then closed-loop sweep over
//! the leftovers" two-pass traversal.

use serde::{Deserialize, Serialize};

use crate::breakend::{Breakend, BreakendId, BreakendSet, Direction};
use crate::model::{Chain, ChainEnd, OpenEnd, Orientation, WalkSegment};
use crate::options::RunOptions;
use crate::segment::{Port, RefSegment, SegmentTable, Side};

/// The port-to-port wiring derived from breakend severing and default
/// reference adjacency (§4.2 "Wiring").
///
/// Each port's connection is resolved independently of its boundary partner:
/// a port severed by a matching-direction breakend points at that breakend's
/// mate (or nowhere, if the mate is unresolved); an unsevered port defaults
/// to its immediate reference neighbor, even if that neighbor was itself
/// redirected elsewhere. The "normal reference adjacency" case in §4.2 falls
/// out of this as the case where both ports at a boundary default to each
/// other; a deleted interval (severed on both flanking boundaries but itself
/// unsevered) ends up with both its ports defaulting into already-claimed
/// neighbors, making it unreachable from either free end.
struct Wiring {
	/// indexed by `Port::flat()`; `None` means free.
	connections: Vec<Option<Port>>,
	/// the breakend that claimed a given port via severing, if any.
	owner: Vec<Option<BreakendId>>,
}

impl Wiring {
	fn build(table: &SegmentTable, breakends: &BreakendSet) -> Self {
		let n = table.len();
		let mut connections = vec![None; 2 * n];
		let mut owner = vec![None; 2 * n];

		let chrs: Vec<String> = table.chromosomes().cloned().collect();
		for chr in chrs {
			let boundaries: Vec<(i64, usize, usize)> = table.boundaries_on(&chr).collect();
			for (pos, left_idx, right_idx) in boundaries {
				let right_port = Port::new(left_idx, Side::Right);
				let left_port = Port::new(right_idx, Side::Left);

				match at(breakends, &chr, pos, Direction::Right) {
					Some(b) => {
						owner[right_port.flat()] = Some(b.id.clone());
						connections[right_port.flat()] = mate_port(table, breakends, b);
					}
					None => connections[right_port.flat()] = Some(left_port),
				}
				match at(breakends, &chr, pos, Direction::Left) {
					Some(b) => {
						owner[left_port.flat()] = Some(b.id.clone());
						connections[left_port.flat()] = mate_port(table, breakends, b);
					}
					None => connections[left_port.flat()] = Some(right_port),
				}
			}
		}

		Self { connections, owner }
	}

	fn connection(&self, p: Port) -> Option<Port> {
		self.connections[p.flat()]
	}

	fn is_free(&self, p: Port) -> bool {
		self.connection(p).is_none()
	}

	fn owner_of(&self, p: Port) -> Option<&BreakendId> {
		self.owner[p.flat()].as_ref()
	}
}

/// The first breakend (by id, for determinism) at `(chr, pos)` facing `dir`.
fn at<'a>(breakends: &'a BreakendSet, chr: &str, pos: i64, dir: Direction) -> Option<&'a Breakend> {
	breakends
		.iter()
		.filter(|b| b.chr == chr && b.pos == pos && b.dir == dir)
		.min_by(|a, b| a.id.cmp(&b.id))
}

fn mate_port(table: &SegmentTable, breakends: &BreakendSet, b: &Breakend) -> Option<Port> {
	let mate = breakends.mate_of(b)?;
	match mate.dir {
		Direction::Right => table.port_for_right(&mate.chr, mate.pos),
		Direction::Left => table.port_for_left(&mate.chr, mate.pos),
	}
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReconstructResult {
	pub chains: Vec<Chain>,
	pub orphan_indices: Vec<usize>,
	pub ref_segments: Vec<RefSegment>,
}

/// Runs the deterministic walker over a breakend set (§4.2, §6 `reconstruct`).
pub fn reconstruct(breakends: &BreakendSet, options: &RunOptions) -> ReconstructResult {
	let table = SegmentTable::build(breakends, options.pad);
	let wiring = Wiring::build(&table, breakends);
	let n = table.len();
	let mut committed = vec![false; n];
	let mut chains = Vec::new();

	for start in free_ports_in_order(n, &wiring) {
		if committed[start.index] {
			continue;
		}
		if let Some(chain) = walk_chain(&table, &wiring, breakends, &mut committed, start) {
			chains.push(chain);
		}
	}

	for i in 0..n {
		if committed[i] {
			continue;
		}
		if let Some(chain) = try_close_loop(&table, &wiring, &mut committed, i) {
			chains.push(chain);
		}
	}

	let orphan_indices = (0..n).filter(|&i| !committed[i]).collect();
	ReconstructResult { chains, orphan_indices, ref_segments: table.segments }
}

/// All free ports, LEFT group first then RIGHT group, each ascending by
/// segment index (§4.2 "Traversal").
fn free_ports_in_order(n: usize, wiring: &Wiring) -> Vec<Port> {
	let mut ports = Vec::new();
	for idx in 0..n {
		let p = Port::new(idx, Side::Left);
		if wiring.is_free(p) {
			ports.push(p);
		}
	}
	for idx in 0..n {
		let p = Port::new(idx, Side::Right);
		if wiring.is_free(p) {
			ports.push(p);
		}
	}
	ports
}

fn chain_end(table: &SegmentTable, breakends: &BreakendSet, wiring: &Wiring, p: Port) -> ChainEnd {
	match wiring.owner_of(p) {
		Some(id) => {
			let b = breakends.get(id).expect("wiring owner refers to a known breakend");
			ChainEnd::Breakend(OpenEnd { breakend_id: b.id.clone(), chr: b.chr.clone(), pos: b.pos, dir: b.dir })
		}
		None => {
			let seg = &table.segments[p.index];
			let pos = match p.side {
				Side::Left => seg.start,
				Side::Right => seg.end,
			};
			ChainEnd::Stub { chr: seg.chr.clone(), pos }
		}
	}
}

/// Walks from a free port, committing segments as it goes, until it hits a
/// dead free end or a segment already committed in this or an earlier
/// traversal (§4.2 "Traversal").
fn walk_chain(
	table: &SegmentTable,
	wiring: &Wiring,
	breakends: &BreakendSet,
	committed: &mut [bool],
	start: Port,
) -> Option<Chain> {
	let mut segs = Vec::new();
	let mut current = start;
	let mut end_port = start;
	loop {
		let i = current.index;
		if committed[i] {
			end_port = current;
			break;
		}
		committed[i] = true;
		let seg = &table.segments[i];
		segs.push(WalkSegment {
			ref_index: i,
			chr: seg.chr.clone(),
			start: seg.start,
			end: seg.end,
			orientation: Orientation::from(current.side),
		});
		let exit = current.opposite();
		match wiring.connection(exit) {
			Some(next) => current = next,
			None => {
				end_port = exit;
				break;
			}
		}
	}
	if segs.is_empty() {
		return None;
	}
	let start_end = chain_end(table, breakends, wiring, start);
	let final_end = chain_end(table, breakends, wiring, end_port);
	Some(Chain::open(segs, (start_end, final_end)))
}

/// Attempts to close a loop starting at segment `start_index`'s L-port,
/// committing nothing if the attempt fails to return cleanly to its own
/// start (§4.2 "Closed loops"): a dangling traversal that runs into a
/// segment already committed by a prior pass leaves that segment an orphan
/// rather than a malformed chain.
fn try_close_loop(table: &SegmentTable, wiring: &Wiring, committed: &mut [bool], start_index: usize) -> Option<Chain> {
	let mut segs: Vec<WalkSegment> = Vec::new();
	let mut current = Port::new(start_index, Side::Left);
	loop {
		let i = current.index;
		if i == start_index && !segs.is_empty() {
			for s in &segs {
				committed[s.ref_index] = true;
			}
			return Some(Chain::closed(segs));
		}
		if committed[i] {
			return None;
		}
		let seg = &table.segments[i];
		segs.push(WalkSegment {
			ref_index: i,
			chr: seg.chr.clone(),
			start: seg.start,
			end: seg.end,
			orientation: Orientation::from(current.side),
		});
		let exit = current.opposite();
		match wiring.connection(exit) {
			Some(next) => current = next,
			None => return None,
		}
	}
}
