//! Reference segments and the two-port model used to wire them.
//!
//! Generalizes a half-edge language (`p1`/`p2`/`other`) to a node with
//! exactly two named sides instead of an edge with
//! two named ends: every ref segment has an `L` port and an `R` port, and a
//! port is addressed as a flat index (`2 * segment_index + side`), just as
//! the design notes call for.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::breakend::{BreakendSet, Chrom};

/// Default synthetic boundary stub width, matching `RunOptions::default().pad`.
pub const PAD: i64 = 1000;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
	Left,
	Right,
}

/// A port is one side of one ref segment, addressable as `2*index + side`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Port {
	pub index: usize,
	pub side: Side,
}

impl Port {
	pub fn new(index: usize, side: Side) -> Self {
		Self { index, side }
	}

	/// Flat array address, per the design notes (`2*segment_index + side`).
	pub fn flat(self) -> usize {
		2 * self.index + match self.side {
			Side::Left => 0,
			Side::Right => 1,
		}
	}

	pub fn from_flat(flat: usize) -> Self {
		Port::new(flat / 2, if flat % 2 == 0 { Side::Left } else { Side::Right })
	}

	pub fn opposite(self) -> Port {
		Port::new(
			self.index,
			match self.side {
				Side::Left => Side::Right,
				Side::Right => Side::Left,
			},
		)
	}
}

/// A contiguous, half-open reference interval, dense-indexed across all
/// chromosomes in lexicographic chromosome order.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct RefSegment {
	pub index: usize,
	pub chr: Chrom,
	pub start: i64,
	pub end: i64,
}

/// The full set of ref segments for a breakend set, plus the lookups needed
/// to map a breakend's (chr, pos, dir) to the port it drives.
pub struct SegmentTable {
	pub segments: Vec<RefSegment>,
	/// chromosome -> sorted segment indices on that chromosome
	by_chr: IndexMap<Chrom, Vec<usize>>,
	/// (chr, boundary position) -> (index of segment ending there, index of segment starting there)
	boundary_at: BTreeMap<(Chrom, i64), (usize, usize)>,
}

impl SegmentTable {
	/// Segments each chromosome observed in `breakends` at its distinct
	/// breakend positions, with synthetic `[0, pad]` stub boundaries (§4.2).
	pub fn build(breakends: &BreakendSet, pad: i64) -> Self {
		let mut positions: IndexMap<Chrom, Vec<i64>> = IndexMap::new();
		for b in breakends.iter() {
			positions.entry(b.chr.clone()).or_default().push(b.pos);
		}
		let mut chrs: Vec<Chrom> = positions.keys().cloned().collect();
		chrs.sort();

		let mut segments = Vec::new();
		let mut by_chr = IndexMap::new();
		let mut boundary_at = BTreeMap::new();

		for chr in chrs {
			let mut ps = positions.remove(&chr).unwrap();
			ps.sort_unstable();
			ps.dedup();
			let mut boundaries = vec![0i64];
			boundaries.extend(ps.iter().copied());
			boundaries.push(ps.last().copied().unwrap_or(0) + pad);

			let mut indices = Vec::with_capacity(boundaries.len() - 1);
			for w in boundaries.windows(2) {
				let (start, end) = (w[0], w[1]);
				let index = segments.len();
				segments.push(RefSegment { index, chr: chr.clone(), start, end });
				indices.push(index);
			}
			for w in indices.windows(2) {
				let left = segments[w[0]].end;
				boundary_at.insert((chr.clone(), left), (w[0], w[1]));
			}
			by_chr.insert(chr, indices);
		}

		Self { segments, by_chr, boundary_at }
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn chromosomes(&self) -> impl Iterator<Item = &Chrom> {
		self.by_chr.keys()
	}

	pub fn segments_on(&self, chr: &str) -> &[usize] {
		self.by_chr.get(chr).map(|v| v.as_slice()).unwrap_or(&[])
	}

	/// All interior boundary positions on `chr`, ascending, with the segment
	/// pair (left, right) straddling each.
	pub fn boundaries_on(&self, chr: &str) -> impl Iterator<Item = (i64, usize, usize)> + '_ {
		self.boundary_at
			.range((chr.to_string(), i64::MIN)..(chr.to_string(), i64::MAX))
			.map(|((_, pos), &(l, r))| (*pos, l, r))
	}

	/// A RIGHT-facing breakend at `pos` on `chr` maps to the R-port of the
	/// segment whose end equals `pos` (§4.2).
	pub fn port_for_right(&self, chr: &str, pos: i64) -> Option<Port> {
		self.segments_on(chr)
			.iter()
			.find(|&&i| self.segments[i].end == pos)
			.map(|&i| Port::new(i, Side::Right))
	}

	/// A LEFT-facing breakend at `pos` on `chr` maps to the L-port of the
	/// segment whose start equals `pos` (§4.2).
	pub fn port_for_left(&self, chr: &str, pos: i64) -> Option<Port> {
		self.segments_on(chr)
			.iter()
			.find(|&&i| self.segments[i].start == pos)
			.map(|&i| Port::new(i, Side::Left))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::breakend::{Breakend, Direction};

	fn bnd(id: &str, chr: &str, pos: i64, dir: Direction) -> Breakend {
		Breakend {
			id: id.to_string(),
			chr: chr.to_string(),
			pos,
			dir,
			mate_id: None,
			mate_chr: chr.to_string(),
			mate_pos: pos,
			mate_dir: dir,
			event: None,
			jcn: None,
			jcn_unc: None,
		}
	}

	#[test]
	fn deletion_scenario_segments() {
		let set = BreakendSet::new(vec![
			bnd("a", "chr1", 1000, Direction::Right),
			bnd("b", "chr1", 2000, Direction::Left),
		]);
		let table = SegmentTable::build(&set, PAD);
		assert_eq!(table.len(), 3);
		assert_eq!(table.segments[0].start, 0);
		assert_eq!(table.segments[0].end, 1000);
		assert_eq!(table.segments[1].start, 1000);
		assert_eq!(table.segments[1].end, 2000);
		assert_eq!(table.segments[2].start, 2000);
		assert_eq!(table.segments[2].end, 2000 + PAD);
	}

	#[test]
	fn port_mapping_matches_direction() {
		let set = BreakendSet::new(vec![
			bnd("a", "chr1", 1000, Direction::Right),
			bnd("b", "chr1", 2000, Direction::Left),
		]);
		let table = SegmentTable::build(&set, PAD);
		assert_eq!(table.port_for_right("chr1", 1000), Some(Port::new(0, Side::Right)));
		assert_eq!(table.port_for_left("chr1", 2000), Some(Port::new(2, Side::Left)));
	}

	#[test]
	fn port_flat_roundtrip() {
		let p = Port::new(5, Side::Right);
		assert_eq!(Port::from_flat(p.flat()), p);
		let p = Port::new(0, Side::Left);
		assert_eq!(Port::from_flat(p.flat()), p);
	}
}
