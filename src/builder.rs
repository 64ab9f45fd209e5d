//! Graph builder (§4.1): turns a breakend set into SV / TI / DB edge lists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::breakend::{Breakend, BreakendId, BreakendSet, Direction};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LinkKind {
	Sv,
	Ti,
	Db,
}

/// An undirected edge between two breakends.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Link {
	pub kind: LinkKind,
	pub b1: BreakendId,
	pub b2: BreakendId,
}

impl Link {
	fn new(kind: LinkKind, b1: &Breakend, b2: &Breakend) -> Self {
		Self { kind, b1: b1.id.clone(), b2: b2.id.clone() }
	}

	pub fn other(&self, id: &str) -> Option<&BreakendId> {
		if self.b1 == id {
			Some(&self.b2)
		} else if self.b2 == id {
			Some(&self.b1)
		} else {
			None
		}
	}
}

pub struct BuiltGraph {
	pub sv_edges: Vec<Link>,
	pub ti_edges: Vec<Link>,
	pub db_edges: Vec<Link>,
}

/// `a` (at the lower position) and `b` (at the higher position) face inward:
/// the interval between them is retained (§3).
fn faces_inward(a: &Breakend, b: &Breakend) -> bool {
	a.dir == Direction::Left && b.dir == Direction::Right
}

/// `a`/`b` form a deletion bridge: the interval between them is lost (§3).
fn is_deletion_bridge(a: &Breakend, b: &Breakend) -> bool {
	a.dir == Direction::Right && b.dir == Direction::Left
}

/// Breakends on one chromosome, sorted by (pos, id) for a stable,
/// deterministic pair enumeration order.
fn sorted_on_chr<'a>(breakends: &'a BreakendSet, chr: &str) -> Vec<&'a Breakend> {
	let mut v: Vec<&Breakend> = breakends.iter().filter(|b| b.chr == chr).collect();
	v.sort_by(|a, b| a.pos.cmp(&b.pos).then_with(|| a.id.cmp(&b.id)));
	v
}

fn distinct_chromosomes(breakends: &BreakendSet) -> Vec<String> {
	let mut chrs: BTreeSet<String> = BTreeSet::new();
	for b in breakends.iter() {
		chrs.insert(b.chr.clone());
	}
	chrs.into_iter().collect()
}

pub fn build_links(breakends: &BreakendSet) -> BuiltGraph {
	BuiltGraph {
		sv_edges: build_sv_edges(breakends),
		ti_edges: build_same_chr_edges(breakends, LinkKind::Ti, faces_inward),
		db_edges: build_same_chr_edges(breakends, LinkKind::Db, is_deletion_bridge),
	}
}

fn build_sv_edges(breakends: &BreakendSet) -> Vec<Link> {
	let mut seen: BTreeSet<(BreakendId, BreakendId)> = BTreeSet::new();
	let mut edges = Vec::new();
	for b in breakends.iter() {
		if let Some(mate) = breakends.mate_of(b) {
			let key = if b.id <= mate.id {
				(b.id.clone(), mate.id.clone())
			} else {
				(mate.id.clone(), b.id.clone())
			};
			if seen.insert(key) {
				edges.push(Link::new(LinkKind::Sv, b, mate));
			}
		}
	}
	edges
}

fn build_same_chr_edges(
	breakends: &BreakendSet,
	kind: LinkKind,
	test: fn(&Breakend, &Breakend) -> bool,
) -> Vec<Link> {
	let mut edges = Vec::new();
	for chr in distinct_chromosomes(breakends) {
		let on_chr = sorted_on_chr(breakends, &chr);
		for i in 0..on_chr.len() {
			for j in i..on_chr.len() {
				let (a, b) = (on_chr[i], on_chr[j]);
				if a.id == b.id {
					continue;
				}
				if breakends.mate_of(a).map(|m| m.id == b.id).unwrap_or(false) {
					continue;
				}
				if test(a, b) {
					edges.push(Link::new(kind, a, b));
				}
			}
		}
	}
	edges
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::breakend::Direction;

	fn bnd(id: &str, chr: &str, pos: i64, dir: Direction, mate_id: Option<&str>, mate_chr: &str, mate_pos: i64, mate_dir: Direction) -> Breakend {
		Breakend {
			id: id.to_string(),
			chr: chr.to_string(),
			pos,
			dir,
			mate_id: mate_id.map(|s| s.to_string()),
			mate_chr: mate_chr.to_string(),
			mate_pos,
			mate_dir,
			event: None,
			jcn: None,
			jcn_unc: None,
		}
	}

	#[test]
	fn sv_edges_deduped_and_dangling_mates_skipped() {
		let set = BreakendSet::new(vec![
			bnd("a", "chr1", 1000, Direction::Right, Some("b"), "chr1", 2000, Direction::Left),
			bnd("b", "chr1", 2000, Direction::Left, Some("a"), "chr1", 1000, Direction::Right),
			bnd("c", "chr1", 3000, Direction::Right, Some("ghost"), "chr1", 4000, Direction::Left),
		]);
		let g = build_links(&set);
		assert_eq!(g.sv_edges.len(), 1);
		assert_eq!(g.sv_edges[0].kind, LinkKind::Sv);
	}

	#[test]
	fn ti_and_db_edges_distinguish_facing() {
		// c(1000,LEFT)..d(2000,RIGHT): inward (TI). e(1000,RIGHT)..f(2000,LEFT): bridge (DB).
		let set = BreakendSet::new(vec![
			bnd("c", "chr1", 1000, Direction::Left, None, "chr1", 1000, Direction::Left),
			bnd("d", "chr1", 2000, Direction::Right, None, "chr1", 2000, Direction::Right),
		]);
		let g = build_links(&set);
		assert_eq!(g.ti_edges.len(), 1);
		assert!(g.db_edges.is_empty());

		let set = BreakendSet::new(vec![
			bnd("e", "chr1", 1000, Direction::Right, None, "chr1", 1000, Direction::Right),
			bnd("f", "chr1", 2000, Direction::Left, None, "chr1", 2000, Direction::Left),
		]);
		let g = build_links(&set);
		assert!(g.ti_edges.is_empty());
		assert_eq!(g.db_edges.len(), 1);
	}

	#[test]
	fn mate_pairs_excluded_from_ti_even_if_facing() {
		let set = BreakendSet::new(vec![
			bnd("a", "chr1", 1000, Direction::Left, Some("b"), "chr1", 2000, Direction::Right),
			bnd("b", "chr1", 2000, Direction::Right, Some("a"), "chr1", 1000, Direction::Left),
		]);
		let g = build_links(&set);
		assert!(g.ti_edges.is_empty());
	}
}
