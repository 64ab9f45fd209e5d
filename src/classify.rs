//! Classifier (§4.6): labels a single chain.

use serde::{Deserialize, Serialize};

use crate::breakend::Direction;
use crate::model::{Chain, ChainEnd};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Label {
	#[serde(rename = "DEL")]
	Del,
	#[serde(rename = "DUP")]
	Dup,
	#[serde(rename = "INV")]
	Inv,
	#[serde(rename = "TRA")]
	Tra,
	#[serde(rename = "COMPLEX")]
	Complex,
	#[serde(rename = "UNKNOWN")]
	Unknown,
}

/// Classifies a chain per the rule table, most specific condition first.
pub fn classify(chain: &Chain) -> Label {
	if chain.is_closed {
		return Label::Complex;
	}
	let (e1, e2) = chain.open_ends.as_ref().expect("an open chain carries open ends");
	let n = chain.segments.len();
	let chromosomes = distinct_chromosomes(chain);

	if n <= 1 {
		if e1.chr() != e2.chr() {
			return Label::Tra;
		}
		if let (Some(d1), Some(d2)) = (e1.dir(), e2.dir()) {
			let (lower, upper) = order_by_pos(e1, d1, e2, d2);
			return match (lower, upper) {
				(Direction::Right, Direction::Left) => Label::Del,
				(Direction::Left, Direction::Right) => Label::Dup,
				_ if d1 == d2 => Label::Inv,
				_ => Label::Unknown,
			};
		}
		return Label::Unknown;
	}

	if chromosomes.len() > 1 {
		return if n <= 2 { Label::Tra } else { Label::Complex };
	}

	if n == 2 && chain.segments.iter().any(|s| s.orientation == crate::model::Orientation::Reverse) {
		return Label::Inv;
	}

	if n > 2 {
		return Label::Complex;
	}

	Label::Unknown
}

fn distinct_chromosomes(chain: &Chain) -> Vec<&str> {
	let mut chrs: Vec<&str> = chain.segments.iter().map(|s| s.chr.as_str()).collect();
	chrs.sort_unstable();
	chrs.dedup();
	chrs
}

/// Orders two same-chromosome ends by position, returning `(lower.dir,
/// upper.dir)`; falls back to `(d1, d2)` when positions tie.
fn order_by_pos(e1: &ChainEnd, d1: Direction, e2: &ChainEnd, d2: Direction) -> (Direction, Direction) {
	if e1.pos() <= e2.pos() {
		(d1, d2)
	} else {
		(d2, d1)
	}
}
