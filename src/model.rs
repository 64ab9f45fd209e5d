//! Shared chain representation produced by both reconstructors (§3).

use serde::{Deserialize, Serialize};

use crate::breakend::{BreakendId, Chrom, Direction};
use crate::segment::Side;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
	#[serde(rename = "FORWARD")]
	Forward,
	#[serde(rename = "REVERSE")]
	Reverse,
}

impl From<Side> for Orientation {
	fn from(side: Side) -> Self {
		match side {
			Side::Left => Orientation::Forward,
			Side::Right => Orientation::Reverse,
		}
	}
}

/// One entry in an output chain: a traversed reference interval.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct WalkSegment {
	pub ref_index: usize,
	pub chr: Chrom,
	pub start: i64,
	pub end: i64,
	pub orientation: Orientation,
}

/// The breakend responsible for one open end of a non-closed chain.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct OpenEnd {
	pub breakend_id: BreakendId,
	pub chr: Chrom,
	pub pos: i64,
	pub dir: Direction,
}

/// One open end of a chain: either a genuine junction (a breakend) or a
/// synthetic chromosome-boundary stub with no associated breakend.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "kind")]
pub enum ChainEnd {
	Stub { chr: Chrom, pos: i64 },
	Breakend(OpenEnd),
}

impl ChainEnd {
	pub fn chr(&self) -> &str {
		match self {
			ChainEnd::Stub { chr, .. } => chr,
			ChainEnd::Breakend(e) => &e.chr,
		}
	}

	pub fn pos(&self) -> i64 {
		match self {
			ChainEnd::Stub { pos, .. } => *pos,
			ChainEnd::Breakend(e) => e.pos,
		}
	}

	pub fn dir(&self) -> Option<Direction> {
		match self {
			ChainEnd::Stub { .. } => None,
			ChainEnd::Breakend(e) => Some(e.dir),
		}
	}
}

/// An ordered, oriented sequence of reference intervals: one derivative
/// chromosome (or fragment thereof).
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Chain {
	pub segments: Vec<WalkSegment>,
	pub is_closed: bool,
	/// `None` iff `is_closed`.
	pub open_ends: Option<(ChainEnd, ChainEnd)>,
}

impl Chain {
	pub fn open(segments: Vec<WalkSegment>, open_ends: (ChainEnd, ChainEnd)) -> Self {
		Self { segments, is_closed: false, open_ends: Some(open_ends) }
	}

	pub fn closed(segments: Vec<WalkSegment>) -> Self {
		Self { segments, is_closed: true, open_ends: None }
	}
}
