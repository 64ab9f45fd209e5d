//! Copy-number filter (§4.4): prunes TI edges over near-zero-CN intervals.

use serde::{Deserialize, Serialize};

use crate::breakend::BreakendSet;
use crate::builder::Link;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct CnSegment {
	pub chr: String,
	pub start: i64,
	pub end: i64,
	pub major_cn: f64,
	pub minor_cn: f64,
}

fn overlap_len(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
	(a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// The length-weighted mean of `(major + minor - background)` over the CN
/// segments overlapping `[start, end)` on `chr`, weighted by overlap length
/// rather than full CN-segment length (§9 "CN filter semantics").
fn weighted_mean_excess(cn_segments: &[CnSegment], chr: &str, start: i64, end: i64, background_ploidy: f64) -> Option<f64> {
	let mut weight_total = 0i64;
	let mut acc = 0.0;
	for cn in cn_segments {
		if cn.chr != chr {
			continue;
		}
		let w = overlap_len(start, end, cn.start, cn.end);
		if w <= 0 {
			continue;
		}
		acc += w as f64 * (cn.major_cn + cn.minor_cn - background_ploidy);
		weight_total += w;
	}
	if weight_total == 0 {
		None
	} else {
		Some(acc / weight_total as f64)
	}
}

/// Retains a TI edge iff its endpoints are cross-chromosome, or no CN
/// segment overlaps its interval, or the overlap-weighted mean excess CN is
/// at least `zero_jcn_threshold` (§4.4).
pub fn retain_ti_edge(
	edge: &Link,
	breakends: &BreakendSet,
	cn_segments: &[CnSegment],
	background_ploidy: f64,
	zero_jcn_threshold: f64,
) -> bool {
	let (Some(a), Some(b)) = (breakends.get(&edge.b1), breakends.get(&edge.b2)) else {
		return true;
	};
	if a.chr != b.chr {
		return true;
	}
	let (start, end) = (a.pos.min(b.pos), a.pos.max(b.pos));
	match weighted_mean_excess(cn_segments, &a.chr, start, end, background_ploidy) {
		None => true,
		Some(mean) => mean >= zero_jcn_threshold,
	}
}

pub fn filter_ti_edges(
	edges: Vec<Link>,
	breakends: &BreakendSet,
	cn_segments: &[CnSegment],
	background_ploidy: f64,
	zero_jcn_threshold: f64,
) -> Vec<Link> {
	edges
		.into_iter()
		.filter(|e| retain_ti_edge(e, breakends, cn_segments, background_ploidy, zero_jcn_threshold))
		.collect()
}
