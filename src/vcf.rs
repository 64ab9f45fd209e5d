//! VCF BND record parsing (§6 "input boundary contract").
//!
//! A malformed ALT or a non-BND record is a skippable fact, not an error
//! (§7): `parse_vcf_bnd` returns one `Breakend` per line it could make sense
//! of and silently drops the rest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::breakend::{Breakend, Direction};

/// `t[p:q[` or `t]p:q]` — the breakend's own direction is RIGHT.
static ALT_SUFFIX: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z.]+(?P<bracket>[\[\]])(?P<chrom>[^:\[\]]+):(?P<pos>\d+)[\[\]]$").expect("ALT breakend pattern is a fixed, valid regex"));

/// `]p:q]t` or `[p:q[t` — the breakend's own direction is LEFT.
static ALT_PREFIX: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^(?P<bracket>[\[\]])(?P<chrom>[^:\[\]]+):(?P<pos>\d+)[\[\]][A-Za-z.]+$").expect("ALT breakend pattern is a fixed, valid regex"));

fn info_get<'a>(info: &'a str, key: &str) -> Option<&'a str> {
	info.split(';').find_map(|kv| {
		let mut parts = kv.splitn(2, '=');
		let k = parts.next()?;
		let v = parts.next();
		if k == key {
			v
		} else {
			None
		}
	})
}

/// Parses one ALT field into `(dir, mate_chr, mate_pos, mate_dir)` per the
/// four VCF 4.3 breakend patterns, or `None` if it doesn't match any of them.
fn parse_alt(alt: &str) -> Option<(Direction, String, i64, Direction)> {
	if let Some(caps) = ALT_SUFFIX.captures(alt) {
		let chrom = caps.name("chrom")?.as_str().to_string();
		let pos: i64 = caps.name("pos")?.as_str().parse().ok()?;
		let mate_dir = if caps.name("bracket")?.as_str() == "[" { Direction::Right } else { Direction::Left };
		return Some((Direction::Right, chrom, pos, mate_dir));
	}
	if let Some(caps) = ALT_PREFIX.captures(alt) {
		let chrom = caps.name("chrom")?.as_str().to_string();
		let pos: i64 = caps.name("pos")?.as_str().parse().ok()?;
		let mate_dir = if caps.name("bracket")?.as_str() == "[" { Direction::Right } else { Direction::Left };
		return Some((Direction::Left, chrom, pos, mate_dir));
	}
	None
}

/// Parses one VCF data line into a `Breakend`, if it is a well-formed
/// `SVTYPE=BND` record. Lines starting with `#`, lines with fewer than 8
/// tab-separated columns, non-BND records, and unparseable ALT fields all
/// yield `None` (§7 "Malformed ALT -> record dropped, no warning required").
pub fn parse_vcf_bnd_line(line: &str) -> Option<Breakend> {
	if line.starts_with('#') || line.trim().is_empty() {
		return None;
	}
	let cols: Vec<&str> = line.split('\t').collect();
	if cols.len() < 8 {
		return None;
	}
	let (chrom, pos_str, id, _ref, alt, _qual, _filter, info) = (cols[0], cols[1], cols[2], cols[3], cols[4], cols[5], cols[6], cols[7]);
	if info_get(info, "SVTYPE") != Some("BND") {
		return None;
	}
	let pos: i64 = pos_str.parse().ok()?;
	let (dir, mate_chr, mate_pos, mate_dir) = parse_alt(alt)?;

	let mate_id = info_get(info, "MATEID").map(|s| s.to_string());
	let event = info_get(info, "EVENT").map(|s| s.to_string());
	let jcn = info_get(info, "JCN").and_then(|s| s.parse().ok());
	let jcn_unc = info_get(info, "JCNUNCERT").and_then(|s| s.parse().ok());

	Some(Breakend {
		id: id.to_string(),
		chr: chrom.to_string(),
		pos,
		dir,
		mate_id,
		mate_chr,
		mate_pos,
		mate_dir,
		event,
		jcn,
		jcn_unc,
	})
}

/// Parses every BND record out of a full VCF text body.
pub fn parse_vcf_bnd(text: &str) -> Vec<Breakend> {
	text.lines().filter_map(parse_vcf_bnd_line).collect()
}
