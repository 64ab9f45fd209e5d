//! Shared breakend builder for the per-stage scenario suites.

use derive_chromo::{Breakend, Direction};

pub fn bnd(id: &str, chr: &str, pos: i64, dir: Direction, mate_id: Option<&str>, mate_chr: &str, mate_pos: i64, mate_dir: Direction) -> Breakend {
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
