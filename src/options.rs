//! Run configuration: the knobs shared by the CN filter, the chaining
//! engine, and clustering, loadable from YAML via `serde_yaml::from_reader`.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct RunOptions {
	pub background_ploidy: f64,
	pub proximity_threshold: i64,
	pub zero_jcn_threshold: f64,
	pub pad: i64,
}

impl Default for RunOptions {
	fn default() -> Self {
		Self { background_ploidy: 2.0, proximity_threshold: 5000, zero_jcn_threshold: 0.15, pad: 1000 }
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn defaults_match_the_documented_values() {
		let opts = RunOptions::default();
		assert_eq!(opts.background_ploidy, 2.0);
		assert_eq!(opts.proximity_threshold, 5000);
		assert_eq!(opts.zero_jcn_threshold, 0.15);
		assert_eq!(opts.pad, 1000);
	}

	#[test]
	fn partial_yaml_fills_in_remaining_defaults() {
		let opts: RunOptions = serde_yaml::from_str("background_ploidy: 3.0\n").unwrap();
		assert_eq!(opts.background_ploidy, 3.0);
		assert_eq!(opts.proximity_threshold, 5000);
	}
}
