//! CLI-boundary errors (§7). The core treats malformed input as skippable
//! data, not a hard error; this type exists only at the process boundary,
//! for I/O and (de)serialization failures the core itself never raises.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
	#[error("invalid json: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid yaml: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
