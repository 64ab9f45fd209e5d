//! Thin CLI wrapping the library for batch use: one subcommand per core
//! operation.

use clap::{crate_version, App, Arg, SubCommand};

use derive_chromo::breakend::BreakendSet;
use derive_chromo::cn::CnSegment;
use derive_chromo::error::Result;
use derive_chromo::model::Chain;
use derive_chromo::options::RunOptions;
use derive_chromo::{classify, cluster, derive, parse_vcf_bnd, reconstruct};

fn load_breakends(vcf_path: &str) -> Result<BreakendSet> {
	let text = std::fs::read_to_string(vcf_path)?;
	let total_lines = text.lines().count();
	let breakends = parse_vcf_bnd(&text);
	log::info!("parsed {} breakend(s) from {} line(s)", breakends.len(), total_lines);
	if breakends.len() < total_lines {
		log::warn!("{} line(s) were not well-formed SVTYPE=BND records and were skipped", total_lines - breakends.len());
	}
	Ok(BreakendSet::new(breakends))
}

fn load_options(path: Option<&str>) -> Result<RunOptions> {
	match path {
		Some(p) => {
			let f = std::fs::File::open(p)?;
			Ok(serde_yaml::from_reader(f)?)
		}
		None => Ok(RunOptions::default()),
	}
}

fn load_cn_segments(path: Option<&str>) -> Result<Vec<CnSegment>> {
	match path {
		Some(p) => {
			let f = std::fs::File::open(p)?;
			Ok(serde_json::from_reader(f)?)
		}
		None => Ok(Vec::new()),
	}
}

fn write_json<T: serde::Serialize>(path: &str, value: &T) -> Result<()> {
	let f = std::fs::File::create(path)?;
	serde_json::to_writer(f, value)?;
	Ok(())
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));
	let matches = App::new("derive-chromo")
		.version(crate_version!())
		.about("Reconstructs derivative chromosomes from structural-variant breakend records")
		.subcommand(
			SubCommand::with_name("reconstruct")
				.about("Run the deterministic segment-graph walker")
				.arg(Arg::with_name("vcf").long("vcf").takes_value(true).required(true).help("Input VCF path"))
				.arg(Arg::with_name("options").long("options").takes_value(true).help("Run options YAML path"))
				.arg(Arg::with_name("output").long("output").takes_value(true).required(true).help("Output JSON path")),
		)
		.subcommand(
			SubCommand::with_name("derive")
				.about("Run the greedy chaining engine")
				.arg(Arg::with_name("vcf").long("vcf").takes_value(true).required(true).help("Input VCF path"))
				.arg(Arg::with_name("cn-segments").long("cn-segments").takes_value(true).help("CN segment JSON path"))
				.arg(Arg::with_name("options").long("options").takes_value(true).help("Run options YAML path"))
				.arg(Arg::with_name("output").long("output").takes_value(true).required(true).help("Output JSON path")),
		)
		.subcommand(
			SubCommand::with_name("classify")
				.about("Label a set of previously-reconstructed chains")
				.arg(Arg::with_name("chains").long("chains").takes_value(true).required(true).help("Chains JSON path (the `chains` array from reconstruct/derive output)"))
				.arg(Arg::with_name("output").long("output").takes_value(true).required(true).help("Output JSON path")),
		)
		.subcommand(
			SubCommand::with_name("cluster")
				.about("Group breakends by event, mate linkage, and proximity")
				.arg(Arg::with_name("vcf").long("vcf").takes_value(true).required(true).help("Input VCF path"))
				.arg(Arg::with_name("proximity").long("proximity").takes_value(true).help("Proximity window (default 5000)"))
				.arg(Arg::with_name("output").long("output").takes_value(true).required(true).help("Output JSON path")),
		)
		.get_matches();

	if let Some(matches) = matches.subcommand_matches("reconstruct") {
		let breakends = load_breakends(matches.value_of("vcf").unwrap())?;
		let options = load_options(matches.value_of("options"))?;
		log::trace!("tracing enabled");
		let result = reconstruct(&breakends, &options);
		log::info!("reconstructed {} chain(s), {} orphan(s)", result.chains.len(), result.orphan_indices.len());
		write_json(matches.value_of("output").unwrap(), &result)?;
	} else if let Some(matches) = matches.subcommand_matches("derive") {
		let breakends = load_breakends(matches.value_of("vcf").unwrap())?;
		let cn_segments = load_cn_segments(matches.value_of("cn-segments"))?;
		let options = load_options(matches.value_of("options"))?;
		log::trace!("tracing enabled");
		let result = derive(&breakends, &cn_segments, &options);
		log::info!("derived {} chain(s)", result.chains.len());
		write_json(matches.value_of("output").unwrap(), &result)?;
	} else if let Some(matches) = matches.subcommand_matches("classify") {
		let f = std::fs::File::open(matches.value_of("chains").unwrap())?;
		let chains: Vec<Chain> = serde_json::from_reader(f)?;
		log::info!("classifying {} chain(s)", chains.len());
		let labels: Vec<_> = chains.iter().map(classify).collect();
		write_json(matches.value_of("output").unwrap(), &labels)?;
	} else if let Some(matches) = matches.subcommand_matches("cluster") {
		let breakends = load_breakends(matches.value_of("vcf").unwrap())?;
		let proximity: i64 = matches.value_of("proximity").map(|s| s.parse().unwrap()).unwrap_or(5000);
		log::trace!("tracing enabled");
		let clusters = cluster(&breakends, proximity);
		log::info!("found {} cluster(s)", clusters.len());
		write_json(matches.value_of("output").unwrap(), &clusters)?;
	}
	Ok(())
}
