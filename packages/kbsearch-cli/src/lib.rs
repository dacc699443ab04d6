//! Command-line conventions shared by the kbsearch binaries.

use std::path::PathBuf;

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `--config FILE`, flattened into each binary's arguments.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
	/// Path to the TOML configuration file.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	#[derive(Debug, Parser)]
	#[command(version = VERSION, styles = styles())]
	struct Demo {
		#[command(flatten)]
		config: ConfigArgs,
	}

	#[test]
	fn parses_short_and_long_config_flags() {
		let short = Demo::try_parse_from(["demo", "-c", "kbsearch.toml"]).expect("parse failed");
		let long =
			Demo::try_parse_from(["demo", "--config", "/etc/kbsearch.toml"]).expect("parse failed");

		assert_eq!(short.config.config, PathBuf::from("kbsearch.toml"));
		assert_eq!(long.config.config, PathBuf::from("/etc/kbsearch.toml"));
	}

	#[test]
	fn config_is_required() {
		assert!(Demo::try_parse_from(["demo"]).is_err());
	}
}
