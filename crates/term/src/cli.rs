use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Drive the editor command layer from a script of steps")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Editor configuration (TOML)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Let commands run again while active
	#[arg(long)]
	pub no_strict: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,

	/// Keep going after a failing step
	#[arg(long)]
	pub keep_going: bool,

	/// Steps to execute in order, e.g. `select:header run:tlb-move drop tick`
	#[arg(value_name = "STEP")]
	pub steps: Vec<Step>,
}

/// One scripted editor interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
	Run(String),
	ForceRun(String),
	Stop(String),
	/// Select components by name; an empty list clears the selection.
	Select(Vec<String>),
	Move { x: f64, y: f64 },
	Drop { cancelled: bool },
	Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepParseError(String);

impl fmt::Display for StepParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid step '{}'", self.0)
	}
}

impl std::error::Error for StepParseError {}

impl FromStr for Step {
	type Err = StepParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || StepParseError(s.to_string());
		match s {
			"tick" => return Ok(Self::Tick),
			"drop" => return Ok(Self::Drop { cancelled: false }),
			"cancel" => return Ok(Self::Drop { cancelled: true }),
			_ => {}
		}

		let (kind, rest) = s.split_once(':').ok_or_else(invalid)?;
		match kind {
			"run" | "force-run" | "stop" if rest.is_empty() => Err(invalid()),
			"run" => Ok(Self::Run(rest.to_string())),
			"force-run" => Ok(Self::ForceRun(rest.to_string())),
			"stop" => Ok(Self::Stop(rest.to_string())),
			"select" => Ok(Self::Select(
				rest.split(',').filter(|name| !name.is_empty()).map(str::to_string).collect(),
			)),
			"move" => {
				let (x, y) = rest.split_once(',').ok_or_else(invalid)?;
				Ok(Self::Move {
					x: x.trim().parse().map_err(|_| invalid())?,
					y: y.trim().parse().map_err(|_| invalid())?,
				})
			}
			_ => Err(invalid()),
		}
	}
}
