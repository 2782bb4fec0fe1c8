//! Vellum command-line driver.
//!
//! Builds an editor from an optional TOML config, replays the given steps
//! against it and prints every published event as a JSON line, followed by
//! the set of active commands.

mod cli;
mod script;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use tracing::info;
use vellum_editor::{CommandEditor, Editor, EditorConfig};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let mut config = match &cli.config {
		Some(path) => EditorConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => EditorConfig::default(),
	};
	if cli.no_strict {
		config.commands.strict = false;
	}

	let mut editor = Editor::new(config);
	editor.bus().on_any(|_, event| {
		println!("{}", serde_json::json!({ "event": event.name(), "args": event.args() }));
	});
	info!(steps = cli.steps.len(), "replaying steps");

	for step in &cli.steps {
		if let Err(err) = script::apply(&mut editor, step) {
			if !cli.keep_going {
				return Err(err);
			}
			tracing::warn!(?step, "{err:#}");
		}
	}

	let active: Vec<&str> = editor.commands().active().keys().map(String::as_str).collect();
	println!("{}", serde_json::json!({ "active": active }));
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("VELLUM_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("vellum_commands=trace,vellum_editor=trace,debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
