use anyhow::{Context, bail};
use tracing::debug;
use vellum_commands::SelectionAccess;
use vellum_editor::{CommandOptions, Editor, Sender};
use vellum_primitives::Point;

use crate::cli::Step;

fn options() -> CommandOptions {
	CommandOptions::new().with_sender(Sender::Ui("cli".to_string()))
}

/// Applies one step to the editor.
pub fn apply(editor: &mut Editor, step: &Step) -> anyhow::Result<()> {
	debug!(?step, "applying step");
	match step {
		Step::Run(id) => {
			editor.run_command(id, options()).with_context(|| format!("running {id}"))?;
		}
		Step::ForceRun(id) => {
			editor
				.run_command(id, options().with_force(true))
				.with_context(|| format!("running {id}"))?;
		}
		Step::Stop(id) => {
			editor.stop_command(id, options()).with_context(|| format!("stopping {id}"))?;
		}
		Step::Select(names) => {
			let ids = names
				.iter()
				.map(|name| editor.find_component(name).with_context(|| format!("no component named '{name}'")))
				.collect::<anyhow::Result<Vec<_>>>()?;
			editor.select(&ids);
		}
		Step::Move { x, y } => {
			if editor.drag_move(Point { x: *x, y: *y }).is_none() {
				bail!("no drag in progress");
			}
		}
		Step::Drop { cancelled } => {
			editor.drag_drop(*cancelled).context("dropping")?;
		}
		Step::Tick => {
			let ran = editor.tick();
			debug!(ran, "tick");
		}
	}
	Ok(())
}
