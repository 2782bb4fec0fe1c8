use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use vellum_events::{EventBus, LogEntry, LogLevel, Logger};

use crate::{Command, CommandConfig, CommandDef, CommandInput};

/// Constructor used by factory templates.
pub type CommandFactory = Arc<dyn Fn(&CommandConfig) -> CommandDef + Send + Sync>;

/// Registry configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
	/// CSS class prefix for command-owned elements.
	pub style_prefix: String,
	/// Reject run on an active id and stop on an inactive one unless forced.
	pub strict: bool,
	/// Command restored after drags and preview.
	pub default_command: String,
	/// Register the built-in catalog at construction.
	pub builtins: bool,
	/// Commands registered at construction, after the built-ins.
	#[serde(skip)]
	pub defaults: IndexMap<String, CommandDef>,
}

impl Default for CommandsConfig {
	fn default() -> Self {
		Self {
			style_prefix: "com-".to_string(),
			strict: true,
			default_command: "core:component-select".to_string(),
			builtins: true,
			defaults: IndexMap::new(),
		}
	}
}

impl fmt::Debug for CommandsConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandsConfig")
			.field("style_prefix", &self.style_prefix)
			.field("strict", &self.strict)
			.field("default_command", &self.default_command)
			.field("builtins", &self.builtins)
			.field("defaults", &self.defaults.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Uninstantiated command.
#[derive(Clone)]
pub enum CommandTemplate {
	/// A normalized definition from [`Commands::add`].
	Definition(CommandDef),
	/// A constructor from [`Commands::add_factory`].
	Factory(CommandFactory),
}

impl CommandTemplate {
	fn instantiate(&self, id: &str, config: &Arc<CommandConfig>) -> Command {
		let def = match self {
			Self::Definition(def) => def.clone(),
			Self::Factory(factory) => factory(config).normalized(),
		};
		Command::new(id, def, Arc::clone(config))
	}
}

/// Registry entry: a template until first lookup, an instance afterwards.
#[derive(Clone)]
pub enum CommandSlot {
	Template(CommandTemplate),
	Instance(Arc<Command>),
}

impl CommandSlot {
	pub fn is_instance(&self) -> bool {
		matches!(self, Self::Instance(_))
	}
}

impl fmt::Debug for CommandSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Template(CommandTemplate::Definition(def)) => f.debug_tuple("Template").field(def).finish(),
			Self::Template(CommandTemplate::Factory(_)) => f.write_str("Template(<factory>)"),
			Self::Instance(command) => f.debug_tuple("Instance").field(&command.id()).finish(),
		}
	}
}

/// Command registry and active-set owner.
///
/// One per editor. Commands are registered as templates and instantiated on
/// first [`get`](Self::get). The active set maps each active id to the result
/// of its most recent run; it is only changed through [`crate::run`] and
/// [`crate::stop`].
pub struct Commands {
	config: CommandsConfig,
	shared: Arc<CommandConfig>,
	slots: IndexMap<String, CommandSlot>,
	/// canonical id -> legacy alias
	aliases: HashMap<String, String>,
	active: IndexMap<String, Value>,
	default_running: bool,
	logger: Logger,
}

impl Commands {
	/// Creates a registry, registering the built-in catalog (unless disabled)
	/// and then `config.defaults`.
	///
	/// `ppfx` is the editor-wide style prefix the command prefix is appended to.
	pub fn new(mut config: CommandsConfig, ppfx: &str, logger: Logger) -> Self {
		let defaults = std::mem::take(&mut config.defaults);
		let shared = Arc::new(CommandConfig {
			ppfx: ppfx.to_string(),
			pfx: format!("{ppfx}{}", config.style_prefix),
		});
		let mut commands = Self {
			config,
			shared,
			slots: IndexMap::new(),
			aliases: HashMap::default(),
			active: IndexMap::new(),
			default_running: false,
			logger,
		};

		if commands.config.builtins {
			crate::builtins::register_builtins(&mut commands);
		}
		for (id, def) in defaults {
			commands.add(&id, def);
		}
		commands
	}

	pub fn config(&self) -> &CommandsConfig {
		&self.config
	}

	/// Configuration handed to every instance.
	pub fn command_config(&self) -> &CommandConfig {
		&self.shared
	}

	pub fn logger(&self) -> &Logger {
		&self.logger
	}

	pub fn events(&self) -> &EventBus {
		self.logger.bus()
	}

	/// Registers a command under `id`, replacing any previous entry.
	pub fn add(&mut self, id: &str, command: impl Into<CommandInput>) -> &mut Self {
		let def = CommandDef::from(command.into()).normalized();
		trace!(id, behaviors = ?def.behavior_names().collect::<Vec<_>>(), "command added");
		self.slots.insert(id.to_string(), CommandSlot::Template(CommandTemplate::Definition(def)));
		self
	}

	/// Registers a constructor template under `id`.
	pub fn add_factory<F>(&mut self, id: &str, factory: F) -> &mut Self
	where
		F: Fn(&CommandConfig) -> CommandDef + Send + Sync + 'static,
	{
		trace!(id, "command factory added");
		self.slots.insert(id.to_string(), CommandSlot::Template(CommandTemplate::Factory(Arc::new(factory))));
		self
	}

	/// Resolves `id`, instantiating its template on first use.
	///
	/// Logs a warning and returns `None` for unknown ids.
	pub fn get(&mut self, id: &str) -> Option<Arc<Command>> {
		let Some(slot) = self.slots.get_mut(id) else {
			self.logger.log(LogEntry::new(LogLevel::Warning, format!("'{id}' command not found")).with_ns("commands"));
			return None;
		};

		let command = match slot {
			CommandSlot::Instance(command) => Arc::clone(command),
			CommandSlot::Template(template) => {
				let command = Arc::new(template.instantiate(id, &self.shared));
				debug!(id, "command instantiated");
				*slot = CommandSlot::Instance(Arc::clone(&command));
				command
			}
		};
		Some(command)
	}

	pub fn has(&self, id: &str) -> bool {
		self.slots.contains_key(id)
	}

	/// Overlays `partial` on the command registered as `id` and re-registers
	/// the result under `id`. A legacy alias of `id` gets `partial` overlaid
	/// on its own instance, so the two keep separate state.
	pub fn extend(&mut self, id: &str, partial: CommandDef) -> &mut Self {
		let Some(command) = self.get(id) else {
			return self;
		};

		if let Some(legacy) = self.aliases.get(id).cloned()
			&& let Some(alias) = self.get(&legacy)
		{
			let merged = alias.definition().clone().overlay(partial.clone());
			self.add(&legacy, merged);
		}
		let merged = command.definition().clone().overlay(partial);
		self.add(id, merged)
	}

	/// Live view of every registered entry.
	pub fn get_all(&self) -> &IndexMap<String, CommandSlot> {
		&self.slots
	}

	/// Records `legacy` as an alias of `canonical`.
	pub fn register_alias(&mut self, canonical: &str, legacy: &str) {
		self.aliases.insert(canonical.to_string(), legacy.to_string());
	}

	/// Returns the canonical id `legacy` aliases.
	pub fn canonical_of(&self, legacy: &str) -> Option<&str> {
		self.aliases.iter().find(|(_, alias)| alias.as_str() == legacy).map(|(canonical, _)| canonical.as_str())
	}

	/// Returns the legacy alias registered for `canonical`.
	pub fn legacy_of(&self, canonical: &str) -> Option<&str> {
		self.aliases.get(canonical).map(String::as_str)
	}

	pub fn is_active(&self, id: &str) -> bool {
		self.active.contains_key(id)
	}

	/// Active ids mapped to the result of their latest run.
	pub fn active(&self) -> &IndexMap<String, Value> {
		&self.active
	}

	pub(crate) fn activate(&mut self, id: &str, result: Value) {
		self.active.insert(id.to_string(), result);
	}

	pub(crate) fn deactivate(&mut self, id: &str) -> Option<Value> {
		self.active.shift_remove(id)
	}

	/// True while the default command is running.
	pub fn default_running(&self) -> bool {
		self.default_running
	}

	pub(crate) fn set_default_running(&mut self, running: bool) {
		self.default_running = running;
	}

	/// Drops every entry, alias and active id.
	pub fn destroy(&mut self) {
		debug!(commands = self.slots.len(), active = self.active.len(), "commands destroyed");
		self.slots.clear();
		self.aliases.clear();
		self.active.clear();
		self.default_running = false;
	}
}

impl fmt::Debug for Commands {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Commands")
			.field("config", &self.config)
			.field("slots", &self.slots.len())
			.field("active", &self.active)
			.field("default_running", &self.default_running)
			.finish()
	}
}
