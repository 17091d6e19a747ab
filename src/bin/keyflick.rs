// Keyflick CLI
// Resolve keys under modifiers and replay recorded touch sessions

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};

use keyflick_core::catalog;
use keyflick_core::{
    key_by_name, GestureStateMachine, KeyboardGeometry, KeyboardLayout, Modifier, ModifierSet,
    PointerAction, PointerEvent, RecordingHost, Settings,
};

/// On-screen keyboard modifier and gesture engine
#[derive(Parser, Debug)]
#[command(name = "keyflick")]
#[command(author = "keyflick contributors")]
#[command(version = "0.3.0")]
#[command(about = "On-screen keyboard modifier and gesture engine", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Keyboard surface width in layout units
    #[arg(short, long, default_value_t = 400.0)]
    width: f32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a named key under a set of modifiers
    Resolve {
        /// Catalog name or single character
        name: String,

        /// Comma separated modifiers, e.g. shift,fn
        #[arg(short, long, value_delimiter = ',')]
        mods: Vec<String>,
    },

    /// List every named key
    Keys,

    /// Feed a recorded pointer session to the built-in layout
    Replay {
        /// TOML script with [[event]] entries
        script: PathBuf,
    },
}

/// A recorded pointer session
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplayScript {
    #[serde(default, rename = "event")]
    events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptEvent {
    action: ScriptAction,
    #[serde(default)]
    pointer: u32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
enum ScriptAction {
    Down,
    Move,
    Up,
}

impl From<ScriptAction> for PointerAction {
    fn from(action: ScriptAction) -> Self {
        match action {
            ScriptAction::Down => PointerAction::Down,
            ScriptAction::Move => PointerAction::Move,
            ScriptAction::Up => PointerAction::Up,
        }
    }
}

impl ReplayScript {
    fn from_toml(content: &str) -> Result<Self> {
        let script: ReplayScript = toml::from_str(content).context("invalid replay script")?;
        let mut last = 0;
        for event in &script.events {
            if event.at_ms < last {
                bail!("event at {}ms goes back in time (previous {}ms)", event.at_ms, last);
            }
            last = event.at_ms;
        }
        Ok(script)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Run every event through the machine, stamping them relative to `start`
    fn replay(&self, machine: &mut GestureStateMachine, start: Instant) -> RecordingHost {
        let mut host = RecordingHost::new();
        for event in &self.events {
            let time = start + Duration::from_millis(event.at_ms);
            let pointer_event =
                PointerEvent::new(event.action.into(), event.pointer, event.x, event.y, time);
            debug!("Replaying {:?}", pointer_event);
            machine.handle_event(&pointer_event, &mut host);
        }
        host
    }
}

/// Main application state
struct Application {
    settings: Settings,
    args: Args,
}

impl Application {
    fn new(args: Args) -> Result<Self> {
        let settings = match args.config {
            Some(ref path) => Settings::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Settings::load_default().context("failed to load default settings")?,
        };
        if let Some(path) = settings.source_path() {
            info!("Loaded settings from {}", path.display());
        }
        Ok(Self { settings, args })
    }

    fn machine(&self) -> Result<GestureStateMachine> {
        if !(self.args.width.is_finite() && self.args.width > 0.0) {
            bail!("--width must be positive, got {}", self.args.width);
        }
        let geometry = KeyboardGeometry::for_width(self.args.width, self.settings.geometry());
        Ok(GestureStateMachine::new(
            KeyboardLayout::qwerty(),
            geometry,
            *self.settings.gesture(),
        )
        .with_resolver(self.settings.resolver()))
    }

    fn run(&self) -> Result<()> {
        match self.args.command {
            Command::Resolve { ref name, ref mods } => self.resolve(name, mods),
            Command::Keys => {
                Self::list_keys();
                Ok(())
            }
            Command::Replay { ref script } => self.replay(script),
        }
    }

    fn resolve(&self, name: &str, mods: &[String]) -> Result<()> {
        let base = key_by_name(name).with_context(|| format!("unknown key '{}'", name))?;
        let mods = parse_modifiers(mods)?;
        let resolver = self.settings.resolver();

        match resolver.resolve(Some(&base), &mods) {
            Some(value) => println!("{} -> {} ({})", base.name(), value.symbol(false), value.name()),
            None => println!("{} -> (removed)", base.name()),
        }
        Ok(())
    }

    fn list_keys() {
        for name in catalog::names() {
            if let Some(value) = key_by_name(name) {
                println!("{:<24} {}", name, value.symbol(false));
            }
        }
    }

    fn replay(&self, path: &Path) -> Result<()> {
        let script = ReplayScript::from_file(path)?;
        let mut machine = self.machine()?;
        let host = script.replay(&mut machine, Instant::now());

        if host.keys.is_empty() {
            warn!("Replay dispatched no keys");
        }
        for (value, flags) in &host.keys {
            println!("{:<16} {:?}", value.symbol(false), flags);
        }
        Ok(())
    }
}

fn parse_modifiers(names: &[String]) -> Result<ModifierSet> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| {
            Modifier::from_str(name).map_err(|_| anyhow::anyhow!("unknown modifier '{}'", name))
        })
        .collect()
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let app = Application::new(args)?;
    app.run()
}
