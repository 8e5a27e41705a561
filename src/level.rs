use crate::{Blueprint, Engine, Tree};
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Puzzle made of consecutive phases, each asking the player to turn one tree
/// into another.
///
/// Levels are read from plain-text files:
///
/// ```text
/// # comment
/// root factory
///
/// phase
///   cwd   /door
///   timer 13
///   start /door/machineRoom/stairs/
///   goal  /door/machineRoom/stairs/trap/pipeBomb
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub root_name: String,
    pub phases: Vec<Phase>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Phase {
    /// Working directory the phase begins in (root, if not specified)
    pub cwd: Option<String>,

    /// Seconds between clock boundaries
    pub timer: Option<u64>,

    pub start: Blueprint,
    pub goal: Blueprint,
}

impl Level {
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)
            .with_context(|| format!("couldn't read level: {}", path.display()))?;

        src.parse()
            .with_context(|| format!("couldn't parse level: {}", path.display()))
    }

    pub fn phase(&self, idx: usize) -> Option<&Phase> {
        self.phases.get(idx)
    }

    fn parse_line(&mut self, line: &str) -> Result<()> {
        let (directive, arg) = match line.split_once(char::is_whitespace) {
            Some((directive, arg)) => (directive, arg.trim()),
            None => (line, ""),
        };

        if directive == "phase" {
            if !arg.is_empty() {
                bail!("`phase` takes no arguments");
            }

            self.phases.push(Default::default());

            return Ok(());
        }

        if arg.is_empty() || arg.contains(char::is_whitespace) {
            bail!("`{}` takes exactly one argument", directive);
        }

        if directive == "root" {
            if !self.phases.is_empty() {
                bail!("`root` must come before the first phase");
            }

            self.root_name = arg.into();

            return Ok(());
        }

        let phase = self
            .phases
            .last_mut()
            .ok_or_else(|| anyhow!("`{}` outside of a phase", directive))?;

        match directive {
            "cwd" => phase.cwd = Some(arg.into()),
            "timer" => phase.timer = Some(arg.parse().context("invalid timer")?),
            "start" => phase.start.push(arg)?,
            "goal" => phase.goal.push(arg)?,
            _ => bail!("unknown directive: {}", directive),
        }

        Ok(())
    }

    /// Builds every phase once, so that broken blueprints are reported before
    /// anyone starts playing.
    fn validate(&self) -> Result<()> {
        if self.phases.is_empty() {
            bail!("level has no phases");
        }

        for (idx, phase) in self.phases.iter().enumerate() {
            phase
                .engine(&self.root_name, 0)
                .and_then(|_| phase.goal_tree(&self.root_name))
                .with_context(|| format!("phase {} is invalid", idx + 1))?;
        }

        Ok(())
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(src: &str) -> Result<Self> {
        let mut level = Self {
            root_name: Tree::ROOT_LABEL.into(),
            phases: Default::default(),
        };

        for (idx, line) in src.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            level
                .parse_line(line)
                .with_context(|| format!("line {}", idx + 1))?;
        }

        level.validate()?;

        Ok(level)
    }
}

impl Phase {
    /// Prepares an engine with this phase's starting tree and working
    /// directory.
    pub fn engine(&self, root_name: &str, history: usize) -> Result<Engine> {
        let mut engine = Engine::with_history(self.start.build(root_name)?, history);

        if let Some(cwd) = &self.cwd {
            engine
                .enter(cwd)
                .map_err(|err| anyhow!("{}", err))
                .context("invalid starting directory")?;
        }

        Ok(engine)
    }

    pub fn goal_tree(&self, root_name: &str) -> Result<Tree> {
        self.goal.build(root_name)
    }
}
