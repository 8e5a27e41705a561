use crate::{Clock, Engine, History, Level, Outcome, Tree};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

/// Play-through of a single [`Level`]: tracks the current phase, its goal and
/// its clock.
#[derive(Debug)]
pub struct Session {
    level: Level,
    history: usize,
    phase: usize,
    engine: Engine,
    goal: Tree,
    clock: Clock,
    complete: bool,
}

/// Where the session stands after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Pending,

    /// Goal reached; the session has moved on to the phase with given index
    PhaseComplete { next: usize },

    LevelComplete,
}

impl Session {
    pub fn new(level: Level) -> Result<Self> {
        Self::with_history(level, History::DEFAULT_CAPACITY)
    }

    pub fn with_history(level: Level, history: usize) -> Result<Self> {
        let (engine, goal, clock) = Self::prepare(&level, 0, history)?;

        Ok(Self {
            level,
            history,
            phase: 0,
            engine,
            goal,
            clock,
            complete: false,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn goal(&self) -> &Tree {
        &self.goal
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Overrides the working directory of the current phase.
    pub fn enter(&mut self, path: &str) -> Result<()> {
        self.engine
            .enter(path)
            .map_err(|err| anyhow::anyhow!("{}", err))
    }

    /// Runs given command and, if that solves the current phase, advances to
    /// the next one (with a fresh tree and history).
    ///
    /// Once the level is complete, further commands still run against the
    /// final tree.
    #[instrument(skip(self))]
    pub fn execute(&mut self, line: &str) -> Result<(Outcome, Progress)> {
        let outcome = self.engine.execute(line);

        if self.complete || !self.engine.is_complete(&self.goal) {
            return Ok((outcome, Progress::Pending));
        }

        let next = self.phase + 1;

        if next >= self.level.phases.len() {
            info!("level complete");

            self.complete = true;

            return Ok((outcome, Progress::LevelComplete));
        }

        info!(phase = next + 1, "phase complete");

        let (engine, goal, clock) = Self::prepare(&self.level, next, self.history)?;

        self.phase = next;
        self.engine = engine;
        self.goal = goal;
        self.clock = clock;

        Ok((outcome, Progress::PhaseComplete { next }))
    }

    /// Advances the phase's clock by a second; returns whether its interval
    /// boundary was reached.
    pub fn tick(&mut self) -> bool {
        let fired = self.clock.tick();

        if fired {
            debug!(elapsed = self.clock.elapsed(), "clock boundary reached");
        }

        fired
    }

    fn prepare(level: &Level, idx: usize, history: usize) -> Result<(Engine, Tree, Clock)> {
        let phase = level
            .phase(idx)
            .with_context(|| format!("level has no phase {}", idx + 1))?;

        let engine = phase.engine(&level.root_name, history)?;
        let goal = phase.goal_tree(&level.root_name)?;

        Ok((engine, goal, Clock::new(phase.timer)))
    }
}
