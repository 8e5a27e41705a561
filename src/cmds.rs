mod inspect;
mod play;
mod run;

pub use self::inspect::*;
pub use self::play::*;
pub use self::run::*;

use anyhow::Result;
use structopt::StructOpt;
use termfs::{Level, Outcome, Progress, Session};

/// Options shared by commands that actually play a level.
#[derive(Debug, StructOpt)]
pub struct SessionOpts {
    /// How many commands the history keeps
    #[structopt(long, default_value = "20")]
    history: usize,

    /// Overrides the working directory the first phase starts in
    #[structopt(long)]
    cwd: Option<String>,
}

impl SessionOpts {
    fn start(&self, level: Level) -> Result<Session> {
        let mut session = Session::with_history(level, self.history)?;

        if let Some(cwd) = &self.cwd {
            session.enter(cwd)?;
        }

        Ok(session)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Success(Some(output)) if !output.is_empty() => println!("{}", output),
        Outcome::Success(_) => (),
        Outcome::Failure { message, .. } => println!("{}", message),
    }
}

fn print_progress(session: &Session, progress: Progress) {
    match progress {
        Progress::Pending => (),

        Progress::PhaseComplete { next } => {
            println!("-- phase {} of {}", next + 1, session.level().phases.len());
        }

        Progress::LevelComplete => println!("-- level complete"),
    }
}
