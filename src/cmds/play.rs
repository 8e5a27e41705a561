use super::{print_outcome, print_progress, SessionOpts};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use structopt::StructOpt;
use termfs::{Level, Progress, Session};

/// Plays a level interactively, reading commands from stdin.
#[derive(Debug, StructOpt)]
pub struct PlayCmd {
    /// Path to the level file
    level: PathBuf,

    #[structopt(flatten)]
    opts: SessionOpts,
}

impl PlayCmd {
    pub fn run(self) -> Result<()> {
        super::init_logging();

        let level = Level::load(&self.level)?;
        let mut session = self.opts.start(level)?;
        let mut ticked_at = Instant::now();
        let stdin = io::stdin();

        println!("{}", session.goal().render());

        loop {
            print!("{}$ ", session.engine().cwd_path());
            io::stdout().flush().context("couldn't flush stdout")?;

            let mut line = String::new();

            if stdin.lock().read_line(&mut line).context("couldn't read stdin")? == 0 {
                break;
            }

            catch_up(&mut session, &mut ticked_at);

            let (outcome, progress) = session.execute(&line)?;

            print_outcome(&outcome);
            print_progress(&session, progress);

            match progress {
                Progress::PhaseComplete { .. } => println!("{}", session.goal().render()),
                Progress::LevelComplete => break,
                Progress::Pending => (),
            }
        }

        Ok(())
    }
}

/// Ticks the session's clock once per second that has passed since the last
/// catch-up.
fn catch_up(session: &mut Session, ticked_at: &mut Instant) {
    let secs = ticked_at.elapsed().as_secs();

    for _ in 0..secs {
        if session.tick() {
            println!("-- the clock strikes ({}s)", session.clock().elapsed());
        }
    }

    *ticked_at += Duration::from_secs(secs);
}
