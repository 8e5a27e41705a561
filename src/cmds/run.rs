use super::{print_outcome, print_progress, SessionOpts};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;
use termfs::Level;

/// Plays a level from a script, printing the transcript; fails unless the
/// script solves the level.
#[derive(Debug, StructOpt)]
pub struct RunCmd {
    /// Path to the level file
    level: PathBuf,

    /// Path to the script - one command per line, `#` starts a comment
    script: PathBuf,

    #[structopt(flatten)]
    opts: SessionOpts,
}

impl RunCmd {
    pub fn run(self) -> Result<()> {
        super::init_logging();

        let level = Level::load(&self.level)?;
        let mut session = self.opts.start(level)?;

        let script = fs::read_to_string(&self.script)
            .with_context(|| format!("couldn't read script: {}", self.script.display()))?;

        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            println!("{}$ {}", session.engine().cwd_path(), line);

            let (outcome, progress) = session.execute(line)?;

            print_outcome(&outcome);
            print_progress(&session, progress);
        }

        if !session.is_complete() {
            bail!("level not complete (stuck at phase {})", session.phase() + 1);
        }

        Ok(())
    }
}
