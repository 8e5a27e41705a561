use anyhow::Result;
use std::path::PathBuf;
use structopt::StructOpt;
use termfs::Level;

#[derive(Debug, StructOpt)]
pub struct InspectCmd {
    /// Path to the level file
    src: PathBuf,

    /// When set, shows just this particular phase (counting from 1)
    #[structopt(short, long)]
    phase: Option<usize>,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let level = Level::load(&self.src)?;

        for (idx, phase) in level.phases.iter().enumerate() {
            if self.phase.map_or(false, |phase| phase != idx + 1) {
                continue;
            }

            println!("[phase {}]", idx + 1);
            println!("cwd = {}", phase.cwd.as_deref().unwrap_or("/"));

            if let Some(timer) = phase.timer {
                println!("timer = {}s", timer);
            }

            println!("\nstart:\n{}", phase.start.build(&level.root_name)?.render());
            println!("goal:\n{}", phase.goal_tree(&level.root_name)?.render());
        }

        Ok(())
    }
}
