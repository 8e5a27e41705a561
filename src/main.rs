mod cmds;

pub use self::cmds::*;
use anyhow::Result;
use structopt::StructOpt;

/// termfs, a file-system puzzle game played with `ls`, `cd`, `mv` & co.
#[derive(Debug, StructOpt)]
enum Cmd {
    Inspect(InspectCmd),
    Play(PlayCmd),
    Run(RunCmd),
}

fn main() -> Result<()> {
    match Cmd::from_args() {
        Cmd::Inspect(cmd) => cmd.run(),
        Cmd::Play(cmd) => cmd.run(),
        Cmd::Run(cmd) => cmd.run(),
    }
}
