use crate::{FsError, FsResult};
use std::fmt;
use std::str::FromStr;

/// Parsed command line.
///
/// The grammar is tiny: a command name followed by whitespace
/// separated paths - no quoting, no flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Ls(Option<String>),
    Cd(Option<String>),
    Touch(String),
    Mkdir(String),
    Rm(String),
    Mv { src: String, dst: String },
    Cp { src: String, dst: String },
    Clear,
}

impl Command {
    pub fn parse(line: &str) -> FsResult<Self> {
        let mut tokens = line.split_whitespace();

        let kind: CommandKind = tokens
            .next()
            .ok_or_else(|| FsError::UnknownCommand(Default::default()))?
            .parse()?;

        let args: Vec<String> = tokens.map(Into::into).collect();
        let wrong_args = || FsError::WrongArgumentCount(kind.usage());

        let cmd = match kind {
            CommandKind::Ls | CommandKind::Cd => {
                if args.len() > 1 {
                    return Err(wrong_args());
                }

                let path = args.into_iter().next();

                if kind == CommandKind::Ls {
                    Command::Ls(path)
                } else {
                    Command::Cd(path)
                }
            }

            CommandKind::Touch | CommandKind::Mkdir | CommandKind::Rm => {
                let [path]: [String; 1] = args.try_into().map_err(|_| wrong_args())?;

                match kind {
                    CommandKind::Touch => Command::Touch(path),
                    CommandKind::Mkdir => Command::Mkdir(path),
                    _ => Command::Rm(path),
                }
            }

            CommandKind::Mv | CommandKind::Cp => {
                let [src, dst]: [String; 2] = args.try_into().map_err(|_| wrong_args())?;

                if kind == CommandKind::Mv {
                    Command::Mv { src, dst }
                } else {
                    Command::Cp { src, dst }
                }
            }

            CommandKind::Clear => {
                if !args.is_empty() {
                    return Err(wrong_args());
                }

                Command::Clear
            }
        };

        Ok(cmd)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Ls,
    Cd,
    Touch,
    Mkdir,
    Rm,
    Mv,
    Cp,
    Clear,
}

impl CommandKind {
    pub const ALL: [Self; 8] = [
        CommandKind::Cd,
        CommandKind::Ls,
        CommandKind::Touch,
        CommandKind::Mkdir,
        CommandKind::Cp,
        CommandKind::Mv,
        CommandKind::Rm,
        CommandKind::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Ls => "ls",
            CommandKind::Cd => "cd",
            CommandKind::Touch => "touch",
            CommandKind::Mkdir => "mkdir",
            CommandKind::Rm => "rm",
            CommandKind::Mv => "mv",
            CommandKind::Cp => "cp",
            CommandKind::Clear => "clear",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Ls => "ls [path]",
            CommandKind::Cd => "cd [path]",
            CommandKind::Touch => "touch <path>",
            CommandKind::Mkdir => "mkdir <path>",
            CommandKind::Rm => "rm <path>",
            CommandKind::Mv => "mv <source> <destination>",
            CommandKind::Cp => "cp <source> <destination>",
            CommandKind::Clear => "clear",
        }
    }

    /// How the command treats paths that don't resolve.
    pub fn resolution(self) -> Resolution {
        match self {
            CommandKind::Ls => Resolution::Lenient,
            _ => Resolution::Strict,
        }
    }
}

impl FromStr for CommandKind {
    type Err = FsError;

    fn from_str(s: &str) -> FsResult<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FsError::UnknownCommand(s.into()))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-command policy for unresolvable paths: `ls` swallows them and prints
/// nothing, everything else reports an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Strict,
    Lenient,
}
