mod cd;
mod ls;
mod mk;
mod rm;
mod transfer;

use crate::{
    Advisor, Command, CommandKind, Entry, FsError, FsResult, History, NodeId, Outcome, PathResolver,
    Resolution, Tree,
};
use tracing::{debug, instrument, warn};

/// Command interpreter working on top of a single [`Tree`].
///
/// Calls take `&mut self`, so commands are always processed one at a time and
/// the history is recorded in execution order.
#[derive(Debug)]
pub struct Engine {
    tree: Tree,
    cwd: NodeId,
    history: History,
}

impl Engine {
    pub fn new(tree: Tree) -> Self {
        Self::with_history(tree, History::DEFAULT_CAPACITY)
    }

    pub fn with_history(tree: Tree, capacity: usize) -> Self {
        Self {
            cwd: tree.root(),
            tree,
            history: History::new(capacity),
        }
    }

    /// Moves the working directory without recording anything in the history;
    /// used when setting up a level.
    pub fn enter(&mut self, path: &str) -> FsResult<()> {
        self.cwd = self.resolver().resolve_dir(path)?;

        Ok(())
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn cwd_path(&self) -> String {
        self.tree.path(self.cwd).unwrap_or_else(|_| "/".into())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the tree matches the goal; O(tree size).
    pub fn is_complete(&self, goal: &Tree) -> bool {
        self.tree.matches(goal)
    }

    pub fn is_selectable(&self, name: &str, pending: Option<CommandKind>) -> bool {
        self.advisor().is_selectable(name, pending)
    }

    pub fn rejection_reason(
        &self,
        name: &str,
        pending: Option<CommandKind>,
    ) -> Option<&'static str> {
        self.advisor().rejection_reason(name, pending)
    }

    pub fn selectable_names(&self, pending: Option<CommandKind>) -> Vec<String> {
        self.advisor().selectable_names(pending)
    }

    /// Parses and runs given command line, recording the outcome in the
    /// history.
    ///
    /// This never fails - errors end up as [`Outcome::Failure`]; a failed
    /// command leaves the tree intact.
    #[instrument(skip(self))]
    pub fn execute(&mut self, line: &str) -> Outcome {
        let path = self.cwd_path();
        let cmd = Command::parse(line);

        if let Ok(Command::Clear) = cmd {
            debug!("op: clear()");

            self.history.clear();

            return Outcome::Success(None);
        }

        let outcome = match cmd.and_then(|cmd| self.dispatch(cmd)) {
            Ok(output) => Outcome::Success(output),

            Err(err) => Outcome::Failure {
                kind: err.kind(),
                message: err.log_and_describe(),
            },
        };

        self.history.push(Entry {
            path,
            command: line.trim().into(),
            outcome: outcome.clone(),
        });

        outcome
    }

    fn dispatch(&mut self, cmd: Command) -> FsResult<Option<String>> {
        match cmd {
            Command::Ls(path) => self.ls(path.as_deref()).map(Some),
            Command::Cd(path) => self.cd(path.as_deref()).map(|_| None),
            Command::Touch(path) => self.touch(&path).map(|_| None),
            Command::Mkdir(path) => self.mkdir(&path).map(|_| None),
            Command::Rm(path) => self.rm(&path).map(|_| None),
            Command::Mv { src, dst } => self.mv(&src, &dst).map(|_| None),
            Command::Cp { src, dst } => self.cp(&src, &dst).map(|_| None),
            Command::Clear => Ok(None),
        }
    }

    fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(&self.tree, self.cwd)
    }

    fn advisor(&self) -> Advisor<'_> {
        Advisor::new(&self.tree, self.cwd)
    }

    /// Resolves a target path according to the command's [`Resolution`];
    /// lenient commands get `None` instead of an error.
    fn resolve_target(&self, kind: CommandKind, path: &str) -> FsResult<Option<NodeId>> {
        match (self.resolver().resolve(path), kind.resolution()) {
            (Ok(id), _) => Ok(Some(id)),
            (Err(err @ FsError::Other(_)), _) => Err(err),
            (Err(err), Resolution::Strict) => Err(err),

            (Err(err), Resolution::Lenient) => {
                debug!("... ignoring: {}", err);
                Ok(None)
            }
        }
    }

    /// Relocates the working directory out of a subtree that's about to
    /// disappear.
    fn evacuate(&mut self, doomed: NodeId, to: NodeId) -> FsResult<()> {
        if self.tree.is_ancestor(doomed, self.cwd)? {
            warn!("working directory is being removed, moving to its parent");

            self.cwd = to;
        }

        Ok(())
    }
}

/// Names that can't be created, removed or moved around.
fn validate_name(name: &str, path: &str) -> FsResult<()> {
    if name.is_empty() || name == "." || name == ".." {
        Err(FsError::InvalidName(path.into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsErrorKind;
    use pretty_assertions::assert_eq;

    /// Root with `[a(file), b(dir)]`.
    pub(super) fn engine() -> Engine {
        let mut tree = Tree::default();
        let root = tree.root();

        tree.create_file(root, "a").unwrap();
        tree.create_directory(root, "b").unwrap();

        Engine::new(tree)
    }

    pub(super) fn ok(engine: &mut Engine, line: &str) -> Option<String> {
        match engine.execute(line) {
            Outcome::Success(output) => output,
            Outcome::Failure { message, .. } => panic!("`{}` failed: {}", line, message),
        }
    }

    pub(super) fn fail(engine: &mut Engine, line: &str) -> FsErrorKind {
        match engine.execute(line) {
            Outcome::Success(_) => panic!("`{}` unexpectedly succeeded", line),
            Outcome::Failure { kind, .. } => kind,
        }
    }

    pub(super) fn ls(engine: &mut Engine, path: &str) -> String {
        ok(engine, &format!("ls {}", path)).unwrap_or_default()
    }

    #[test]
    fn every_command_is_recorded() {
        let mut engine = engine();

        ok(&mut engine, "cd b");
        fail(&mut engine, "touch ..");
        ok(&mut engine, "ls /");

        let entries: Vec<_> = engine.history().iter().cloned().collect();

        assert_eq!(3, entries.len());
        assert_eq!(("/", "cd b"), (entries[0].path.as_str(), entries[0].command.as_str()));
        assert_eq!(Outcome::Success(None), entries[0].outcome);
        assert_eq!("/b", entries[1].path);
        assert_eq!(Some("invalid name: .."), entries[1].outcome.error());
        assert_eq!(Some("a\nb/"), entries[2].outcome.output());
    }

    #[test]
    fn recorded_command_drops_surrounding_whitespace() {
        let mut engine = engine();

        ok(&mut engine, "  ls  /b \n");

        assert_eq!("ls  /b", engine.history().last().unwrap().command);
    }

    #[test]
    fn unknown_commands_are_recorded() {
        let mut engine = engine();

        assert_eq!(FsErrorKind::UnknownCommand, fail(&mut engine, "pwd"));
        assert_eq!(FsErrorKind::UnknownCommand, fail(&mut engine, ""));
        assert_eq!(FsErrorKind::WrongArgumentCount, fail(&mut engine, "mv a"));

        let errors: Vec<_> = engine
            .history()
            .iter()
            .filter_map(|entry| entry.outcome.error())
            .collect();

        assert_eq!(
            vec![
                "unknown command: pwd",
                "please enter a command",
                "usage: mv <source> <destination>"
            ],
            errors
        );
    }

    #[test]
    fn clear_empties_history_without_recording_itself() {
        let mut engine = engine();

        ok(&mut engine, "ls");
        ok(&mut engine, "cd b");
        ok(&mut engine, "clear");

        assert!(engine.history().is_empty());
        assert_eq!(FsErrorKind::WrongArgumentCount, fail(&mut engine, "clear all"));
        assert_eq!(1, engine.history().len());
    }

    #[test]
    fn history_is_bounded() {
        let mut engine = engine();

        for n in 0..30 {
            ok(&mut engine, &format!("touch f{:02}", n));
        }

        let commands: Vec<_> = engine
            .history()
            .iter()
            .map(|entry| entry.command.clone())
            .collect();

        let expected: Vec<_> = (10..30).map(|n| format!("touch f{:02}", n)).collect();

        assert_eq!(expected, commands);
    }

    #[test]
    fn custom_history_capacity() {
        let mut engine = Engine::with_history(Tree::default(), 3);

        for _ in 0..5 {
            ok(&mut engine, "ls");
        }

        assert_eq!(3, engine.history().len());
    }

    #[test]
    fn selectable_names_can_be_executed() {
        let dirs = ["/", "/b", "/b/c", "/b/root"];

        let pendings = [
            CommandKind::Cd,
            CommandKind::Rm,
            CommandKind::Touch,
            CommandKind::Mkdir,
        ];

        let setup = |dir: &str| {
            let mut engine = engine();

            ok(&mut engine, "mkdir b/c");
            ok(&mut engine, "mkdir b/root");
            ok(&mut engine, "touch b/c/d.txt");
            engine.enter(dir).unwrap();
            engine
        };

        for dir in dirs {
            for pending in pendings {
                for name in setup(dir).selectable_names(Some(pending)) {
                    let mut engine = setup(dir);

                    ok(&mut engine, &format!("{} {}", pending, name));
                }
            }
        }

        assert_eq!(vec!["..", "c", "root"], setup("/b").selectable_names(Some(CommandKind::Cd)));
        assert!(setup("/b").selectable_names(Some(CommandKind::Mkdir)).is_empty());
    }

    #[test]
    fn enter_moves_silently() {
        let mut engine = engine();

        engine.enter("/b").unwrap();

        assert_eq!("/b", engine.cwd_path());
        assert!(engine.history().is_empty());
        assert!(engine.enter("/a").is_err());
    }
}
