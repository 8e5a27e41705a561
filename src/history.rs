use crate::FsErrorKind;
use std::collections::VecDeque;

/// What a single command ended with - either some (optional) output or an
/// error, never both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success(Option<String>),
    Failure { kind: FsErrorKind, message: String },
}

impl Outcome {
    pub fn output(&self) -> Option<&str> {
        match self {
            Outcome::Success(output) => output.as_deref(),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { message, .. } => Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Working directory at the moment the command got invoked
    pub path: String,

    /// Command line, as typed
    pub command: String,

    pub outcome: Outcome,
}

/// Bounded log of executed commands; once full, each push evicts the oldest
/// entry.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl History {
    pub const DEFAULT_CAPACITY: usize = 20;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: Entry) {
        if self.capacity == 0 {
            return;
        }

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
