//! termfs, an in-memory file tree driven by shell-like commands, made for
//! teaching `ls`, `cd` & co. through puzzles

mod blueprint;
mod clock;
mod command;
mod comparator;
mod engine;
mod history;
mod level;
mod node;
mod node_id;
mod path;
mod render;
mod result;
mod selectability;
mod session;
mod tree;

pub use self::blueprint::*;
pub use self::clock::*;
pub use self::command::*;
pub use self::engine::*;
pub use self::history::*;
pub use self::level::*;
pub use self::node::*;
pub use self::node_id::*;
pub use self::path::*;
pub use self::result::*;
pub use self::selectability::*;
pub use self::session::*;
pub use self::tree::*;
