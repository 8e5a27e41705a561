use anyhow::{Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub const ROOT: Self = Self(1);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn fetch_add(&mut self) -> Result<Self> {
        let this = *self;

        self.0 = self
            .0
            .checked_add(1)
            .context("reached the maximum number of nodes")?;

        Ok(this)
    }
}
