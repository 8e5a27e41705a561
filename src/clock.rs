/// Seconds counter driven from the outside (e.g. by a UI timer), used by
/// levels that punish standing still.
///
/// It only counts; the file tree is never touched from here.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    elapsed: u64,
    interval: Option<u64>,
}

impl Clock {
    pub fn new(interval: Option<u64>) -> Self {
        Self {
            elapsed: 0,
            interval: interval.filter(|secs| *secs > 0),
        }
    }

    /// Advances the clock by a second and returns whether an interval
    /// boundary has just been reached.
    pub fn tick(&mut self) -> bool {
        self.elapsed = self.elapsed.saturating_add(1);

        self.interval
            .map_or(false, |interval| self.elapsed % interval == 0)
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn interval(&self) -> Option<u64> {
        self.interval
    }
}
