/// One configured URL. Identity is the position in the configured list,
/// so the same URL listed twice is two targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub index: usize,
    pub url: String,
}

impl Target {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }

    /// The 1-based number shown in front of the target's line.
    pub fn number(&self) -> usize {
        self.index.saturating_add(1)
    }
}
