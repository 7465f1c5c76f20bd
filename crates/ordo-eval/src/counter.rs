/// The implicit per-block ordinal counter.
///
/// Owned by a single evaluation pass and advanced by it after every
/// binding line, used or not. Each block constructs its own, so
/// independent blocks can never observe each other's count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordinal(i64);

impl Ordinal {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value the current binding line sees.
    pub fn value(self) -> i64 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}
