//! Source locations utilities and definitions.
use std::fmt;

use serde::Deserialize;

/// A location within some source, the first element represents the starting
/// byte offset and the second element represents the ending byte offset.
#[derive(Debug, Eq, Hash, Clone, Copy, PartialEq, PartialOrd, Ord, Deserialize)]
#[serde(from = "(u32, u32)")]
pub struct Span(u32, u32);

impl Span {
    /// Create a [Span] by providing a start and end byte position.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(end >= start, "Span start needs to be smaller than its end");
        Span(start, end.max(start))
    }

    /// Join a [Span] to another [Span] that follows it. If the rhs does not
    /// start after the end of the lhs, the lhs is returned.
    #[must_use]
    pub fn join(&self, end: Self) -> Self {
        if self.end() <= end.start() {
            return Span::new(self.start(), end.end());
        }

        *self
    }

    /// Get the start of the location
    pub fn start(&self) -> u32 {
        self.0
    }

    /// Get the end of the location
    pub fn end(&self) -> u32 {
        self.1
    }

    /// Compute the actual size of the span by subtracting the end from start
    pub fn size(&self) -> u32 {
        self.end() - self.start()
    }
}

impl From<(u32, u32)> for Span {
    fn from((start, end): (u32, u32)) -> Self {
        Span::new(start, end.max(start))
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

#[cfg(test)]
mod test_super {
    use super::*;

    #[test]
    fn test_span_join() {
        let lhs = Span::new(2, 5);

        assert_eq!(lhs.join(Span::new(7, 10)), Span::new(2, 10));
        assert_eq!(lhs.join(Span::new(3, 4)), lhs);
        assert_eq!(Span::new(7, 10).size(), 3);
    }
}
