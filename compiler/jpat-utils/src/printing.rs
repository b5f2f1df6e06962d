//! Utilities for printing sequences of items in human readable error
//! messages, e.g. "`a`, `b`, and 2 others".
use std::fmt;

/// How the items of a [SequenceDisplay] relate to one another.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SequenceJoinMode {
    /// Items within a [SequenceDisplay] are phrased as all being options
    Either,
    /// Items within a [SequenceDisplay] are phrased as all being required
    All,
}

impl SequenceJoinMode {
    pub fn as_conjunctive(&self) -> &'static str {
        match self {
            SequenceJoinMode::Either => "or",
            SequenceJoinMode::All => "and",
        }
    }
}

/// Options for a [SequenceDisplay].
#[derive(Debug, Clone, Copy)]
pub struct SequenceDisplayOptions {
    /// How the items are joined.
    pub mode: SequenceJoinMode,

    /// The maximum number of items that are printed before the rest are
    /// summarised as "N others".
    pub limit: Option<usize>,
}

impl SequenceDisplayOptions {
    pub fn new(mode: SequenceJoinMode) -> Self {
        Self { mode, limit: None }
    }

    pub fn with_limit(mode: SequenceJoinMode, limit: usize) -> Self {
        Self { mode, limit: Some(limit) }
    }
}

/// Displays a list of items with conjunctives, each item surrounded by
/// backticks. A single item is printed on its own.
pub struct SequenceDisplay<'a, T> {
    pub items: &'a [T],
    options: SequenceDisplayOptions,
}

impl<'a, T> SequenceDisplay<'a, T> {
    pub fn new(items: &'a [T], options: SequenceDisplayOptions) -> Self {
        Self { items, options }
    }

    /// Create a [SequenceDisplay] with the join mode as
    /// [SequenceJoinMode::Either]
    pub fn either(items: &'a [T]) -> Self {
        Self::new(items, SequenceDisplayOptions::new(SequenceJoinMode::Either))
    }

    /// Create a [SequenceDisplay] with the join mode as [SequenceJoinMode::All]
    pub fn all(items: &'a [T]) -> Self {
        Self::new(items, SequenceDisplayOptions::new(SequenceJoinMode::All))
    }
}

impl<T: fmt::Display> fmt::Display for SequenceDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conjunctive = self.options.mode.as_conjunctive();
        let limit = self.options.limit.unwrap_or(usize::MAX).max(1);

        match self.items {
            [] => Ok(()),
            [item] => write!(f, "`{item}`"),
            items if items.len() > limit => {
                for item in &items[..limit] {
                    write!(f, "`{item}`, ")?;
                }

                let rest = items.len() - limit;
                write!(f, "{conjunctive} {rest} other{}", crate::pluralise!(rest))
            }
            [init @ .., last] => {
                for (index, item) in init.iter().enumerate() {
                    if index + 1 == init.len() {
                        write!(f, "`{item}` ")?;
                    } else {
                        write!(f, "`{item}`, ")?;
                    }
                }

                write!(f, "{conjunctive} `{last}`")
            }
        }
    }
}

#[cfg(test)]
mod test_super {
    use super::*;

    #[test]
    fn test_sequence_display() {
        let items = ["a", "b", "c"];

        assert_eq!(SequenceDisplay::all(&items[..1]).to_string(), "`a`");
        assert_eq!(SequenceDisplay::all(&items[..2]).to_string(), "`a` and `b`");
        assert_eq!(SequenceDisplay::either(&items).to_string(), "`a`, `b` or `c`");
    }

    #[test]
    fn test_sequence_display_limit() {
        let items = ["a", "b", "c", "d"];
        let options = SequenceDisplayOptions::with_limit(SequenceJoinMode::All, 2);

        assert_eq!(SequenceDisplay::new(&items, options).to_string(), "`a`, `b`, and 2 others");

        let options = SequenceDisplayOptions::with_limit(SequenceJoinMode::All, 3);
        assert_eq!(SequenceDisplay::new(&items, options).to_string(), "`a`, `b`, `c`, and 1 other");
    }
}
