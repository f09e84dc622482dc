//! # Id Sequence
//!
//! Monotonic id source for a table.
//!
//! ```text
//! length-derived ids (rejected):      sequence ids (used):
//!
//!   [1, 2, 3]  delete 2 → [1, 3]        [1, 2, 3]  delete 2 → [1, 3]
//!   insert → id = len + 1 = 3  ✗        insert → id = next = 4  ✓
//! ```
//!
//! On a table that never saw a delete both schemes hand out the same ids.

/// Hands out strictly increasing ids, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    /// A sequence whose first id is 1.
    pub fn new() -> Self {
        IdSequence { next: 1 }
    }

    /// A sequence that continues after the given existing ids.
    pub fn after<I: IntoIterator<Item = u32>>(existing: I) -> Self {
        let highest = existing.into_iter().max().unwrap_or(0);
        IdSequence {
            next: highest.saturating_add(1),
        }
    }

    /// Takes the next id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one() {
        let mut seq = IdSequence::new();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
        assert_eq!(seq.next_id(), 3);
    }

    #[test]
    fn test_continues_after_existing() {
        let mut seq = IdSequence::after([3, 1, 2]);
        assert_eq!(seq.next_id(), 4);

        let mut seq = IdSequence::after(Vec::new());
        assert_eq!(seq.next_id(), 1);
    }

    #[test]
    fn test_continues_after_gaps() {
        let mut seq = IdSequence::after([1, 7]);
        assert_eq!(seq.next_id(), 8);
    }
}
