use std::fmt;
use std::ops::Range;

/// A contiguous run of events `[start, start + length)`.
///
/// A zero-length span is valid and serves as the base case of the
/// similarity recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last index, saturating at `usize::MAX`
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Whether the span lies inside a sequence of `len` events
    pub fn fits(&self, len: usize) -> bool {
        self.end() <= len
    }

    /// Whether the two index ranges share at least one position
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.max(other.start) < self.end().min(other.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_spans_overlap() {
        let a = Span::new(3, 2);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_adjacent_spans_do_not_overlap() {
        let a = Span::new(0, 2);
        let b = Span::new(2, 2);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_partial_overlap_is_symmetric() {
        let a = Span::new(0, 3);
        let b = Span::new(2, 2);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_empty_span_never_overlaps() {
        let empty = Span::new(1, 0);
        assert!(!empty.overlaps(&Span::new(0, 4)));
    }

    #[test]
    fn test_fits() {
        let s = Span::new(10, 4);
        assert!(s.fits(14));
        assert!(!s.fits(13));
        assert_eq!(s.to_string(), "[10, 14)");
    }

    #[test]
    fn test_huge_span_end_saturates() {
        let s = Span::new(usize::MAX, 1);
        assert_eq!(s.end(), usize::MAX);
        assert!(!s.fits(10));
        assert!(!Span::new(0, usize::MAX).fits(10));
        assert_eq!(s.to_string(), format!("[{}, {})", usize::MAX, usize::MAX));
    }
}
