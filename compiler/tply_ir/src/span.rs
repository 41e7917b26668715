//! Byte-offset source ranges.

use std::fmt;
use std::ops::Range;

/// A source offset did not fit in `u32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanError(pub usize);

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source offset {} exceeds u32::MAX", self.0)
    }
}

impl std::error::Error for SpanError {}

/// Half-open byte range `start..end` into a template source.
///
/// The file a span belongs to is carried by the [`Template`](crate::Template)
/// or error that holds it, which keeps every node at 8 bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span used where no source location exists.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Fallible conversion from a `usize` range.
    pub fn try_from_range(range: Range<usize>) -> Result<Self, SpanError> {
        let start = u32::try_from(range.start).map_err(|_| SpanError(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError(range.end))?;
        Ok(Span { start, end })
    }

    /// Conversion from a `usize` range, saturating offsets past `u32::MAX`.
    ///
    /// Templates that large are rejected before lexing, so saturation only
    /// matters for synthetic inputs.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests;
