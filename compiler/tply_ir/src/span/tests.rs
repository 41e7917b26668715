use pretty_assertions::assert_eq;

use super::*;

#[test]
fn merge_covers_both() {
    let merged = Span::new(4, 9).merge(Span::new(2, 6));
    assert_eq!(merged, Span::new(2, 9));
    assert_eq!(merged.len(), 7);
}

#[test]
fn point_is_empty() {
    let span = Span::point(12);
    assert!(span.is_empty());
    assert_eq!(span.to_range(), 12..12);
}

#[test]
fn try_from_range_rejects_huge_offsets() {
    assert_eq!(Span::try_from_range(3..5), Ok(Span::new(3, 5)));
    let huge = u32::MAX as usize + 1;
    assert_eq!(Span::try_from_range(0..huge), Err(SpanError(huge)));
}

#[test]
fn from_range_saturates() {
    let huge = u32::MAX as usize + 10;
    assert_eq!(Span::from_range(1..huge), Span::new(1, u32::MAX));
}

#[test]
fn debug_and_display_print_ranges() {
    assert_eq!(format!("{:?}", Span::new(1, 3)), "1..3");
    assert_eq!(Span::new(0, 8).to_string(), "0..8");
}
