use pretty_assertions::assert_eq;

use super::*;

#[test]
fn positions_are_one_based() {
    let file = SourceFile::new("a.tply", "ab\ncd\n");
    assert_eq!(
        file.position(0),
        Position {
            offset: 0,
            line: 1,
            column: 1
        }
    );
    assert_eq!(file.position(4).to_string(), "2:2");
    assert_eq!(file.position(6).to_string(), "3:1");
}

#[test]
fn newline_belongs_to_its_line() {
    let file = SourceFile::new("a.tply", "ab\ncd");
    assert_eq!(file.position(2).to_string(), "1:3");
}

#[test]
fn columns_count_characters() {
    let file = SourceFile::new("a.tply", "🐀🐀x");
    assert_eq!(file.position(8).to_string(), "1:3");
}

#[test]
fn offsets_past_end_clamp() {
    let file = SourceFile::new("a.tply", "abc");
    assert_eq!(file.position(100).offset, 3);
}

#[test]
fn line_text_strips_terminator() {
    let file = SourceFile::new("a.tply", "first\nsecond\n");
    assert_eq!(file.line_count(), 3);
    assert_eq!(file.line_text(1), Some("first"));
    assert_eq!(file.line_text(2), Some("second"));
    assert_eq!(file.line_text(3), Some(""));
    assert_eq!(file.line_text(4), None);
    assert_eq!(file.line_text(0), None);
}
