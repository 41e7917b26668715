//! Rendered output as a sequence of lines.
//!
//! A [`LineBuffer`] is addressed as one character stream in which the
//! newline ending a terminated line counts as one character. Offsets are in
//! characters, not bytes. A line that is not terminated runs on into the
//! next one when the buffer is printed.
//!
//! Lines rendered inside `setindent` carry an indent override. Indentation
//! edits skip those lines, and [`LineBuffer::resolve`] turns the override
//! into literal indentation once the whole template has been rendered.

use std::fmt;
use std::ops::Range;

use tply_ir::is_blank;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    pub text: String,
    pub terminated: bool,
    /// Output indentation in units, set by the nearest `setindent`.
    pub indent_override: Option<usize>,
}

impl Line {
    pub fn new(text: impl Into<String>, terminated: bool) -> Self {
        Line {
            text: text.into(),
            terminated,
            indent_override: None,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Length in the character stream, newline included.
    fn stream_len(&self) -> usize {
        self.char_len() + usize::from(self.terminated)
    }

    fn is_blank(&self) -> bool {
        self.text.chars().all(is_blank)
    }

    fn indentation(&self) -> usize {
        self.text.chars().take_while(|&ch| is_blank(ch)).count()
    }
}

/// Byte index of the `chars`-th character, or the end of `text`.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        LineBuffer { lines }
    }

    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split_inclusive('\n')
            .map(|piece| match piece.strip_suffix('\n') {
                Some(text) => Line::new(text, true),
                None => Line::new(piece, false),
            })
            .collect();
        LineBuffer { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.iter().map(Line::stream_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.lines
            .iter()
            .flat_map(|line| line.text.chars().chain(line.terminated.then_some('\n')))
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars().nth(offset)
    }

    /// Stream offset at which line `line` starts.
    pub fn line_offset(&self, line: usize) -> usize {
        self.lines[..line.min(self.lines.len())]
            .iter()
            .map(Line::stream_len)
            .sum()
    }

    /// Line index and column of `offset`. An offset past the last line
    /// yields `(lines.len(), 0)`.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (i, line) in self.lines.iter().enumerate() {
            let len = line.char_len();
            if remaining <= len {
                return (i, remaining);
            }
            remaining -= len;
            if line.terminated {
                remaining -= 1;
            }
        }
        (self.lines.len(), 0)
    }

    /// Remove the characters in `range`, joining the lines on either side.
    pub fn delete(&mut self, range: Range<usize>) {
        let len = self.len();
        let (start, end) = (range.start.min(len), range.end.min(len));
        if start >= end {
            return;
        }
        let (first, start_col) = self.locate(start);
        let (last, end_col) = self.locate(end);

        let head = &self.lines[first];
        let mut text = head.text[..byte_index(&head.text, start_col)].to_string();
        let indent_override = head.indent_override;
        let terminated = match self.lines.get(last) {
            Some(tail) => {
                text.push_str(&tail.text[byte_index(&tail.text, end_col)..]);
                tail.terminated
            }
            None => false,
        };
        let stop = last.min(self.lines.len() - 1);
        self.lines.splice(
            first..=stop,
            [Line {
                text,
                terminated,
                indent_override,
            }],
        );
    }

    /// Splice `other` in at `offset`, splitting the line found there.
    pub fn insert_at(&mut self, offset: usize, other: LineBuffer) {
        let mut incoming = other.lines.into_iter();
        let Some(first) = incoming.next() else {
            return;
        };
        let (index, col) = self.locate(offset.min(self.len()));
        if index == self.lines.len() {
            self.lines.push(first);
            self.lines.extend(incoming);
            return;
        }

        let line = &mut self.lines[index];
        let tail_text = line.text.split_off(byte_index(&line.text, col));
        let tail_terminated = line.terminated;
        let tail_override = line.indent_override;
        line.text.push_str(&first.text);
        line.terminated = first.terminated;
        if line.indent_override.is_none() {
            line.indent_override = first.indent_override;
        }
        let head_terminated = line.terminated;

        let mut rest: Vec<Line> = incoming.collect();
        let last_terminated = rest.last().map_or(head_terminated, |l| l.terminated);
        if last_terminated {
            if !tail_text.is_empty() || tail_terminated {
                rest.push(Line {
                    text: tail_text,
                    terminated: tail_terminated,
                    indent_override: tail_override,
                });
            }
        } else {
            let target = rest.last_mut().unwrap_or(&mut self.lines[index]);
            target.text.push_str(&tail_text);
            target.terminated = tail_terminated;
        }
        self.lines.splice(index + 1..index + 1, rest);
    }

    /// Add `other` at the end. A trailing unterminated line continues with
    /// the first line of `other`; when it holds only blanks and that line
    /// has an indent override, the override replaces the blanks.
    pub fn append(&mut self, other: LineBuffer) {
        let mut incoming = other.lines.into_iter();
        if let Some(last) = self.lines.last_mut().filter(|line| !line.terminated) {
            let Some(first) = incoming.next() else {
                return;
            };
            if first.indent_override.is_some() && last.is_blank() {
                last.text = first.text;
                last.indent_override = first.indent_override;
            } else {
                last.text.push_str(&first.text);
            }
            last.terminated = first.terminated;
        }
        self.lines.extend(incoming);
    }

    pub fn push_str(&mut self, text: &str) {
        self.append(LineBuffer::from_text(text));
    }

    /// Prefix every line that starts after a newline (or at the start of
    /// the buffer) at or after `start` and has content. Overridden lines
    /// are left alone.
    pub fn indent(&mut self, prefix: &str, start: usize) {
        let mut offset = 0;
        let mut at_line_start = true;
        for line in &mut self.lines {
            let len = line.stream_len();
            if at_line_start && offset >= start && line.indent_override.is_none() && !line.is_blank() {
                line.text.insert_str(0, prefix);
            }
            at_line_start = line.terminated;
            offset += len;
        }
    }

    /// Least indentation among lines with content and no override.
    pub fn min_indentation(&self) -> Option<usize> {
        self.lines
            .iter()
            .filter(|line| line.indent_override.is_none() && !line.is_blank())
            .map(Line::indentation)
            .min()
    }

    /// Strip up to `amount` leading blanks from every line without an
    /// override; by default, the minimum indentation.
    pub fn dedent(&mut self, amount: Option<usize>) {
        let Some(amount) = amount.or_else(|| self.min_indentation()) else {
            return;
        };
        for line in self.lines.iter_mut().filter(|line| line.indent_override.is_none()) {
            let strip = line.indentation().min(amount);
            let end = byte_index(&line.text, strip);
            line.text.drain(..end);
        }
    }

    /// First offset at or after `start` whose character satisfies `pred`.
    pub fn find(&self, start: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
        self.chars()
            .enumerate()
            .skip(start)
            .find(|&(_, ch)| pred(ch))
            .map(|(i, _)| i)
    }

    /// Last offset whose character satisfies `pred`.
    pub fn rfind(&self, pred: impl Fn(char) -> bool) -> Option<usize> {
        let chars: Vec<char> = self.chars().collect();
        chars.iter().rposition(|&ch| pred(ch))
    }

    /// Whether any character is something other than whitespace.
    pub fn has_content(&self) -> bool {
        self.chars().any(|ch| !ch.is_whitespace())
    }

    pub fn ends_with_newline(&self) -> bool {
        self.lines.last().is_some_and(|line| line.terminated)
    }

    /// Give every line that has no override yet the override `level`.
    pub fn set_indent_override(&mut self, level: usize) {
        for line in &mut self.lines {
            line.indent_override.get_or_insert(level);
        }
    }

    /// Final text: each physical line that carries an override and has
    /// content starts with `unit` repeated `level` times.
    pub fn resolve(&self, unit: &str) -> String {
        let mut out = String::with_capacity(self.len());
        let mut at_line_start = true;
        for line in &self.lines {
            if let Some(level) = line.indent_override {
                if at_line_start && !line.is_blank() {
                    out.push_str(&unit.repeat(level));
                }
            }
            out.push_str(&line.text);
            if line.terminated {
                out.push('\n');
            }
            at_line_start = line.terminated;
        }
        out
    }
}

impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(&line.text)?;
            if line.terminated {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
