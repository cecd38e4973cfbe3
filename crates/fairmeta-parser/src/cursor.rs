//! Line cursor over a shared, immutable line sequence.
use crate::section::is_new_section;

/// Splits `text` into lines for parsing. The whole input is trimmed first,
/// then each line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.trim().split('\n').map(str::trim).collect()
}

/// Marks every line that holds the value of the `set NAME` line before it.
///
/// Only meaningful for next-line env values. A marked line is data: it never
/// opens a section, ends a scan or starts a directive of its own, whatever
/// it reads like.
pub fn value_lines(lines: &[&str]) -> Vec<bool> {
    let mut values = vec![false; lines.len()];
    for idx in 1..lines.len() {
        values[idx] = !values[idx - 1] && lines[idx - 1].starts_with("set ");
    }
    values
}

/// Position over a borrowed line sequence.
///
/// Cursors are `Copy`: a fork is a plain copy that shares the lines and moves
/// on its own, so extractors can scan ahead without consuming lines the
/// dispatcher still needs.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    lines: &'a [&'a str],
    values: &'a [bool],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor with no value lines.
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self::with_values(lines, &[])
    }

    /// Cursor honoring a mask from [`value_lines`]. Lines past the end of
    /// `values` are structural.
    pub fn with_values(lines: &'a [&'a str], values: &'a [bool]) -> Self {
        Self {
            lines,
            values,
            pos: 0,
        }
    }

    /// Line at the current position, or `""` past the end.
    pub fn current(&self) -> &'a str {
        self.peek(0)
    }

    pub fn peek(&self, offset: usize) -> &'a str {
        self.pos
            .checked_add(offset)
            .and_then(|idx| self.lines.get(idx))
            .copied()
            .unwrap_or("")
    }

    /// Moves forward `steps` lines, clamped to the end of the input.
    pub fn advance(&mut self, steps: usize) -> &mut Self {
        self.pos = self.pos.saturating_add(steps).min(self.lines.len());
        self
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.lines.len()
    }

    pub fn fork(&self) -> Self {
        *self
    }

    pub fn is_value(&self) -> bool {
        self.values.get(self.pos).copied().unwrap_or(false)
    }

    /// Current line unless it is a `set` value.
    pub fn structural(&self) -> Option<&'a str> {
        if self.is_value() {
            None
        } else {
            Some(self.current())
        }
    }

    /// True when the current line opens a new section and ends any field scan.
    pub fn at_boundary(&self) -> bool {
        self.structural().map_or(false, is_new_section)
    }

    /// 1-based line number of the current position, for diagnostics.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }
}
