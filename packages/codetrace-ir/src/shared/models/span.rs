//! Source location types

use serde::{Deserialize, Serialize};

/// Where a syntax node sits: lines count from 1, columns from 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Zero-based line index of the span start, as used in node ids
    pub fn line_index(&self) -> usize {
        self.start_line.saturating_sub(1) as usize
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_is_zero_based() {
        assert_eq!(Span::new(1, 4, 1, 9).line_index(), 0);
        assert_eq!(Span::zero().line_index(), 0);
    }
}
