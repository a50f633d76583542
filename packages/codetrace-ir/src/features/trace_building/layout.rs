//! Node positions

use crate::config::LayoutConfig;
use crate::shared::models::Position;

/// Grid placement for every synthesized node
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    spacing: i32,
    row_y: i32,
    call_x: i32,
}

impl Layout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            spacing: config.spacing,
            row_y: config.row_y,
            call_x: config.call_x,
        }
    }

    pub fn array_element(&self, index: usize) -> Position {
        let index = i32::try_from(index).unwrap_or(i32::MAX / self.spacing.max(1));
        Position::new(index.saturating_mul(self.spacing), self.row_y)
    }

    pub fn call_frame(&self, depth: u32) -> Position {
        let depth = i32::try_from(depth).unwrap_or(i32::MAX);
        Position::new(
            self.call_x,
            self.row_y.saturating_add(depth.saturating_mul(self.spacing)),
        )
    }

    /// Root, left and right of the binary tree stand-in
    pub fn tree(&self) -> [Position; 3] {
        let s = self.spacing;
        [
            Position::new(2 * s, self.row_y),
            Position::new(s, self.row_y + s),
            Position::new(3 * s, self.row_y + s),
        ]
    }

    /// Root, child 1 and child 2 of the dictionary stand-in
    pub fn dictionary(&self) -> [Position; 3] {
        let s = self.spacing;
        [
            Position::new(2 * s + s / 2, self.row_y),
            Position::new(2 * s, self.row_y + s),
            Position::new(3 * s, self.row_y + s),
        ]
    }

    /// The two nodes of a linked-list stand-in
    pub fn list(&self) -> [Position; 2] {
        [
            Position::new(self.call_x, self.row_y),
            Position::new(self.call_x + self.spacing, self.row_y),
        ]
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
