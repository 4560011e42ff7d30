/*
rect.rs

Copyright 2025 Hervé Quatremain

This file is part of Panedit.

Panedit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Panedit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Panedit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate rectangular grid puzzles.
//!
//! A grid of size `n` has `(n + 1) × (n + 1)` dots, the horizontal and vertical lines between
//! them, and `n × n` panes, one per cell.
//! An extra exit dot, just outside the grid, is connected to one of the grid dots.
//!
//! The dot list is built column by column: the dot at grid position `(x, y)` has the index
//! `x × (n + 1) + y`.
//! The line list has the horizontal lines first (column by column), then the vertical lines, and
//! then the exit line.

use log::debug;
use std::error::Error;
use std::fmt;

use crate::config::{DEFAULT_PADDING, DEFAULT_SIZE};
use crate::puzzle::{
    Complexity, Dot, DotId, Line, Neighbor, Pane, PaneAdjacency, PaneId, Puzzle,
};

/// The exit line length is the distance between two dots of a 4 × 4 grid, divided by two.
/// It does not depend on the grid size.
const EXIT_LINE_DIVISOR: f32 = 8.0;

/// Largest number of cells per side.
pub const MAX_SIZE: usize = 256;

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GeneratorError {
    /// The grid must have at least one cell.
    ZeroSize,

    /// The grid has more than [`MAX_SIZE`] cells per side.
    SizeTooLarge(usize),

    /// The padding must be in the `[0, 0.5)` range.
    PaddingOutOfRange(f32),

    /// The exit position is not a grid dot.
    EndDotOutOfGrid { x: usize, y: usize, size: usize },

    /// The exit direction has no length, or is not finite.
    ZeroDirection,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratorError::ZeroSize => write!(f, "the grid size must be at least 1"),
            GeneratorError::SizeTooLarge(s) => {
                write!(f, "grid size {s} is larger than the maximum ({MAX_SIZE})")
            }
            GeneratorError::PaddingOutOfRange(p) => {
                write!(f, "padding {p} is outside the [0, 0.5) range")
            }
            GeneratorError::EndDotOutOfGrid { x, y, size } => {
                write!(f, "exit position ({x}, {y}) is outside the grid [0, {size}]")
            }
            GeneratorError::ZeroDirection => {
                write!(f, "the exit direction must be a non-zero vector")
            }
        }
    }
}

impl Error for GeneratorError {}

/// Parameters of a rectangular puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectPuzzleParams {
    /// Number of cells per side.
    pub size: usize,

    /// Margin between the grid and the puzzle border, in the normalized puzzle space.
    pub padding: f32,

    /// Grid position of the dot that gets the exit.
    pub end_dot_pos: (usize, usize),

    /// Direction of the exit line. The vector does not have to be normalized.
    pub end_dot_vector: (f32, f32),
}

impl Default for RectPuzzleParams {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

impl RectPuzzleParams {
    /// Parameters for a grid of the given size, with the exit on the right of the last dot.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            padding: DEFAULT_PADDING,
            end_dot_pos: (size, size),
            end_dot_vector: (1.0, 0.0),
        }
    }

    pub fn generate(&self) -> Result<Puzzle, GeneratorError> {
        generate_rect_puzzle(
            self.size,
            self.padding,
            self.end_dot_pos,
            self.end_dot_vector,
        )
    }
}

/// Generate a rectangular puzzle with the default parameters.
pub fn generate_default_rect_puzzle() -> Result<Puzzle, GeneratorError> {
    RectPuzzleParams::default().generate()
}

/// Generate a rectangular grid puzzle.
///
/// The path starts at the grid origin and ends at the exit dot. The puzzle has no constraints,
/// and its identifier is `0`.
///
/// # Errors
///
/// The function returns an error when `size` is zero or larger than [`MAX_SIZE`], `padding` is outside `[0, 0.5)`,
/// `end_dot_pos` is outside the grid, or `end_dot_vector` has no length.
pub fn generate_rect_puzzle(
    size: usize,
    padding: f32,
    end_dot_pos: (usize, usize),
    end_dot_vector: (f32, f32),
) -> Result<Puzzle, GeneratorError> {
    if size == 0 {
        return Err(GeneratorError::ZeroSize);
    }
    if size > MAX_SIZE {
        return Err(GeneratorError::SizeTooLarge(size));
    }
    if !(0.0..0.5).contains(&padding) {
        return Err(GeneratorError::PaddingOutOfRange(padding));
    }
    let (end_x, end_y) = end_dot_pos;
    if end_x > size || end_y > size {
        return Err(GeneratorError::EndDotOutOfGrid {
            x: end_x,
            y: end_y,
            size,
        });
    }
    let (vx, vy) = end_dot_vector;
    let length: f32 = vx.hypot(vy);
    if !length.is_finite() || length == 0.0 {
        return Err(GeneratorError::ZeroDirection);
    }

    let count: usize = size + 1;
    let inner: f32 = 1.0 - 2.0 * padding;
    let dist: f32 = inner / size as f32;

    let dot_id = |x: usize, y: usize| DotId(x * count + y);
    let x_line = |x: usize, y: usize| Line::new(dot_id(x, y), dot_id(x + 1, y));
    let y_line = |x: usize, y: usize| Line::new(dot_id(x, y), dot_id(x, y + 1));
    let pane_id = |x: usize, y: usize| PaneId(x * size + y);

    let mut dots: Vec<Dot> = Vec::with_capacity(count * count + 1);
    for x in 0..count {
        for y in 0..count {
            dots.push(Dot::new(
                padding + dist * x as f32,
                padding + dist * y as f32,
            ));
        }
    }

    let mut lines: Vec<Line> = Vec::with_capacity(2 * size * count + 1);
    for x in 0..size {
        for y in 0..count {
            lines.push(x_line(x, y));
        }
    }
    for x in 0..count {
        for y in 0..size {
            lines.push(y_line(x, y));
        }
    }

    // Exit dot and line
    let anchor_id: DotId = dot_id(end_x, end_y);
    let anchor: Dot = dots[anchor_id.0];
    let exit_length: f32 = inner / EXIT_LINE_DIVISOR;
    let exit_id = DotId(dots.len());
    dots.push(Dot::new(
        anchor.x + exit_length * vx / length,
        anchor.y + exit_length * vy / length,
    ));
    lines.push(Line::new(anchor_id, exit_id));

    // Panes and their neighbors: left, right, below, above
    let mut panes: Vec<Pane> = Vec::with_capacity(size * size);
    let mut pane_map: Vec<PaneAdjacency> = Vec::with_capacity(size * size);
    for x in 0..size {
        for y in 0..size {
            let corner: Dot = dots[dot_id(x, y).0];
            panes.push(Pane::new(corner.x + dist / 2.0, corner.y + dist / 2.0));

            let mut neighbors: Vec<Neighbor> = Vec::with_capacity(4);
            if x != 0 {
                neighbors.push(Neighbor::new(pane_id(x - 1, y), y_line(x, y)));
            }
            if x != size - 1 {
                neighbors.push(Neighbor::new(pane_id(x + 1, y), y_line(x + 1, y)));
            }
            if y != 0 {
                neighbors.push(Neighbor::new(pane_id(x, y - 1), x_line(x, y)));
            }
            if y != size - 1 {
                neighbors.push(Neighbor::new(pane_id(x, y + 1), x_line(x, y + 1)));
            }
            pane_map.push(PaneAdjacency {
                pane: pane_id(x, y),
                neighbors,
            });
        }
    }

    debug!(
        "Generated {size}x{size} puzzle: {} dots, {} lines, {} panes, exit at ({end_x}, {end_y})",
        dots.len(),
        lines.len(),
        panes.len()
    );

    Ok(Puzzle {
        id: 0,
        start_dots: vec![dot_id(0, 0)],
        end_dots: vec![exit_id],
        dots,
        lines,
        panes,
        pane_map,
        complexity: Complexity::new(),
    })
}
