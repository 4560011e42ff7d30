/*
complexity.rs

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

//! Constraints laid over the puzzle graph.
//!
//! The [`Complexity`] object lists the black dots (on dots or on lines), the line breaks, and the
//! colored suns and squares that sit in the panes.
//! A pane carries at most one colored constraint: setting a sun or a square on a pane first
//! removes whatever sun or square was already there.

use log::debug;

use super::color::PuzzleColor;
use super::geometry::{DotId, Line, PaneId};

/// Colored constraint in a pane.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ColoredPane {
    pub pane: PaneId,
    pub color: PuzzleColor,
}

impl ColoredPane {
    pub fn new(pane: PaneId, color: PuzzleColor) -> Self {
        Self { pane, color }
    }
}

/// Kind of a colored pane constraint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColoredKind {
    Sun,
    Square,
}

/// Constraints of a puzzle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Complexity {
    pub black_dots_on_dot: Vec<DotId>,
    pub black_dots_on_line: Vec<Line>,
    pub line_breaks: Vec<Line>,
    pub suns: Vec<ColoredPane>,
    pub squares: Vec<ColoredPane>,
}

// Line lists compare edges, not directions.
fn contains_line(list: &[Line], line: &Line) -> bool {
    list.iter().any(|l| l.same_edge(line))
}

fn add_line(list: &mut Vec<Line>, line: Line) -> bool {
    if contains_line(list, &line) {
        return false;
    }
    list.push(line);
    true
}

fn remove_line(list: &mut Vec<Line>, line: &Line) -> bool {
    let len: usize = list.len();
    list.retain(|l| !l.same_edge(line));
    list.len() != len
}

impl Complexity {
    /// Create an empty [`Complexity`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the puzzle has no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.black_dots_on_dot.is_empty()
            && self.black_dots_on_line.is_empty()
            && self.line_breaks.is_empty()
            && self.suns.is_empty()
            && self.squares.is_empty()
    }

    /// Remove all the constraints.
    pub fn clear(&mut self) {
        self.black_dots_on_dot.clear();
        self.black_dots_on_line.clear();
        self.line_breaks.clear();
        self.suns.clear();
        self.squares.clear();
    }

    /// Total number of constraints.
    pub fn len(&self) -> usize {
        self.black_dots_on_dot.len()
            + self.black_dots_on_line.len()
            + self.line_breaks.len()
            + self.suns.len()
            + self.squares.len()
    }

    //
    // Black dots on dots
    //

    pub fn contains_black_dot_on_dot(&self, dot: DotId) -> bool {
        self.black_dots_on_dot.contains(&dot)
    }

    /// Add a black dot on the given dot. Return false if there is already one.
    pub fn add_black_dot_on_dot(&mut self, dot: DotId) -> bool {
        if self.contains_black_dot_on_dot(dot) {
            return false;
        }
        self.black_dots_on_dot.push(dot);
        true
    }

    /// Remove the black dot on the given dot. Return false if there was none.
    pub fn remove_black_dot_on_dot(&mut self, dot: DotId) -> bool {
        let len: usize = self.black_dots_on_dot.len();
        self.black_dots_on_dot.retain(|d| *d != dot);
        self.black_dots_on_dot.len() != len
    }

    /// Add or remove the black dot on the given dot. Return whether the dot now has a black dot.
    pub fn toggle_black_dot_on_dot(&mut self, dot: DotId) -> bool {
        if self.remove_black_dot_on_dot(dot) {
            false
        } else {
            self.add_black_dot_on_dot(dot)
        }
    }

    //
    // Black dots on lines
    //

    pub fn contains_black_dot_on_line(&self, line: &Line) -> bool {
        contains_line(&self.black_dots_on_line, line)
    }

    pub fn add_black_dot_on_line(&mut self, line: Line) -> bool {
        add_line(&mut self.black_dots_on_line, line)
    }

    pub fn remove_black_dot_on_line(&mut self, line: &Line) -> bool {
        remove_line(&mut self.black_dots_on_line, line)
    }

    pub fn toggle_black_dot_on_line(&mut self, line: Line) -> bool {
        if self.remove_black_dot_on_line(&line) {
            false
        } else {
            self.add_black_dot_on_line(line)
        }
    }

    //
    // Line breaks
    //

    pub fn contains_line_break(&self, line: &Line) -> bool {
        contains_line(&self.line_breaks, line)
    }

    pub fn add_line_break(&mut self, line: Line) -> bool {
        add_line(&mut self.line_breaks, line)
    }

    pub fn remove_line_break(&mut self, line: &Line) -> bool {
        remove_line(&mut self.line_breaks, line)
    }

    pub fn toggle_line_break(&mut self, line: Line) -> bool {
        if self.remove_line_break(&line) {
            false
        } else {
            self.add_line_break(line)
        }
    }

    //
    // Suns and squares
    //

    /// Return the colored constraint in the given pane, if any.
    ///
    /// Suns are looked up before squares.
    pub fn colored_constraint(&self, pane: PaneId) -> Option<(ColoredKind, PuzzleColor)> {
        if let Some(c) = self.suns.iter().find(|c| c.pane == pane) {
            return Some((ColoredKind::Sun, c.color));
        }
        self.squares
            .iter()
            .find(|c| c.pane == pane)
            .map(|c| (ColoredKind::Square, c.color))
    }

    /// Remove the sun or the square in the given pane. Return false if the pane had none.
    pub fn remove_colored(&mut self, pane: PaneId) -> bool {
        let len: usize = self.suns.len() + self.squares.len();
        self.suns.retain(|c| c.pane != pane);
        self.squares.retain(|c| c.pane != pane);
        self.suns.len() + self.squares.len() != len
    }

    /// Put a sun or a square in the given pane, replacing any sun or square already there.
    ///
    /// Return the constraint that has been replaced.
    pub fn set_colored(
        &mut self,
        pane: PaneId,
        kind: ColoredKind,
        color: PuzzleColor,
    ) -> Option<(ColoredKind, PuzzleColor)> {
        let previous: Option<(ColoredKind, PuzzleColor)> = self.colored_constraint(pane);

        self.remove_colored(pane);
        let c: ColoredPane = ColoredPane::new(pane, color);
        match kind {
            ColoredKind::Sun => self.suns.push(c),
            ColoredKind::Square => self.squares.push(c),
        }
        debug!("Pane {}: {kind:?} {color} (was {previous:?})", pane.0);
        previous
    }

    pub fn set_sun(&mut self, pane: PaneId, color: PuzzleColor) -> Option<(ColoredKind, PuzzleColor)> {
        self.set_colored(pane, ColoredKind::Sun, color)
    }

    pub fn set_square(
        &mut self,
        pane: PaneId,
        color: PuzzleColor,
    ) -> Option<(ColoredKind, PuzzleColor)> {
        self.set_colored(pane, ColoredKind::Square, color)
    }
}
