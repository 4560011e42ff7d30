/*
geometry.rs

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

//! Dots, lines, and panes of the puzzle graph.
//!
//! Dots and panes are stored in arenas inside [`crate::puzzle::Puzzle`]. Everything else refers
//! to them through their position in these arenas ([`DotId`] and [`PaneId`]), so "the same dot"
//! always means "the same index", never "the same coordinates".

use serde::{Deserialize, Serialize};

/// Vertex of the puzzle graph, in the normalized `[0, 1]` puzzle space.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
}

impl Dot {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Face of the puzzle graph.
///
/// The coordinates are the position of the face label (where region constraints are drawn), not
/// the polygon of the face.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct Pane {
    pub x: f32,
    pub y: f32,
}

impl Pane {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Position of a dot in [`crate::puzzle::Puzzle::dots`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DotId(pub usize);

/// Position of a pane in [`crate::puzzle::Puzzle::panes`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub usize);

/// Edge of the puzzle graph, between two dots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    pub dot1: DotId,
    pub dot2: DotId,
}

impl Line {
    pub fn new(dot1: DotId, dot2: DotId) -> Self {
        Self { dot1, dot2 }
    }

    /// Whether the two lines connect the same pair of dots, in any direction.
    pub fn same_edge(&self, other: &Line) -> bool {
        (self.dot1 == other.dot1 && self.dot2 == other.dot2)
            || (self.dot1 == other.dot2 && self.dot2 == other.dot1)
    }

    /// Whether the given dot is one of the line ends.
    pub fn has_dot(&self, dot: DotId) -> bool {
        self.dot1 == dot || self.dot2 == dot
    }

    /// Dot pair in ascending order, which identifies the edge regardless of the line direction.
    pub fn edge_key(&self) -> (DotId, DotId) {
        if self.dot1 <= self.dot2 {
            (self.dot1, self.dot2)
        } else {
            (self.dot2, self.dot1)
        }
    }

    /// Middle of the line, where line constraints are drawn.
    ///
    /// Return [`None`] if one of the dots is not in the given dot list.
    pub fn midpoint(&self, dots: &[Dot]) -> Option<(f32, f32)> {
        let d1: &Dot = dots.get(self.dot1.0)?;
        let d2: &Dot = dots.get(self.dot2.0)?;
        Some(((d1.x + d2.x) / 2.0, (d1.y + d2.y) / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_edge_ignores_direction() {
        let a = Line::new(DotId(1), DotId(4));
        let b = Line::new(DotId(4), DotId(1));
        let c = Line::new(DotId(1), DotId(5));

        assert!(a.same_edge(&b));
        assert!(b.same_edge(&a));
        assert!(!a.same_edge(&c));
        assert_ne!(a, b, "Derived equality keeps the direction");
        assert_eq!(a.edge_key(), b.edge_key());
    }

    #[test]
    fn test_midpoint() {
        let dots = vec![Dot::new(0.0, 0.0), Dot::new(0.5, 1.0)];
        let line = Line::new(DotId(0), DotId(1));
        assert_eq!(line.midpoint(&dots), Some((0.25, 0.5)));

        let dangling = Line::new(DotId(0), DotId(7));
        assert_eq!(dangling.midpoint(&dots), None);
    }

    #[test]
    fn test_has_dot() {
        let line = Line::new(DotId(2), DotId(3));
        assert!(line.has_dot(DotId(2)));
        assert!(line.has_dot(DotId(3)));
        assert!(!line.has_dot(DotId(4)));
    }
}
