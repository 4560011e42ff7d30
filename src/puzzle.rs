/*
puzzle.rs

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

//! Puzzle internal representation.
//!
//! A [`Puzzle`] owns two arenas: the list of the dots ([`Puzzle::dots`]) and the list of the
//! panes ([`Puzzle::panes`]).
//! Lines, start and end dots, the pane adjacency map, and the constraints all refer to these
//! arenas by index ([`geometry::DotId`] and [`geometry::PaneId`]).
//! Because nothing holds a reference into the arenas, cloning, encoding, or decoding a puzzle
//! never shares a dot or a pane between two puzzles.

pub mod color;
pub mod complexity;
pub mod geometry;

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::saver::record::{self, CodecError};

pub use color::{FALLBACK_COLOR, PuzzleColor};
pub use complexity::{ColoredKind, ColoredPane, Complexity};
pub use geometry::{Dot, DotId, Line, Pane, PaneId};

/// Neighbor of a pane, with the line the two panes share.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Neighbor {
    pub pane: PaneId,
    pub line: Line,
}

impl Neighbor {
    pub fn new(pane: PaneId, line: Line) -> Self {
        Self { pane, line }
    }
}

/// Pane and the list of its neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneAdjacency {
    pub pane: PaneId,
    pub neighbors: Vec<Neighbor>,
}

/// Reasons why a puzzle is not well formed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A dot reference does not designate an entry of the dot list.
    DotOutOfRange { field: &'static str, index: usize },

    /// A pane reference does not designate an entry of the pane list.
    PaneOutOfRange { field: &'static str, index: usize },

    /// The two ends of the line are the same dot.
    DegenerateLine { line: usize },

    /// Two lines connect the same pair of dots.
    DuplicateLine { first: usize, second: usize },

    /// Pane `pane` lists `neighbor` as a neighbor, but `neighbor` does not list `pane` with the
    /// same line.
    AsymmetricAdjacency { pane: usize, neighbor: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::DotOutOfRange { field, index } => {
                write!(f, "{field}: dot {index} does not exist")
            }
            ValidationError::PaneOutOfRange { field, index } => {
                write!(f, "{field}: pane {index} does not exist")
            }
            ValidationError::DegenerateLine { line } => {
                write!(f, "line {line} starts and ends on the same dot")
            }
            ValidationError::DuplicateLine { first, second } => {
                write!(f, "lines {first} and {second} connect the same dots")
            }
            ValidationError::AsymmetricAdjacency { pane, neighbor } => write!(
                f,
                "pane {pane} lists pane {neighbor} as a neighbor, but not the other way around"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Puzzle object.
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Identifier of the puzzle in the saved collection. The user can change it.
    pub id: i32,

    /// Dots where the path can start.
    pub start_dots: Vec<DotId>,

    /// Dots where the path can end.
    pub end_dots: Vec<DotId>,

    /// Dot arena. The position of a dot in this list is its identity.
    pub dots: Vec<Dot>,

    pub lines: Vec<Line>,

    /// Pane arena. The position of a pane in this list is its identity.
    pub panes: Vec<Pane>,

    /// Adjacency of the panes (dual graph).
    pub pane_map: Vec<PaneAdjacency>,

    pub complexity: Complexity,
}

impl Puzzle {
    pub fn dot(&self, id: DotId) -> Option<&Dot> {
        self.dots.get(id.0)
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(id.0)
    }

    /// Return the neighbors of the given pane, or [`None`] if the pane map does not list it.
    pub fn neighbors(&self, pane: PaneId) -> Option<&[Neighbor]> {
        self.pane_map
            .iter()
            .find(|a| a.pane == pane)
            .map(|a| a.neighbors.as_slice())
    }

    /// Return the position in [`Puzzle::lines`] of the line that connects the same dots.
    pub fn line_index(&self, line: &Line) -> Option<usize> {
        self.lines.iter().position(|l| l.same_edge(line))
    }

    /// Middle of the given line.
    pub fn line_midpoint(&self, line: &Line) -> Option<(f32, f32)> {
        line.midpoint(&self.dots)
    }

    /// Independent copy of the puzzle, built by encoding and then decoding the puzzle.
    ///
    /// The copy has its own dot and pane arenas, with the panes in pane map order.
    pub fn deep_copy(&self) -> Result<Puzzle, CodecError> {
        record::decode(&record::encode(self)?)
    }

    /// Verify that the puzzle is well formed.
    ///
    /// # Errors
    ///
    /// The method returns the first problem found: dangling dot or pane references, lines with
    /// twice the same dot, duplicated lines, or non-symmetric pane adjacency.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let num_dots: usize = self.dots.len();
        let num_panes: usize = self.panes.len();
        let check_dot = |field: &'static str, id: DotId| {
            if id.0 < num_dots {
                Ok(())
            } else {
                Err(ValidationError::DotOutOfRange {
                    field,
                    index: id.0,
                })
            }
        };
        let check_pane = |field: &'static str, id: PaneId| {
            if id.0 < num_panes {
                Ok(())
            } else {
                Err(ValidationError::PaneOutOfRange {
                    field,
                    index: id.0,
                })
            }
        };
        let check_line = |field: &'static str, line: &Line| -> Result<(), ValidationError> {
            check_dot(field, line.dot1)?;
            check_dot(field, line.dot2)
        };

        for d in &self.start_dots {
            check_dot("startDots", *d)?;
        }
        for d in &self.end_dots {
            check_dot("endDots", *d)?;
        }
        for d in &self.complexity.black_dots_on_dot {
            check_dot("blackDotsOnDot", *d)?;
        }
        for l in &self.complexity.black_dots_on_line {
            check_line("blackDotsOnLine", l)?;
        }
        for l in &self.complexity.line_breaks {
            check_line("lineBreaks", l)?;
        }
        for c in &self.complexity.suns {
            check_pane("suns", c.pane)?;
        }
        for c in &self.complexity.squares {
            check_pane("squares", c.pane)?;
        }

        let mut edges: HashMap<(DotId, DotId), usize> = HashMap::with_capacity(self.lines.len());
        for (i, l) in self.lines.iter().enumerate() {
            check_line("lines", l)?;
            if l.dot1 == l.dot2 {
                return Err(ValidationError::DegenerateLine { line: i });
            }
            if let Some(first) = edges.insert(l.edge_key(), i) {
                return Err(ValidationError::DuplicateLine { first, second: i });
            }
        }

        for a in &self.pane_map {
            check_pane("paneMap", a.pane)?;
            for n in &a.neighbors {
                check_pane("paneMap", n.pane)?;
                check_line("paneMap", &n.line)?;
                let symmetric: bool = self.neighbors(n.pane).is_some_and(|back| {
                    back.iter()
                        .any(|b| b.pane == a.pane && b.line.same_edge(&n.line))
                });
                if !symmetric {
                    return Err(ValidationError::AsymmetricAdjacency {
                        pane: a.pane.0,
                        neighbor: n.pane.0,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two panes side by side, sharing the line 1-2.
    //
    // 0---1---3
    // | A | B |
    // 5---2---4
    fn two_panes() -> Puzzle {
        let dots = vec![
            Dot::new(0.0, 0.0),
            Dot::new(0.5, 0.0),
            Dot::new(0.5, 1.0),
            Dot::new(1.0, 0.0),
            Dot::new(1.0, 1.0),
            Dot::new(0.0, 1.0),
        ];
        let shared = Line::new(DotId(1), DotId(2));
        let lines = vec![
            Line::new(DotId(0), DotId(1)),
            shared,
            Line::new(DotId(1), DotId(3)),
            Line::new(DotId(3), DotId(4)),
            Line::new(DotId(4), DotId(2)),
            Line::new(DotId(2), DotId(5)),
            Line::new(DotId(5), DotId(0)),
        ];
        Puzzle {
            id: 7,
            start_dots: vec![DotId(0)],
            end_dots: vec![DotId(4)],
            dots,
            lines,
            panes: vec![Pane::new(0.25, 0.5), Pane::new(0.75, 0.5)],
            pane_map: vec![
                PaneAdjacency {
                    pane: PaneId(0),
                    neighbors: vec![Neighbor::new(PaneId(1), shared)],
                },
                PaneAdjacency {
                    pane: PaneId(1),
                    neighbors: vec![Neighbor::new(PaneId(0), shared)],
                },
            ],
            complexity: Complexity::new(),
        }
    }

    #[test]
    fn test_valid_puzzle() {
        assert_eq!(two_panes().validate(), Ok(()));
    }

    #[test]
    fn test_lookups() {
        let p = two_panes();
        assert_eq!(p.line_index(&Line::new(DotId(2), DotId(1))), Some(1));
        assert_eq!(p.line_index(&Line::new(DotId(0), DotId(4))), None);
        assert_eq!(p.line_midpoint(&p.lines[1]), Some((0.5, 0.5)));
        assert_eq!(p.neighbors(PaneId(1)).map(|n| n.len()), Some(1));
        assert_eq!(p.neighbors(PaneId(9)), None);
        assert_eq!(p.pane(PaneId(1)), Some(&Pane::new(0.75, 0.5)));
        assert_eq!(p.dot(DotId(6)), None);
    }

    #[test]
    fn test_dangling_dot() {
        let mut p = two_panes();
        p.complexity.black_dots_on_dot.push(DotId(6));
        assert_eq!(
            p.validate(),
            Err(ValidationError::DotOutOfRange {
                field: "blackDotsOnDot",
                index: 6
            })
        );
    }

    #[test]
    fn test_dangling_pane() {
        let mut p = two_panes();
        p.complexity.set_sun(PaneId(2), PuzzleColor::Red);
        assert_eq!(
            p.validate(),
            Err(ValidationError::PaneOutOfRange {
                field: "suns",
                index: 2
            })
        );
    }

    #[test]
    fn test_duplicate_and_degenerate_lines() {
        let mut p = two_panes();
        p.lines.push(Line::new(DotId(2), DotId(1)));
        assert_eq!(
            p.validate(),
            Err(ValidationError::DuplicateLine {
                first: 1,
                second: 7
            })
        );

        let mut p = two_panes();
        p.lines.push(Line::new(DotId(3), DotId(3)));
        assert_eq!(p.validate(), Err(ValidationError::DegenerateLine { line: 7 }));
    }

    #[test]
    fn test_asymmetric_adjacency() {
        let mut p = two_panes();
        p.pane_map[1].neighbors.clear();
        assert_eq!(
            p.validate(),
            Err(ValidationError::AsymmetricAdjacency {
                pane: 0,
                neighbor: 1
            })
        );
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let mut p = two_panes();
        p.complexity.add_black_dot_on_dot(DotId(1));

        let mut copy = p.deep_copy().unwrap();
        assert_eq!(copy, p);

        copy.complexity.add_black_dot_on_dot(DotId(2));
        copy.dots[0].x = 0.1;
        assert_eq!(p.complexity.black_dots_on_dot, vec![DotId(1)]);
        assert_eq!(p.dots[0].x, 0.0);
    }
}
