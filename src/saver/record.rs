/*
record.rs

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

//! Flat, index-based representation of a puzzle.
//!
//! A [`PuzzleRecord`] replaces every dot and pane reference of a [`Puzzle`] by an integer index,
//! and every color by its tag.
//! The record is what [`crate::saver::puzzles::SaverPuzzles`] writes in the save file, by using
//! [`serde`].
//!
//! [`encode`] builds a record from a puzzle, and [`decode`] builds a new puzzle, with new dot and
//! pane lists, from a record.
//! Running a puzzle through both functions is how [`Puzzle::deep_copy`] works.
//!
//! Older save files are supported:
//!
//! * The constraint lists are optional. Missing lists are read as empty lists.
//! * The `startDots` and `endDots` lists are optional, and `id` defaults to `-1`.
//! * The `name` and `complexityJson` field names, and the `first`/`second` layout of the pane map
//!   entries, are accepted on read.
//! * Unknown fields are ignored.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::puzzle::{
    ColoredPane, Complexity, Dot, DotId, Line, Neighbor, Pane, PaneAdjacency, PaneId, Puzzle,
    PuzzleColor,
};

/// Identifier given to records that do not have one.
const LEGACY_ID: i32 = -1;

fn legacy_id() -> i32 {
    LEGACY_ID
}

/// Line, as a pair of indexes in [`PuzzleRecord::dots`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub dot1: usize,
    pub dot2: usize,
}

/// Pane, as an index in [`PuzzleRecord::panes`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaneRef {
    pub ind: usize,
}

/// Colored constraint, as a pane index and a color tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColoredPaneRecord {
    pub ind: usize,
    pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct NeighborRecord {
    #[serde(alias = "first")]
    pub pane: PaneRef,
    #[serde(alias = "second")]
    pub line: LineRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaneMapRecord {
    #[serde(alias = "first")]
    pub pane: PaneRef,
    #[serde(alias = "second")]
    pub neighbors: Vec<NeighborRecord>,
}

/// Constraints of the puzzle.
///
/// All the lists are optional so that files written before a constraint type existed can still
/// be read. [`encode`] always sets them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityRecord {
    #[serde(default)]
    pub black_dots_on_dot: Option<Vec<usize>>,
    #[serde(default)]
    pub black_dots_on_line: Option<Vec<LineRecord>>,
    #[serde(default)]
    pub line_breaks: Option<Vec<LineRecord>>,
    #[serde(default)]
    pub suns: Option<Vec<ColoredPaneRecord>>,
    #[serde(default)]
    pub squares: Option<Vec<ColoredPaneRecord>>,
}

/// Saved form of a [`Puzzle`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    #[serde(alias = "name", default = "legacy_id")]
    pub id: i32,
    #[serde(default)]
    pub start_dots: Vec<usize>,
    #[serde(default)]
    pub end_dots: Vec<usize>,
    pub dots: Vec<Dot>,
    pub lines: Vec<LineRecord>,
    pub panes: Vec<Pane>,
    pub pane_map: Vec<PaneMapRecord>,
    #[serde(alias = "complexityJson", default)]
    pub complexity: ComplexityRecord,
}

/// Type of errors when converting between [`Puzzle`] and [`PuzzleRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A dot index or a dot reference is outside the dot list.
    DotOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// A pane index or a pane reference is outside the pane list.
    PaneOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// The puzzle refers to a pane that the pane map does not list, so the pane has no index in
    /// the record.
    UnmappedPane { field: &'static str, pane: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::DotOutOfRange { field, index, len } => {
                write!(f, "{field}: dot index {index} out of range ({len} dots)")
            }
            CodecError::PaneOutOfRange { field, index, len } => {
                write!(f, "{field}: pane index {index} out of range ({len} panes)")
            }
            CodecError::UnmappedPane { field, pane } => {
                write!(f, "{field}: pane {pane} is not in the pane map")
            }
        }
    }
}

impl Error for CodecError {}

/// Resolve puzzle references into record indexes.
struct Encoder<'a> {
    puzzle: &'a Puzzle,

    /// For each pane of the puzzle arena, its index in the record pane list.
    pane_slots: Vec<Option<usize>>,
}

impl<'a> Encoder<'a> {
    fn new(puzzle: &'a Puzzle) -> Result<(Self, Vec<Pane>), CodecError> {
        let mut pane_slots: Vec<Option<usize>> = vec![None; puzzle.panes.len()];
        let mut panes: Vec<Pane> = Vec::with_capacity(puzzle.pane_map.len());

        // The record pane list is the list of the panes in pane map order
        for a in &puzzle.pane_map {
            let len: usize = pane_slots.len();
            let slot: &mut Option<usize> =
                pane_slots
                    .get_mut(a.pane.0)
                    .ok_or(CodecError::PaneOutOfRange {
                        field: "paneMap",
                        index: a.pane.0,
                        len,
                    })?;
            if slot.is_none() {
                *slot = Some(panes.len());
                panes.push(puzzle.panes[a.pane.0]);
            }
        }
        Ok((Self { puzzle, pane_slots }, panes))
    }

    fn dot(&self, field: &'static str, id: DotId) -> Result<usize, CodecError> {
        if id.0 < self.puzzle.dots.len() {
            Ok(id.0)
        } else {
            Err(CodecError::DotOutOfRange {
                field,
                index: id.0,
                len: self.puzzle.dots.len(),
            })
        }
    }

    fn line(&self, field: &'static str, line: &Line) -> Result<LineRecord, CodecError> {
        Ok(LineRecord {
            dot1: self.dot(field, line.dot1)?,
            dot2: self.dot(field, line.dot2)?,
        })
    }

    fn pane(&self, field: &'static str, id: PaneId) -> Result<PaneRef, CodecError> {
        match self.pane_slots.get(id.0) {
            Some(Some(ind)) => Ok(PaneRef { ind: *ind }),
            Some(None) => Err(CodecError::UnmappedPane { field, pane: id.0 }),
            None => Err(CodecError::PaneOutOfRange {
                field,
                index: id.0,
                len: self.pane_slots.len(),
            }),
        }
    }

    fn colored(
        &self,
        field: &'static str,
        c: &ColoredPane,
    ) -> Result<ColoredPaneRecord, CodecError> {
        Ok(ColoredPaneRecord {
            ind: self.pane(field, c.pane)?.ind,
            color: c.color.tag().to_string(),
        })
    }

    fn dots(&self, field: &'static str, ids: &[DotId]) -> Result<Vec<usize>, CodecError> {
        ids.iter().map(|d| self.dot(field, *d)).collect()
    }

    fn lines(&self, field: &'static str, lines: &[Line]) -> Result<Vec<LineRecord>, CodecError> {
        lines.iter().map(|l| self.line(field, l)).collect()
    }

    fn coloreds(
        &self,
        field: &'static str,
        list: &[ColoredPane],
    ) -> Result<Vec<ColoredPaneRecord>, CodecError> {
        list.iter().map(|c| self.colored(field, c)).collect()
    }
}

/// Build the [`PuzzleRecord`] for the given [`Puzzle`].
///
/// # Errors
///
/// The function returns an error when the puzzle refers to a dot or a pane that does not exist,
/// or to a pane that the pane map does not list.
pub fn encode(puzzle: &Puzzle) -> Result<PuzzleRecord, CodecError> {
    let (e, panes) = Encoder::new(puzzle)?;

    let pane_map: Vec<PaneMapRecord> = puzzle
        .pane_map
        .iter()
        .map(|a| -> Result<PaneMapRecord, CodecError> {
            Ok(PaneMapRecord {
                pane: e.pane("paneMap", a.pane)?,
                neighbors: a
                    .neighbors
                    .iter()
                    .map(|n| -> Result<NeighborRecord, CodecError> {
                        Ok(NeighborRecord {
                            pane: e.pane("paneMap", n.pane)?,
                            line: e.line("paneMap", &n.line)?,
                        })
                    })
                    .collect::<Result<Vec<NeighborRecord>, CodecError>>()?,
            })
        })
        .collect::<Result<Vec<PaneMapRecord>, CodecError>>()?;

    let c: &Complexity = &puzzle.complexity;
    let complexity = ComplexityRecord {
        black_dots_on_dot: Some(e.dots("blackDotsOnDot", &c.black_dots_on_dot)?),
        black_dots_on_line: Some(e.lines("blackDotsOnLine", &c.black_dots_on_line)?),
        line_breaks: Some(e.lines("lineBreaks", &c.line_breaks)?),
        suns: Some(e.coloreds("suns", &c.suns)?),
        squares: Some(e.coloreds("squares", &c.squares)?),
    };

    Ok(PuzzleRecord {
        id: puzzle.id,
        start_dots: e.dots("startDots", &puzzle.start_dots)?,
        end_dots: e.dots("endDots", &puzzle.end_dots)?,
        dots: puzzle.dots.clone(),
        lines: e.lines("lines", &puzzle.lines)?,
        panes,
        pane_map,
        complexity,
    })
}

/// Resolve record indexes into puzzle references.
struct Decoder<'a> {
    record: &'a PuzzleRecord,
}

impl Decoder<'_> {
    fn dot(&self, field: &'static str, index: usize) -> Result<DotId, CodecError> {
        if index < self.record.dots.len() {
            Ok(DotId(index))
        } else {
            Err(CodecError::DotOutOfRange {
                field,
                index,
                len: self.record.dots.len(),
            })
        }
    }

    fn line(&self, field: &'static str, line: &LineRecord) -> Result<Line, CodecError> {
        Ok(Line::new(
            self.dot(field, line.dot1)?,
            self.dot(field, line.dot2)?,
        ))
    }

    fn pane(&self, field: &'static str, pane: &PaneRef) -> Result<PaneId, CodecError> {
        if pane.ind < self.record.panes.len() {
            Ok(PaneId(pane.ind))
        } else {
            Err(CodecError::PaneOutOfRange {
                field,
                index: pane.ind,
                len: self.record.panes.len(),
            })
        }
    }

    fn dots(&self, field: &'static str, list: &[usize]) -> Result<Vec<DotId>, CodecError> {
        list.iter().map(|i| self.dot(field, *i)).collect()
    }

    fn lines(&self, field: &'static str, list: &[LineRecord]) -> Result<Vec<Line>, CodecError> {
        list.iter().map(|l| self.line(field, l)).collect()
    }

    fn coloreds(
        &self,
        field: &'static str,
        list: &[ColoredPaneRecord],
    ) -> Result<Vec<ColoredPane>, CodecError> {
        list.iter()
            .map(|c| -> Result<ColoredPane, CodecError> {
                Ok(ColoredPane::new(
                    self.pane(field, &PaneRef { ind: c.ind })?,
                    PuzzleColor::from_tag_or_fallback(&c.color),
                ))
            })
            .collect()
    }
}

/// Build a new [`Puzzle`] from the given [`PuzzleRecord`].
///
/// The dots and the panes of the new puzzle are copies of the record lists, at the same
/// positions. Missing constraint lists are read as empty lists. Unknown color tags are replaced
/// by [`crate::puzzle::FALLBACK_COLOR`].
///
/// # Errors
///
/// The function returns an error when an index is outside the dot list or the pane list.
pub fn decode(record: &PuzzleRecord) -> Result<Puzzle, CodecError> {
    let d = Decoder { record };
    let c: &ComplexityRecord = &record.complexity;

    let pane_map: Vec<PaneAdjacency> = record
        .pane_map
        .iter()
        .map(|a| -> Result<PaneAdjacency, CodecError> {
            Ok(PaneAdjacency {
                pane: d.pane("paneMap", &a.pane)?,
                neighbors: a
                    .neighbors
                    .iter()
                    .map(|n| -> Result<Neighbor, CodecError> {
                        Ok(Neighbor::new(
                            d.pane("paneMap", &n.pane)?,
                            d.line("paneMap", &n.line)?,
                        ))
                    })
                    .collect::<Result<Vec<Neighbor>, CodecError>>()?,
            })
        })
        .collect::<Result<Vec<PaneAdjacency>, CodecError>>()?;

    let complexity = Complexity {
        black_dots_on_dot: d.dots(
            "blackDotsOnDot",
            c.black_dots_on_dot.as_deref().unwrap_or_default(),
        )?,
        black_dots_on_line: d.lines(
            "blackDotsOnLine",
            c.black_dots_on_line.as_deref().unwrap_or_default(),
        )?,
        line_breaks: d.lines("lineBreaks", c.line_breaks.as_deref().unwrap_or_default())?,
        suns: d.coloreds("suns", c.suns.as_deref().unwrap_or_default())?,
        squares: d.coloreds("squares", c.squares.as_deref().unwrap_or_default())?,
    };

    let puzzle = Puzzle {
        id: record.id,
        start_dots: d.dots("startDots", &record.start_dots)?,
        end_dots: d.dots("endDots", &record.end_dots)?,
        dots: record.dots.clone(),
        lines: d.lines("lines", &record.lines)?,
        panes: record.panes.clone(),
        pane_map,
        complexity,
    };
    debug!(
        "Decoded puzzle {}: {} dots, {} lines, {} panes, {} constraints",
        puzzle.id,
        puzzle.dots.len(),
        puzzle.lines.len(),
        puzzle.panes.len(),
        puzzle.complexity.len()
    );
    Ok(puzzle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rect::generate_rect_puzzle;
    use serde_json::json;

    fn grid() -> Puzzle {
        generate_rect_puzzle(2, 0.2, (2, 2), (1.0, 0.0)).unwrap()
    }

    fn decorated_grid() -> Puzzle {
        let mut p = grid();
        let line = p.lines[3];
        p.complexity.add_black_dot_on_dot(DotId(4));
        p.complexity.add_black_dot_on_line(line);
        p.complexity.add_line_break(p.lines[0]);
        p.complexity.set_sun(PaneId(1), PuzzleColor::Red);
        p.complexity.set_square(PaneId(3), PuzzleColor::Blue);
        p
    }

    #[test]
    fn test_round_trip() {
        let p = decorated_grid();
        let record = encode(&p).unwrap();
        let copy = decode(&record).unwrap();
        assert_eq!(copy, p);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let p = decorated_grid();
        assert_eq!(encode(&p).unwrap(), encode(&p).unwrap());
    }

    #[test]
    fn test_record_uses_indexes_and_tags() {
        let p = decorated_grid();
        let record = encode(&p).unwrap();

        assert_eq!(record.start_dots, vec![0]);
        assert_eq!(record.end_dots, vec![9]);
        assert_eq!(record.dots.len(), 10);
        assert_eq!(record.panes.len(), 4);
        assert_eq!(record.lines[0], LineRecord { dot1: 0, dot2: 3 });
        assert_eq!(record.complexity.black_dots_on_dot, Some(vec![4]));
        assert_eq!(
            record.complexity.suns,
            Some(vec![ColoredPaneRecord {
                ind: 1,
                color: "red".to_string()
            }])
        );
        assert_eq!(
            record.complexity.squares,
            Some(vec![ColoredPaneRecord {
                ind: 3,
                color: "blue".to_string()
            }])
        );
    }

    #[test]
    fn test_panes_follow_pane_map_order() {
        let mut p = grid();
        // Pane map listing the panes in reverse order
        p.pane_map.reverse();
        p.complexity.set_sun(PaneId(0), PuzzleColor::Green);

        let record = encode(&p).unwrap();
        assert_eq!(record.panes[0], p.panes[3]);
        assert_eq!(record.panes[3], p.panes[0]);
        assert_eq!(record.pane_map[0].pane, PaneRef { ind: 0 });
        assert_eq!(record.complexity.suns.as_ref().unwrap()[0].ind, 3);

        // The copy has the same geometry, with the panes renumbered
        let copy = decode(&record).unwrap();
        assert_eq!(copy.panes[0], p.panes[3]);
        assert_eq!(copy.complexity.suns[0].pane, PaneId(3));
        assert_eq!(copy.pane(PaneId(3)), p.pane(PaneId(0)));
        assert_eq!(copy.validate(), Ok(()));
    }

    #[test]
    fn test_coinciding_dots_keep_their_identity() {
        let mut p = grid();
        // A second dot at the same position as dot 0
        let twin = DotId(p.dots.len());
        p.dots.push(p.dots[0]);
        p.lines.push(Line::new(twin, DotId(1)));
        p.complexity.add_black_dot_on_dot(twin);

        let copy = decode(&encode(&p).unwrap()).unwrap();
        assert_eq!(copy.lines.last().unwrap().dot1, twin);
        assert_eq!(copy.complexity.black_dots_on_dot, vec![twin]);
        assert!(!copy.complexity.contains_black_dot_on_dot(DotId(0)));
    }

    #[test]
    fn test_encode_rejects_dangling_references() {
        let mut p = grid();
        p.complexity.add_black_dot_on_dot(DotId(99));
        assert_eq!(
            encode(&p),
            Err(CodecError::DotOutOfRange {
                field: "blackDotsOnDot",
                index: 99,
                len: 10
            })
        );

        // Pane in the arena but not in the pane map
        let mut p = grid();
        p.panes.push(Pane::new(0.5, 0.5));
        p.complexity.set_square(PaneId(4), PuzzleColor::White);
        assert_eq!(
            encode(&p),
            Err(CodecError::UnmappedPane {
                field: "squares",
                pane: 4
            })
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_index() {
        let mut record = encode(&grid()).unwrap();
        record.lines[0].dot1 = 999;
        assert_eq!(
            decode(&record),
            Err(CodecError::DotOutOfRange {
                field: "lines",
                index: 999,
                len: 10
            })
        );

        let mut record = encode(&grid()).unwrap();
        record.pane_map[1].neighbors[0].pane = PaneRef { ind: 4 };
        assert!(matches!(
            decode(&record),
            Err(CodecError::PaneOutOfRange {
                field: "paneMap",
                index: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_constraint_lists() {
        let mut record = encode(&decorated_grid()).unwrap();
        record.complexity.line_breaks = None;
        record.complexity.suns = None;

        let p = decode(&record).unwrap();
        assert!(p.complexity.line_breaks.is_empty());
        assert!(p.complexity.suns.is_empty());
        assert_eq!(p.complexity.squares.len(), 1);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let mut record = encode(&grid()).unwrap();
        record.complexity.suns = Some(vec![ColoredPaneRecord {
            ind: 0,
            color: "magenta".to_string(),
        }]);

        let p = decode(&record).unwrap();
        assert_eq!(
            p.complexity.suns,
            vec![ColoredPane::new(PaneId(0), PuzzleColor::White)]
        );
    }

    #[test]
    fn test_json_field_names() {
        let record = encode(&decorated_grid()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        for key in [
            "id",
            "startDots",
            "endDots",
            "dots",
            "lines",
            "panes",
            "paneMap",
            "complexity",
        ] {
            assert!(value.get(key).is_some(), "Missing field {key}");
        }
        assert_eq!(value["paneMap"][0]["pane"], json!({"ind": 0}));
        assert!(value["paneMap"][0]["neighbors"][0]["line"]["dot1"].is_u64());
        assert_eq!(value["complexity"]["suns"], json!([{"ind": 1, "color": "red"}]));
        assert!(value["complexity"]["lineBreaks"].is_array());
    }

    #[test]
    fn test_legacy_record() {
        // Layout of the files written by the first versions of the editor
        let value = json!({
            "name": 3,
            "startDots": [0],
            "endDots": [2],
            "dots": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
            "lines": [{"dot1": 0, "dot2": 1}, {"dot1": 1, "dot2": 2}],
            "panes": [{"x": 0.5, "y": 0.5}],
            "paneMap": [{"first": {"ind": 0}, "second": []}],
            "complexityJson": {"blackDotsOnDot": [1], "suns": [{"ind": 0, "color": "green"}]},
            "addedInSomeFutureVersion": true
        });

        let record: PuzzleRecord = serde_json::from_value(value).unwrap();
        let p = decode(&record).unwrap();
        assert_eq!(p.id, 3);
        assert_eq!(p.complexity.black_dots_on_dot, vec![DotId(1)]);
        assert_eq!(
            p.complexity.suns,
            vec![ColoredPane::new(PaneId(0), PuzzleColor::Green)]
        );
        assert!(p.complexity.black_dots_on_line.is_empty());
        assert!(p.complexity.line_breaks.is_empty());
    }

    #[test]
    fn test_optional_fields_default() {
        let value = json!({
            "dots": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}],
            "lines": [{"dot1": 0, "dot2": 1}],
            "panes": [],
            "paneMap": [],
            "complexity": {"blackDotsOnLine": null}
        });

        let record: PuzzleRecord = serde_json::from_value(value).unwrap();
        let p = decode(&record).unwrap();
        assert_eq!(p.id, LEGACY_ID);
        assert!(p.start_dots.is_empty());
        assert!(p.complexity.is_empty());
    }

    #[test]
    fn test_required_fields() {
        let value = json!({
            "id": 1,
            "dots": [],
            "lines": [],
            "panes": []
        });
        let err = serde_json::from_value::<PuzzleRecord>(value).unwrap_err();
        assert!(err.to_string().contains("paneMap"));
    }
}
