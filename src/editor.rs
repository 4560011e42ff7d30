/*
editor.rs

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

//! Edit the constraints of a puzzle.
//!
//! The editor window lets the user select a tool (black dot, line break, sun, or square) and a
//! color, and then click dots, lines, and panes.
//! [`apply_edit`] performs the change for one click:
//!
//! * Clicking an element that already carries a constraint removes that constraint, whatever the
//!   selected tool.
//! * Otherwise the selected tool adds its constraint, if it applies to that kind of element.
//!
//! Panes are the exception: a pane is "already carrying the constraint" only if its sun or square
//! has the selected color. Otherwise the new sun or square replaces the old one, and other tools
//! leave the pane alone.

use log::debug;
use std::error::Error;
use std::fmt;

use crate::puzzle::{ColoredKind, DotId, Line, PaneId, Puzzle, PuzzleColor};

/// Element of the puzzle that the user clicked.
///
/// The value is the index in [`Puzzle::dots`], [`Puzzle::lines`], or [`Puzzle::pane_map`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Dot(usize),
    Line(usize),
    Pane(usize),
}

/// Tool selected in the editor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditTool {
    BlackDot,
    LineBreak,
    Sun,
    Square,
}

impl EditTool {
    /// Whether the tool needs a color.
    pub fn is_colored(self) -> bool {
        matches!(self, EditTool::Sun | EditTool::Square)
    }
}

/// What [`apply_edit`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Added,
    Removed,

    /// A sun or a square replaced the previous one in the pane.
    Replaced,

    /// The tool does not apply to the target.
    Unchanged,
}

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The target index does not designate an element of the puzzle.
    TargetOutOfRange(EditTarget),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditError::TargetOutOfRange(t) => write!(f, "{t:?} is not in the puzzle"),
        }
    }
}

impl Error for EditError {}

/// Apply the selected tool to the clicked element.
///
/// `color` is only used by the [`EditTool::Sun`] and [`EditTool::Square`] tools.
pub fn apply_edit(
    puzzle: &mut Puzzle,
    target: EditTarget,
    tool: Option<EditTool>,
    color: PuzzleColor,
) -> Result<EditOutcome, EditError> {
    let outcome: EditOutcome = match target {
        EditTarget::Dot(i) => {
            if i >= puzzle.dots.len() {
                return Err(EditError::TargetOutOfRange(target));
            }
            edit_dot(puzzle, DotId(i), tool)
        }
        EditTarget::Line(i) => {
            let line: Line = *puzzle
                .lines
                .get(i)
                .ok_or(EditError::TargetOutOfRange(target))?;
            edit_line(puzzle, line, tool)
        }
        EditTarget::Pane(i) => {
            let pane: PaneId = puzzle
                .pane_map
                .get(i)
                .ok_or(EditError::TargetOutOfRange(target))?
                .pane;
            edit_pane(puzzle, pane, tool, color)
        }
    };
    debug!("Puzzle {}: {target:?} with {tool:?}: {outcome:?}", puzzle.id);
    Ok(outcome)
}

fn edit_dot(puzzle: &mut Puzzle, dot: DotId, tool: Option<EditTool>) -> EditOutcome {
    let c = &mut puzzle.complexity;

    if c.remove_black_dot_on_dot(dot) {
        return EditOutcome::Removed;
    }
    match tool {
        Some(EditTool::BlackDot) => {
            c.add_black_dot_on_dot(dot);
            EditOutcome::Added
        }
        _ => EditOutcome::Unchanged,
    }
}

fn edit_line(puzzle: &mut Puzzle, line: Line, tool: Option<EditTool>) -> EditOutcome {
    let c = &mut puzzle.complexity;

    if c.remove_black_dot_on_line(&line) || c.remove_line_break(&line) {
        return EditOutcome::Removed;
    }
    match tool {
        Some(EditTool::BlackDot) => {
            c.add_black_dot_on_line(line);
            EditOutcome::Added
        }
        Some(EditTool::LineBreak) => {
            c.add_line_break(line);
            EditOutcome::Added
        }
        _ => EditOutcome::Unchanged,
    }
}

fn edit_pane(
    puzzle: &mut Puzzle,
    pane: PaneId,
    tool: Option<EditTool>,
    color: PuzzleColor,
) -> EditOutcome {
    let c = &mut puzzle.complexity;

    // Same color, whatever the kind and the tool: remove
    if let Some((_, current)) = c.colored_constraint(pane)
        && current == color
    {
        c.remove_colored(pane);
        return EditOutcome::Removed;
    }

    let kind: ColoredKind = match tool {
        Some(EditTool::Sun) => ColoredKind::Sun,
        Some(EditTool::Square) => ColoredKind::Square,
        _ => return EditOutcome::Unchanged,
    };
    match c.set_colored(pane, kind, color) {
        Some(_) => EditOutcome::Replaced,
        None => EditOutcome::Added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rect::generate_rect_puzzle;
    use crate::puzzle::ColoredPane;

    fn grid() -> Puzzle {
        generate_rect_puzzle(3, 0.1, (3, 3), (1.0, 0.0)).unwrap()
    }

    #[test]
    fn test_black_dot_on_dot() {
        let mut p = grid();
        let black = PuzzleColor::Black;

        assert_eq!(
            apply_edit(&mut p, EditTarget::Dot(5), Some(EditTool::BlackDot), black),
            Ok(EditOutcome::Added)
        );
        assert!(p.complexity.contains_black_dot_on_dot(DotId(5)));

        // Clicking again removes the dot, whatever the tool
        assert_eq!(
            apply_edit(&mut p, EditTarget::Dot(5), Some(EditTool::Sun), black),
            Ok(EditOutcome::Removed)
        );
        assert_eq!(
            apply_edit(&mut p, EditTarget::Dot(5), None, black),
            Ok(EditOutcome::Unchanged)
        );
        assert!(p.complexity.is_empty());
    }

    #[test]
    fn test_line_tools() {
        let mut p = grid();
        let line: Line = p.lines[2];
        let black = PuzzleColor::Black;

        assert_eq!(
            apply_edit(&mut p, EditTarget::Line(2), Some(EditTool::LineBreak), black),
            Ok(EditOutcome::Added)
        );
        assert!(p.complexity.contains_line_break(&line));

        // The break is removed before a black dot can be added
        assert_eq!(
            apply_edit(&mut p, EditTarget::Line(2), Some(EditTool::BlackDot), black),
            Ok(EditOutcome::Removed)
        );
        assert_eq!(
            apply_edit(&mut p, EditTarget::Line(2), Some(EditTool::BlackDot), black),
            Ok(EditOutcome::Added)
        );
        assert!(p.complexity.contains_black_dot_on_line(&line));
        assert!(!p.complexity.contains_line_break(&line));

        assert_eq!(
            apply_edit(&mut p, EditTarget::Line(0), Some(EditTool::Square), black),
            Ok(EditOutcome::Unchanged)
        );
    }

    #[test]
    fn test_pane_tools() {
        let mut p = grid();
        let pane: PaneId = p.pane_map[4].pane;

        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(4), Some(EditTool::Sun), PuzzleColor::Red),
            Ok(EditOutcome::Added)
        );
        // Different color: replace
        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(4), Some(EditTool::Square), PuzzleColor::Blue),
            Ok(EditOutcome::Replaced)
        );
        assert!(p.complexity.suns.is_empty());
        assert_eq!(
            p.complexity.squares,
            vec![ColoredPane::new(pane, PuzzleColor::Blue)]
        );
        // Same color, other kind: remove
        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(4), Some(EditTool::Sun), PuzzleColor::Blue),
            Ok(EditOutcome::Removed)
        );
        assert!(p.complexity.is_empty());

        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(4), Some(EditTool::BlackDot), PuzzleColor::Blue),
            Ok(EditOutcome::Unchanged)
        );
    }

    #[test]
    fn test_pane_removal_ignores_the_tool() {
        let mut p = grid();
        apply_edit(&mut p, EditTarget::Pane(2), Some(EditTool::Sun), PuzzleColor::Red).unwrap();

        // Other color without a colored tool: nothing to do
        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(2), Some(EditTool::LineBreak), PuzzleColor::Green),
            Ok(EditOutcome::Unchanged)
        );
        assert_eq!(p.complexity.suns.len(), 1);

        // Same color: removed, with or without a tool
        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(2), None, PuzzleColor::Red),
            Ok(EditOutcome::Removed)
        );
        assert!(p.complexity.is_empty());

        apply_edit(&mut p, EditTarget::Pane(2), Some(EditTool::Square), PuzzleColor::Red).unwrap();
        assert_eq!(
            apply_edit(&mut p, EditTarget::Pane(2), Some(EditTool::BlackDot), PuzzleColor::Red),
            Ok(EditOutcome::Removed)
        );
        assert!(p.complexity.is_empty());
    }

    #[test]
    fn test_target_out_of_range() {
        let mut p = grid();
        let black = PuzzleColor::Black;

        for target in [
            EditTarget::Dot(p.dots.len()),
            EditTarget::Line(p.lines.len()),
            EditTarget::Pane(p.pane_map.len()),
        ] {
            assert_eq!(
                apply_edit(&mut p, target, Some(EditTool::BlackDot), black),
                Err(EditError::TargetOutOfRange(target))
            );
        }
    }

    #[test]
    fn test_edits_on_a_copy_leave_the_original_alone() {
        let p = grid();
        let mut copy = p.deep_copy().unwrap();

        apply_edit(&mut copy, EditTarget::Dot(0), Some(EditTool::BlackDot), PuzzleColor::Black)
            .unwrap();
        assert!(copy.complexity.contains_black_dot_on_dot(DotId(0)));
        assert!(p.complexity.is_empty());
    }

    #[test]
    fn test_colored_tools() {
        assert!(EditTool::Sun.is_colored());
        assert!(EditTool::Square.is_colored());
        assert!(!EditTool::BlackDot.is_colored());
        assert!(!EditTool::LineBreak.is_colored());
    }
}
