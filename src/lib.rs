/*
lib.rs

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

//! Panedit puzzle core.
//!
//! Panedit edits line puzzles: a path goes from a start dot to an end dot along the lines of a
//! planar graph, and constraints (black dots, line breaks, colored suns and squares) decide which
//! paths are solutions.
//!
//! This crate holds everything except the user interface:
//!
//! * [`puzzle`]: the puzzle graph and its constraints.
//! * [`generator`]: create new grid puzzles.
//! * [`editor`]: the constraint edits that the editor window performs.
//! * [`collection`]: the list of puzzles of the main menu.
//! * [`saver`]: the index-based puzzle record and the save file.

pub mod collection;
pub mod config;
pub mod editor;
pub mod generator;
pub mod puzzle;
pub mod saver;
