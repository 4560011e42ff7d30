/*
config.rs

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

//! Application constants.

/// Name of the save file, relative to the data directory.
pub const SAVE_FILE: &str = "puzzles.json";

/// Number of cells per side of a new puzzle.
pub const DEFAULT_SIZE: usize = 4;

/// Margin around the grid of a new puzzle.
pub const DEFAULT_PADDING: f32 = 0.18;

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>"
);
