/*
color.rs

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

//! Colors of the sun and square constraints.

use log::warn;
use strum_macros::{Display, FromRepr, IntoStaticStr};

/// Color used when a saved puzzle refers to a color that does not exist.
pub const FALLBACK_COLOR: PuzzleColor = PuzzleColor::White;

/// Color of a colored pane constraint.
///
/// The saved puzzles store the lowercase variant name (see [`PuzzleColor::tag`]) and never the
/// variant position, so the variants can be reordered without breaking the save file.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Display, FromRepr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum PuzzleColor {
    #[default]
    Black,
    White,
    Red,
    Green,
    Blue,
}

impl PuzzleColor {
    /// Return all the colors, in declaration order.
    pub fn all() -> impl Iterator<Item = PuzzleColor> {
        (0..=u8::MAX).map_while(PuzzleColor::from_repr)
    }

    /// Stable tag stored in the save file.
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Return the color for the given tag, or [`None`] if the tag is unknown.
    pub fn from_tag(tag: &str) -> Option<PuzzleColor> {
        Self::all().find(|c| c.tag() == tag)
    }

    /// Return the color for the given tag, or [`FALLBACK_COLOR`] if the tag is unknown.
    pub fn from_tag_or_fallback(tag: &str) -> PuzzleColor {
        match Self::from_tag(tag) {
            Some(c) => c,
            None => {
                warn!("Unknown color {tag:?}: using {FALLBACK_COLOR}");
                FALLBACK_COLOR
            }
        }
    }

    /// Display color. Color components are integers between 0 and 255.
    pub fn rgba(self) -> (u8, u8, u8, u8) {
        match self {
            PuzzleColor::Black => (0, 0, 0, 255),
            PuzzleColor::White => (255, 255, 255, 255),
            PuzzleColor::Red => (255, 0, 0, 255),
            PuzzleColor::Green => (0, 255, 0, 255),
            PuzzleColor::Blue => (0, 0, 255, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_lowercase_names() {
        let tags: Vec<&str> = PuzzleColor::all().map(|c| c.tag()).collect();
        assert_eq!(tags, ["black", "white", "red", "green", "blue"]);
        assert_eq!(PuzzleColor::Green.to_string(), "green");
    }

    #[test]
    fn test_from_tag() {
        for color in PuzzleColor::all() {
            assert_eq!(PuzzleColor::from_tag(color.tag()), Some(color));
        }
        assert_eq!(PuzzleColor::from_tag("Red"), None);
        assert_eq!(PuzzleColor::from_tag("magenta"), None);
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        assert_eq!(PuzzleColor::from_tag_or_fallback("magenta"), FALLBACK_COLOR);
        assert_eq!(PuzzleColor::from_tag_or_fallback("blue"), PuzzleColor::Blue);
    }
}
