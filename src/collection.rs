/*
collection.rs

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

//! Manage the list of the puzzles.
//!
//! The main object, [`PuzzleCollection`], is the list of puzzles shown in the main menu.
//! The user can add a new puzzle, change a puzzle identifier, delete a puzzle, or open a puzzle in
//! the editor.
//! The editor always works on a copy (see [`PuzzleCollection::open_copy`]). When the user saves
//! the edits, the copy replaces the puzzle in the list (see [`PuzzleCollection::replace`]).
//!
//! Identifiers are unique in the collection. The collection is saved and restored with
//! [`crate::saver::puzzles::SaverPuzzles`].
//!
//! When some saved puzzles cannot be loaded, the collection remembers them: their identifiers
//! stay reserved, and [`PuzzleCollection::save`] refuses to overwrite the file until the caller
//! gives them up with [`PuzzleCollection::discard_skipped`].

use log::{debug, info, warn};
use std::error::Error;
use std::fmt;

use crate::generator::rect::{GeneratorError, RectPuzzleParams};
use crate::puzzle::Puzzle;
use crate::saver::puzzles::{LoadFailure, LoadReport, SaverPuzzles};
use crate::saver::record::CodecError;

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionError {
    /// No puzzle at the given position.
    IndexOutOfRange(usize),

    /// Another puzzle already uses the identifier. `suggestion` is an identifier that is free.
    NotUnique { id: i32, suggestion: i32 },

    /// Every identifier is in use.
    IdExhausted,

    /// Saving would erase puzzles that could not be loaded.
    SkippedRecords(usize),

    Codec(CodecError),

    Generator(GeneratorError),
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollectionError::IndexOutOfRange(i) => write!(f, "no puzzle at position {i}"),
            CollectionError::NotUnique { id, suggestion } => {
                write!(f, "id {id} is not unique. You can use {suggestion}")
            }
            CollectionError::IdExhausted => write!(f, "no free puzzle id left"),
            CollectionError::SkippedRecords(n) => write!(
                f,
                "{n} saved puzzles could not be loaded and would be lost by saving"
            ),
            CollectionError::Codec(e) => write!(f, "{e}"),
            CollectionError::Generator(e) => write!(f, "{e}"),
        }
    }
}

impl Error for CollectionError {}

impl From<CodecError> for CollectionError {
    fn from(e: CodecError) -> Self {
        CollectionError::Codec(e)
    }
}

impl From<GeneratorError> for CollectionError {
    fn from(e: GeneratorError) -> Self {
        CollectionError::Generator(e)
    }
}

/// List of the puzzles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PuzzleCollection {
    puzzles: Vec<Puzzle>,

    /// Number of saved puzzles that could not be loaded.
    skipped: usize,

    /// Identifiers of these puzzles, when they could be read.
    reserved_ids: Vec<i32>,
}

impl PuzzleCollection {
    /// Create an empty [`PuzzleCollection`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`PuzzleCollection`] object from a list of puzzles, sorted by identifier.
    pub fn from_vec(mut puzzles: Vec<Puzzle>) -> Self {
        puzzles.sort_by_key(|p| p.id);
        Self {
            puzzles,
            ..Self::default()
        }
    }

    /// Load the collection from the save file.
    ///
    /// Return the collection and the list of the saved puzzles that could not be loaded.
    pub fn load(saver: &SaverPuzzles) -> Result<(Self, Vec<LoadFailure>), Box<dyn Error>> {
        let report: LoadReport = saver.load_puzzles()?;
        let mut collection: PuzzleCollection = Self::from_vec(report.puzzles);
        collection.skipped = report.failures.len();
        collection.reserved_ids = report.failures.iter().filter_map(|f| f.id).collect();
        info!(
            "{} puzzles loaded, {} skipped",
            collection.len(),
            report.failures.len()
        );
        Ok((collection, report.failures))
    }

    /// Save the collection in the save file.
    ///
    /// # Errors
    ///
    /// The method returns [`CollectionError::SkippedRecords`], and does not touch the file, when
    /// the collection was loaded from a file with puzzles that could not be loaded.
    pub fn save(&mut self, saver: &SaverPuzzles) -> Result<(), Box<dyn Error>> {
        if self.skipped > 0 {
            return Err(Box::new(CollectionError::SkippedRecords(self.skipped)));
        }
        saver.save_puzzles(&mut self.puzzles)
    }

    /// Number of saved puzzles that could not be loaded.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Give up the puzzles that could not be loaded. The next save erases them from the file,
    /// and their identifiers become free.
    pub fn discard_skipped(&mut self) {
        if self.skipped > 0 {
            warn!("Discarding {} puzzles that could not be loaded", self.skipped);
        }
        self.skipped = 0;
        self.reserved_ids.clear();
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Puzzle> {
        self.puzzles.iter()
    }

    pub fn into_vec(self) -> Vec<Puzzle> {
        self.puzzles
    }

    /// Return the position of the puzzle with the given identifier.
    pub fn position_of(&self, id: i32) -> Option<usize> {
        self.puzzles.iter().position(|p| p.id == id)
    }

    /// Whether a puzzle, loaded or skipped, uses the identifier.
    pub fn is_id_used(&self, id: i32) -> bool {
        self.position_of(id).is_some() || self.reserved_ids.contains(&id)
    }

    /// Identifier for a new puzzle: one more than the largest identifier, or `0` if the
    /// collection is empty.
    ///
    /// When the largest identifier is [`i32::MAX`], the smallest free non-negative identifier
    /// is used instead.
    pub fn next_id(&self) -> Result<i32, CollectionError> {
        let max: Option<i32> = self
            .puzzles
            .iter()
            .map(|p| p.id)
            .chain(self.reserved_ids.iter().copied())
            .max();
        match max {
            None => Ok(0),
            Some(m) => match m.checked_add(1) {
                Some(id) => Ok(id),
                None => (0..=i32::MAX)
                    .find(|id| !self.is_id_used(*id))
                    .ok_or(CollectionError::IdExhausted),
            },
        }
    }

    pub fn sort_by_id(&mut self) {
        self.puzzles.sort_by_key(|p| p.id);
    }

    /// Add a puzzle with the given parameters at the end of the list, and return its identifier.
    pub fn add_generated(&mut self, params: &RectPuzzleParams) -> Result<i32, CollectionError> {
        let mut puzzle: Puzzle = params.generate()?;
        puzzle.id = self.next_id()?;
        let id: i32 = puzzle.id;
        debug!("New {}x{} puzzle with id {id}", params.size, params.size);
        self.puzzles.push(puzzle);
        Ok(id)
    }

    /// Add a copy of the puzzle at the given position, with a new identifier.
    ///
    /// Return the identifier of the copy.
    pub fn duplicate(&mut self, index: usize) -> Result<i32, CollectionError> {
        let mut copy: Puzzle = self.open_copy(index)?;
        copy.id = self.next_id()?;
        let id: i32 = copy.id;
        self.puzzles.push(copy);
        Ok(id)
    }

    /// Change the identifier of the puzzle at the given position.
    ///
    /// # Errors
    ///
    /// The method returns an error if another puzzle uses the new identifier, including a saved
    /// puzzle that could not be loaded.
    pub fn set_id(&mut self, index: usize, new_id: i32) -> Result<(), CollectionError> {
        let current: i32 = self
            .get(index)
            .ok_or(CollectionError::IndexOutOfRange(index))?
            .id;
        if new_id == current {
            return Ok(());
        }
        if self.is_id_used(new_id) {
            return Err(CollectionError::NotUnique {
                id: new_id,
                suggestion: self.next_id()?,
            });
        }
        debug!("Puzzle id {current} -> {new_id}");
        self.puzzles[index].id = new_id;
        Ok(())
    }

    /// Remove the puzzle at the given position and return it.
    pub fn remove(&mut self, index: usize) -> Result<Puzzle, CollectionError> {
        if index >= self.puzzles.len() {
            return Err(CollectionError::IndexOutOfRange(index));
        }
        Ok(self.puzzles.remove(index))
    }

    /// Replace the puzzle at the given position and return the previous puzzle.
    ///
    /// This is how the edits are saved: the editor works on a copy, which replaces the original
    /// puzzle when the user saves.
    pub fn replace(&mut self, index: usize, puzzle: Puzzle) -> Result<Puzzle, CollectionError> {
        let slot: &mut Puzzle = self
            .puzzles
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange(index))?;
        Ok(std::mem::replace(slot, puzzle))
    }

    /// Return an independent copy of the puzzle at the given position, for the editor.
    pub fn open_copy(&self, index: usize) -> Result<Puzzle, CollectionError> {
        let puzzle: &Puzzle = self
            .get(index)
            .ok_or(CollectionError::IndexOutOfRange(index))?;
        Ok(puzzle.deep_copy()?)
    }
}
