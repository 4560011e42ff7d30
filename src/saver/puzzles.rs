/*
puzzles.rs

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

//! Save and restore the puzzle collection.
//!
//! The puzzles are saved in the `puzzles.json` file, as a JSON list of [`PuzzleRecord`] objects
//! (see [`crate::saver::record`]).
//!
//! Saving never leaves a half-written file behind: the list is written to a temporary file next
//! to the save file, which then replaces the save file.
//!
//! Loading reads each record on its own. A record that cannot be read or decoded is reported in
//! the returned [`LoadReport`], and the other puzzles are still loaded.

use log::{debug, info, warn};
use std::error::Error;
use std::fmt;
use std::fs::{self, File, remove_file};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::SAVE_FILE;
use crate::puzzle::Puzzle;
use crate::saver::record::{self, CodecError, PuzzleRecord};

/// Reason why a saved puzzle could not be loaded.
#[derive(Debug)]
pub enum RecordError {
    /// The record is not a valid puzzle record (missing required field, wrong type...).
    Parse(serde_json::Error),

    /// The record refers to dots or panes that do not exist.
    Corrupt(CodecError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::Parse(e) => write!(f, "cannot read the puzzle: {e}"),
            RecordError::Corrupt(e) => write!(f, "corrupted puzzle: {e}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecordError::Parse(e) => Some(e),
            RecordError::Corrupt(e) => Some(e),
        }
    }
}

/// Saved puzzle that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    /// Position of the record in the save file.
    pub position: usize,

    /// Identifier of the puzzle, if the record has a readable one.
    pub id: Option<i32>,

    pub error: RecordError,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "puzzle #{} (id {id}): {}", self.position, self.error),
            None => write!(f, "puzzle #{}: {}", self.position, self.error),
        }
    }
}

/// Result of loading the save file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded puzzles, in file order.
    pub puzzles: Vec<Puzzle>,

    /// Records that could not be loaded.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Whether all the saved puzzles have been loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Object to save and restore the puzzle collection.
pub struct SaverPuzzles {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverPuzzles {
    /// Create a [`SaverPuzzles`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzles must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SAVE_FILE);
        Self::with_file(data_dir)
    }

    /// Create a [`SaverPuzzles`] object that uses the given save file.
    pub fn with_file(save_file: impl Into<PathBuf>) -> Self {
        let save_file: PathBuf = save_file.into();
        debug!("Puzzles file: {save_file:?}");
        Self { save_file }
    }

    /// Path to the save file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Temporary file used while saving.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.save_file.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Retrieve the saved puzzles.
    ///
    /// Return an empty [`LoadReport`] if there is no save file yet.
    ///
    /// # Errors
    ///
    /// The method returns an error if the file cannot be read or is not a JSON list.
    /// Problems with individual puzzles are not errors: they are listed in
    /// [`LoadReport::failures`].
    pub fn load_puzzles(&self) -> Result<LoadReport, Box<dyn Error>> {
        let mut file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => {
                    info!("No puzzles file {:?} yet", self.save_file);
                    return Ok(LoadReport::default());
                }
                _ => return Err(Box::new(error)),
            },
        };
        let mut data: String = String::new();
        file.read_to_string(&mut data)?;
        if data.trim().is_empty() {
            warn!("Puzzles file {:?} is empty", self.save_file);
            return Ok(LoadReport::default());
        }

        let values: Vec<serde_json::Value> = serde_json::from_str(&data)?;
        let mut report = LoadReport {
            puzzles: Vec::with_capacity(values.len()),
            failures: Vec::new(),
        };
        for (position, value) in values.into_iter().enumerate() {
            let id: Option<i32> = value
                .get("id")
                .or_else(|| value.get("name"))
                .and_then(|v| v.as_i64())
                .and_then(|v| i32::try_from(v).ok());
            let ret: Result<Puzzle, RecordError> = serde_json::from_value::<PuzzleRecord>(value)
                .map_err(RecordError::Parse)
                .and_then(|r| record::decode(&r).map_err(RecordError::Corrupt));
            match ret {
                Ok(p) => report.puzzles.push(p),
                Err(error) => {
                    let failure = LoadFailure {
                        position,
                        id,
                        error,
                    };
                    warn!("Skipping {failure}");
                    report.failures.push(failure);
                }
            }
        }
        debug!(
            "Loaded {} puzzles ({} skipped) from {:?}",
            report.puzzles.len(),
            report.failures.len(),
            self.save_file
        );
        Ok(report)
    }

    /// Save the provided puzzles.
    ///
    /// The puzzles are sorted by identifier first.
    ///
    /// # Errors
    ///
    /// The method returns an error if a puzzle cannot be encoded, in which case the save file is
    /// not modified, or if the file cannot be written.
    pub fn save_puzzles(&self, puzzles: &mut [Puzzle]) -> Result<(), Box<dyn Error>> {
        puzzles.sort_by_key(|p| p.id);
        let records: Vec<PuzzleRecord> = puzzles
            .iter()
            .map(record::encode)
            .collect::<Result<Vec<PuzzleRecord>, CodecError>>()?;

        if let Some(parent) = self.save_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp_path: PathBuf = self.temp_path();
        if let Err(e) = self.write_records(&tmp_path, &records) {
            let _ = remove_file(&tmp_path);
            return Err(e);
        }
        fs::rename(&tmp_path, &self.save_file)?;
        debug!("Saved {} puzzles to {:?}", records.len(), self.save_file);
        Ok(())
    }

    fn write_records(&self, path: &Path, records: &[PuzzleRecord]) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(path)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    /// Delete the save file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        let s = SaverPuzzles::new(PathBuf::from("data"));
        assert_eq!(s.path(), Path::new("data").join("puzzles.json"));
        assert_eq!(s.temp_path(), PathBuf::from("data/puzzles.json.tmp"));
    }

    #[test]
    fn test_load_failure_display() {
        let failure = LoadFailure {
            position: 2,
            id: Some(5),
            error: RecordError::Corrupt(CodecError::DotOutOfRange {
                field: "lines",
                index: 999,
                len: 5,
            }),
        };
        assert_eq!(
            failure.to_string(),
            "puzzle #2 (id 5): corrupted puzzle: lines: dot index 999 out of range (5 dots)"
        );
    }
}
