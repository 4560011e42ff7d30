/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options manage the save file without the editor window: list the puzzles, add, copy,
//! or delete a puzzle, change an identifier, and verify that the saved puzzles are well formed.
//!
//! # Examples
//!
//! List the saved puzzles:
//!
//! ```
//! $ panedit --ls
//!    0  4x4   26 dots   41 lines   16 panes    3 constraints
//!    1  5x5   37 dots   61 lines   25 panes    0 constraints
//! ```
//!
//! Add a 6x6 puzzle with a small margin, and then give it the identifier 10:
//!
//! ```
//! $ panedit --new --size 6 --padding 0.1
//! Added puzzle 2
//! $ panedit --set-id 2 --to 10
//! ```

use clap::Parser;
use log::{debug, error};
use std::env;
use std::path::PathBuf;

use panedit::collection::PuzzleCollection;
use panedit::config::{COPYRIGHT_NOTICE, DEFAULT_PADDING, DEFAULT_SIZE, SAVE_FILE};
use panedit::generator::rect::RectPuzzleParams;
use panedit::puzzle::Puzzle;
use panedit::saver::puzzles::SaverPuzzles;

/// Manage the Panedit puzzle file.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Puzzle file
    #[arg(short = 'F', long, default_value = SAVE_FILE)]
    file: PathBuf,

    /// List the puzzles
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Add a new rectangular puzzle
    #[arg(short, long, default_value_t = false, group = "generate")]
    new: bool,

    /// Number of cells per side of the new puzzle, between 1 and 256
    #[arg(short, long, default_value_t = DEFAULT_SIZE, requires = "generate")]
    size: usize,

    /// Margin around the grid of the new puzzle, between 0 and 0.5
    #[arg(short, long, default_value_t = DEFAULT_PADDING, requires = "generate")]
    padding: f32,

    /// Add a copy of the puzzle with the given identifier
    #[arg(long, value_name = "ID")]
    copy: Option<i32>,

    /// Delete the puzzle with the given identifier
    #[arg(long, value_name = "ID")]
    delete: Option<i32>,

    /// Change the identifier of a puzzle
    #[arg(long, value_name = "ID", requires = "to")]
    set_id: Option<i32>,

    /// New identifier for --set-id
    #[arg(long, value_name = "NEW_ID", requires = "set_id")]
    to: Option<i32>,

    /// Allow the changes to erase the saved puzzles that cannot be loaded
    #[arg(long, default_value_t = false)]
    drop_corrupt: bool,

    /// Verify that the saved puzzles are well formed
    #[arg(short, long, default_value_t = false)]
    check: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Return the position of the puzzle with the given identifier, or print an error.
fn find(collection: &PuzzleCollection, id: i32) -> Option<usize> {
    let index: Option<usize> = collection.position_of(id);
    if index.is_none() {
        eprintln!("Unknown puzzle {id}. Use --ls to list the available puzzles.");
    }
    index
}

/// One line summary of a puzzle.
fn summary(puzzle: &Puzzle) -> String {
    let side: usize = (puzzle.panes.len() as f64).sqrt() as usize;
    let shape: String = if side * side == puzzle.panes.len() {
        format!("{side}x{side}")
    } else {
        "-".to_string()
    };
    format!(
        "{:>4}  {shape:<4} {:>4} dots {:>4} lines {:>4} panes {:>4} constraints",
        puzzle.id,
        puzzle.dots.len(),
        puzzle.lines.len(),
        puzzle.panes.len(),
        puzzle.complexity.len()
    )
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let saver = SaverPuzzles::with_file(&args.file);
    let (mut collection, failures) = match PuzzleCollection::load(&saver) {
        Ok(r) => r,
        Err(e) => {
            error!("Cannot load {:?}: {e}", saver.path());
            eprintln!("Error while loading {}: {e}", saver.path().display());
            return 1;
        }
    };
    for f in &failures {
        eprintln!("Skipped {f}");
    }

    let mut modified: bool = false;

    //
    // Add a new puzzle
    //
    if args.new {
        let params = RectPuzzleParams {
            padding: args.padding,
            ..RectPuzzleParams::with_size(args.size)
        };
        match collection.add_generated(&params) {
            Ok(id) => {
                println!("Added puzzle {id}");
                modified = true;
            }
            Err(e) => {
                eprintln!("Cannot create the puzzle: {e}");
                return 1;
            }
        }
    }

    //
    // Copy a puzzle
    //
    if let Some(id) = args.copy {
        let Some(index) = find(&collection, id) else {
            return 1;
        };
        match collection.duplicate(index) {
            Ok(new_id) => {
                println!("Copied puzzle {id} to {new_id}");
                modified = true;
            }
            Err(e) => {
                eprintln!("Cannot copy puzzle {id}: {e}");
                return 1;
            }
        }
    }

    //
    // Change an identifier
    //
    if let (Some(id), Some(new_id)) = (args.set_id, args.to) {
        let Some(index) = find(&collection, id) else {
            return 1;
        };
        if let Err(e) = collection.set_id(index, new_id) {
            eprintln!("Cannot change the id: {e}");
            return 1;
        }
        modified = true;
    }

    //
    // Delete a puzzle
    //
    if let Some(id) = args.delete {
        let Some(index) = find(&collection, id) else {
            return 1;
        };
        if let Err(e) = collection.remove(index) {
            eprintln!("Cannot delete puzzle {id}: {e}");
            return 1;
        }
        println!("Deleted puzzle {id}");
        modified = true;
    }

    if modified {
        if collection.skipped() > 0 {
            if !args.drop_corrupt {
                eprintln!(
                    "{} puzzles of {} cannot be loaded. Saving would erase them. Use --drop-corrupt to save anyway.",
                    collection.skipped(),
                    saver.path().display()
                );
                return 1;
            }
            collection.discard_skipped();
        }
        debug!("Saving {} puzzles", collection.len());
        if let Err(e) = collection.save(&saver) {
            error!("Cannot save {:?}: {e}", saver.path());
            eprintln!("Error while saving {}: {e}", saver.path().display());
            return 1;
        }
    }

    //
    // List the puzzles
    //
    if args.ls {
        for p in collection.iter() {
            println!("{}", summary(p));
        }
    }

    //
    // Verify the puzzles
    //
    if args.check {
        let mut errors: usize = failures.len();
        for p in collection.iter() {
            if let Err(e) = p.validate() {
                println!("Puzzle {}: {e}", p.id);
                errors += 1;
            }
        }
        for (i, p) in collection.iter().enumerate() {
            if collection.position_of(p.id) != Some(i) {
                println!("Puzzle {}: duplicated id", p.id);
                errors += 1;
            }
        }
        println!("{} puzzles, {errors} errors", collection.len());
        if errors > 0 {
            return 1;
        }
    }
    0
}
