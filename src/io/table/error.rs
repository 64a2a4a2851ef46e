// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Errors associated with building, reading or writing [super::Table]s.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Column '{column}' doesn't exist; available columns: {available}")]
    MissingColumn { column: String, available: String },

    #[error("Row {row} has {got} values, but the table has {expected} columns")]
    RowWidth {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("Row index {row} is out of range for a table with {num_rows} rows")]
    RowOutOfRange { row: usize, num_rows: usize },

    #[error("Line {line_num}: unterminated double quote")]
    UnterminatedQuote { line_num: u32 },

    #[error("Line {line_num}: expected whitespace after a quoted value")]
    TrailingQuote { line_num: u32 },

    #[error("Line {line_num}: found {got} values, but the header has {expected} columns")]
    LineWidth {
        line_num: u32,
        got: usize,
        expected: usize,
    },

    #[error("The table doesn't have a header line")]
    NoHeader,

    #[error("Couldn't open table file {}: {err}", .file.display())]
    Open { file: PathBuf, err: std::io::Error },

    #[error("Couldn't create table file {}: {err}", .file.display())]
    Create { file: PathBuf, err: std::io::Error },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
