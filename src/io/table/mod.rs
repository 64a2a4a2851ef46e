// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Small in-memory tables and "basic" ASCII table files.
//!
//! A basic ASCII table has a header line of column names followed by one line
//! per row. Values are separated by whitespace. A value that is empty, starts
//! with `#`, or contains whitespace or a double quote, is surrounded by double
//! quotes, and double quotes inside it are doubled. Strings that would be read
//! back as numbers or booleans are quoted too. Lines starting with `#` and blank lines
//! are ignored.
//!
//! ```text
//! # Stars of interest
//! name TIC tess_sectors
//! "WASP-18 b" 100100827 "2, 3, 29, 30"
//! ```

mod error;

pub use error::TableError;

use std::{
    borrow::Cow,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use itertools::Itertools;
use log::{debug, trace};

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Cell {
    /// Infer the type of an unquoted value read from a text file.
    fn infer(s: &str) -> Cell {
        if let Ok(i) = s.parse() {
            Cell::Int(i)
        } else if let Ok(f) = s.parse() {
            Cell::Float(f)
        } else {
            match s {
                "True" => Cell::Bool(true),
                "False" => Cell::Bool(false),
                _ => Cell::Str(s.to_string()),
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Str(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Str(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

/// An ordered set of uniquely-named columns, and rows of [Cell]s that are all
/// as wide as the set of columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Make a new table without any rows.
    pub fn new<I, S>(columns: I) -> Result<Table, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cols: Vec<String> = vec![];
        for c in columns {
            let c = c.into();
            if cols.contains(&c) {
                return Err(TableError::DuplicateColumn(c));
            }
            cols.push(c);
        }
        Ok(Table {
            columns: cols,
            rows: vec![],
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                got: row.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn {
                column: name.to_string(),
                available: self.columns.iter().join(", "),
            })
    }

    /// Iterate over the values of a single column, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Cell> + '_, TableError> {
        let i = self.column_index(name)?;
        Ok(self.rows.iter().map(move |r| &r[i]))
    }

    pub fn get(&self, row: usize, column: &str) -> Result<&Cell, TableError> {
        let i = self.column_index(column)?;
        self.rows
            .get(row)
            .map(|r| &r[i])
            .ok_or(TableError::RowOutOfRange {
                row,
                num_rows: self.rows.len(),
            })
    }

    pub fn set(&mut self, row: usize, column: &str, cell: Cell) -> Result<(), TableError> {
        let i = self.column_index(column)?;
        let num_rows = self.rows.len();
        let r = self
            .rows
            .get_mut(row)
            .ok_or(TableError::RowOutOfRange { row, num_rows })?;
        r[i] = cell;
        Ok(())
    }

    /// Rename columns in place. All renames happen at once, so names may be
    /// swapped. Values and column positions are unchanged.
    pub fn rename_columns<'a, I>(&mut self, renames: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut new_columns = self.columns.clone();
        for (from, to) in renames {
            let i = self.column_index(from)?;
            new_columns[i] = to.to_string();
        }
        for (i, c) in new_columns.iter().enumerate() {
            if new_columns[..i].contains(c) {
                return Err(TableError::DuplicateColumn(c.clone()));
            }
        }
        self.columns = new_columns;
        Ok(())
    }

    /// Append a column where every row holds `fill`. If the column already
    /// exists, all of its values are reset to `fill` instead.
    pub fn set_column(&mut self, name: &str, fill: Cell) {
        match self.columns.iter().position(|c| c == name) {
            Some(i) => self.rows.iter_mut().for_each(|r| r[i] = fill.clone()),
            None => {
                self.columns.push(name.to_string());
                self.rows.iter_mut().for_each(|r| r.push(fill.clone()));
            }
        }
    }

    /// Parse a buffer containing a basic ASCII table.
    pub fn read_basic<T: BufRead>(buf: &mut T) -> Result<Table, TableError> {
        let mut line = String::new();
        let mut line_num: u32 = 0;
        let mut table: Option<Table> = None;

        while buf.read_line(&mut line)? > 0 {
            line_num += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                line.clear();
                continue;
            }

            let fields = split_fields(trimmed, line_num)?;
            match table.as_mut() {
                None => {
                    trace!("Header on line {line_num}: {:?}", fields);
                    table = Some(Table::new(fields.into_iter().map(|(f, _)| f))?);
                }
                Some(t) => {
                    if fields.len() != t.columns.len() {
                        return Err(TableError::LineWidth {
                            line_num,
                            got: fields.len(),
                            expected: t.columns.len(),
                        });
                    }
                    let row = fields
                        .into_iter()
                        .map(|(f, quoted)| if quoted { Cell::Str(f) } else { Cell::infer(&f) })
                        .collect();
                    t.rows.push(row);
                }
            }
            line.clear();
        }

        table.ok_or(TableError::NoHeader)
    }

    /// Write this table as a basic ASCII table.
    pub fn write_basic<W: Write>(&self, w: &mut W) -> Result<(), TableError> {
        writeln!(w, "{}", self.columns.iter().map(|c| quote(c)).join(" "))?;
        for row in &self.rows {
            writeln!(
                w,
                "{}",
                row.iter().map(|c| cell_field(c).into_owned()).join(" ")
            )?;
        }
        Ok(())
    }

    pub fn read_file<P: AsRef<Path>>(file: P) -> Result<Table, TableError> {
        let file = file.as_ref();
        debug!("Reading table {}", file.display());
        let f = File::open(file).map_err(|err| TableError::Open {
            file: file.to_path_buf(),
            err,
        })?;
        Table::read_basic(&mut BufReader::new(f))
    }

    /// Write this table to a file, overwriting any existing file.
    pub fn write_file<P: AsRef<Path>>(&self, file: P) -> Result<(), TableError> {
        let file = file.as_ref();
        debug!("Writing {} rows to {}", self.num_rows(), file.display());
        let f = File::create(file).map_err(|err| TableError::Create {
            file: file.to_path_buf(),
            err,
        })?;
        let mut w = BufWriter::new(f);
        self.write_basic(&mut w)?;
        w.flush()?;
        Ok(())
    }
}

/// Quote a value if it would otherwise be split, merged or read as a comment.
fn quote(s: &str) -> Cow<'_, str> {
    if s.is_empty() || s.starts_with('#') || s.contains(|c: char| c.is_whitespace() || c == '"')
    {
        force_quote(s)
    } else {
        Cow::Borrowed(s)
    }
}

fn force_quote(s: &str) -> Cow<'_, str> {
    Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
}

/// A cell as written to a file, such that reading it back gives the same cell.
/// `Null` is the exception; it comes back as an empty string.
fn cell_field(cell: &Cell) -> Cow<'_, str> {
    match cell {
        Cell::Null => Cow::Borrowed("\"\""),
        // Strings like "14" or "True" would otherwise be read as other types.
        Cell::Str(s) if !matches!(Cell::infer(s), Cell::Str(_)) => force_quote(s),
        Cell::Str(s) => quote(s),
        // Debug keeps the decimal point of whole numbers.
        Cell::Float(x) => Cow::Owned(format!("{x:?}")),
        c => Cow::Owned(c.to_string()),
    }
}

/// Split a line into its values. Each value is paired with whether it was
/// quoted.
fn split_fields(line: &str, line_num: u32) -> Result<Vec<(String, bool)>, TableError> {
    let mut fields = vec![];
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut field = String::new();
        if first == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err(TableError::UnterminatedQuote { line_num }),
                }
            }
            if chars.peek().map(|c| !c.is_whitespace()).unwrap_or(false) {
                return Err(TableError::TrailingQuote { line_num });
            }
            fields.push((field, true));
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                field.push(c);
            }
            fields.push((field, false));
        }
    }

    Ok(fields)
}
