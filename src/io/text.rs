//! Plain-text tables and variables files.
//!
//! Table format: the first non-blank, non-`#` line is the header; each later
//! line is one row. Fields are separated by whitespace and/or commas.

use crate::cut::{CutSpec, LadderDirection};
use crate::data::{RowRange, Table};
use crate::error::{Result, RgsError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
}

/// Lines that carry content: trimmed, neither blank nor comments.
fn content_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, String)>> {
    reader.lines().enumerate().filter_map(|(i, line)| match line {
        Ok(line) => {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(Ok((i + 1, trimmed.to_owned())))
            }
        }
        Err(e) => Some(Err(e.into())),
    })
}

/// Reads a text table, keeping only the rows inside `range`.
///
/// # Examples
///
/// ```
/// use u_cutscan::data::RowRange;
/// use u_cutscan::io::read_table;
///
/// let text = "# events\npt eta\n10 0.5\n20, -1.5\n30 2.0\n";
/// let table = read_table(text.as_bytes(), RowRange::new(1, None)).unwrap();
/// assert_eq!(table.header(), &["pt", "eta"]);
/// assert_eq!(table.rows(), &[vec![20.0, -1.5], vec![30.0, 2.0]]);
/// ```
pub fn read_table<R: BufRead>(reader: R, range: RowRange) -> Result<Table> {
    let mut lines = content_lines(reader);
    let header: Vec<String> = match lines.next() {
        Some(line) => fields(&line?.1).map(str::to_owned).collect(),
        None => return Err(RgsError::input("table has no header")),
    };

    let mut rows = Vec::new();
    for (row_index, line) in lines.enumerate() {
        let (line_no, text) = line?;
        if range.contains(row_index) {
            let row = fields(&text)
                .map(|f| {
                    f.parse::<f64>().map_err(|_| {
                        RgsError::input(format!("line {line_no}: not a number: {f:?}"))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            if row.len() != header.len() {
                return Err(RgsError::input(format!(
                    "line {line_no}: {} values, header has {} columns",
                    row.len(),
                    header.len()
                )));
            }
            rows.push(row);
        }
        if range.exhausted_after(row_index) {
            break;
        }
    }
    Table::new(header, rows)
}

/// Opens `path` and reads it with [`read_table`].
pub fn read_table_file(path: impl AsRef<Path>, range: RowRange) -> Result<Table> {
    read_table(BufReader::new(File::open(path)?), range)
}

/// Reads `variable direction` pairs, one per line.
///
/// A bare `ladder` direction resolves to `ladder_default`.
pub fn read_cut_specs<R: BufRead>(
    reader: R,
    ladder_default: Option<LadderDirection>,
) -> Result<Vec<CutSpec>> {
    let mut specs = Vec::new();
    for line in content_lines(reader) {
        let (line_no, text) = line?;
        let parts: Vec<&str> = text.split_whitespace().collect();
        let &[variable, direction] = parts.as_slice() else {
            return Err(RgsError::input(format!(
                "line {line_no}: expected `variable direction`, got {text:?}"
            )));
        };
        specs.push(CutSpec::parse(variable, direction, ladder_default)?);
    }
    if specs.is_empty() {
        return Err(RgsError::input("variables file lists no cuts"));
    }
    Ok(specs)
}

/// Opens `path` and reads it with [`read_cut_specs`].
pub fn read_cut_specs_file(
    path: impl AsRef<Path>,
    ladder_default: Option<LadderDirection>,
) -> Result<Vec<CutSpec>> {
    read_cut_specs(BufReader::new(File::open(path)?), ladder_default)
}
