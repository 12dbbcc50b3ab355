//! Markdown device table reader.
//!
//! The input must be a single pipe table and nothing else:
//!
//! ```text
//! | name  | type   | out_device | out_port | in_port | hosts |
//! |-------|--------|------------|----------|---------|-------|
//! | LAN-A | switch | SW1        | fa0/1    |         | 20    |
//! | WAN-1 | router | R1         | s0/0/0   | s0/0/1  | 2     |
//! ```
//!
//! Columns are matched by header name in any order. `in_port` may be left
//! out entirely when no router rows need it.

use crate::topology::{DeviceType, Row};
use color_eyre::eyre::WrapErr;
use log::{debug, info};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static DELIMITER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?$").expect("Invalid delimiter row regex")
});

/// Columns every table must carry
pub const REQUIRED_COLUMNS: [&str; 5] = ["name", "type", "out_device", "out_port", "hosts"];

/// Column that may be omitted
pub const OPTIONAL_COLUMN: &str = "in_port";

/// Errors that can occur while reading the device table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Your markdown should contain only the table (line {line}: {content:?})")]
    NotOnlyTable { line: usize, content: String },

    #[error("No table found in input")]
    NoTable,

    #[error("Line {line}: expected a delimiter row such as '|---|---|' after the header")]
    MissingDelimiter { line: usize },

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("Line {line}: invalid host count {value:?} for row '{name}', expected a non-negative integer")]
    InvalidHosts { line: usize, name: String, value: String },
}

/// Classified input line
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Blank,
    Delimiter,
    Cells(Vec<String>),
    Text,
}

fn classify(raw: &str) -> Line {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Line::Blank
    } else if DELIMITER_ROW.is_match(trimmed) {
        Line::Delimiter
    } else if trimmed.contains('|') {
        Line::Cells(split_cells(trimmed))
    } else {
        Line::Text
    }
}

/// Split a table line on unescaped pipes, dropping the outer pipes
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);

    if line.starts_with('|') {
        cells.remove(0);
    }
    if line.ends_with('|') && !line.ends_with("\\|") {
        cells.pop();
    }

    cells.into_iter().map(|cell| cell.trim().to_string()).collect()
}

/// Header name to cell index
struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Result<Self, TableError> {
        let mut indices = HashMap::new();
        for (index, name) in header.iter().enumerate() {
            let key = name.trim().to_ascii_lowercase();
            if indices.insert(key.clone(), index).is_some() {
                return Err(TableError::DuplicateColumn(key));
            }
        }

        for column in REQUIRED_COLUMNS {
            if !indices.contains_key(column) {
                return Err(TableError::MissingColumn(column));
            }
        }

        Ok(ColumnMap { indices })
    }

    /// Cell for `column`, empty when the column is absent or the row is short
    fn cell<'c>(&self, cells: &'c [String], column: &str) -> &'c str {
        self.indices
            .get(column)
            .and_then(|index| cells.get(*index))
            .map_or("", String::as_str)
    }
}

fn parse_hosts(value: &str, name: &str, line: usize) -> Result<u64, TableError> {
    value.trim().parse::<u64>().map_err(|_| TableError::InvalidHosts {
        line,
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Parse a markdown document holding one device table into rows.
pub fn parse_table(markdown: &str) -> Result<Vec<Row>, TableError> {
    let mut lines = markdown
        .lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw, classify(raw)))
        .skip_while(|(_, _, line)| *line == Line::Blank);

    let header = match lines.next() {
        None => return Err(TableError::NoTable),
        Some((_, _, Line::Cells(cells))) => cells,
        Some((number, raw, _)) => {
            return Err(TableError::NotOnlyTable {
                line: number,
                content: raw.trim().to_string(),
            })
        }
    };
    let columns = ColumnMap::from_header(&header)?;

    match lines.next() {
        Some((_, _, Line::Delimiter)) => {}
        Some((number, _, _)) => return Err(TableError::MissingDelimiter { line: number }),
        None => return Err(TableError::MissingDelimiter { line: 2 }),
    }

    let mut rows = Vec::new();
    let mut table_ended = false;

    for (number, raw, line) in lines {
        match line {
            Line::Blank => table_ended = true,
            Line::Cells(cells) if !table_ended => {
                let name = columns.cell(&cells, "name");
                let row = Row::new(
                    name,
                    DeviceType::parse(columns.cell(&cells, "type")),
                    columns.cell(&cells, "out_device"),
                    columns.cell(&cells, "out_port"),
                    columns.cell(&cells, OPTIONAL_COLUMN),
                    parse_hosts(columns.cell(&cells, "hosts"), name, number)?,
                );
                debug!("Parsed row {:?}", row);
                rows.push(row);
            }
            _ => {
                return Err(TableError::NotOnlyTable {
                    line: number,
                    content: raw.trim().to_string(),
                })
            }
        }
    }

    info!("Parsed {} rows from device table", rows.len());
    Ok(rows)
}

/// Read and parse a device table file
pub fn read_table_file(path: &Path) -> color_eyre::Result<Vec<Row>> {
    info!("Reading device table from: {:?}", path);
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read input table '{}'", path.display()))?;
    let rows = parse_table(&content)
        .wrap_err_with(|| format!("Failed to parse input table '{}'", path.display()))?;
    Ok(rows)
}
