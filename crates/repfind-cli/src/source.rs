//! Identifier sourcing: comma-separated lists and workbook column ranges.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::lookup::LookupArgs;

/// An inclusive A1-style cell range, e.g. `A1:A100`.
///
/// Columns and rows are 1-based. A single cell reference (`C3`) is a
/// one-cell range. When a range spans several columns, the identifier
/// column is the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl CellRange {
    /// Parse an A1-style range, accepting lowercase letters and a
    /// reversed corner order.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (first, second) = match raw.split_once(':') {
            Some((a, b)) => (parse_cell(a)?, parse_cell(b)?),
            None => {
                let cell = parse_cell(raw)?;
                (cell, cell)
            }
        };
        Ok(Self {
            start_col: first.0.min(second.0),
            start_row: first.1.min(second.1),
            end_col: first.0.max(second.0),
            end_row: first.1.max(second.1),
        })
    }
}

/// Parse a single cell reference like `A1` into `(column, row)`.
fn parse_cell(raw: &str) -> Result<(u32, u32)> {
    let raw = raw.trim();
    let split = raw.find(|c: char| c.is_ascii_digit()).unwrap_or(raw.len());
    let (letters, digits) = raw.split_at(split);

    if letters.is_empty() || digits.is_empty() {
        bail!("invalid cell reference {raw:?}: expected column letters followed by a row number");
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            bail!("invalid cell reference {raw:?}: {c:?} is not a column letter");
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| anyhow!("invalid cell reference {raw:?}: bad row number"))?;
    if row == 0 {
        bail!("invalid cell reference {raw:?}: rows are 1-based");
    }

    Ok((col, row))
}

/// Split a comma-separated identifier list, trimming whitespace and
/// dropping empty entries.
pub fn parse_inn_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where the identifiers came from and, for workbook sources, where to
/// write results back.
#[derive(Debug)]
pub struct SourcePlan {
    /// The identifiers, in input order.
    pub identifiers: Vec<String>,
    pub workbook: Option<WorkbookPlan>,
}

/// The workbook cells each identifier was read from.
#[derive(Debug)]
pub struct WorkbookPlan {
    pub path: PathBuf,
    /// Resolved worksheet name.
    pub sheet: String,
    /// `(row, column)` of each identifier cell, aligned with
    /// `SourcePlan::identifiers`.
    pub cells: Vec<(u32, u32)>,
}

/// Resolve the identifier source from the CLI arguments.
pub fn resolve(args: &LookupArgs) -> Result<SourcePlan> {
    if let Some(list) = &args.inn {
        return Ok(SourcePlan {
            identifiers: parse_inn_list(list),
            workbook: None,
        });
    }

    if let Some(path) = &args.workbook {
        let range = args
            .range
            .as_deref()
            .context("a workbook source needs --range with the identifier column")?;
        let range = CellRange::parse(range)?;
        return read_workbook_column(path, args.sheet.as_deref(), range);
    }

    bail!("no identifier source: pass either --inn or --workbook with --range")
}

/// Read identifier cells from the range's last column, skipping blanks.
fn read_workbook_column(
    path: &Path,
    sheet_name: Option<&str>,
    range: CellRange,
) -> Result<SourcePlan> {
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| anyhow!("failed to read workbook {}: {e:?}", path.display()))?;

    let sheet = match sheet_name {
        Some(name) => book
            .get_sheet_by_name(name)
            .ok_or_else(|| anyhow!("worksheet {name:?} not found in {}", path.display()))?,
        None => book
            .get_sheet(&0)
            .ok_or_else(|| anyhow!("workbook {} has no worksheets", path.display()))?,
    };
    let resolved_name = sheet.get_name().to_string();

    let col = range.end_col;
    let mut identifiers = Vec::new();
    let mut cells = Vec::new();
    for row in range.start_row..=range.end_row {
        let value = sheet.get_value((col, row));
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        identifiers.push(value.to_string());
        cells.push((row, col));
    }

    tracing::debug!(
        sheet = %resolved_name,
        column = col,
        count = identifiers.len(),
        "read identifier column"
    );

    Ok(SourcePlan {
        identifiers,
        workbook: Some(WorkbookPlan {
            path: path.to_path_buf(),
            sheet: resolved_name,
            cells,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inn_list_trims_and_drops_empties() {
        assert_eq!(
            parse_inn_list(" 7707083893, 7736050003 ,,7703270067, "),
            vec!["7707083893", "7736050003", "7703270067"]
        );
        assert!(parse_inn_list("").is_empty());
        assert!(parse_inn_list(" , ,").is_empty());
    }

    #[test]
    fn range_parses_single_column() {
        let range = CellRange::parse("A1:A100").unwrap();
        assert_eq!(
            range,
            CellRange {
                start_col: 1,
                start_row: 1,
                end_col: 1,
                end_row: 100
            }
        );
    }

    #[test]
    fn range_accepts_lowercase_and_reversed_corners() {
        let range = CellRange::parse("b10:b2").unwrap();
        assert_eq!(range.start_row, 2);
        assert_eq!(range.end_row, 10);
        assert_eq!(range.end_col, 2);
    }

    #[test]
    fn range_accepts_single_cell() {
        let range = CellRange::parse("C3").unwrap();
        assert_eq!(
            range,
            CellRange {
                start_col: 3,
                start_row: 3,
                end_col: 3,
                end_row: 3
            }
        );
    }

    #[test]
    fn range_handles_multi_letter_columns() {
        let range = CellRange::parse("AA2:AB5").unwrap();
        assert_eq!(range.start_col, 27);
        assert_eq!(range.end_col, 28);
    }

    #[test]
    fn range_rejects_garbage() {
        assert!(CellRange::parse("1A").is_err());
        assert!(CellRange::parse("A0").is_err());
        assert!(CellRange::parse("A").is_err());
        assert!(CellRange::parse("A1:").is_err());
        assert!(CellRange::parse(":B2").is_err());
        assert!(CellRange::parse("A-1:B2").is_err());
        assert!(CellRange::parse("").is_err());
    }

    #[test]
    fn workbook_column_reads_trimmed_values_and_skips_blanks() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value("7707083893");
        sheet.get_cell_mut((1, 2)).set_value("  7736050003 ");
        // Row 3 left blank on purpose.
        sheet.get_cell_mut((1, 4)).set_value("7703270067");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inns.xlsx");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let range = CellRange::parse("A1:A4").unwrap();
        let plan = read_workbook_column(&path, None, range).unwrap();

        assert_eq!(
            plan.identifiers,
            vec!["7707083893", "7736050003", "7703270067"]
        );
        let workbook = plan.workbook.unwrap();
        assert_eq!(workbook.sheet, "Sheet1");
        assert_eq!(workbook.cells, vec![(1, 1), (2, 1), (4, 1)]);
    }

    #[test]
    fn workbook_column_uses_last_column_of_wide_range() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut((1, 1)).set_value("not the inn");
        sheet.get_cell_mut((2, 1)).set_value("7707083893");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.xlsx");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let range = CellRange::parse("A1:B1").unwrap();
        let plan = read_workbook_column(&path, None, range).unwrap();
        assert_eq!(plan.identifiers, vec!["7707083893"]);
    }

    #[test]
    fn missing_worksheet_is_an_error() {
        let book = umya_spreadsheet::new_file();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one-sheet.xlsx");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let range = CellRange::parse("A1:A2").unwrap();
        let result = read_workbook_column(&path, Some("Inns"), range);
        assert!(result.is_err());
    }
}
