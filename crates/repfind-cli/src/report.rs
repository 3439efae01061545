//! Result writers: nine-column CSV and in-place workbook updates.
//!
//! Both writers render the same nine fields in the same order; only the
//! list delimiter differs (CSV joins phones/e-mails with `"; "`, the
//! workbook stacks them with newlines inside one cell). Empty slots in
//! the result sequence are skipped, not rendered as blank rows.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use repfind_client::Entity;

use crate::source::WorkbookPlan;

/// Fixed CSV header, one column per rendered field.
pub const CSV_HEADER: [&str; 9] = [
    "Short name",
    "Full name",
    "Address",
    "Manager",
    "Activity",
    "Registration date",
    "Website",
    "Phones",
    "Emails",
];

/// Delimiter for list fields in CSV cells.
pub const CSV_LIST_DELIMITER: &str = "; ";

/// Delimiter for list fields in workbook cells.
pub const WORKBOOK_LIST_DELIMITER: &str = "\n";

/// Render one entity as the nine output fields, in header order.
pub fn entity_row(entity: &Entity, list_delimiter: &str) -> [String; 9] {
    [
        entity.name.clone(),
        entity.full_name.clone(),
        entity.address.clone(),
        entity.manager.clone(),
        entity.activity.clone(),
        entity
            .date_registered
            .map(|d| d.to_string())
            .unwrap_or_default(),
        entity.website.clone(),
        entity.phones.join(list_delimiter).trim().to_string(),
        entity.emails.join(list_delimiter).trim().to_string(),
    ]
}

/// Write the found entities as CSV with the fixed header.
///
/// Returns the number of data rows written.
pub fn write_csv(path: &Path, results: &[Option<Entity>]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    let mut written = 0;
    for entity in results.iter().flatten() {
        writer.write_record(entity_row(entity, CSV_LIST_DELIMITER))?;
        written += 1;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush CSV file {}", path.display()))?;

    Ok(written)
}

/// Write the nine fields into the source workbook, `offset` columns to
/// the right of each identifier cell whose lookup produced a record.
/// Rows whose lookup came back empty are left untouched. The workbook is
/// saved in place.
///
/// Returns the number of rows updated.
pub fn write_workbook(
    plan: &WorkbookPlan,
    offset: u32,
    results: &[Option<Entity>],
) -> Result<usize> {
    let mut book = umya_spreadsheet::reader::xlsx::read(&plan.path)
        .map_err(|e| anyhow!("failed to read workbook {}: {e:?}", plan.path.display()))?;
    let sheet = book
        .get_sheet_by_name_mut(&plan.sheet)
        .ok_or_else(|| anyhow!("worksheet {:?} not found in {}", plan.sheet, plan.path.display()))?;

    let mut written = 0;
    for ((row, col), slot) in plan.cells.iter().zip(results) {
        let Some(entity) = slot else { continue };
        for (i, value) in entity_row(entity, WORKBOOK_LIST_DELIMITER)
            .into_iter()
            .enumerate()
        {
            sheet.get_cell_mut((col + offset + i as u32, *row)).set_value(value);
        }
        written += 1;
    }

    umya_spreadsheet::writer::xlsx::write(&book, &plan.path)
        .map_err(|e| anyhow!("failed to save workbook {}: {e:?}", plan.path.display()))?;

    Ok(written)
}
