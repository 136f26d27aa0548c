//! Spreadsheet input and output.
//!
//! Input sheets are read with `calamine`: the first worksheet, first row as
//! headers. The report workbook is written with `rust_xlsxwriter`.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use ptm_core::{RawRow, ReportRow};
use rust_xlsxwriter::{Format, Workbook};

/// Name of the worksheet in the report workbook.
pub const REPORT_SHEET: &str = "Matches";

/// Header of the client column in the report workbook.
pub const CLIENT_HEADER: &str = "Client Name";

/// Reads every non-blank data row from the first worksheet of `path`.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("workbook {} has no worksheets", path.display()))?
        .with_context(|| format!("failed to read first worksheet of {}", path.display()))?;

    let rows = rows_from_cells(range.rows());
    tracing::debug!(path = %path.display(), rows = rows.len(), "read worksheet");
    Ok(rows)
}

/// Turns a header row followed by data rows into [`RawRow`]s.
///
/// Empty cells become absent fields and blank rows are dropped.
fn rows_from_cells<'a>(mut cells: impl Iterator<Item = &'a [Data]>) -> Vec<RawRow> {
    let Some(header) = cells.next() else {
        return Vec::new();
    };
    let header: Vec<Option<String>> = header
        .iter()
        .map(|cell| cell_text(cell).map(|h| h.trim().to_string()))
        .collect();

    cells
        .map(|row| {
            header
                .iter()
                .zip(row)
                .filter_map(|(column, cell)| Some((column.clone()?, cell_text(cell)?)))
                .collect::<RawRow>()
        })
        .filter(|row| !row.is_empty())
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Writes one row per client: name and formatted top trainers.
pub fn write_report(path: &Path, rows: &[ReportRow], top_n: usize) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET)?;
    worksheet.set_column_width(0, 24)?;
    worksheet.set_column_width(1, 80)?;
    worksheet.write_string_with_format(0, 0, CLIENT_HEADER, &header)?;
    worksheet.write_string_with_format(0, 1, trainers_header(top_n), &header)?;

    for (index, row) in rows.iter().enumerate() {
        let line = u32::try_from(index + 1).context("too many report rows")?;
        worksheet.write_string(line, 0, &row.client)?;
        let trainers = row.formatted_trainers();
        if !trainers.is_empty() {
            worksheet.write_string(line, 1, trainers)?;
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Header of the trainer column, e.g. `Top 5 Trainers`.
pub fn trainers_header(top_n: usize) -> String {
    format!("Top {top_n} Trainers")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn header_names_fields() {
        let sheet = [
            vec![text("Name"), text("Availability"), text(" Location ")],
            vec![text("Alex"), text("Mon 9am-11am"), text("Gym A")],
        ];

        let rows = rows_from_cells(sheet.iter().map(Vec::as_slice));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Name"), Some("Alex"));
        assert_eq!(rows[0].get("Location"), Some("Gym A"));
    }

    #[test]
    fn empty_cells_are_absent() {
        let sheet = [
            vec![text("Name"), text("Gender"), Data::Empty],
            vec![text("Alex"), Data::Empty, text("orphan")],
        ];

        let rows = rows_from_cells(sheet.iter().map(Vec::as_slice));
        assert_eq!(rows[0].get("Gender"), None);
        assert_eq!(rows[0].get(""), None);
    }

    #[test]
    fn blank_rows_are_dropped() {
        let sheet = [
            vec![text("Name"), text("Location")],
            vec![Data::Empty, Data::Empty],
            vec![text(" "), Data::Empty],
            vec![text("Riley"), text("Either")],
        ];

        let rows = rows_from_cells(sheet.iter().map(Vec::as_slice));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Name"), Some("Riley"));
    }

    #[test]
    fn numeric_cells_become_text() {
        let sheet = [vec![text("Name"), text("Location")], vec![text("Sky"), Data::Int(42)]];

        let rows = rows_from_cells(sheet.iter().map(Vec::as_slice));
        assert_eq!(rows[0].get("Location"), Some("42"));
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        let sheet: [Vec<Data>; 0] = [];
        assert!(rows_from_cells(sheet.iter().map(Vec::as_slice)).is_empty());
    }

    #[test]
    fn missing_workbook_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_rows(&temp.path().join("missing.xlsx")).unwrap_err();
        assert!(err.to_string().contains("missing.xlsx"));
    }

    #[test]
    fn report_round_trips_through_calamine() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out").join("report.xlsx");
        let rows = vec![ReportRow {
            client: "Dana".to_string(),
            trainers: vec![ptm_core::TrainerScore {
                trainer: "Alex".to_string(),
                hours: 2.5,
            }],
        }];

        write_report(&path, &rows, 5).unwrap();

        let read = read_rows(&path).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].get("Client Name"), Some("Dana"));
        assert_eq!(read[0].get("Top 5 Trainers"), Some("Alex (2.5h)"));
    }
}
