//! Reading the course table from a `.csv` file or an `.xlsx` workbook.

use crate::course::{Catalog, Course};
use crate::error::CoverError;
use std::path::Path;
use tracing::{info, warn};
use umya_spreadsheet::Worksheet;

pub const CODE_COLUMN: &str = "Course Code";
pub const TITLE_COLUMN: &str = "Course Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    /// Picks the reader from the file extension, ignoring case.
    pub fn of(path: &Path) -> Result<Self, CoverError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("xlsx" | "xlsm") => Ok(TableFormat::Xlsx),
            _ => Err(CoverError::Spreadsheet(format!(
                "{}: unsupported course table, expected .csv or .xlsx",
                path.display()
            ))),
        }
    }
}

/// Read a course table.
///
/// The first row holds the headers, with surrounding whitespace stripped.
/// `Course Code` and `Course Title` are required; every other non-blank
/// header is a requirement category whose cells hold non-negative integer
/// coverage counts (blank means 0). Rows without a code are skipped.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Catalog, CoverError> {
    let path = path.as_ref();
    let format = TableFormat::of(path)?;
    let catalog = match format {
        TableFormat::Csv => read_csv(path)?,
        TableFormat::Xlsx => read_xlsx(path)?,
    };
    info!(
        path = %path.display(),
        ?format,
        courses = catalog.len(),
        categories = catalog.categories.len(),
        "loaded course table"
    );
    Ok(catalog)
}

fn read_csv(path: &Path) -> Result<Catalog, CoverError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let layout = TableLayout::from_headers(headers)?;

    let mut courses = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i as u32 + 2;
        if let Some(course) = layout.course(row, |col| record.get(col).unwrap_or("").to_string())? {
            courses.push(course);
        }
    }
    Ok(layout.into_catalog(courses))
}

fn read_xlsx(path: &Path) -> Result<Catalog, CoverError> {
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| CoverError::Spreadsheet(format!("{}: {e:?}", path.display())))?;
    let sheet = book
        .get_sheet_collection()
        .first()
        .ok_or_else(|| CoverError::Spreadsheet(format!("{}: workbook has no worksheets", path.display())))?;
    catalog_from_sheet(sheet)
}

fn catalog_from_sheet(sheet: &Worksheet) -> Result<Catalog, CoverError> {
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let headers = (1..=max_col)
        .map(|col| sheet.get_value((col, 1)).trim().to_string())
        .collect();
    let layout = TableLayout::from_headers(headers)?;

    let mut courses = Vec::new();
    for row in 2..=max_row {
        if let Some(course) = layout.course(row, |col| sheet.get_value((col as u32 + 1, row)))? {
            courses.push(course);
        }
    }
    Ok(layout.into_catalog(courses))
}

/// Column positions (0-based) resolved from the header row.
struct TableLayout {
    code: usize,
    title: usize,
    categories: Vec<(usize, String)>,
}

impl TableLayout {
    fn from_headers(headers: Vec<String>) -> Result<Self, CoverError> {
        let column_of = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CoverError::MissingColumn(name.to_string()))
        };
        let code = column_of(CODE_COLUMN)?;
        let title = column_of(TITLE_COLUMN)?;
        let categories = headers
            .into_iter()
            .enumerate()
            .filter(|(col, h)| *col != code && *col != title && !h.is_empty())
            .collect();
        Ok(Self { code, title, categories })
    }

    /// `row` is the 1-based sheet row, for messages only.
    fn course(&self, row: u32, cell: impl Fn(usize) -> String) -> Result<Option<Course>, CoverError> {
        let code = cell(self.code).trim().to_string();
        if code.is_empty() {
            warn!(row, "skipping row without a course code");
            return Ok(None);
        }
        let mut course = Course::new(code, cell(self.title).trim());
        for (col, category) in &self.categories {
            let count = parse_count(&cell(*col)).ok_or_else(|| {
                CoverError::Spreadsheet(format!(
                    "row {row}, column `{category}`: expected a non-negative integer"
                ))
            })?;
            if count > 0 {
                course.coverage.insert(category.clone(), count);
            }
        }
        Ok(Some(course))
    }

    fn into_catalog(self, courses: Vec<Course>) -> Catalog {
        let categories = self.categories.into_iter().map(|(_, h)| h).collect();
        Catalog::new(categories, courses)
    }
}

/// Blank is zero; `1` and `1.0` are one.
fn parse_count(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0);
    }
    if let Ok(n) = cell.parse::<u32>() {
        return Some(n);
    }
    let value: f64 = cell.parse().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then_some(value as u32)
}
