//! Writing solutions to a workbook.

use crate::error::CoverError;
use crate::model::Solution;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

/// One worksheet per solution (`Solution 1`, `Solution 2`, ...) listing the
/// selected courses; a single `Summary` sheet when there are none.
pub fn write_solutions(path: impl AsRef<Path>, solutions: &[Solution]) -> Result<(), CoverError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    if solutions.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        sheet.write_string(0, 0, "No course selection satisfies the requirements.")?;
    }

    for (k, solution) in solutions.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(format!("Solution {}", k + 1))?;
        sheet.write_string_with_format(0, 0, "Course Code", &bold)?;
        sheet.write_string_with_format(0, 1, "Course Title", &bold)?;
        for (row, course) in solution.selected.iter().enumerate() {
            let row = row as u32 + 1;
            sheet.write_string(row, 0, course.code.as_str())?;
            sheet.write_string(row, 1, &course.title)?;
        }
        sheet.autofit();
    }

    workbook.save(path.as_ref())?;
    info!(path = %path.as_ref().display(), solutions = solutions.len(), "exported solutions");
    Ok(())
}
