use crate::model::RoadmapItem;
use std::path::Path;

/// Format an optional date for the export, empty when the item is unscheduled.
fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Export roadmap items to a semicolon-delimited CSV file.
///
/// Columns: Title ; Start Date ; End Date ; Progress ; Category
/// Dates are formatted as DD/MM/YYYY; unscheduled items leave them blank.
/// Returns the number of items written.
pub fn export_csv(items: &[RoadmapItem], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Start Date", "End Date", "Progress", "Category"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for item in items {
        wtr.write_record([
            item.title.as_str(),
            &format_date(item.start_date),
            &format_date(item.end_date),
            &format!("{}%", item.progress),
            item.category.as_deref().unwrap_or(""),
        ])
        .map_err(|e| format!("Failed to write item '{}': {}", item.title, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(items.len())
}
