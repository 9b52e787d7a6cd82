use std::path::Path;

use chrono::NaiveDate;

use crate::error::{LoadError, LoadResult};
use crate::model::{date_token, TimelineItem};

/// Column roles recognised in a milestone sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Project,
    Label,
    Start,
    End,
    Status,
}

/// Read a date cell. Token form ("10 Mar 2025") is preferred; common numeric
/// layouts are accepted too.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = date_token::parse(s) {
        return Some(d);
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "project" | "projectname" | "proyek" | "site" | "group" => Some(Column::Project),
        "milestone" | "label" | "name" | "task" | "activity" | "title" => Some(Column::Label),
        "start" | "startdate" | "from" | "begin" | "mulai" => Some(Column::Start),
        "end" | "enddate" | "to" | "finish" | "due" | "selesai" => Some(Column::End),
        "status" | "state" | "progress" => Some(Column::Status),
        _ => None,
    }
}

/// Import milestones from a CSV file. Rows without a project column fall
/// back to the file name as project. Returns `(milestones, skipped_rows)`.
pub fn import_csv(path: &Path) -> LoadResult<(Vec<TimelineItem>, usize)> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback_project = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported Project");
    let result = import_csv_str(&content, fallback_project)?;
    log::info!(
        "Imported {} milestones from {} ({} rows skipped)",
        result.0.len(),
        path.display(),
        result.1
    );
    Ok(result)
}

/// Import milestones from CSV text.
pub fn import_csv_str(
    content: &str,
    fallback_project: &str,
) -> LoadResult<(Vec<TimelineItem>, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |c: Column| columns.contains(&Some(c));
    if !has(Column::Label) || !has(Column::Start) || !has(Column::End) {
        return Err(LoadError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut items = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {}: {}", row, e);
                skipped += 1;
                continue;
            }
        };

        let mut project = None;
        let mut label = None;
        let mut start = None;
        let mut end = None;
        let mut status = None;
        for (field, column) in record.iter().zip(columns.iter()) {
            let value = field.trim();
            match column {
                Some(Column::Project) => project = Some(value),
                Some(Column::Label) => label = Some(value),
                Some(Column::Start) => start = Some(value),
                Some(Column::End) => end = Some(value),
                Some(Column::Status) => status = Some(value),
                None => {}
            }
        }

        let Some(label) = label.filter(|l| !l.is_empty()) else {
            skipped += 1;
            continue;
        };
        let Some(start_date) = start.and_then(parse_date) else {
            log::warn!("Skipping row {}: invalid start date '{}'", row, start.unwrap_or(""));
            skipped += 1;
            continue;
        };
        let Some(end_date) = end.and_then(parse_date) else {
            log::warn!("Skipping row {}: invalid end date '{}'", row, end.unwrap_or(""));
            skipped += 1;
            continue;
        };

        let project = project.filter(|p| !p.is_empty()).unwrap_or(fallback_project);
        let mut item = TimelineItem::new(project, label, start_date, end_date);
        item.status = status.filter(|s| !s.is_empty()).map(str::to_string);
        items.push(item);
    }

    if items.is_empty() {
        return Err(LoadError::Empty { skipped });
    }
    Ok((items, skipped))
}
