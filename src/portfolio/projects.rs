//! Project table loading and CSV parsing.
//!
//! The project table is a comma-separated file where each data row is
//! `title, url, icon-hint` with the icon-hint optional. Quoted fields may
//! contain embedded commas.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// One project row from the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub url: String,
    /// Icon hint as written in the table; `None` when the row had no
    /// third column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Split one CSV line into trimmed fields.
///
/// Double quotes toggle an in-quotes state in which commas are literal;
/// the quote characters themselves are not part of the field.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Parse the project table.
///
/// The first line is a header and is skipped. Rows with fewer than two
/// fields are dropped; a present-but-empty icon column counts as no hint.
pub fn parse_projects(csv: &str) -> Vec<Project> {
    let mut lines = csv.trim().lines();

    // Header row
    let _ = lines.next();

    let mut projects = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_csv_line(line);
        if fields.len() < 2 || fields[0].is_empty() || fields[1].is_empty() {
            continue;
        }

        let icon = fields.get(2).filter(|hint| !hint.is_empty()).cloned();

        projects.push(Project {
            title: fields[0].clone(),
            url: fields[1].clone(),
            icon,
        });
    }

    projects
}

/// Load the project table from a file.
///
/// An unreadable file degrades to an empty list; the caller renders its
/// "no projects" placeholder instead of failing the page load.
pub async fn load_projects(path: &Path) -> Vec<Project> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => parse_projects(&text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read projects file");
            Vec::new()
        }
    }
}
