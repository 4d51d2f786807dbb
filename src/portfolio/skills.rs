//! Skills list loading.

use std::path::Path;
use tracing::warn;

/// Built-in skill set used when the skills file cannot be read.
pub const DEFAULT_SKILLS: &[&str] = &[
    "JavaScript",
    "React",
    "Node.js",
    "Python",
    "HTML/CSS",
    "TypeScript",
    "Vue.js",
    "Express.js",
    "MongoDB",
    "PostgreSQL",
    "Git",
    "Docker",
    "AWS",
    "REST APIs",
    "GraphQL",
    "Webpack",
    "Jest",
    "CI/CD",
    "Agile",
    "UI/UX",
    "Responsive Design",
    "Performance",
    "Security",
    "Testing",
    "Deployment",
];

/// Parse a newline-delimited skills list, trimming entries and dropping
/// empty lines.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the skills list from a file.
///
/// An unreadable file degrades to the built-in default set; the page load
/// never fails on a missing data source.
pub async fn load_skills(path: &Path) -> Vec<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => parse_skills(&text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read skills file, using defaults");
            DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
        }
    }
}
