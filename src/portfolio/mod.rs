//! Portfolio data sources and project health checking.
//!
//! This is the relay's calling layer: it loads the skills and project
//! tables, resolves icon hints, and fans probes out over the project URLs.

mod icons;
mod projects;
mod skills;

pub use icons::{fallback_icon, icon_for, FALLBACK_ICONS, ICON_KEYWORDS};
pub use projects::{load_projects, parse_projects, split_csv_line, Project};
pub use skills::{load_skills, parse_skills, DEFAULT_SKILLS};

use crate::config::PortfolioConfig;
use crate::probe::{ProbeReport, Prober};
use futures::future;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A project joined with its resolved icon and probe outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    pub url: String,
    /// Resolved glyph, never empty.
    pub icon: String,
    pub health: ProbeReport,
}

/// Facade over the portfolio data sources.
pub struct Portfolio {
    config: PortfolioConfig,
    prober: Arc<Prober>,
}

impl Portfolio {
    /// Create a new portfolio facade.
    pub fn new(config: PortfolioConfig, prober: Arc<Prober>) -> Self {
        Self { config, prober }
    }

    /// Load the skills list, falling back to the built-in defaults.
    pub async fn skills(&self) -> Vec<String> {
        load_skills(&self.config.skills_file).await
    }

    /// Load the project table; unreadable files yield an empty list.
    pub async fn projects(&self) -> Vec<Project> {
        load_projects(&self.config.projects_file).await
    }

    /// Load the project table and probe every project URL concurrently.
    ///
    /// Probes are independent: a hung or failing probe resolves to its own
    /// unhealthy card without delaying or aborting the others, and a URL
    /// rejected by validation degrades to an unhealthy card for just that
    /// project.
    pub async fn projects_with_health(&self) -> Vec<ProjectCard> {
        let projects = self.projects().await;
        debug!(count = projects.len(), "checking project URLs");

        let checks = projects.iter().map(|project| {
            let prober = Arc::clone(&self.prober);
            let url = project.url.clone();
            async move {
                match prober.probe(&url).await {
                    Ok(report) => report,
                    Err(rejection) => ProbeReport::failed(url, rejection.to_string()),
                }
            }
        });

        let reports = future::join_all(checks).await;

        projects
            .into_iter()
            .zip(reports)
            .map(|(project, health)| {
                let icon = match &project.icon {
                    Some(hint) => icon_for(hint),
                    None => fallback_icon(&project.title),
                };
                ProjectCard {
                    title: project.title,
                    url: project.url,
                    icon: icon.to_string(),
                    health,
                }
            })
            .collect()
    }
}
