//! Configuration validation.

use crate::config::Config;

/// Validate the configuration.
///
/// Checks for:
/// - Non-zero probe timeouts, with connect not exceeding the total
/// - A positive redirect cap
/// - A non-empty user agent
/// - A well-formed metrics path
/// - A known log level
///
/// Returns `Ok(())` if valid, or an error message describing every problem
/// found.
pub fn validate_config(config: &Config) -> Result<(), String> {
    let mut errors = Vec::new();

    if config.probe.connect_timeout.is_zero() {
        errors.push("probe connect_timeout must be non-zero".to_string());
    }

    if config.probe.request_timeout.is_zero() {
        errors.push("probe request_timeout must be non-zero".to_string());
    }

    if config.probe.connect_timeout > config.probe.request_timeout {
        errors.push(format!(
            "probe connect_timeout ({}) exceeds request_timeout ({})",
            humantime::format_duration(config.probe.connect_timeout),
            humantime::format_duration(config.probe.request_timeout)
        ));
    }

    if config.probe.max_redirects == 0 {
        errors.push("probe max_redirects must be at least 1".to_string());
    }

    if config.probe.user_agent.trim().is_empty() {
        errors.push("probe user_agent cannot be empty".to_string());
    }

    if !config.global.metrics.path.starts_with('/') {
        errors.push(format!(
            "metrics path '{}' must start with '/'",
            config.global.metrics.path
        ));
    }

    if config.portfolio.skills_file.as_os_str().is_empty() {
        errors.push("portfolio skills_file cannot be empty".to_string());
    }

    if config.portfolio.projects_file.as_os_str().is_empty() {
        errors.push("portfolio projects_file cannot be empty".to_string());
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.global.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "invalid log level '{}', must be one of: {}",
            config.global.log_level,
            valid_levels.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}
