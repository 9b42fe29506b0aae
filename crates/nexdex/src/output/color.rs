//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (clean validation, no cycles)
//!   - Error:     red     (direct failures, dangling references, the worse result)
//!   - Warning:   yellow  (cascading failures, cycles)
//!   - Info:      cyan    (service names, section headers)
//!   - Muted:     dimmed  (labels, connectors, descriptions)
//!   - Emphasis:  bold    (totals, table headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Dim text (labels, connectors).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Bold text (headers, totals).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Bold cyan section header.
pub(crate) fn header(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().bold().to_string()
}

/// Color an impact kind: red for direct failures, yellow for cascades.
pub(crate) fn colorize_kind(is_direct: bool, text: &str, config: &OutputConfig) -> String {
    if is_direct {
        error(text, config)
    } else {
        warning(text, config)
    }
}

/// Color a signed delta: red when things got worse, green when better.
pub(crate) fn colorize_delta(delta: f64, text: &str, config: &OutputConfig) -> String {
    if delta > 0.0 {
        error(text, config)
    } else if delta < 0.0 {
        success(text, config)
    } else {
        text.to_string()
    }
}
