//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Done/OK:       green   (resolved issues, low risk)
//!   - Caution:       yellow  (in-progress, medium risk)
//!   - Danger:        red     (high and critical risk, cycles)
//!   - Reference:     cyan    (issue keys)
//!   - Muted:         dimmed  (phantom nodes, field labels)
//!   - Emphasis:      bold    (section headers)

use crate::domain::{RiskLevel, StatusCategory};
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

/// Apply bold emphasis to text.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Apply muted styling to text.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Colorize an issue key (cyan).
pub(crate) fn colorize_key(key: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return key.to_string();
    }
    key.cyan().to_string()
}

/// Colorize a risk level by severity.
pub(crate) fn colorize_risk(level: RiskLevel, config: &OutputConfig) -> String {
    let text = level.to_string();
    if !config.use_colors {
        return text;
    }
    match level {
        RiskLevel::Low => text.green().to_string(),
        RiskLevel::Medium => text.yellow().to_string(),
        RiskLevel::High => text.red().to_string(),
        RiskLevel::Critical => text.red().bold().to_string(),
    }
}

/// Get a colored status icon, with ASCII fallback support.
pub(crate) fn status_icon(category: StatusCategory, config: &OutputConfig) -> String {
    let icon = if config.use_ascii {
        match category {
            StatusCategory::New => "o",
            StatusCategory::InProgress => ">",
            StatusCategory::Done => "+",
            StatusCategory::Unknown => "?",
        }
    } else {
        match category {
            StatusCategory::New => "○",
            StatusCategory::InProgress => "▶",
            StatusCategory::Done => "✓",
            StatusCategory::Unknown => "·",
        }
    };

    if !config.use_colors {
        return icon.to_string();
    }
    match category {
        StatusCategory::New => icon.white().to_string(),
        StatusCategory::InProgress => icon.yellow().to_string(),
        StatusCategory::Done => icon.green().to_string(),
        StatusCategory::Unknown => icon.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    #[test]
    fn colors_disabled_passes_text_through() {
        let config = plain();
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(colorize_risk(RiskLevel::Critical, &config), "critical");
    }

    #[test]
    fn ascii_icons() {
        let config = OutputConfig::new(80, true, false);
        assert_eq!(status_icon(StatusCategory::Done, &config), "+");
        assert_eq!(status_icon(StatusCategory::Unknown, &config), "?");
    }
}
