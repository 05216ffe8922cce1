//! Unified status vocabulary for consistent CLI output.
//!
//! `StatusKind` provides a single canonical set of status icons and colors
//! used by the detection summary, the step log line and the CLI.

use crate::progress::StepStatus;

use super::theme::InstallTheme;

/// Canonical status kinds used across all installkit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Failed,
    /// Operation was skipped.
    Skipped,
    /// Operation has not been run yet.
    Pending,
    /// Operation is currently running.
    Running,
    /// Non-fatal warning.
    Warning,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Pending => "◌",
            Self::Running => "◆",
            Self::Warning => "⚠",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &InstallTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Skipped | Self::Pending => theme.dim.apply_to(icon).to_string(),
            Self::Running => theme.info.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
        }
    }

    /// Format a status line: styled icon + message.
    pub fn format(self, theme: &InstallTheme, msg: &str) -> String {
        format!("{} {}", self.styled(theme), msg)
    }
}

impl From<StepStatus> for StatusKind {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Starting => Self::Pending,
            StepStatus::InProgress => Self::Running,
            StepStatus::Completed => Self::Success,
            StepStatus::Failed => Self::Failed,
            StepStatus::Skipped => Self::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StatusKind; 6] = [
        StatusKind::Success,
        StatusKind::Failed,
        StatusKind::Skipped,
        StatusKind::Pending,
        StatusKind::Running,
        StatusKind::Warning,
    ];

    #[test]
    fn icon_returns_unicode_symbols() {
        assert_eq!(StatusKind::Success.icon(), "✓");
        assert_eq!(StatusKind::Failed.icon(), "✗");
        assert_eq!(StatusKind::Warning.icon(), "⚠");
    }

    #[test]
    fn plain_theme_styles_without_escapes() {
        let theme = InstallTheme::plain();
        assert_eq!(StatusKind::Success.format(&theme, "Git"), "✓ Git");
    }

    #[test]
    fn from_step_status() {
        assert_eq!(StatusKind::from(StepStatus::Starting), StatusKind::Pending);
        assert_eq!(StatusKind::from(StepStatus::InProgress), StatusKind::Running);
        assert_eq!(StatusKind::from(StepStatus::Completed), StatusKind::Success);
        assert_eq!(StatusKind::from(StepStatus::Failed), StatusKind::Failed);
        assert_eq!(StatusKind::from(StepStatus::Skipped), StatusKind::Skipped);
    }

    #[test]
    fn all_variants_have_unique_icons() {
        let mut icons: Vec<&str> = ALL.iter().map(|k| k.icon()).collect();
        icons.sort();
        icons.dedup();
        assert_eq!(icons.len(), ALL.len(), "All icons should be unique");
    }
}
