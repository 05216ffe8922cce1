//! Visual theme and styling.

use console::Style;

/// installkit's visual theme.
#[derive(Debug, Clone)]
pub struct InstallTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational/running elements (magenta).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for InstallTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            key: Style::new(),
        }
    }

    /// Colored when the terminal supports it, plain otherwise.
    pub fn detect(no_color: bool) -> Self {
        if !no_color && should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format a `key: value` line.
    pub fn format_key_value(&self, key: &str, value: &str) -> String {
        format!("{} {}", self.key.apply_to(format!("{}:", key)), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
