//! # Output Configuration
//!
//! Controls CLI output appearance based on terminal capabilities and user
//! preferences. Respects `--color=never|always|auto`, `NO_COLOR`
//! (https://no-color.org/), `CLICOLOR=0`, `CLICOLOR_FORCE=1`, and
//! `TERM=dumb`.

use std::env;

use console::style;

/// Output configuration for controlling colored status tags.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// - `--color=always`: force colors on (overrides NO_COLOR)
    /// - `--color=never`: force colors off
    /// - `--color=auto`: detect based on environment
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Use console crate's detection for TTY and color support
        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Render a status tag like `[OK]` or `[FAIL]`, colored green/red when
/// colors are enabled.
pub fn tag(config: &OutputConfig, label: &str, good: bool) -> String {
    if !config.use_color {
        return label.to_string();
    }
    if good {
        style(label).green().to_string()
    } else {
        style(label).red().to_string()
    }
}
