//! Log setup for the `sceneschema` binary.
//!
//! Everything goes to stderr so that stdout stays reserved for command
//! output (YAML, JSON, completion scripts). `-v` flags pick the level unless
//! `SCENESCHEMA_LOG_LEVEL` holds a filter directive, which wins.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `sceneschema::config=debug`.
pub const LOG_LEVEL_ENV: &str = "SCENESCHEMA_LOG_LEVEL";

/// How log events are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain text lines, colored when the terminal allows it.
    #[default]
    Human,
    /// One JSON object per event.
    Json,
}

/// Level used when no `-v` flags are given: load warnings only.
const QUIET_LEVEL: &str = "warn";

/// Tracing level for a `-v` count. Counts past three stay at `trace`.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => QUIET_LEVEL,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Decides whether human output gets ANSI colors.
///
/// `auto` colors only an interactive stderr, and never when `NO_COLOR` is set.
#[must_use]
pub const fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stderr_is_terminal && !no_color,
    }
}

fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Installs the global subscriber.
///
/// Targets (module paths) are shown from `-vv` on. A second call is a no-op,
/// which keeps tests that initialize logging independent of each other.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = filter_for(verbosity);
    let show_target = verbosity >= 2;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(show_target)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Human => {
            let ansi = ansi_enabled(
                color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );
            builder.with_ansi(ansi).try_init()
        }
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_err() {
        tracing::trace!("log subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_shows_warnings_only() {
        assert_eq!(level_for(0), "warn");
    }

    #[test]
    fn each_flag_raises_the_level() {
        let levels: Vec<&str> = (1..=4).map(level_for).collect();
        assert_eq!(levels, ["info", "debug", "trace", "trace"]);
        assert_eq!(level_for(u8::MAX), "trace");
    }

    #[test]
    fn auto_color_needs_a_terminal_without_no_color() {
        assert!(ansi_enabled(ColorChoice::Auto, true, false));
        assert!(!ansi_enabled(ColorChoice::Auto, false, false));
        assert!(!ansi_enabled(ColorChoice::Auto, true, true));
    }

    #[test]
    fn explicit_color_choice_ignores_environment() {
        assert!(ansi_enabled(ColorChoice::Always, false, true));
        assert!(!ansi_enabled(ColorChoice::Never, true, false));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LogFormat::Human, 0, ColorChoice::Never);
        init_logging(LogFormat::Json, 2, ColorChoice::Always);
        tracing::warn!("still logging after a second init");
    }
}
