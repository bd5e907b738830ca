//! Logging setup for the `feedbackdesk` binary.
//!
//! Log lines go to stderr so they never mix with the form prompts or rendered
//! listings on stdout. The filter comes from `FEEDBACKDESK_LOG`, then
//! `RUST_LOG`, then the `-q`/`-v` flags.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable with a filter directive for this program only.
pub const LOG_ENV: &str = "FEEDBACKDESK_LOG";

/// How much the binary logs, picked from the command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Submissions, rejections and storage failures.
    #[default]
    Normal,
    /// Adds store open/insert/list detail (`-v`).
    Verbose,
    /// Everything (`-vv`).
    Trace,
}

impl Verbosity {
    /// Map `-q` and a count of `-v` flags to a verbosity. `-q` wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// The filter directive used when no environment override is set.
    ///
    /// Other crates stay at `warn` so `-vv` does not flood the prompt.
    #[must_use]
    pub fn default_directive(&self) -> String {
        format!("warn,feedbackdesk={}", self.to_level_filter())
    }
}

/// Pick the filter: an explicit directive if it parses, otherwise the
/// verbosity default.
fn build_filter(verbosity: Verbosity, directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity.default_directive()))
}

/// Install the stderr subscriber.
///
/// Calling this more than once is harmless; only the first call installs.
///
/// ```no_run
/// use feedbackdesk::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let directive = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok();
    let stderr_is_tty = std::io::stderr().is_terminal();

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(verbosity, directive.as_deref()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(stderr_is_tty)
                .with_target(verbosity == Verbosity::Trace)
                .without_time(),
        );

    let _ = subscriber.try_init();
}
