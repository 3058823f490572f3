//! Tracing subscriber setup for the binary
//!
//! Logs go to stderr so that stdout stays clean for search output.
//!
//! # Priority (highest to lowest)
//!
//! 1. `EQ_INVENTORY_SEARCH_LOG` env var (per-target directives, e.g. `eq_inventory_search=debug`)
//! 2. `RUST_LOG` env var
//! 3. CLI flags (`-v` -> debug, `-q` -> error)
//! 4. Default level: `warn`

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Project-specific log filter variable
pub const LOG_ENV_VAR: &str = "EQ_INVENTORY_SEARCH_LOG";

const CRATE_TARGET: &str = "eq_inventory_search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Verbose wins if both flags are given
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }

    /// Filter directive used when neither env var is set
    fn directive(self) -> String {
        let level = self.default_level();
        if self == Self::Verbose {
            format!("{},{}=debug", Level::WARN, CRATE_TARGET)
        } else {
            level.to_string()
        }
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_subscriber(verbosity: Verbosity) {
    let filter = build_env_filter(verbosity);
    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(verbosity == Verbosity::Verbose);

    let result = if verbosity == Verbosity::Verbose {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.with_timer(fmt::time::uptime()))
            .try_init()
    } else {
        tracing_subscriber::registry().with(filter).with(fmt_layer.without_time().compact()).try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    // Unparseable values fall through rather than failing startup
    if let Ok(directives) = std::env::var(LOG_ENV_VAR)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::try_new(verbosity.directive())
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_level().as_str()))
}
