//! Log output setup

use crate::config::{ColorChoice, LintConfig};
use tracing_subscriber::EnvFilter;

/// Filter for `config`; `RUST_LOG` wins when set and valid
#[must_use]
pub fn env_filter(config: &LintConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter()))
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(config: &LintConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color != ColorChoice::Never && console::colors_enabled_stderr())
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(e) = result {
        tracing::debug!("logging already initialised: {e}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_filter_follows_verbosity() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LintConfig::new().with_verbosity(Verbosity::Debug);
        assert_eq!(env_filter(&config).max_level_hint(), Some(LevelFilter::DEBUG));
        let config = LintConfig::new();
        assert_eq!(env_filter(&config).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LintConfig::new();
        init(&config);
        init(&config);
    }
}
