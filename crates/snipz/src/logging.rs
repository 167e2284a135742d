//! Log subscriber setup.
//!
//! The library only emits `tracing` events. The CLI installs a `fmt` layer on stderr,
//! filtered by `SNIPZ_LOG` (standard `EnvFilter` syntax). Without it the level is
//! `warn`, or `debug` with `--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "SNIPZ_LOG";

fn build_env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn init_logging(verbose: bool) {
    // A subscriber may already be installed (tests); keep it.
    let _ = Registry::default()
        .with(build_env_filter(verbose))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(build_env_filter(true).to_string(), "debug");
    }
}
