use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str =
    "warn,horde_app=info,horde_sim=info,horde_catalog=info,horde_formula=info";

const VERBOSE_FILTER: &str =
    "info,horde_app=debug,horde_sim=debug,horde_catalog=debug,horde_formula=debug";

/// Install the global subscriber. `RUST_LOG` wins over the defaults.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    });

    fmt().with_env_filter(filter).with_target(false).init();
}
