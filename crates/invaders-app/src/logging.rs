use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `verbose` turns on debug output, which includes every rejected command
/// and fire attempt. `RUST_LOG` overrides either level.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // Fails only if a logger is already installed, which tests do repeatedly.
    let _ = builder.try_init();
}
