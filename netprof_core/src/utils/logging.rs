use log::LevelFilter;

/// Initialize logging using env_logger.
///
/// `RUST_LOG` wins when set, otherwise `default_level` applies to every
/// target, e.g. `RUST_LOG=netprof_core=debug netprof list`.
pub fn init_logging(default_level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A second init (tests, embedding front-ends) keeps the first logger.
    let _ = builder.format_timestamp_millis().try_init();
}
