//! Logging backend selection.
//!
//! Library code logs through the `log` facade; this installs the backend for
//! the running platform.

use log::LevelFilter;

/// Installs the platform logger. Later calls are ignored.
#[cfg(target_os = "android")]
pub fn init_logging(level: LevelFilter) {
    use android_logger::Config;

    android_logger::init_once(Config::default().with_max_level(level).with_tag("mhike"));
}

/// Installs the platform logger. Later calls are ignored.
#[cfg(not(target_os = "android"))]
pub fn init_logging(level: LevelFilter) {
    // Err only means a logger is already installed.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
