use log::LevelFilter;

/// Install a stderr logger for hosts that do not bring their own.
///
/// Library code only emits through the `log` facade; calling this is optional.
///
/// # Errors
///
/// Returns an error if a global logger has already been installed.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} [{}] {}",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

/// Log level helper to determine if debug logging is enabled
#[must_use]
pub fn is_debug_enabled() -> bool {
    log::log_enabled!(log::Level::Debug)
}
