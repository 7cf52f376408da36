use fern::Dispatch;
use log::LevelFilter;

use crate::config::Config;

/// # parse logging level
/// unknown values default to info
pub fn level_from_str(verbosity: &str) -> LevelFilter {
    match verbosity.trim().to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logging(config: &Config) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new().level(level_from_str(&config.logging_level));

    let file_logger_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(fern::log_file(&config.log_file)?);

    let stderr_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.target(), record.level(), message))
        })
        .chain(std::io::stderr());

    base_config
        .chain(file_logger_config)
        .chain(stderr_config)
        .apply()?;

    Ok(())
}
