use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "moktashif-client";

pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moktashif")
        .join("logs")
}

/// Initialize logging. In debug mode, logs to file (level from `RUST_LOG`, default debug)
/// and duplicates warnings to stdout.
/// In release mode, logs errors only to file with rotation.
/// The returned handle must be kept alive until shutdown so buffered lines get flushed.
pub fn init(log_dir: &Path) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    let file_spec = FileSpec::default()
        .directory(log_dir)
        .basename(LOG_BASENAME);

    let logger = if cfg!(debug_assertions) {
        Logger::try_with_env_or_str("debug")?
            .log_to_file(file_spec)
            .duplicate_to_stdout(flexi_logger::Duplicate::Warn)
    } else {
        Logger::try_with_str("error")?
            .log_to_file(file_spec)
            .rotate(
                flexi_logger::Criterion::Size(10_000_000), // 10MB
                flexi_logger::Naming::Numbers,
                flexi_logger::Cleanup::KeepLogFiles(3),
            )
    };

    let handle = logger.write_mode(WriteMode::BufferAndFlush).start()?;

    Ok(handle)
}
