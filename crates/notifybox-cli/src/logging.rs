use std::path::Path;

use notifybox_core::config;

/// Rotate the log file once it grows past this size.
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

fn rotate(log_path: &Path) {
    if let Ok(meta) = std::fs::metadata(log_path) {
        if meta.len() > MAX_LOG_SIZE {
            let _ = std::fs::rename(log_path, log_path.with_extension("log.old"));
        }
    }
}

fn dispatch(verbose: bool) -> fern::Dispatch {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("notifybox_core", level)
        .level_for("notifybox_cli", level)
        .level_for("notifybox", level)
}

/// Log to stderr and the data directory. If the log file cannot be opened,
/// logging continues on stderr alone.
pub fn init(verbose: bool) -> Result<(), fern::InitError> {
    let log_path = config::log_path();
    if let Some(dir) = log_path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    rotate(&log_path);

    let stderr = fern::Dispatch::new()
        .level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .chain(std::io::stderr());

    let root = dispatch(verbose).chain(stderr);
    match fern::log_file(&log_path) {
        Ok(file) => root.chain(file).apply()?,
        Err(e) => {
            root.apply()?;
            log::warn!("Failed to open log file {}: {}", log_path.display(), e);
        }
    }
    Ok(())
}
