use crate::errors::AppResult;
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the two-sink logger: console plus a per-run log file under
/// `logs_dir`, named `log_<YYYY-MM-DD_HH-MM-SS>.log`.
///
/// Every event goes to both sinks; the file sink writes without ANSI colors.
/// The filter honors `RUST_LOG` and defaults to `info`.
///
/// # Returns
///
/// The path of the created log file.
pub fn init_logging(logs_dir: &Path) -> AppResult<PathBuf> {
    fs::create_dir_all(logs_dir)?;
    let log_path = logs_dir.join(log_file_name(&Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()));
    let log_file = File::create(&log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(log_path)
}

fn log_file_name(timestamp: &str) -> String {
    format!("log_{timestamp}.log")
}

#[cfg(test)]
mod tests {
    use super::log_file_name;

    #[test]
    fn log_file_name_uses_timestamp() {
        assert_eq!(log_file_name("2024-06-04_12-05-21"), "log_2024-06-04_12-05-21.log");
    }
}
