//! Logging Adapter - tracing Subscriber Setup
//!
//! Stdout gets JSON or human-readable lines per `app.log_json`. When
//! `app.log_file` is set, the same events are appended to that file as
//! JSON lines, giving a persistent record of every order sent and every
//! exchange response.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppSection;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// # Errors
/// Fails if the audit file or its directory cannot be created, or if a
/// global subscriber is already set.
pub fn init_tracing(app: &AppSection) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&app.log_level));

    let stdout = if app.log_json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    let audit = match &app.log_file {
        Some(path) => {
            let file = open_log_file(Path::new(path))?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout)
        .with(audit)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_directory_and_appends() {
        let dir = std::env::temp_dir().join(format!("order-desk-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("audit.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_open_log_file_reports_path_on_failure() {
        let dir = std::env::temp_dir().join(format!("order-desk-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        // A directory cannot be opened as a log file.
        let err = open_log_file(&dir).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
