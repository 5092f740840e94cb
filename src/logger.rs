use std::io::Write;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

use crate::theme::{self, Paint};

/// Filters from quietest to most verbose; each `-v` moves one step right
const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Compute the active filter from `RUST_LOG` (a plain level name) and the `-v` count.
#[must_use]
pub fn level_filter(rust_log: Option<&str>, verbosity: u8) -> LevelFilter {
    let base = rust_log
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn);
    let index = LEVELS.iter().position(|&l| l == base).unwrap_or(2);
    LEVELS[(index + usize::from(verbosity)).min(LEVELS.len() - 1)]
}

struct HwtaskLogger {
    paint: Paint,
    file: Option<Mutex<std::fs::File>>,
    filter: LevelFilter,
    start: Instant,
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn level_style(level: Level) -> anstyle::Style {
    match level {
        Level::Error => theme::FAILURE,
        Level::Warn => theme::WARNING,
        Level::Info => theme::INFO,
        Level::Debug | Level::Trace => theme::DIM,
    }
}

impl Log for HwtaskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Never stdout: that belongs to the child process
        let label = self
            .paint
            .paint(level_style(record.level()), level_label(record.level()));
        let _ = writeln!(
            std::io::stderr().lock(),
            "hwtask: {label}: {}",
            record.args()
        );

        if let Some(ref file) = self.file {
            let elapsed = self.start.elapsed().as_secs_f64();
            let _ = writeln!(
                file.lock(),
                "[{elapsed:.3}s] [{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Install the global logger. Records go to stderr, and to `log_file` when given.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger has already been installed.
pub fn init(verbosity: u8, log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = level_filter(rust_log.as_deref(), verbosity);

    let logger = HwtaskLogger {
        paint: Paint::stderr(),
        file: log_file.map(Mutex::new),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_warn() {
        assert_eq!(level_filter(None, 0), LevelFilter::Warn);
        assert_eq!(level_filter(Some("not-a-level"), 0), LevelFilter::Warn);
    }

    #[test]
    fn test_rust_log_sets_base() {
        assert_eq!(level_filter(Some("debug"), 0), LevelFilter::Debug);
        assert_eq!(level_filter(Some("off"), 0), LevelFilter::Off);
    }

    #[test]
    fn test_verbosity_raises_level() {
        assert_eq!(level_filter(None, 1), LevelFilter::Info);
        assert_eq!(level_filter(None, 2), LevelFilter::Debug);
        assert_eq!(level_filter(Some("error"), 1), LevelFilter::Warn);
        assert_eq!(level_filter(None, 200), LevelFilter::Trace);
    }

    #[test]
    fn test_file_records_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hwtask.log");
        let logger = HwtaskLogger {
            paint: Paint::new(false),
            file: Some(Mutex::new(std::fs::File::create(&path).unwrap())),
            filter: LevelFilter::Info,
            start: Instant::now(),
        };
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("hwtask::dispatch")
                .args(format_args!("Running target `lint`"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("hwtask::dispatch")
                .args(format_args!("filtered out"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents.contains("[INFO] hwtask::dispatch - Running target `lint`"),
            "got: {contents}"
        );
        assert!(!contents.contains("filtered out"));
    }
}
