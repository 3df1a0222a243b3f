//! Logging infrastructure for tabdeck
//!
//! Routes every `log::info!()` / `log::warn!()` etc. to a debug log file so
//! that command output on stdout stays clean.
//!
//! All output goes to /tmp/tabdeck_debug.log on Unix/macOS,
//! or %TEMP%\tabdeck_debug.log on Windows.
//! When RUST_LOG is set, records are mirrored to stderr as well.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use tabdeck_config::LogLevel;

/// Location of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/tabdeck_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("tabdeck_debug.log");
    path
}

/// File sink shared by every log call
struct LogSink {
    file: Option<std::fs::File>,
    mirror_stderr: bool,
}

impl LogSink {
    fn open(level: LevelFilter, mirror_stderr: bool) -> Self {
        let file = if level != LevelFilter::Off {
            // Silently fall back to no file if it can't be opened
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
        } else {
            None
        };

        let mut sink = LogSink {
            file,
            mirror_stderr,
        };
        sink.write_raw(&format!(
            "\n{}\ntabdeck session started at {} (level={})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        sink
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_line(&mut self, line: &str) {
        self.write_raw(line);
        if self.mirror_stderr {
            let _ = std::io::stderr().write_all(line.as_bytes());
        }
    }
}

static SINK: OnceLock<Mutex<LogSink>> = OnceLock::new();

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = SINK.get() {
            let line = format!(
                "[{}] [{:<5}] [{}] {}\n",
                get_timestamp(),
                record.level(),
                record.target(),
                record.args()
            );
            sink.lock().write_line(&line);
        }
    }

    fn flush(&self) {
        if let Some(sink) = SINK.get() {
            let mut sink = sink.lock();
            if let Some(file) = sink.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Parse a RUST_LOG value into a level filter.
///
/// Accepts a bare level ("debug", "warn", ...) or a directive list such as
/// `tabdeck=debug,other=warn`, which resolves to the most verbose level named.
fn parse_rust_log(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            level.parse::<LevelFilter>().ok()
        })
        .max()
}

/// Pick the effective level: CLI flag, then RUST_LOG, then config
pub fn resolve_level(
    cli_level: Option<LevelFilter>,
    rust_log: Option<&str>,
    config_level: LogLevel,
) -> LevelFilter {
    cli_level
        .or_else(|| rust_log.and_then(parse_rust_log))
        .unwrap_or_else(|| config_level.to_level_filter())
}

/// Install the log bridge as the global logger.
///
/// Safe to call more than once; only the first call installs the sink, later
/// calls just adjust the max level.
pub fn init_log_bridge(cli_level: Option<LevelFilter>, config_level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level);

    SINK.get_or_init(|| Mutex::new(LogSink::open(level, rust_log.is_some())));
    // Already set when called twice in one process
    let _ = log::set_logger(&BRIDGE);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        let level = resolve_level(Some(LevelFilter::Trace), Some("error"), LogLevel::Off);
        assert_eq!(level, LevelFilter::Trace);
    }

    #[test]
    fn rust_log_beats_config() {
        assert_eq!(
            resolve_level(None, Some("info"), LogLevel::Error),
            LevelFilter::Info
        );
        assert_eq!(
            resolve_level(None, Some("tabdeck=debug,other=warn"), LogLevel::Error),
            LevelFilter::Debug
        );
    }

    #[test]
    fn config_is_fallback() {
        assert_eq!(resolve_level(None, None, LogLevel::Warn), LevelFilter::Warn);
        // Garbage RUST_LOG falls through to config
        assert_eq!(
            resolve_level(None, Some("loud"), LogLevel::Info),
            LevelFilter::Info
        );
    }
}
