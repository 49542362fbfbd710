//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs once per process.
//! - Keep engine log lines metadata-only (`event=... module=... status=...`);
//!   user text is never logged.
//!
//! # Invariants
//! - Repeated init with the same level and directory is a no-op.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "planora";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;
const PANIC_LINE_MAX_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Level and directory a logger was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    level: LevelFilter,
    dir: PathBuf,
}

struct ActiveLogger {
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Logging bootstrap failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyDirectory,
    RelativeDirectory(PathBuf),
    CreateDirectory { dir: PathBuf, reason: String },
    Backend(String),
    /// Logging is already active with another level or directory.
    AlreadyInitialized { level: &'static str, log_dir: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyDirectory => write!(f, "log directory cannot be empty"),
            Self::RelativeDirectory(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDirectory { dir, reason } => write!(
                f,
                "failed to create log directory `{}`: {reason}",
                dir.display()
            ),
            Self::Backend(reason) => write!(f, "failed to start logger: {reason}"),
            Self::AlreadyInitialized { level, log_dir } => write!(
                f,
                "logging already initialized with level `{level}` at `{}`; refusing to reconfigure",
                log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging at `log_dir` with `level`.
///
/// # Errors
/// - `UnsupportedLevel` for levels outside `trace|debug|info|warn|error`.
/// - `EmptyDirectory`/`RelativeDirectory` for unusable paths.
/// - `CreateDirectory`/`Backend` when the logger cannot start.
/// - `AlreadyInitialized` when a different configuration is already active.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let requested = LogTarget {
        level: parse_level(level)?,
        dir: parse_log_dir(log_dir)?,
    };

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(&requested))?;
    if active.target != requested {
        return Err(LoggingError::AlreadyInitialized {
            level: level_name(active.target.level),
            log_dir: active.target.dir.clone(),
        });
    }
    Ok(())
}

/// Returns `(level, log_dir)` of active logging, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    let target = &ACTIVE_LOGGER.get()?.target;
    Some((level_name(target.level), target.dir.clone()))
}

/// Level used when none is configured: `debug` in debug builds, else `info`.
pub fn default_log_level() -> &'static str {
    level_name(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })
}

fn start_logger(target: &LogTarget) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&target.dir).map_err(|err| LoggingError::CreateDirectory {
        dir: target.dir.clone(),
        reason: err.to_string(),
    })?;

    let handle = Logger::try_with_str(level_name(target.level))
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(target.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=logging_init module=planora status=ok level={} log_dir={} version={}",
        level_name(target.level),
        target.dir.display(),
        crate::core_version()
    );

    Ok(ActiveLogger {
        target: target.clone(),
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    let trimmed = level.trim();
    let name = if trimmed.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        trimmed
    };
    match name.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => {
            Err(LoggingError::UnsupportedLevel(trimmed.to_ascii_lowercase()))
        }
        Ok(filter) => Ok(filter),
    }
}

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err(LoggingError::EmptyDirectory);
    }
    if !path.is_absolute() {
        return Err(LoggingError::RelativeDirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=planora status=error version={} thread={} location={} message={}",
            crate::core_version(),
            std::thread::current().name().unwrap_or("unnamed"),
            location,
            panic_line(panic_info.payload())
        );
        previous(panic_info);
    }));
}

// Panic payloads may echo user text: one line, bounded length.
fn panic_line(payload: &(dyn Any + Send)) -> String {
    let raw = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    let mut line: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(PANIC_LINE_MAX_CHARS)
        .collect();
    if raw.chars().count() > PANIC_LINE_MAX_CHARS {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, panic_line, parse_level, parse_log_dir, LoggingError,
        PANIC_LINE_MAX_CHARS,
    };
    use log::LevelFilter;
    use std::any::Any;

    #[test]
    fn parse_level_accepts_known_names() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("trace").unwrap(), LevelFilter::Trace);
        assert_eq!(
            parse_level("verbose").unwrap_err(),
            LoggingError::UnsupportedLevel("verbose".to_string())
        );
        assert!(parse_level("off").is_err());
    }

    #[test]
    fn default_level_is_accepted_by_the_parser() {
        assert!(parse_level(default_log_level()).is_ok());
    }

    #[test]
    fn parse_log_dir_rejects_empty_and_relative_paths() {
        assert_eq!(parse_log_dir("  ").unwrap_err(), LoggingError::EmptyDirectory);
        assert!(matches!(
            parse_log_dir("logs/dev"),
            Err(LoggingError::RelativeDirectory(_))
        ));
    }

    #[test]
    fn panic_line_is_single_line_and_bounded() {
        let payload: Box<dyn Any + Send> = Box::new("line1\nline2\rline3");
        assert_eq!(panic_line(payload.as_ref()), "line1 line2 line3");

        let payload: Box<dyn Any + Send> = Box::new("x".repeat(PANIC_LINE_MAX_CHARS + 40));
        let line = panic_line(payload.as_ref());
        assert_eq!(line.chars().count(), PANIC_LINE_MAX_CHARS + 3);
        assert!(line.ends_with("..."));

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_line(payload.as_ref()), "non-string panic payload");
    }
}
