//! Logging bootstrap for embedding hosts.
//!
//! The library itself only ever talks to the `log` facade; nothing in the
//! store calls into this module. Hosts that do not install their own logger
//! can call [`init`] once at startup to get degradation events (corrupt
//! documents, swallowed I/O faults) on stderr.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

struct LoggingState {
    level: String,
    _logger: LoggerHandle,
}

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

/// Initializes stderr logging at the given level, once per process.
///
/// Calling it again with the same level is a no-op; calling it with a
/// different level is rejected, since the first initialization already won.
pub fn init(level: &str) -> Result<(), String> {
    let level = level.trim().to_ascii_lowercase();

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = Logger::try_with_str(&level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_stderr()
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;
        Ok(LoggingState {
            level: level.clone(),
            _logger: logger,
        })
    })?;

    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        ));
    }
    Ok(())
}
