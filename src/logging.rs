// Debug logging for Pong
// The terminal belongs to the game, so log output goes to a file,
// and only when enabled with --debug

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;

pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("pong-debug.log")
}

/// Install the tracing subscriber.
///
/// With `enabled == false` no subscriber is installed and every
/// `tracing` macro is a no-op. Otherwise the log file is truncated and
/// receives debug-level events.
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let path = log_file_path();
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    writeln!(file, "=== Pong Debug Log ===")?;
    writeln!(file, "To monitor: tail -f {}", path.display())?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(())
}
