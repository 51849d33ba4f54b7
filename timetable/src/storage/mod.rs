//! Flat-file persistence for the timetable.
//!
//! The whole store is read at startup and rewritten in full after every
//! change. There is no incremental writing and no locking.

mod error;
mod reader;
mod writer;

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{Schedule, Stops};

pub use error::StorageError;
pub use reader::{DEFAULT_TRAVEL_TIME, ReadOptions, Timetable, read_timetable};
pub use writer::write_timetable;

/// Load a timetable file.
///
/// Returns `None` if the file does not exist.
pub fn load(path: &Path, options: ReadOptions) -> Result<Option<Timetable>, StorageError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No timetable file, starting empty");
            return Ok(None);
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let timetable = read_timetable(&text, options)?;
    info!(
        path = %path.display(),
        stops = timetable.stops.len(),
        schedules = timetable.schedules.len(),
        "Loaded timetable"
    );
    Ok(Some(timetable))
}

/// Rewrite the timetable file with every stop and schedule.
///
/// Creates parent directories if they don't exist.
pub fn save(path: &Path, stops: &Stops, schedules: &[Schedule]) -> Result<(), StorageError> {
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    write_timetable(&mut buf, stops, schedules).map_err(io_error)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    std::fs::write(path, buf).map_err(io_error)?;
    debug!(
        path = %path.display(),
        stops = stops.len(),
        schedules = schedules.len(),
        "Saved timetable"
    );
    Ok(())
}
