use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;

/// Write one aggregate to `file_name` inside every output directory,
/// creating directories on demand. Returns the paths written.
pub fn write_fanout<T: Serialize>(
    value: &T,
    file_name: &str,
    dirs: &[PathBuf],
    pretty: bool,
) -> Result<Vec<PathBuf>> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let mut written = Vec::with_capacity(dirs.len());
    for dir in dirs {
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        fs::write(&path, &payload)?;
        written.push(path);
    }
    Ok(written)
}
