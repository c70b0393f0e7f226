//! I/O at the edges: loading record collections and writing results.

pub mod output;
pub mod source;

pub use output::{create_writer, CatalogWriter, JsonWriter, TerminalWriter};
pub use source::{CatalogData, FileDetailResolver, FileRecordSource, RecordSource};

use std::path::Path;

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
