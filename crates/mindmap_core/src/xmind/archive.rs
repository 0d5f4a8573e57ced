//! Zip packaging for rendered `.xmind` members.
//!
//! # Responsibility
//! - Assemble `content.xml`, `meta.xml` and `META-INF/manifest.xml` into an
//!   in-memory zip container and write it to a destination path.
//!
//! # Invariants
//! - The archive is fully built in memory before any filesystem write.
//! - Missing parent directories of the destination are created; an existing
//!   file at the destination is overwritten.

use crate::model::topic::MindMap;
use crate::xmind::render::{render_content, render_manifest, render_meta};
use crate::xmind::ArchiveResult;
use log::info;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packages `mind_map` as an `.xmind` archive at `destination`.
///
/// # Errors
/// - `ArchiveError::Zip` when the container cannot be assembled.
/// - `ArchiveError::Io` when directory creation or the file write fails.
pub fn package(mind_map: &MindMap, destination: &Path) -> ArchiveResult<()> {
    let bytes = archive_bytes(mind_map)?;

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(destination, &bytes)?;

    info!(
        "event=mindmap_packaged module=xmind status=ok map={} topics={} bytes={} path={}",
        mind_map.id,
        mind_map.root_topic.topic_count(),
        bytes.len(),
        destination.display()
    );
    Ok(())
}

fn archive_bytes(mind_map: &MindMap) -> ArchiveResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("content.xml", options)?;
    writer.write_all(render_content(mind_map).as_bytes())?;

    writer.start_file("meta.xml", options)?;
    writer.write_all(render_meta().as_bytes())?;

    writer.add_directory("META-INF", options)?;
    writer.start_file("META-INF/manifest.xml", options)?;
    writer.write_all(render_manifest().as_bytes())?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
