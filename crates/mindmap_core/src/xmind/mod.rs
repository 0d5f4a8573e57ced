//! XMind archive serialization.
//!
//! # Responsibility
//! - Render a mind map into the three XML members of an `.xmind` container.
//! - Package those members into a zip file on disk.
//!
//! # Invariants
//! - Rendering is pure: the same document always yields the same bytes.
//! - User titles are escaped exactly once; generator-owned ids and
//!   timestamps are embedded verbatim.
//! - Packaging reads a caller-owned document and never touches the store.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod archive;
mod render;

pub use archive::package;
pub use render::{escape_xml, render_content, render_manifest, render_meta};

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors from `.xmind` packaging.
#[derive(Debug)]
pub enum ArchiveError {
    /// Directory creation or the destination write failed.
    Io(std::io::Error),
    /// The zip container could not be assembled.
    Zip(zip::result::ZipError),
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "archive write failed: {err}"),
            Self::Zip(err) => write!(f, "archive packaging failed: {err}"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Zip(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(value: zip::result::ZipError) -> Self {
        Self::Zip(value)
    }
}
