//! Package archive writer

use std::path::Path;

use bzip2::{Compression, write::BzEncoder};
use chrono::{DateTime, Utc};
use tar::{Header, HeaderMode};

use crate::Result;

/// Mode of generated scripts and launchers
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Mode of other generated files
pub const REGULAR_MODE: u32 = 0o644;

/// Writer for `.tar.bz2` conda packages.
///
/// Entries are stored in the order they are appended, with uid and gid
/// cleared and every mtime set to the configured timestamp. The archive is
/// kept in memory until [`PackageWriter::finish`].
pub struct PackageWriter {
    archive: tar::Builder<BzEncoder<Vec<u8>>>,

    /// Modification time of every entry
    mtime: u64,
}

impl PackageWriter {
    /// Create a new PackageWriter
    ///
    /// `compression_level` ranges from 1 (fastest) to 9 (smallest). Without
    /// a timestamp all entries get mtime 0.
    pub fn new(compression_level: u32, timestamp: Option<DateTime<Utc>>) -> Self {
        let encoder = BzEncoder::new(Vec::new(), Compression::new(compression_level.clamp(1, 9)));
        let mut archive = tar::Builder::new(encoder);
        archive.follow_symlinks(false);

        Self {
            archive,
            mtime: timestamp.map_or(0, |timestamp| timestamp.timestamp().unsigned_abs()),
        }
    }

    /// Append a file from disk, keeping its permission bits
    pub fn append_file(&mut self, arcname: &str, source: &Path) -> Result<()> {
        let stat = fs_err::metadata(source)?;
        let contents = fs_err::read(source)?;

        let mut header = Header::new_gnu();
        header.set_metadata_in_mode(&stat, HeaderMode::Deterministic);
        self.finish_header(&mut header, contents.len());

        self.archive
            .append_data(&mut header, arcname, contents.as_slice())?;
        Ok(())
    }

    /// Append a file with the given contents
    pub fn append_bytes(&mut self, arcname: &str, contents: &[u8], mode: u32) -> Result<()> {
        let mut header = Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(mode);
        self.finish_header(&mut header, contents.len());

        self.archive.append_data(&mut header, arcname, contents)?;
        Ok(())
    }

    fn finish_header(&self, header: &mut Header, size: usize) {
        header.set_size(size as u64);
        header.set_mtime(self.mtime);
        header.set_uid(0);
        header.set_gid(0);
    }

    /// Finish the archive and return the compressed bytes
    pub fn finish(self) -> Result<Vec<u8>> {
        let encoder = self.archive.into_inner()?;
        Ok(encoder.finish()?)
    }
}
