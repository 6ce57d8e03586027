//! Archive extraction.

use flate2::read::GzDecoder;
use lspup_core::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tar::Archive;

/// Unpack the `.tar.gz` at `archive` into `dest`, creating `dest` if needed.
///
/// Blocking; run it on the blocking pool from async code.
///
/// # Errors
///
/// Returns an error if the archive cannot be read or an entry cannot be written.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest).map_err(|e| Error::io(e, dest, "create directory"))?;

    let file = File::open(archive).map_err(|e| Error::io(e, archive, "open"))?;
    let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.unpack(dest)
        .map_err(|e| Error::extraction(dest, e.to_string()))
}
