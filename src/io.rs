//! Whole-file read and write.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use crate::LoaderError;

/// Read the whole file at `path`.
///
/// The buffer is sized from the file's metadata and allocated fallibly. A
/// read that returns fewer bytes than the metadata promised is an error,
/// not a truncated success.
pub fn read_file(path: &Path) -> Result<Vec<u8>, LoaderError> {
    let file = File::open(path).map_err(|source| LoaderError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let expected = file
        .metadata()
        .map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let capacity = usize::try_from(expected).map_err(|_| LoaderError::Alloc(expected))?;
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|_| LoaderError::Alloc(expected))?;

    file.take(expected)
        .read_to_end(&mut data)
        .map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let actual = data.len() as u64;
    if actual != expected {
        return Err(LoaderError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    log::debug!("read {} bytes from {}", actual, path.display());
    Ok(data)
}

/// Create or truncate `path` and write `data` with a single write call.
///
/// On Unix the file is created with mode `0o666` (before umask). A partial
/// write is reported as [`LoaderError::ShortWrite`] and not retried.
pub fn write_file(path: &Path, data: &[u8]) -> Result<usize, LoaderError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }

    let mut file = options.open(path).map_err(|source| LoaderError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let written = write_once(&mut file, path, data)?;
    log::debug!("wrote {} bytes to {}", written, path.display());
    Ok(written)
}

fn write_once<W: Write>(writer: &mut W, path: &Path, data: &[u8]) -> Result<usize, LoaderError> {
    let written = writer.write(data).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if written != data.len() {
        return Err(LoaderError::ShortWrite {
            path: path.to_path_buf(),
            expected: data.len(),
            written,
        });
    }
    Ok(written)
}
