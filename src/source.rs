//! Input sources for the instrument readers.
//!
//! Both instruments are read either from a file on disk or from an already
//! open byte stream. [`DataSource`] is the sum type over those inputs; every
//! decoder in this crate accepts anything convertible into it.
//!
//! ```rust,no_run
//! use tlab::source::DataSource;
//! use tlab::streak::StreakRecord;
//!
//! // From a path
//! let record = StreakRecord::decode("sample.img")?;
//!
//! // From an open stream
//! let file = std::fs::File::open("sample.img")?;
//! let record = StreakRecord::decode(DataSource::reader(file))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Errors raised while opening an input source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The input is neither a readable file path nor a stream
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error opening the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A file path or a readable byte stream
pub enum DataSource {
    /// A file on disk
    Path(PathBuf),
    /// An already open stream, consumed by the decoder
    Reader(Box<dyn Read + Send>),
    /// An in-memory buffer
    Bytes(Vec<u8>),
}

impl DataSource {
    /// Wrap any reader as a stream source
    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        DataSource::Reader(Box::new(reader))
    }

    /// Open the source for sequential reading.
    ///
    /// Paths must name a regular file; an empty path or a directory is
    /// rejected with [`SourceError::InvalidArgument`].
    pub fn open(self) -> Result<Box<dyn BufRead + Send>, SourceError> {
        match self {
            DataSource::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(SourceError::InvalidArgument(
                        "empty path is not a readable source".to_string(),
                    ));
                }
                if path.is_dir() {
                    return Err(SourceError::InvalidArgument(format!(
                        "{} is a directory, not a readable file",
                        path.display()
                    )));
                }
                let file = File::open(&path)?;
                Ok(Box::new(BufReader::new(file)))
            }
            DataSource::Reader(reader) => Ok(Box::new(BufReader::new(reader))),
            DataSource::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes))),
        }
    }

    /// Read the whole source into memory
    pub fn read_all(self) -> Result<Vec<u8>, SourceError> {
        let mut reader = self.open()?;
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            DataSource::Reader(_) => f.write_str("Reader(..)"),
            DataSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for DataSource {
    fn from(path: &PathBuf) -> Self {
        DataSource::Path(path.clone())
    }
}

impl From<&str> for DataSource {
    fn from(path: &str) -> Self {
        DataSource::Path(PathBuf::from(path))
    }
}

impl From<String> for DataSource {
    fn from(path: String) -> Self {
        DataSource::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for DataSource {
    fn from(bytes: Vec<u8>) -> Self {
        DataSource::Bytes(bytes)
    }
}

impl From<Box<dyn Read + Send>> for DataSource {
    fn from(reader: Box<dyn Read + Send>) -> Self {
        DataSource::Reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_path_and_stream_read_same_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        File::create(&path).unwrap().write_all(b"abc").unwrap();

        let from_path = DataSource::from(&path).read_all().unwrap();
        let from_stream = DataSource::reader(File::open(&path).unwrap())
            .read_all()
            .unwrap();
        let from_bytes = DataSource::from(b"abc".to_vec()).read_all().unwrap();

        assert_eq!(from_path, b"abc");
        assert_eq!(from_stream, b"abc");
        assert_eq!(from_bytes, b"abc");
    }

    #[test]
    fn test_directory_is_invalid_argument() {
        let dir = tempdir().unwrap();
        let result = DataSource::from(dir.path()).open();
        assert!(matches!(result, Err(SourceError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_path_is_invalid_argument() {
        let result = DataSource::from("").open();
        assert!(matches!(result, Err(SourceError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = DataSource::from(dir.path().join("missing.img")).open();
        assert!(matches!(result, Err(SourceError::IoError(_))));
    }
}
