//! ByteSource trait - abstract byte-range source for archive reading.

use crate::error::{Result, TarError};
use std::io::{Read, Seek, SeekFrom};

/// Interval for reading a byte range. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadInterval {
    pub start: u64,
    pub end: u64,
}

impl ReadInterval {
    /// Number of bytes covered by the interval.
    pub fn len(&self) -> u64 {
        if self.end >= self.start {
            self.end - self.start + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Local file implementation.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: String,
    name: String,
    length: u64,
}

impl LocalFileSource {
    pub fn new(path: &str) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = std::path::Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            path: path.to_string(),
            name,
            length: metadata.len(),
        })
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sync read
    pub fn read_range_sync(&self, interval: ReadInterval) -> Result<Vec<u8>> {
        let mut file = std::fs::File::open(&self.path)?;
        file.seek(SeekFrom::Start(interval.start))?;
        let mut buffer = vec![0u8; interval.len() as usize];
        file.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

/// In-memory implementation, mostly useful for tests and for archives
/// that are already fully buffered.
#[derive(Debug, Clone)]
pub struct MemoryByteSource {
    name: String,
    data: Vec<u8>,
}

impl MemoryByteSource {
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            data,
        }
    }

    pub fn length(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn read_range_sync(&self, interval: ReadInterval) -> Result<Vec<u8>> {
        let start = interval.start as usize;
        let end = (interval.end + 1) as usize;
        if end > self.data.len() {
            return Err(TarError::BufferTooSmall {
                needed: end,
                have: self.data.len(),
            });
        }
        Ok(self.data[start..end].to_vec())
    }
}

// Async ByteSource trait (requires 'async' feature)
#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

/// Abstract archive source that can provide byte ranges asynchronously.
///
/// Implement this trait for custom byte sources (e.g., HTTP range
/// requests or chunked reads of a large file handle). The library
/// provides [`LocalFileSource`] for local files and [`MemoryByteSource`]
/// for fully-buffered archives.
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub trait ByteSource: Send + Sync {
    fn length(&self) -> u64;
    fn name(&self) -> &str;
    fn read_range(
        &self,
        interval: ReadInterval,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>>;
}

#[cfg(feature = "async")]
impl ByteSource for LocalFileSource {
    fn length(&self) -> u64 {
        self.length
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read_range(
        &self,
        interval: ReadInterval,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>> {
        let path = self.path.clone();
        Box::pin(async move {
            use tokio::io::{AsyncReadExt, AsyncSeekExt};
            let mut file = tokio::fs::File::open(&path).await?;
            file.seek(std::io::SeekFrom::Start(interval.start)).await?;
            let mut buffer = vec![0u8; interval.len() as usize];
            file.read_exact(&mut buffer).await?;
            Ok(buffer)
        })
    }
}

#[cfg(feature = "async")]
impl ByteSource for MemoryByteSource {
    fn length(&self) -> u64 {
        self.data.len() as u64
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read_range(
        &self,
        interval: ReadInterval,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>> {
        let result = self.read_range_sync(interval);
        Box::pin(async move { result })
    }
}
