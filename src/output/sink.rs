// src/output/sink.rs
// =============================================================================
// The append-only output stream shared by all pipelines.
//
// File format (UTF-8, tab separated, one record per line):
//
//   source_url<TAB>parsed_url
//   http://a.test/<TAB>http://a.test/b
//   http://a.test/<TAB>http://a.test/c
//
// The one rule this file exists to enforce: the lines written by one
// pipeline form a contiguous block. Writing a line can suspend (the writer
// is async and buffered), and while one pipeline is suspended another may
// run. Without a lock, their lines would splice into each other.
//
// So every write goes through a tokio Mutex that is held across the whole
// block of lines and the flush that follows. The guard is dropped on every
// exit path, including `?` on an I/O error.
//
// Rust concepts:
// - tokio::sync::Mutex: a lock whose guard can be held across .await
// - Generics: ResultSink<W> works with a real file or an in-memory buffer
// =============================================================================

use std::collections::BTreeSet;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tracing::info;
use url::Url;

use crate::error::SinkError;

/// Header line written once before any record.
pub const HEADER: &str = "source_url\tparsed_url\n";

/// Shared output stream for `(source, target)` records.
#[derive(Debug)]
pub struct ResultSink<W> {
    writer: Mutex<W>,
}

impl ResultSink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes the header.
    pub async fn create(path: &Path) -> Result<Self, SinkError> {
        let open_error = |source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).await.map_err(open_error)?;
        let sink = ResultSink::new(BufWriter::new(file));
        sink.write_header().await.map_err(|e| match e {
            SinkError::Write(source) => open_error(source),
            other => other,
        })?;

        Ok(sink)
    }
}

impl<W> ResultSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wraps an already opened writer. No header is written.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Writes the fixed two-column header.
    pub async fn write_header(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().await;
        writer.write_all(HEADER.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Appends one `source<TAB>target` line per target as one uninterrupted block.
    ///
    /// `source` is written exactly as the seed was given.
    /// An empty set is a no-op: the lock is not even taken.
    /// Returns the number of lines written.
    pub async fn write_all(&self, source: &str, targets: &BTreeSet<Url>) -> Result<usize, SinkError> {
        if targets.is_empty() {
            return Ok(0);
        }

        let mut writer = self.writer.lock().await;
        for target in targets {
            let line = format!("{}\t{}\n", source, target);
            writer.write_all(line.as_bytes()).await?;
        }
        writer.flush().await?;
        drop(writer);

        info!(url = %source, count = targets.len(), "wrote results");
        Ok(targets.len())
    }

    /// Flushes and closes the underlying writer.
    pub async fn finish(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().await;
        writer.flush().await?;
        writer.shutdown().await?;
        Ok(())
    }

    /// Gives back the writer once every pipeline is done.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
