//! Transient report files
//!
//! A rendered report is written to a uniquely named file and streamed back as
//! an attachment. The file's [`TransientFile`] guard travels inside the body
//! stream, so the file is removed exactly once: when the body has been fully
//! sent, or when the response is dropped because the client went away.

use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use actix_web::body::SizedStream;
use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use futures::Stream;
use tempfile::TempPath;
use tokio::io::AsyncReadExt;

use crate::error::ApiError;

const CHUNK_SIZE: usize = 8 * 1024;

/// Owns a report file on disk and deletes it on drop.
pub struct TransientFile {
    path: Option<TempPath>,
}

impl TransientFile {
    fn new(path: TempPath) -> Self {
        Self { path: Some(path) }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        let shown = path.display().to_string();
        match path.close() {
            Ok(()) => tracing::debug!("Removed transient report {}", shown),
            Err(e) => tracing::warn!("Failed to remove transient report {}: {}", shown, e),
        }
    }
}

/// Writes report bodies under `dir` and turns them into download responses.
#[derive(Clone)]
pub struct ReportFiles {
    dir: PathBuf,
}

impl ReportFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `body` to a fresh file and returns a `text/plain` attachment
    /// suggesting `filename` as the download name.
    pub async fn deliver(&self, filename: &str, body: String) -> Result<HttpResponse, ApiError> {
        let dir = self.dir.clone();
        let prefix = file_prefix(filename);
        let size = body.len() as u64;

        let (file, guard) =
            tokio::task::spawn_blocking(move || write_transient(&dir, &prefix, body.as_bytes()))
                .await
                .map_err(|e| ApiError::InternalError(format!("Report write task failed: {}", e)))??;

        tracing::debug!("Serving {} ({} bytes)", filename, size);

        let stream = file_stream(tokio::fs::File::from_std(file), guard);

        Ok(HttpResponse::Ok()
            .insert_header(ContentType::plaintext())
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename.to_string())],
            })
            .body(SizedStream::new(size, Box::pin(stream))))
    }
}

fn file_prefix(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reporte");
    format!("{}-", stem)
}

/// On error the partially written file is removed when `named` drops.
fn write_transient(dir: &Path, prefix: &str, body: &[u8]) -> io::Result<(std::fs::File, TransientFile)> {
    let mut named = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".txt")
        .tempfile_in(dir)?;
    named.write_all(body)?;
    named.flush()?;
    named.seek(SeekFrom::Start(0))?;

    let (file, path) = named.into_parts();
    Ok((file, TransientFile::new(path)))
}

fn file_stream(
    mut file: tokio::fs::File,
    guard: TransientFile,
) -> impl Stream<Item = Result<Bytes, io::Error>> {
    async_stream::try_stream! {
        let _guard = guard;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            yield Bytes::copy_from_slice(&buf[..n]);
        }
    }
}
