use std::path::Path;

use futures_util::StreamExt;
use log::debug;
use reqwest::{Client, Response, StatusCode};

use crate::error::SyncError;
use crate::storage::StagedFile;

/// Bytes handed to the writer (and the progress callback) per step.
pub const CHUNK_SIZE: usize = 1024;

#[derive(Clone)]
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// GET `url` and return the body decoded as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, SyncError> {
        let response = self.get_ok(url).await?;
        response
            .text()
            .await
            .map_err(|e| SyncError::network(url, e))
    }

    /// Stream `url` into `dest`, calling `progress` with (downloaded, total)
    /// after every chunk. `dest` is only replaced once the whole body has been
    /// written; any failure leaves it untouched.
    pub async fn download_to_path<F>(
        &self,
        url: &str,
        dest: &Path,
        mut progress: F,
    ) -> Result<u64, SyncError>
    where
        F: FnMut(u64, Option<u64>),
    {
        let response = self.get_ok(url).await?;
        let total = response.content_length();
        debug!("download: {url} declared {total:?} bytes");

        let mut staged = StagedFile::create(dest)?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;
        progress(downloaded, total);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SyncError::network(url, e))?;
            for piece in chunk.chunks(CHUNK_SIZE) {
                staged.write_all(piece).await?;
                downloaded += piece.len() as u64;
                progress(downloaded, total);
            }
        }

        if let Some(expected) = total
            && downloaded < expected
        {
            return Err(SyncError::Incomplete {
                received: downloaded,
                expected,
            });
        }

        staged.commit().await?;
        Ok(downloaded)
    }

    async fn get_ok(&self, url: &str) -> Result<Response, SyncError> {
        debug!("http: GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::network(url, e))?;
        let status = response.status();
        debug!("http: {url} answered {status}");
        if status != StatusCode::OK {
            return Err(SyncError::HttpStatus {
                url: url.to_owned(),
                status,
            });
        }
        Ok(response)
    }
}
