use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::progress::ProgressTracker;

pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
    show_progress: bool,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .user_agent(concat!("adb-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            timeout,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download `url` to `dest`, returning the number of bytes written.
    ///
    /// The whole transfer is bounded by the configured timeout; on any
    /// failure the partial file is removed and `dest` is left untouched.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = part_path(dest);
        let outcome = tokio::time::timeout(self.timeout, self.stream_to(url, &part)).await;

        let result = match outcome {
            Ok(Ok(written)) => tokio::fs::rename(&part, dest)
                .await
                .map(|()| written)
                .map_err(|e| Error::Write {
                    path: dest.to_path_buf(),
                    source: e,
                }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }),
        };

        if result.is_err() {
            let _ = tokio::fs::remove_file(&part).await;
        }
        result
    }

    /// [`Fetcher::fetch`] on a current-thread runtime built for this call.
    pub fn fetch_blocking(&self, url: &str, dest: &Path) -> Result<u64> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.fetch(url, dest))
    }

    async fn stream_to(&self, url: &str, part: &Path) -> Result<u64> {
        let http_err = |source| Error::Http {
            url: url.to_string(),
            source,
        };

        tracing::info!(url, "downloading");
        let mut response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(parent) = part.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let write_err = |source| Error::Write {
            path: part.to_path_buf(),
            source,
        };
        let mut file = tokio::fs::File::create(part).await.map_err(write_err)?;

        let tracker = if self.show_progress {
            ProgressTracker::new("Downloading", response.content_length())
        } else {
            ProgressTracker::hidden()
        };

        let mut written = 0u64;
        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    tracker.abandon();
                    return Err(http_err(e));
                }
            };
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
            tracker.step(chunk.len() as u64);
        }
        file.flush().await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        tracker.finish();

        tracing::info!(url, bytes = written, "download complete");
        Ok(written)
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    dest.with_file_name(name)
}
