use std::io::{BufRead as _, BufReader};

use crate::config::FetchConfig;
use crate::formats::{Batch, BookRecord};
use crate::thumbnail;
use crate::volumes::{self, VolumeError};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("malformed request url {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("read response body: {0}")]
    Body(#[from] std::io::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("parse response: {0}")]
    Parse(#[from] VolumeError),
}

/// Source of search results for the dispatcher.
pub trait BookSource: Send + Sync {
    fn fetch(&self, url: &str) -> Batch;
}

/// Blocking connect → read → parse → thumbnail pipeline against the Books API.
///
/// Meant to run on a worker thread. The HTTP client is built per call so it is created
/// and dropped on that thread.
#[derive(Debug, Clone, Default)]
pub struct FetchPipeline {
    config: FetchConfig,
}

impl FetchPipeline {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Like [`FetchPipeline::fetch`], but surfaces the failure instead of collapsing it.
    ///
    /// `Ok(None)` means the server answered with a non-200 status or a blank body.
    pub fn try_fetch(&self, url: &str) -> Result<Option<Vec<BookRecord>>, FetchError> {
        let parsed = url::Url::parse(url).map_err(|source| FetchError::Url {
            url: url.to_owned(),
            source,
        })?;

        let client = self.config.http_client()?;
        let body = match read_body(&client, parsed) {
            Ok(body) => body,
            Err(FetchError::Status(status)) => {
                tracing::warn!(url, %status, "books request returned an error status");
                String::new()
            }
            Err(err) => return Err(err),
        };

        if body.trim().is_empty() {
            return Ok(None);
        }

        let volumes = volumes::parse_volumes(&body, self.config.policy)?;
        let thumbnail_urls = volumes
            .iter()
            .map(|volume| volume.thumbnail_url.clone())
            .collect::<Vec<_>>();
        let thumbnails =
            thumbnail::fetch_all(&client, &thumbnail_urls, self.config.thumbnail_workers);

        let records = volumes
            .into_iter()
            .zip(thumbnails)
            .filter_map(|(volume, thumbnail)| {
                BookRecord::new(
                    volume.title,
                    volume.authors,
                    volume.description,
                    thumbnail,
                    volume.preview_link,
                )
            })
            .collect();
        Ok(Some(records))
    }
}

impl BookSource for FetchPipeline {
    fn fetch(&self, url: &str) -> Batch {
        match self.try_fetch(url) {
            Ok(Some(records)) => {
                tracing::debug!(url, count = records.len(), "fetched books");
                Batch::Books(records)
            }
            Ok(None) => {
                tracing::debug!(url, "empty response body");
                Batch::NoData
            }
            Err(err) => {
                tracing::error!(url, %err, "book search failed");
                Batch::NoData
            }
        }
    }
}

/// Reads a 200 response as UTF-8 lines joined without a separator.
fn read_body(client: &reqwest::blocking::Client, url: url::Url) -> Result<String, FetchError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status(status));
    }

    let mut body = String::new();
    for line in BufReader::new(response).lines() {
        body.push_str(&line?);
    }
    Ok(body)
}
