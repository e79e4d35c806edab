use std::time::Duration;

use anyhow::Context as _;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/books/v1/volumes?q=";
pub const API_BASE_ENV: &str = "BOOKLISTING_API_BASE";

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// How the pipeline reacts to a malformed item in the `items` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Any malformed item discards the whole batch.
    #[default]
    Strict,
    /// Malformed items are skipped; a missing `imageLinks` means no thumbnail.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_base: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub policy: ParsePolicy,
    pub thumbnail_workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            policy: ParsePolicy::Strict,
            thumbnail_workers: 1,
        }
    }
}

impl FetchConfig {
    /// `--api-base` wins over `BOOKLISTING_API_BASE`, which wins over the default.
    pub fn resolve(
        api_base: Option<&str>,
        lenient: bool,
        thumbnail_workers: usize,
    ) -> anyhow::Result<Self> {
        let api_base = match api_base {
            Some(base) => base.to_owned(),
            None => std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_owned()),
        };
        Self::parse_api_base(&api_base)
            .with_context(|| format!("invalid api base: {api_base:?}"))?;

        Ok(Self {
            api_base,
            policy: if lenient {
                ParsePolicy::Lenient
            } else {
                ParsePolicy::Strict
            },
            thumbnail_workers: thumbnail_workers.max(1),
            ..Self::default()
        })
    }

    fn parse_api_base(raw: &str) -> anyhow::Result<()> {
        if raw.trim().is_empty() {
            anyhow::bail!("api base is empty");
        }
        let url = url::Url::parse(raw).context("parse api base")?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("api base must be http/https: {url}");
        }
        Ok(())
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .build()
    }
}
