use crate::practice::PracticedDateSet;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use url::Url;

/// Where to get the list of practiced dates from
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DateSource {
    Remote(Url),
    Local(PathBuf),
}

impl DateSource {
    /// Arguments starting with `http://` or `https://` are URLs; anything else
    /// is a file path
    pub(crate) fn from_arg(arg: &str) -> Result<DateSource, url::ParseError> {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Ok(DateSource::Remote(Url::parse(arg)?))
        } else {
            Ok(DateSource::Local(PathBuf::from(arg)))
        }
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSource::Remote(url) => write!(f, "{url}"),
            DateSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch {url}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned {status} for {url}")]
    Status { url: Url, status: StatusCode },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse practice dates from {source_name}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Retrieves practiced dates over HTTP or from disk
#[derive(Clone, Debug)]
pub(crate) struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher whose HTTP requests give up after `timeout`
    pub(crate) fn new(timeout: Duration) -> Result<Fetcher, FetchError> {
        Fetcher::from_builder(Client::builder().timeout(timeout))
    }

    pub(crate) fn from_builder(builder: ClientBuilder) -> Result<Fetcher, FetchError> {
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Fetcher { client })
    }

    pub(crate) async fn fetch(&self, source: &DateSource) -> Result<PracticedDateSet, FetchError> {
        log::debug!("Fetching practice dates from {source}");
        let body = match source {
            DateSource::Remote(url) => self.get(url).await?,
            DateSource::Local(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| FetchError::Read {
                        path: path.clone(),
                        source,
                    })?
            }
        };
        let practiced = PracticedDateSet::from_json(&body).map_err(|e| FetchError::Parse {
            source_name: source.to_string(),
            source: e,
        })?;
        log::debug!(
            "Fetched {} practice dates from {source}",
            practiced.total_days()
        );
        Ok(practiced)
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.clone(),
            source,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }
        let body = response.bytes().await.map_err(request_error)?;
        Ok(body.to_vec())
    }
}

/// Runs fetches in the background and hands their results to the UI thread.
/// Every call to `spawn()` starts an independent fetch; results are delivered
/// in the order they finish.
#[derive(Debug)]
pub(crate) struct Loader {
    fetcher: Arc<Fetcher>,
    source: Arc<DateSource>,
    handle: Handle,
    sender: UnboundedSender<Result<PracticedDateSet, FetchError>>,
    receiver: UnboundedReceiver<Result<PracticedDateSet, FetchError>>,
}

impl Loader {
    pub(crate) fn new(fetcher: Fetcher, source: DateSource, handle: Handle) -> Loader {
        let (sender, receiver) = unbounded_channel();
        Loader {
            fetcher: Arc::new(fetcher),
            source: Arc::new(source),
            handle,
            sender,
            receiver,
        }
    }

    pub(crate) fn spawn(&self) {
        let fetcher = Arc::clone(&self.fetcher);
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        self.handle.spawn(async move {
            let r = fetcher.fetch(&source).await;
            if sender.send(r).is_err() {
                log::debug!("Fetch of {source} finished after the UI went away");
            }
        });
    }

    /// Returns the next finished fetch, if any, without waiting
    pub(crate) fn try_recv(&mut self) -> Option<Result<PracticedDateSet, FetchError>> {
        self.receiver.try_recv().ok()
    }
}
