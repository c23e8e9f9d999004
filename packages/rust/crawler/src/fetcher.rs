//! Document fetching over HTTP.
//!
//! The corpus is served as raw markdown files under a single base URL;
//! a document identifier is simply the path joined onto that base.
//! [`DocumentFetcher`] is the seam the crawler and pipeline depend on,
//! so tests can substitute an in-memory corpus or a mock server.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use unitdex_shared::{DocumentId, HarvestError, Result};

/// Base URL of the published corpus (raw gh-pages content).
pub const CORPUS_BASE_URL: &str = "https://raw.githubusercontent.com/korginc/logue-sdk/gh-pages/";

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("unitdex/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow per request.
const MAX_REDIRECTS: usize = 3;

/// Per-request timeout in seconds.
const TIMEOUT_SECS: u64 = 30;

/// Fetches the raw text of a document by identifier.
///
/// A non-success response means the corpus does not have the document and
/// must surface as an error — callers never receive partial or empty text
/// in place of a failure.
#[allow(async_fn_in_trait)]
pub trait DocumentFetcher {
    /// Fetch one document's raw markdown text.
    async fn fetch(&self, id: &DocumentId) -> Result<String>;
}

impl<F: DocumentFetcher> DocumentFetcher for &F {
    async fn fetch(&self, id: &DocumentId) -> Result<String> {
        (**self).fetch(id).await
    }
}

/// HTTP-backed [`DocumentFetcher`] resolving identifiers against a base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the given corpus base URL.
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| HarvestError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Create a fetcher for the published corpus at [`CORPUS_BASE_URL`].
    pub fn for_corpus() -> Result<Self> {
        let base = Url::parse(CORPUS_BASE_URL)
            .map_err(|e| HarvestError::network(format!("corpus base URL: {e}")))?;
        Self::new(base)
    }

    /// Resolve a document identifier to its absolute URL.
    fn document_url(&self, id: &DocumentId) -> Result<Url> {
        self.base_url
            .join(id.as_str())
            .map_err(|e| HarvestError::network(format!("cannot resolve {id}: {e}")))
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, id: &DocumentId) -> Result<String> {
        let url = self.document_url(id)?;
        debug!(%id, %url, "fetching document");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| HarvestError::network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::NotFound { id: id.clone() });
        }

        response
            .text()
            .await
            .map_err(|e| HarvestError::network(format!("{url}: failed to read body: {e}")))
    }
}
