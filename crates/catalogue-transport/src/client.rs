//! Catalogue source trait and its HTTP implementation.
//!
//! The HTTP client is a blocking `ureq` agent; async trait methods bridge to
//! it through `spawn_blocking` so independent fetches can be issued
//! concurrently from a tokio runtime (the collaborator fan-out relies on
//! this). Dropping the returned future cancels the wait, which is the only
//! cancellation point the system needs.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use catalogue_types::{
    AssemblyDetail, AssemblyPage, AssemblySummary, OwnerDetail, OwnerPage, OwnerSummary,
};

use crate::error::FetchError;

/// Read access to the upstream catalogue.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// All owner summaries.
    async fn owners(&self) -> Result<Vec<OwnerSummary>, FetchError>;

    /// Full owner record, looked up by display name.
    async fn owner_detail(&self, display_name: &str) -> Result<OwnerDetail, FetchError>;

    /// All assembly summaries.
    async fn assemblies(&self) -> Result<Vec<AssemblySummary>, FetchError>;

    /// Full assembly record, looked up by id.
    async fn assembly_detail(&self, assembly_id: &str) -> Result<AssemblyDetail, FetchError>;
}

/// HTTP implementation over the catalogue REST API.
#[derive(Clone)]
pub struct HttpCatalogueSource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpCatalogueSource {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Create a client with default timeouts.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeouts(
            base_url,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(Self::DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .timeout_connect(connect_timeout)
                .build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Blocking GET + JSON decode. 404 maps to `NotFound` for `kind`/`id`;
    /// every other failure is `Upstream`.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        kind: &'static str,
        id: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching from catalogue");
        match self.agent.get(&url).call() {
            Ok(response) => response
                .into_json()
                .map_err(|e| FetchError::upstream(format!("decoding GET {path}"), e)),
            Err(ureq::Error::Status(404, _)) => Err(FetchError::NotFound {
                kind,
                id: id.to_owned(),
            }),
            Err(ureq::Error::Status(code, _)) => {
                Err(FetchError::upstream(format!("GET {path}"), format!("status {code}")))
            }
            Err(e) => Err(FetchError::upstream(format!("GET {path}"), e)),
        }
    }

    /// Owner detail is a two-step lookup upstream: resolve the display name
    /// to a summary, then fetch the full record by id.
    fn owner_detail_blocking(&self, display_name: &str) -> Result<OwnerDetail, FetchError> {
        let summary: OwnerSummary = self.get_json(
            &format!("/api/user/by-username/{display_name}"),
            "owner",
            display_name,
        )?;
        self.get_json(&format!("/api/user/by-id/{}", summary.id), "owner", &summary.id)
    }
}

/// Run a blocking fetch on the tokio blocking pool.
async fn fetch_blocking<T, F>(context: &'static str, fetch: F) -> Result<T, FetchError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, FetchError> + Send + 'static,
{
    tokio::task::spawn_blocking(fetch)
        .await
        .map_err(|e| FetchError::upstream(context, e))?
}

#[async_trait]
impl CatalogueSource for HttpCatalogueSource {
    async fn owners(&self) -> Result<Vec<OwnerSummary>, FetchError> {
        let client = self.clone();
        let page: OwnerPage = fetch_blocking("owner list fetch", move || {
            client.get_json("/api/users", "owner list", "-")
        })
        .await?;
        Ok(page.users)
    }

    async fn owner_detail(&self, display_name: &str) -> Result<OwnerDetail, FetchError> {
        let client = self.clone();
        let name = display_name.to_owned();
        fetch_blocking("owner detail fetch", move || {
            client.owner_detail_blocking(&name)
        })
        .await
    }

    async fn assemblies(&self) -> Result<Vec<AssemblySummary>, FetchError> {
        let client = self.clone();
        let page: AssemblyPage = fetch_blocking("assembly list fetch", move || {
            client.get_json("/api/sets", "assembly list", "-")
        })
        .await?;
        Ok(page.sets)
    }

    async fn assembly_detail(&self, assembly_id: &str) -> Result<AssemblyDetail, FetchError> {
        let client = self.clone();
        let id = assembly_id.to_owned();
        fetch_blocking("assembly detail fetch", move || {
            client.get_json(&format!("/api/set/by-id/{id}"), "assembly", &id)
        })
        .await
    }
}
