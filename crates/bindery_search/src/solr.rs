//! Solr HTTP search backend.

use crate::{SearchDocument, SearchTransport, TransportFailure};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Client for a Solr core's select endpoint.
///
/// Queries hit `{base}/solr/{core}/select` with `q`, `fl`, and `wt=json` and
/// parse the standard response envelope. Every failure mode (connect, HTTP
/// status, body decode) surfaces as a [`TransportFailure`].
#[derive(Debug, Clone)]
pub struct SolrClient {
    client: Client,
    base_url: String,
    core: String,
}

#[derive(Debug, Deserialize)]
struct SolrEnvelope {
    response: SolrResponse,
}

#[derive(Debug, Deserialize)]
struct SolrResponse {
    docs: Vec<SolrDocument>,
}

#[derive(Debug, Deserialize)]
struct SolrDocument {
    id: serde_json::Value,
}

// Solr renders numeric id fields as JSON numbers; both forms normalize to
// the bare rendering without quotes.
fn id_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl SolrClient {
    /// Creates a new Solr client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server URL, e.g. "http://localhost:8983"
    /// * `core` - Name of the core to query
    pub fn new(base_url: impl Into<String>, core: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let core = core.into();
        debug!(url = %base_url, core = %core, "Creating Solr client");
        Self {
            client: Client::new(),
            base_url,
            core,
        }
    }
}

#[async_trait::async_trait]
impl SearchTransport for SolrClient {
    #[instrument(skip(self, query, fields), fields(core = %self.core, q = query))]
    async fn query(
        &self,
        query: &str,
        fields: &[&str],
    ) -> Result<Vec<SearchDocument>, TransportFailure> {
        let url = format!("{}/solr/{}/select", self.base_url, self.core);
        let fl = fields.join(",");

        debug!(url = %url, "Querying Solr");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("fl", fl.as_str()), ("wt", "json")])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Solr");
                TransportFailure::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Solr returned error");
            return Err(TransportFailure::new(format!(
                "Solr returned {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read Solr response body");
            TransportFailure::new(format!("Failed to read response: {}", e))
        })?;

        let envelope: SolrEnvelope = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Solr response envelope");
            TransportFailure::malformed(format!("Failed to parse response: {}", e))
        })?;

        let documents: Vec<SearchDocument> = envelope
            .response
            .docs
            .into_iter()
            .map(|document| SearchDocument::new(id_text(&document.id)))
            .collect();

        debug!(count = documents.len(), "Received Solr documents");
        Ok(documents)
    }
}
