use crate::error::FixtureServerError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A schedule page and the URL it was read from.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
	pub html: String,
	pub source: String,
}

/// Where schedule pages come from. The HTTP implementation is the only one in
/// production; tests swap in canned pages.
#[async_trait]
pub trait DocumentSource: Send + Sync {
	async fn fetch(&self, event_id: &str, team_id: &str) -> Result<FetchedDocument, FixtureServerError>;
}

pub struct HttpDocumentSource {
	client: Client,
	url_template: String,
}

impl HttpDocumentSource {
	pub fn new(url_template: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self {
			client,
			url_template: url_template.into(),
		})
	}

	pub fn source_url(&self, event_id: &str, team_id: &str) -> String {
		self.url_template.replace("{event}", event_id).replace("{team}", team_id)
	}
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
	async fn fetch(&self, event_id: &str, team_id: &str) -> Result<FetchedDocument, FixtureServerError> {
		let url = self.source_url(event_id, team_id);

		let response = self
			.client
			.get(&url)
			.header(USER_AGENT, BROWSER_USER_AGENT)
			.header(ACCEPT, BROWSER_ACCEPT)
			.header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
			.send()
			.await
			.map_err(|e| FixtureServerError::transport(&url, &e))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FixtureServerError::UpstreamStatus { url, status: status.as_u16() });
		}

		let html = response.text().await.map_err(|e| FixtureServerError::transport(&url, &e))?;
		debug!(%url, bytes = html.len(), "schedule fetched");

		Ok(FetchedDocument { html, source: url })
	}
}
