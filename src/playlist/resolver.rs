// Redirect resolution for `/live` aliases
//
// A channel's `/live` page redirects to `watch?v=<id>` while it is
// broadcasting. resolve() never fails: anything other than a landed watch
// page, including transport errors, hands back the input URL.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::utils::build_http_client;

/// Default bound on one redirect lookup
pub const DEFAULT_REDIRECT_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Final watch-page URL, or `url` unchanged
    async fn resolve(&self, url: &str) -> String;
}

/// Follows redirects with a real HTTP GET
pub struct HttpRedirectResolver {
    client: Option<reqwest::Client>,
}

impl HttpRedirectResolver {
    pub fn new(proxy: Option<&str>, timeout_secs: u64) -> Self {
        let client = match build_http_client(proxy, timeout_secs) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Could not build HTTP client, redirects will not be resolved");
                None
            }
        };
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[async_trait]
impl RedirectResolver for HttpRedirectResolver {
    async fn resolve(&self, url: &str) -> String {
        let Some(client) = &self.client else {
            return url.to_string();
        };

        match client.get(url).send().await {
            Ok(resp) => {
                let final_url = resp.url().as_str();
                if final_url.contains("watch?v=") {
                    debug!(from = %url, to = %final_url, "Resolved live URL");
                    final_url.to_string()
                } else {
                    url.to_string()
                }
            }
            Err(e) => {
                warn!(%url, error = %e, "Could not resolve redirect");
                url.to_string()
            }
        }
    }
}
