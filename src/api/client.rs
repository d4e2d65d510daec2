//! API Client
//!
//! Main handle for talking to the API, combining the transport with the API root
//! that hyperlinks are resolved against.

use super::http::{HttpTransport, Transport};
use super::link::Link;
use super::request::Request;
use crate::config::Config;
use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Main API client
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Client {
    /// Create a client backed by [`HttpTransport`]
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpTransport::new(config)?;
        let base_url = http.base_url().to_string();

        Ok(Self {
            transport: Arc::new(http),
            base_url,
        })
    }

    /// Create a client from the on-disk configuration (or the defaults)
    pub fn from_env() -> Result<Self> {
        Self::new(&Config::load())
    }

    /// Create a client on top of any transport
    pub fn with_transport<T>(base_url: impl Into<String>, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Arc::new(transport),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// API root every hyperlink is expected to start with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a request and return the raw JSON body
    pub async fn execute(&self, request: &Request) -> Result<Value> {
        self.transport.execute(request).await
    }

    /// Build a request that follows the given link
    pub fn link_request(&self, link: &Link) -> Result<Request> {
        link.request(&self.base_url)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
