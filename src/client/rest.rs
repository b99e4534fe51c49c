//! Base-URL client with an interceptor chain.

use std::sync::Arc;

use axum::http::{Method, Uri};

use crate::client::interceptor::Next;
use crate::client::transport::HyperTransport;
use crate::client::{ClientError, ClientRequest, ClientResponse, Interceptor, Transport};
use crate::resilience::timeouts::Timeouts;

/// Outbound client bound to one base URL.
///
/// The interceptor list is fixed at build time; every call walks it in
/// registration order before reaching the transport.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl RestClient {
    pub fn builder(base_url: impl Into<String>) -> RestClientBuilder {
        RestClientBuilder {
            base_url: base_url.into(),
            timeouts: Timeouts::default(),
            transport: None,
            interceptors: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL.
    pub fn resolve(&self, path: &str) -> Result<Uri, ClientError> {
        let uri = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        uri.parse::<Uri>()
            .map_err(|e| ClientError::InvalidRequest(format!("{uri}: {e}")))
    }

    /// Send a request through the interceptor chain.
    pub async fn execute(&self, request: ClientRequest) -> Result<ClientResponse, ClientError> {
        Next::new(self.transport.as_ref(), &self.interceptors)
            .run(request)
            .await
    }

    /// GET `path` and return the body as text.
    pub async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let request = ClientRequest::new(Method::GET, self.resolve(path)?);
        self.execute(request).await?.into_text()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    timeouts: Timeouts,
    transport: Option<Arc<dyn Transport>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl RestClientBuilder {
    /// Connect/read timeouts for the default hyper transport.
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Replace the network transport. Timeouts are then the transport's concern.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append an interceptor. Earlier registrations wrap later ones.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> Result<RestClient, ClientError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        let uri = base_url
            .parse::<Uri>()
            .map_err(|e| ClientError::InvalidRequest(format!("{base_url}: {e}")))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ClientError::InvalidRequest(format!(
                "{base_url}: base URL must be absolute"
            )));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HyperTransport::new(&self.timeouts)),
        };

        Ok(RestClient {
            base_url,
            transport,
            interceptors: self.interceptors,
        })
    }
}
