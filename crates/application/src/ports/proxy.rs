//! Proxy port

use async_trait::async_trait;
use courier_domain::{RequestDescriptor, ResponseResult};

use crate::error::TransportError;

/// Port for the service that performs the outbound HTTP call.
///
/// The engine treats the proxy as opaque: it posts a descriptor and gets
/// back a response document with status, headers, body, timing and size.
#[async_trait]
pub trait ProxyClient: Send + Sync {
    /// Forwards the request and returns the proxy's response document.
    ///
    /// # Errors
    /// Returns a `TransportError` if the proxy cannot be reached or its
    /// answer cannot be parsed.
    async fn forward(&self, request: &RequestDescriptor) -> Result<ResponseResult, TransportError>;
}
