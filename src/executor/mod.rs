//! HTTP request executor.
//!
//! The pipeline talks to the network only through the [`HttpTransport`] trait.
//! [`ReqwestTransport`] is the production implementation; tests plug in their
//! own transports to observe the exact requests the pipeline issues.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::RequestError;
pub use native::ReqwestTransport;

use crate::models::request::ApiRequest;
use crate::models::response::ApiResponse;
use std::future::Future;

/// Sends one request and waits for its complete response.
///
/// Implementations must report non-2xx statuses as
/// [`RequestError::HttpStatus`] rather than returning them as responses.
pub trait HttpTransport {
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, RequestError>> + Send;
}

