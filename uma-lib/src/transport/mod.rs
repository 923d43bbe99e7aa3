//! HTTP transport seam.
//!
//! The library never opens sockets on its own; it asks an [`HttpTransport`]
//! for response bodies. [`ReqwestTransport`] is the stock implementation,
//! available with the `http-executor` feature.

mod traits;

#[cfg(feature = "http-executor")]
mod http;

#[cfg(feature = "http-executor")]
pub use http::ReqwestTransport;
pub use traits::HttpTransport;
