use crate::Result;

/// Blocking HTTP GET used to fetch counterparty public keys.
///
/// Implementations report any failure (connection, non-success status,
/// unreadable body) as [`UmaError::InvalidRequest`](crate::UmaError::InvalidRequest).
/// They must not retry internally.
pub trait HttpTransport: Send + Sync {
    /// Fetch `url` and return the response body.
    fn get(&self, url: &str) -> Result<String>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }
}
