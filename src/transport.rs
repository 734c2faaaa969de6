//! The single network seam of the crate.
//!
//! [`crate::Client`] only ever needs "GET this URL, give me the body". Putting that
//! behind [`Transport`] lets tests swap in a recording fake and count requests.

use crate::config::DEFAULT_TIMEOUT;
use crate::error::{Error, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

pub trait Transport {
    /// Issue a GET and return the full body of a successful response.
    ///
    /// Non-success statuses map to [`Error::Http`], failures to complete the
    /// request map to [`Error::Url`].
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url)
    }
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    /// A zero `timeout` is replaced by [`DEFAULT_TIMEOUT`].
    pub fn new(timeout: Duration) -> Result<Self> {
        let timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .redirect(Policy::limited(5))
            .user_agent(concat!("ialirt-data-access/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Setup)?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.http.get(url).send().map_err(|e| Error::url(url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().map_err(|e| Error::url(url, &e))?;
        Ok(body.to_vec())
    }
}
