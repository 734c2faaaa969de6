//! Error types for the IALIRT client.
//!
//! Two families are kept apart:
//! - [`Error`]: failures while talking to the API or writing its output.
//!   Transport failures render with the `"HTTP Error"` / `"URL Error"` prefixes.
//! - [`ParameterError`]: a request was built from a key/value set that does not
//!   match the endpoint. These are raised before any request is issued.

use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status code.
    #[error("HTTP Error {status}: {reason} ({url})")]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    /// The request could not be completed (DNS, refused connection, timeout, ...).
    #[error("URL Error {detail} ({url})")]
    Url { url: String, detail: String },

    /// The response body was not the JSON we expected.
    #[error("failed to decode JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing a downloaded file (or creating its directory) failed.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client")]
    Setup(#[source] reqwest::Error),
}

impl Error {
    /// Whether this error came from the transport (status or connection).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http { .. } | Error::Url { .. })
    }

    pub(crate) fn url(url: &str, err: &reqwest::Error) -> Self {
        Error::Url {
            url: url.to_string(),
            detail: error_chain(err),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Render an error and its sources as one line.
///
/// reqwest's top-level message is often just "error sending request"; the
/// useful part (connection refused, dns failure) lives in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        let msg = s.to_string();
        if !out.contains(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = s.source();
    }
    out
}

/// A request could not be built from the supplied key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("got an unexpected parameter '{0}'")]
    Unknown(String),

    #[error("missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("parameter '{0}' given more than once")]
    Duplicate(&'static str),

    #[error("invalid value '{value}' for parameter '{key}' (expected one of: {expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: String,
    },
}
