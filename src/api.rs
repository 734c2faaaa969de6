//! Synchronous client for the **IALIRT data access API**.
//!
//! Three endpoints are covered, each a single GET:
//! - `ialirt-log-query`: list log files for a year / day of year / instance
//! - `ialirt-log-download/logs/{filename}`: fetch one log file into a local directory
//! - `ialirt-db-query/query`: algorithm products for a MET range
//!
//! ### Notes
//! - Parameters are typed per endpoint ([`LogQuery`], [`AlgorithmQuery`]); use their
//!   `from_params` constructors when the keys arrive dynamically.
//! - There are no retries. Every failure is returned to the caller.
//! - Downloads are skipped when the destination already exists.
//!
//! Typical usage:
//! ```no_run
//! # use ialirt_data_access::{Client, Config, Instance, LogQuery};
//! let client = Client::new(Config::from_env(None))?;
//! let files = client.query(&LogQuery::new("2024", "045", Instance::One))?;
//! for f in files.as_array().into_iter().flatten().filter_map(|f| f.as_str()) {
//!     let path = client.download(f, None)?;
//!     println!("{}", path.display());
//! }
//! # Ok::<(), ialirt_data_access::Error>(())
//! ```
use crate::config::{Config, default_downloads_dir};
use crate::error::{Error, Result};
use crate::models::{AlgorithmQuery, LogQuery};
use crate::transport::{HttpTransport, Transport};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_QUERY_PATH: &str = "ialirt-log-query";
const LOG_DOWNLOAD_PATH: &str = "ialirt-log-download/logs";
const DB_QUERY_PATH: &str = "ialirt-db-query/query";

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl Client {
    /// Build a client backed by a blocking reqwest transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }

    /// Shorthand for `Client::new(Config::from_env(None))`.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env(None))
    }
}

impl<T: Transport> Client<T> {
    /// Build a client over any [`Transport`].
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// `{base}/ialirt-log-query?year=..&doy=..&instance=..`
    pub fn query_url(&self, params: &LogQuery) -> String {
        format!("{}?{}", self.endpoint(LOG_QUERY_PATH), params.to_query_string())
    }

    /// `{base}/ialirt-db-query/query?met_start=..&met_end=..&product_name=..`
    pub fn algorithm_query_url(&self, params: &AlgorithmQuery) -> String {
        format!("{}?{}", self.endpoint(DB_QUERY_PATH), params.to_query_string())
    }

    /// `{base}/ialirt-log-download/logs/{filename}`. The filename is used verbatim.
    pub fn download_url(&self, filename: &str) -> String {
        format!("{}/{}", self.endpoint(LOG_DOWNLOAD_PATH), filename)
    }

    /// List the log files for a year, day of year and instance.
    ///
    /// The server answers with a JSON array of filenames; whatever JSON comes
    /// back is returned as decoded, without checking its shape.
    ///
    /// ### Errors
    /// - [`Error::Http`] / [`Error::Url`] on transport failure
    /// - [`Error::Decode`] if the body is not valid JSON
    pub fn query(&self, params: &LogQuery) -> Result<Value> {
        let url = self.query_url(params);
        self.get_json(&url)
    }

    /// Query the algorithm database. Any JSON value is returned as decoded.
    pub fn algorithm_query(&self, params: &AlgorithmQuery) -> Result<Value> {
        let url = self.algorithm_query_url(params);
        self.get_json(&url)
    }

    /// Download `filename` into `downloads_dir` (default: [`default_downloads_dir`]).
    ///
    /// Returns `downloads_dir/filename`. If that path already exists nothing is
    /// requested and the path is returned as is. New files are written to a
    /// temporary file next to the destination and renamed into place, so an
    /// interrupted download never leaves a partial file at the destination.
    pub fn download(&self, filename: &str, downloads_dir: Option<&Path>) -> Result<PathBuf> {
        let dir = match downloads_dir {
            Some(d) => d.to_path_buf(),
            None => default_downloads_dir(),
        };
        let destination = dir.join(filename);

        if destination.exists() {
            info!("{} already exists, skipping download", destination.display());
            return Ok(destination);
        }

        let parent = destination.parent().unwrap_or(&dir).to_path_buf();
        std::fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

        let url = self.download_url(filename);
        debug!("GET {url}");
        let body = self.transport.get(&url)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| Error::io(&parent, e))?;
        tmp.write_all(&body)
            .and_then(|_| tmp.flush())
            .map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(&destination)
            .map_err(|e| Error::io(&destination, e.error))?;

        info!("downloaded {} ({} bytes)", destination.display(), body.len());
        Ok(destination)
    }

    fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D> {
        debug!("GET {url}");
        let body = self.transport.get(url)?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}
