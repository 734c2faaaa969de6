//! ialirt_data_access
//!
//! A lightweight Rust client for the IALIRT data access API. Pairs with the
//! `ialirt-data-access` CLI.
//!
//! ### Features
//! - List log files for a year, day of year and instance
//! - Download a log file into a local directory (skipped when already present)
//! - Query the algorithm database by MET range and product name
//!
//! ### Example
//! ```no_run
//! use ialirt_data_access::{AlgorithmQuery, Client, Config, Instance, LogQuery};
//!
//! let client = Client::new(Config::from_env(None))?;
//! let files = client.query(&LogQuery::new("2024", "045", Instance::One))?;
//! if let Some(first) = files.get(0).and_then(|f| f.as_str()) {
//!     let path = client.download(first, Some(std::path::Path::new("logs")))?;
//!     println!("saved {}", path.display());
//! }
//! let products =
//!     client.algorithm_query(&AlgorithmQuery::new("100", "130", "codicelo_product_1"))?;
//! println!("{products}");
//! # Ok::<(), ialirt_data_access::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use api::Client;
pub use config::Config;
pub use error::{Error, ParameterError, Result};
pub use models::{AlgorithmQuery, Instance, LogQuery};
pub use transport::{HttpTransport, Transport};
