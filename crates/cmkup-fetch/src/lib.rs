//! Blocking HTTP downloads with atomic placement.
//!
//! - [`HttpClient`] is the transport seam; [`ReqwestClient`] is the default
//!   implementation behind the `reqwest` feature.
//! - [`Fetcher`] streams a body into a staging file next to the destination
//!   and renames it into place, so a failed download never leaves a partial
//!   file at the destination path.
//!
//! No retries are attempted; failures propagate to the caller.

mod error;
mod fetcher;
mod http;
mod options;

pub use error::{FetchError, Result};
pub use fetcher::Fetcher;
pub use http::{Body, HttpClient};
pub use options::{FetchOptions, FetchPhase, Progress};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
