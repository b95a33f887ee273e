//! reqwest-based origin fetcher for encore.
//!
//! ```no_run
//! use std::time::Duration;
//! use encore_reqwest::ReqwestUpstream;
//!
//! let upstream = ReqwestUpstream::new(reqwest::Client::new())
//!     .with_timeout(Duration::from_secs(7));
//! ```

mod upstream;

pub use upstream::ReqwestUpstream;
