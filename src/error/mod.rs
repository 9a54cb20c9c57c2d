//! Error types for the VPC client and the lifecycle harness.
//!
//! A single [`Error`] type carries an [`ErrorKind`] for matching. API
//! failures map from HTTP status codes; fixture and configuration problems
//! have their own kinds so a broken cassette is never mistaken for a server
//! response.
//!
//! ```rust
//! use vpckit::{Error, ErrorKind};
//!
//! let err = Error::fixture("no recorded interaction for GET /v4/vpcs");
//! assert_eq!(err.kind(), ErrorKind::Fixture);
//! ```

mod core;
mod kind;

pub use self::core::Error;
pub use self::kind::ErrorKind;

/// A specialized `Result` type for `vpckit` operations.
pub type Result<T> = std::result::Result<T, Error>;
