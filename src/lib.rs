//! # vpckit
//!
//! A lifecycle verification harness for VPCs managed through the Linode v4
//! control-plane API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vpckit::testing::*;
//!
//! #[tokio::test(flavor = "multi_thread")]
//! async fn test_vpc_list() {
//!     let reporter = TestReporter::new("TestVPC_List");
//!     let mut setup = setup_vpc(&reporter, "fixtures/TestVPC_List").await;
//!
//!     if let (Some(client), Some(vpc)) = (&setup.client, &setup.vpc) {
//!         match client.list_vpcs(None).await {
//!             Ok(vpcs) if vpcs.iter().any(|v| v.id == vpc.id) => {}
//!             Ok(_) => reporter.error(format!("VPC {} not listed", vpc.id)),
//!             Err(e) => reporter.error(format_vpc_error(&e, "listing", None)),
//!         }
//!     }
//!
//!     setup.teardown.run().await;
//!     reporter.finish();
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Fixtures**: every scenario talks to a client bound to a named cassette.
//!   Replay (the default) needs no network; record mode talks to the live API
//!   and rewrites the cassette on finalize.
//! - **Teardown order**: the VPC is deleted before the fixture is finalized.
//! - **Non-fatal reporting**: assertions report through
//!   [`TestReporter`](testing::TestReporter) so cleanup always runs.
//!
//! ## Features
//!
//! - `rest` (default): live REST transport via reqwest, needed for record mode
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Transport layer
pub mod transport;

// Cassette replay and recording
pub mod fixture;

// Lifecycle harness
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use types::{
    ListOptions, Region, Vpc, VpcCreateOptions, VpcSubnet, VpcSubnetCreateOptions,
    VpcUpdateOptions,
};

// Re-export config types
pub use config::{FixtureConfig, FixtureMode};

// Fixture support
pub use fixture::{FixtureSession, bind_client_to_fixture};
