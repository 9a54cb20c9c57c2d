//! Prelude module for convenient imports.
//!
//! ```rust
//! use vpckit::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client and its builder
//! - Error types
//! - VPC and region types
//! - Fixture binding and the lifecycle harness

pub use crate::{
    client::{Client, ClientBuilder},
    config::{FixtureConfig, FixtureMode},
    error::{Error, ErrorKind, Result},
    fixture::{FixtureSession, bind_client_to_fixture},
    testing::{Teardown, TestReporter, VpcSetup, setup_vpc, setup_vpc_with},
    types::{
        ListOptions, Region, Vpc, VpcCreateOptions, VpcSubnet, VpcSubnetCreateOptions,
        VpcUpdateOptions,
    },
};
