//! VPC lifecycle test harness.
//!
//! - [`TestReporter`]: collects failures; only [`TestReporter::finish`] fails the test
//! - [`Teardown`]: cleanup steps released in reverse acquisition order
//! - [`setup_vpc`]: fixture-bound client plus a provisioned VPC
//! - [`vpc_check`], [`vpc_create_options_check`], [`vpc_update_options_check`]:
//!   structural assertions over a VPC
//!
//! ## Scenario shape
//!
//! ```rust,ignore
//! use vpckit::testing::*;
//!
//! #[tokio::test(flavor = "multi_thread")]
//! async fn test_vpc_create() {
//!     let reporter = TestReporter::new("TestVPC_Create");
//!     let mut setup = setup_vpc(&reporter, "fixtures/TestVPC_Create").await;
//!     if let Some(vpc) = &setup.vpc {
//!         vpc_check(vpc, &reporter);
//!         vpc_create_options_check(&vpc.get_create_options(), vpc, &reporter);
//!     }
//!     setup.teardown.run().await;
//!     reporter.finish();
//! }
//! ```

mod helpers;
mod reporter;
mod teardown;
mod vpc;

pub use helpers::{
    assert_date_set, create_test_client, create_test_client_with, regions_with_caps, unique_text,
};
pub use reporter::TestReporter;
pub use teardown::Teardown;
pub use vpc::{
    LABEL_PREFIX, Provisioned, VPC_CAPABILITY, VpcSetup, create_vpc, create_vpc_with,
    format_vpc_error, setup_vpc, setup_vpc_with, setup_vpc_with_config, vpc_check,
    vpc_create_options_check, vpc_update_options_check,
};
