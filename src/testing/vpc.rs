//! VPC lifecycle harness.
//!
//! [`setup_vpc`] binds a client to a fixture and provisions a uniquely named
//! VPC in the first VPC-capable region. The returned [`Teardown`] deletes
//! the VPC and then finalizes the fixture.
//!
//! ```rust,ignore
//! use vpckit::testing::{TestReporter, setup_vpc, vpc_check};
//!
//! let reporter = TestReporter::new("TestVPC_Create");
//! let mut setup = setup_vpc(&reporter, "fixtures/TestVPC_Create").await;
//! if let Some(vpc) = &setup.vpc {
//!     vpc_check(vpc, &reporter);
//! }
//! setup.teardown.run().await;
//! reporter.finish();
//! ```

use super::helpers::{assert_date_set, create_test_client_with, regions_with_caps, unique_text};
use super::{TestReporter, Teardown};
use crate::config::FixtureConfig;
use crate::types::{Vpc, VpcCreateOptions, VpcUpdateOptions};
use crate::{Client, Error};

/// Prefix of every label created by the harness.
pub const LABEL_PREFIX: &str = "vpckit-test-vpc-";

/// Region capability required to host a VPC.
pub const VPC_CAPABILITY: &str = "VPCs";

/// A resource created for a test, with the teardown that removes it.
///
/// On failure `resource` is `None`, `error` holds the cause and `teardown`
/// is empty.
#[derive(Debug)]
pub struct Provisioned<T> {
    /// The created resource.
    pub resource: Option<T>,
    /// Steps undoing the creation.
    pub teardown: Teardown,
    /// The error that prevented creation.
    pub error: Option<Error>,
}

impl<T> Provisioned<T> {
    fn failed(error: Error) -> Self {
        Self {
            resource: None,
            teardown: Teardown::new(),
            error: Some(error),
        }
    }
}

/// A fixture-bound client with a provisioned VPC.
///
/// `teardown` deletes the VPC before finalizing the fixture. It still
/// finalizes the fixture when provisioning failed; it is empty when no
/// fixture could be bound.
#[derive(Debug)]
pub struct VpcSetup {
    /// The fixture-bound client.
    pub client: Option<Client>,
    /// The provisioned VPC.
    pub vpc: Option<Vpc>,
    /// Deletes the VPC, then finalizes the fixture.
    pub teardown: Teardown,
    /// The first error encountered.
    pub error: Option<Error>,
}

/// Formats a VPC operation failure.
///
/// ```rust
/// use vpckit::Error;
/// use vpckit::testing::format_vpc_error;
///
/// let err = Error::not_found("[404] Not found");
/// assert_eq!(
///     format_vpc_error(&err, "deleting", Some(42)),
///     "an error occurs when deleting the VPC 42: not found: [404] Not found",
/// );
/// ```
pub fn format_vpc_error(err: &Error, action: &str, id: Option<u64>) -> String {
    match id {
        Some(id) => format!("an error occurs when {} the VPC {}: {}", action, id, err),
        None => format!("an error occurs when {} the VPC(s): {}", action, err),
    }
}

/// Creates a VPC in the first VPC-capable region.
pub async fn create_vpc(reporter: &TestReporter, client: &Client) -> Provisioned<Vpc> {
    create_vpc_with(reporter, client, |_| {}).await
}

/// Creates a VPC, letting `modify` adjust the options before the call.
///
/// Running out of VPC-capable regions and a failed create are fatal; a
/// failed delete during teardown is reported and does not abort.
pub async fn create_vpc_with<F>(
    reporter: &TestReporter,
    client: &Client,
    modify: F,
) -> Provisioned<Vpc>
where
    F: FnOnce(&mut VpcCreateOptions),
{
    let regions = regions_with_caps(reporter, client, &[VPC_CAPABILITY]).await;
    let Some(region) = regions.into_iter().next() else {
        let err = Error::configuration(format!("no available region supports {}", VPC_CAPABILITY));
        reporter.fatal(format_vpc_error(&err, "creating", None));
        return Provisioned::failed(err);
    };

    let mut opts = VpcCreateOptions::new(format!("{}{}", LABEL_PREFIX, unique_text()), region);
    modify(&mut opts);
    tracing::debug!(label = %opts.label, region = %opts.region, "creating test VPC");

    let vpc = match client.create_vpc(opts).await {
        Ok(vpc) => vpc,
        Err(e) => {
            reporter.fatal(format_vpc_error(&e, "creating", None));
            return Provisioned::failed(e);
        }
    };

    let mut teardown = Teardown::new();
    let id = vpc.id;
    let client = client.clone();
    let step_reporter = reporter.clone();
    teardown.push(format!("delete VPC {}", id), move || async move {
        if let Err(e) = client.delete_vpc(id).await {
            step_reporter.error(format_vpc_error(&e, "deleting", Some(id)));
        }
    });

    Provisioned {
        resource: Some(vpc),
        teardown,
        error: None,
    }
}

/// Binds a client to `fixture` and creates a VPC through it.
pub async fn setup_vpc(reporter: &TestReporter, fixture: &str) -> VpcSetup {
    setup_vpc_with(reporter, fixture, |_| {}).await
}

/// Like [`setup_vpc`], letting `modify` adjust the create options.
pub async fn setup_vpc_with<F>(reporter: &TestReporter, fixture: &str, modify: F) -> VpcSetup
where
    F: FnOnce(&mut VpcCreateOptions),
{
    match FixtureConfig::from_env() {
        Ok(config) => setup_vpc_with_config(reporter, fixture, &config, modify).await,
        Err(e) => {
            reporter.error(format!("invalid fixture configuration: {}", e));
            VpcSetup {
                client: None,
                vpc: None,
                teardown: Teardown::new(),
                error: Some(e),
            }
        }
    }
}

/// Like [`setup_vpc_with`] with an explicit fixture configuration.
pub async fn setup_vpc_with_config<F>(
    reporter: &TestReporter,
    fixture: &str,
    config: &FixtureConfig,
    modify: F,
) -> VpcSetup
where
    F: FnOnce(&mut VpcCreateOptions),
{
    let (client, mut teardown) = match create_test_client_with(reporter, fixture, config) {
        Ok(bound) => bound,
        Err(e) => {
            reporter.error(format!("failed to bind fixture {}: {}", fixture, e));
            return VpcSetup {
                client: None,
                vpc: None,
                teardown: Teardown::new(),
                error: Some(e),
            };
        }
    };

    let provisioned = create_vpc_with(reporter, &client, modify).await;
    teardown.append(provisioned.teardown);

    VpcSetup {
        client: Some(client),
        vpc: provisioned.resource,
        teardown,
        error: provisioned.error,
    }
}

/// Checks that a created VPC has an id and both timestamps.
///
/// Each violation is reported separately. Returns whether all passed.
pub fn vpc_check(vpc: &Vpc, reporter: &TestReporter) -> bool {
    let mut ok = true;
    if vpc.id == 0 {
        reporter.error(format!("expected VPC {:?} to have a non-zero id", vpc.label));
        ok = false;
    }
    ok &= assert_date_set(reporter, "VPC created", vpc.created.as_ref());
    ok &= assert_date_set(reporter, "VPC updated", vpc.updated.as_ref());
    ok
}

/// Checks that a VPC matches the options it was created from.
///
/// Subnets are compared in order up to the shorter list; a length
/// difference is reported as its own mismatch. All mismatches are reported
/// as one failure.
pub fn vpc_create_options_check(
    opts: &VpcCreateOptions,
    vpc: &Vpc,
    reporter: &TestReporter,
) -> bool {
    let mut diffs = Vec::new();
    diff_field(&mut diffs, "description", &opts.description, &vpc.description);
    diff_field(&mut diffs, "label", &opts.label, &vpc.label);
    diff_field(&mut diffs, "region", &opts.region, &vpc.region);
    if opts.subnets.len() != vpc.subnets.len() {
        diffs.push(format!(
            "subnet count: {} != {}",
            opts.subnets.len(),
            vpc.subnets.len()
        ));
    }
    for (i, (want, got)) in opts.subnets.iter().zip(&vpc.subnets).enumerate() {
        diff_field(&mut diffs, &format!("subnets[{}].label", i), &want.label, &got.label);
        diff_field(&mut diffs, &format!("subnets[{}].ipv4", i), &want.ipv4, &got.ipv4);
    }

    report_mismatch(reporter, "VpcCreateOptions", opts, vpc, diffs)
}

/// Checks that a VPC carries the label and description of `opts`.
pub fn vpc_update_options_check(
    opts: &VpcUpdateOptions,
    vpc: &Vpc,
    reporter: &TestReporter,
) -> bool {
    let mut diffs = Vec::new();
    diff_field(&mut diffs, "description", &opts.description, &vpc.description);
    diff_field(&mut diffs, "label", &opts.label, &vpc.label);

    report_mismatch(reporter, "VpcUpdateOptions", opts, vpc, diffs)
}

fn diff_field(diffs: &mut Vec<String>, field: &str, want: &str, got: &str) {
    if want != got {
        diffs.push(format!("{}: {:?} != {:?}", field, want, got));
    }
}

fn report_mismatch<O: std::fmt::Debug>(
    reporter: &TestReporter,
    kind: &str,
    opts: &O,
    vpc: &Vpc,
    diffs: Vec<String>,
) -> bool {
    if diffs.is_empty() {
        return true;
    }
    reporter.error(format!(
        "{} and VPC mismatch ({})\n    options: {:?}\n    vpc: {:?}",
        kind,
        diffs.join(", "),
        opts,
        vpc
    ));
    false
}
