//! VPC lifecycle scenarios.

use vpckit::testing::{
    LABEL_PREFIX, TestReporter, format_vpc_error, setup_vpc, setup_vpc_with, vpc_check,
    vpc_create_options_check, vpc_update_options_check,
};
use vpckit::{VpcCreateOptions, VpcSubnetCreateOptions, VpcUpdateOptions};

use crate::common::init_test_tracing;

#[tokio::test(flavor = "multi_thread")]
async fn test_vpc_create() {
    init_test_tracing();
    let reporter = TestReporter::new("TestVPC_Create");
    let mut setup = setup_vpc(&reporter, "fixtures/TestVPC_Create").await;

    if let Some(vpc) = &setup.vpc {
        vpc_check(vpc, &reporter);
        vpc_create_options_check(&vpc.get_create_options(), vpc, &reporter);
    }

    setup.teardown.run().await;
    reporter.finish();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vpc_update() {
    init_test_tracing();
    let reporter = TestReporter::new("TestVPC_Update");
    let mut setup = setup_vpc(&reporter, "fixtures/TestVPC_Update").await;

    if let (Some(client), Some(vpc)) = (&setup.client, &setup.vpc) {
        vpc_check(vpc, &reporter);
        vpc_update_options_check(&vpc.get_update_options(), vpc, &reporter);

        let opts = VpcUpdateOptions::new()
            .with_label("updated-label")
            .with_description("updated description");
        match client.update_vpc(vpc.id, opts.clone()).await {
            Ok(updated) => {
                vpc_update_options_check(&opts, &updated, &reporter);
            }
            Err(e) => reporter.error(format_vpc_error(&e, "updating", Some(vpc.id))),
        }
    }

    setup.teardown.run().await;
    reporter.finish();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vpc_list() {
    init_test_tracing();
    let reporter = TestReporter::new("TestVPC_List");
    let mut setup = setup_vpc(&reporter, "fixtures/TestVPC_List").await;

    if let (Some(client), Some(vpc)) = (&setup.client, &setup.vpc) {
        vpc_check(vpc, &reporter);

        match client.list_vpcs(None).await {
            Ok(vpcs) => {
                if !vpcs.iter().any(|v| v.id == vpc.id) {
                    reporter.error(format!("VPC {} not found in list", vpc.id));
                }
            }
            Err(e) => reporter.error(format_vpc_error(&e, "listing", None)),
        }
    }

    setup.teardown.run().await;
    reporter.finish();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_vpc_create_with_subnets() {
    init_test_tracing();
    let reporter = TestReporter::new("TestVPC_CreateWithSubnets");

    let mut requested = VpcCreateOptions::default();
    let mut setup = setup_vpc_with(&reporter, "fixtures/TestVPC_CreateWithSubnets", |opts| {
        opts.description = "vpc with subnets".to_string();
        opts.subnets.push(VpcSubnetCreateOptions::new("a", "10.0.0.0/24"));
        opts.subnets.push(VpcSubnetCreateOptions::new("b", "10.0.1.0/24"));
        requested = opts.clone();
    })
    .await;

    if let Some(vpc) = &setup.vpc {
        vpc_check(vpc, &reporter);

        // Labels are random per run; a replayed VPC carries the recorded one.
        if !vpc.label.starts_with(LABEL_PREFIX) {
            reporter.error(format!("unexpected VPC label {:?}", vpc.label));
        }
        let expected = VpcCreateOptions {
            label: vpc.label.clone(),
            ..requested
        };
        vpc_create_options_check(&expected, vpc, &reporter);

        let labels: Vec<&str> = vpc.subnets.iter().map(|s| s.label.as_str()).collect();
        if labels != ["a", "b"] {
            reporter.error(format!("subnets out of order: {:?}", labels));
        }
    }

    setup.teardown.run().await;
    reporter.finish();
}
