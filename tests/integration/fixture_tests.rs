//! Recording and replaying fixtures end to end.

use serde_json::json;
use vpckit::fixture::Cassette;
use vpckit::testing::{LABEL_PREFIX, TestReporter, setup_vpc_with_config, vpc_check};
use vpckit::transport::Method;
use vpckit::{ErrorKind, FixtureConfig, FixtureMode};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::init_test_tracing;

async fn mock_api() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "us-east", "capabilities": ["Linodes", "VPCs"], "status": "ok" }],
            "page": 1, "pages": 1, "results": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/vpcs"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 55,
            "label": "vpckit-test-vpc-fromserver",
            "description": "",
            "region": "us-east",
            "subnets": [],
            "created": "2024-01-02T03:04:05",
            "updated": "2024-01-02T03:04:05"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v4/vpcs/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_record_then_replay() {
    init_test_tracing();
    let server = mock_api().await;
    let dir = tempfile::tempdir().unwrap();

    let record = FixtureConfig::new()
        .with_mode(FixtureMode::Record)
        .with_directory(dir.path())
        .with_api_url(server.uri())
        .with_token("test-token");
    let reporter = TestReporter::new("record");
    let mut setup = setup_vpc_with_config(&reporter, "TestRoundTrip", &record, |_| {}).await;
    assert_eq!(setup.vpc.as_ref().unwrap().id, 55);
    setup.teardown.run().await;
    reporter.finish();

    let cassette = Cassette::load(dir.path().join("TestRoundTrip.json")).unwrap();
    let methods: Vec<Method> = cassette.interactions.iter().map(|i| i.request.method).collect();
    assert_eq!(methods, vec![Method::Get, Method::Post, Method::Delete]);
    let sent_label = cassette.interactions[1].request.body.as_ref().unwrap()["label"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(sent_label.starts_with(LABEL_PREFIX));

    let replay = FixtureConfig::new().with_directory(dir.path());
    let reporter = TestReporter::new("replay");
    let mut setup = setup_vpc_with_config(&reporter, "TestRoundTrip", &replay, |_| {}).await;
    let vpc = setup.vpc.clone().unwrap();
    assert_eq!(vpc.id, 55);
    vpc_check(&vpc, &reporter);
    setup.teardown.run().await;
    reporter.finish();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unrecorded_request_fails_with_fixture_error() {
    init_test_tracing();
    let replay = FixtureConfig::new().with_directory("tests/fixtures");
    let reporter = TestReporter::new("unrecorded");

    let mut setup = setup_vpc_with_config(&reporter, "TestVPC_Create", &replay, |_| {}).await;
    let client = setup.client.clone().unwrap();
    let err = client.get_vpc(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Fixture);

    setup.teardown.run().await;
    assert!(!reporter.failed());
}
