mod common;

use common::{Calls, FakeConnector};
use std::sync::Arc;
use stratus::{Outcome, Registry, Request, dispatch};
use stratus_cloud::{CloudError, NetworkTemplate, Setting, SubnetTemplate, Template};

fn prod_network() -> NetworkTemplate {
    NetworkTemplate {
        id: Some("4125567930181424011".into()),
        name: Some("prod".into()),
        created: Some("2024-03-01T10:00:00.000-08:00".into()),
        subnets: Some(vec![
            SubnetTemplate::placeholder("prod-a"),
            SubnetTemplate::placeholder("prod-b"),
        ]),
        ..Default::default()
    }
}

fn web_a() -> SubnetTemplate {
    SubnetTemplate {
        id: Some("6913384592357392817".into()),
        name: Some("web-a".into()),
        cidr: Some("10.138.0.0/20".into()),
        gateway: Some("10.138.0.1".into()),
        ..Default::default()
    }
}

/// "gcp" answered by a fake backend holding one network and one subnet
fn fake_gcp() -> (Registry, Arc<Calls>) {
    let connector = FakeConnector::new("gcp")
        .with_network(prod_network())
        .with_subnet("us-west1", web_a());
    let calls = Arc::clone(&connector.calls);
    (Registry::new().with(connector), calls)
}

#[tokio::test]
async fn test_connect_only_returns_provider() {
    let (registry, calls) = fake_gcp();

    let outcome = dispatch(&registry, Request::new("gcp")).await.unwrap();
    let provider = outcome.provider().expect("connected provider");
    assert_eq!(provider.name(), "gcp");
    assert_eq!(provider.profile(), "default");
    assert_eq!(calls.connects(), 1);
    assert_eq!(calls.backend(), 0);
}

#[tokio::test]
async fn test_connect_only_renders_summary() {
    let (registry, _) = fake_gcp();

    let outcome = dispatch(&registry, Request::new("gcp").profile("ops"))
        .await
        .unwrap();
    match outcome.into_template() {
        Template::Cloud(cloud) => {
            assert_eq!(cloud.provider.as_deref(), Some("gcp"));
            assert_eq!(cloud.profile.as_deref(), Some("ops"));
            assert_eq!(cloud.account.as_deref(), Some("demo-project"));
            assert_eq!(cloud.identity, None);
            assert_eq!(cloud.region, None);
            assert_eq!(cloud.networks, None);
        }
        other => panic!("expected cloud template, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unrecognized_provider_never_connects() {
    let (registry, calls) = fake_gcp();

    let err = dispatch(&registry, Request::new("azure")).await.unwrap_err();
    assert!(matches!(err, CloudError::UnrecognizedProvider(ref name) if name == "azure"));
    assert_eq!(calls.connects(), 0);
}

#[tokio::test]
async fn test_bootstrap_failure_is_connection_error() {
    let registry = Registry::new().with(FakeConnector::new("gcp").failing(|| {
        CloudError::MissingSetting {
            setting: Setting::Account,
            profile: "default".into(),
        }
    }));

    let err = dispatch(&registry, Request::new("gcp")).await.unwrap_err();
    match err {
        CloudError::Connection { provider, source } => {
            assert_eq!(provider, "gcp");
            assert!(matches!(
                *source,
                CloudError::MissingSetting {
                    setting: Setting::Account,
                    ..
                }
            ));
        }
        other => panic!("expected connection error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_profile_is_connection_error() {
    let registry = Registry::new().with(
        FakeConnector::new("gcp").failing(|| CloudError::UnknownProfile("nope".into())),
    );

    let err = dispatch(&registry, Request::new("gcp").profile("nope"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No such profile"));
}

#[tokio::test]
async fn test_describe_network_prod() {
    let (registry, _) = fake_gcp();

    let request = Request::new("gcp").describe("network:prod".parse().unwrap());
    let template = dispatch(&registry, request).await.unwrap().into_template();

    assert_eq!(template, Template::Network(prod_network()));
    let json = serde_json::to_value(&template).unwrap();
    assert_eq!(json["type"], "network");
    assert_eq!(json["subnets"][0], serde_json::json!({"name": "prod-a"}));
    assert!(json.get("description").is_none());
}

#[tokio::test]
async fn test_describe_cloud_lists_networks() {
    let (registry, _) = fake_gcp();

    let request = Request::new("gcp")
        .region("us-west1")
        .describe("cloud".parse().unwrap());
    let template = dispatch(&registry, request).await.unwrap().into_template();

    match template {
        Template::Cloud(cloud) => {
            assert_eq!(cloud.region.as_deref(), Some("us-west1"));
            assert_eq!(cloud.networks, Some(vec![prod_network()]));
        }
        other => panic!("expected cloud template, got {other:?}"),
    }
}

#[tokio::test]
async fn test_describe_subnet_in_region() {
    let (registry, _) = fake_gcp();

    let request = Request::new("gcp")
        .region("us-west1")
        .describe("subnet:web-a".parse().unwrap());
    let template = dispatch(&registry, request).await.unwrap().into_template();
    assert_eq!(template, Template::Subnet(web_a()));
}

#[tokio::test]
async fn test_describe_subnet_without_region() {
    let (registry, calls) = fake_gcp();

    let request = Request::new("gcp").describe("subnet:web-a".parse().unwrap());
    let err = dispatch(&registry, request).await.unwrap_err();
    assert!(matches!(err, CloudError::MissingRegion { .. }));
    assert_eq!(calls.backend(), 0);
}

#[tokio::test]
async fn test_nameless_template_skips_backend() {
    let (registry, calls) = fake_gcp();

    let request = Request::new("gcp").describe("network".parse().unwrap());
    let err = dispatch(&registry, request).await.unwrap_err();
    assert!(matches!(err, CloudError::NotEnoughInfo(_)));
    assert_eq!(calls.connects(), 1);
    assert_eq!(calls.backend(), 0);
}

#[tokio::test]
async fn test_describe_missing_network() {
    let (registry, _) = fake_gcp();

    let request = Request::new("gcp").describe("network:staging".parse().unwrap());
    let err = dispatch(&registry, request).await.unwrap_err();
    assert!(matches!(err, CloudError::NotFound(ref r) if r.contains("staging")));
}

#[tokio::test]
async fn test_describe_wins_over_other_verbs() {
    let (registry, calls) = fake_gcp();

    let request = Request::new("gcp")
        .describe("network:prod".parse().unwrap())
        .plan("network:prod".parse().unwrap())
        .apply("network:prod".parse().unwrap())
        .destroy("prod");
    let outcome = dispatch(&registry, request).await.unwrap();
    assert!(matches!(outcome, Outcome::Resource(Template::Network(_))));
    assert_eq!(calls.backend(), 1);
}

#[tokio::test]
async fn test_plan_apply_destroy_not_implemented() {
    let (registry, _) = fake_gcp();
    let prod: Template = "network:prod".parse().unwrap();

    for (request, verb) in [
        (Request::new("gcp").plan(prod.clone()), "plan"),
        (Request::new("gcp").apply(prod.clone()), "apply"),
        (Request::new("gcp").destroy("prod"), "destroy"),
    ] {
        let err = dispatch(&registry, request).await.unwrap_err();
        match err {
            CloudError::NotImplemented {
                provider,
                operation,
            } => {
                assert_eq!(provider, "gcp");
                assert_eq!(operation, verb);
            }
            other => panic!("expected not implemented for {verb}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_describe_is_idempotent() {
    let (registry, calls) = fake_gcp();
    let request = Request::new("gcp").describe("network:prod".parse().unwrap());

    let first = dispatch(&registry, request.clone()).await.unwrap().into_template();
    let second = dispatch(&registry, request).await.unwrap().into_template();
    assert_eq!(first, second);
    assert_eq!(calls.connects(), 2);
}
