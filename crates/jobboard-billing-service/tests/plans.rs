//! Plan catalog integration tests.

mod common;

use common::TestHarness;

const PLAN_IDS: [&str; 6] = [
    "basic_monthly",
    "basic_annual",
    "professional_monthly",
    "professional_annual",
    "enterprise_monthly",
    "enterprise_annual",
];

#[tokio::test]
async fn lists_exactly_six_plans() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/stripe/subscription-plans").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let plans = body["plans"].as_object().expect("plans is an object");
    assert_eq!(plans.len(), 6);

    for id in PLAN_IDS {
        let plan = &plans[id];
        assert!(plan["price"].as_u64().unwrap() > 0, "{id} has no price");
        assert_eq!(plan["currency"], "thb");
        assert!(plan["interval"] == "month" || plan["interval"] == "year");
        assert!(!plan["features"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn plan_entries_match_catalog() {
    let harness = TestHarness::new();

    let body: serde_json::Value = harness
        .server
        .get("/api/stripe/subscription-plans")
        .await
        .json();

    let plan = &body["plans"]["professional_annual"];
    assert_eq!(plan["name"], "Professional Plan - Annual");
    assert_eq!(plan["description"], "For BIM professionals (Save 17%)");
    assert_eq!(plan["price"], 9990);
    assert_eq!(plan["interval"], "year");
    assert_eq!(plan["features"][2], "24/7 priority support");
}

#[tokio::test]
async fn returns_configured_publishable_key() {
    let harness = TestHarness::new();
    let body: serde_json::Value = harness
        .server
        .get("/api/stripe/subscription-plans")
        .await
        .json();
    assert_eq!(body["publishable_key"], "pk_test_placeholder_replace_with_real_key");

    let harness = TestHarness::live("http://127.0.0.1:9");
    let body: serde_json::Value = harness
        .server
        .get("/api/stripe/subscription-plans")
        .await
        .json();
    assert_eq!(body["publishable_key"], "pk_test_integration");
}
