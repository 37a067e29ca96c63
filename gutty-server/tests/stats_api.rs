mod support;

use gutty_core::testing::SeedRecord;
use serde_json::Value;
use support::{spawn_app, spawn_app_with};

#[tokio::test]
async fn stats_are_served_on_both_paths() {
    let app = spawn_app().await;

    let api: Value = app.server.get("/api/stats").await.json();
    let page: Value = app.server.get("/stats").await.json();
    assert_eq!(api, page);

    assert_eq!(api["by_pattern"][0]["value"], "Mesh");
    assert_eq!(api["by_pattern"][0]["count"], 3);
    assert_eq!(api["by_era"][0]["value"], "Featherie");
    assert_eq!(api["by_country"][0]["value"], "Scotland");
    assert_eq!(api["by_condition"][0]["value"], "Excellent");
    assert_eq!(api["top_valuable"][0]["id"], 1);
    assert_eq!(api["top_valuable"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn group_average_skips_null_valuations() {
    let app = spawn_app_with(
        &[
            SeedRecord::new(1, "A").era("Gutty", 1848).value(100.0),
            SeedRecord::new(2, "B").era("Gutty", 1848),
            SeedRecord::new(3, "C").era("Gutty", 1848).value(300.0),
        ],
        |_| {},
    )
    .await;

    let body: Value = app.server.get("/api/stats").await.json();
    let gutty = &body["by_era"][0];
    assert_eq!(gutty["value"], "Gutty");
    assert_eq!(gutty["count"], 3);
    assert_eq!(gutty["average_value_estimate"], 200.0);
}

#[tokio::test]
async fn filters_and_summary_endpoints() {
    let app = spawn_app().await;

    let filters: Value = app.server.get("/api/filters").await.json();
    assert_eq!(
        filters["eras"],
        serde_json::json!(["Featherie", "Gutty", "Rubber Core", "Dimple"])
    );
    assert_eq!(
        filters["countries"],
        serde_json::json!(["England", "Scotland", "USA"])
    );

    let summary: Value = app.server.get("/api/summary").await.json();
    assert_eq!(summary["total"], 8);
    assert_eq!(summary["max_value"], 12000.0);
    assert_eq!(summary["min_value"], 100.0);
}
