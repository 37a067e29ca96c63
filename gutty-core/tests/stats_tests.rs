//! Grouped statistics, filter options and the catalog summary.

mod support;

use gutty_core::{
    database::{CatalogRepository, StatisticsRepository},
    stats::GroupStat,
    testing::{SeedRecord, TestCatalog},
};
use support::sample_catalog;

fn values(groups: &[GroupStat]) -> Vec<&str> {
    groups.iter().map(|g| g.value.as_str()).collect()
}

fn group<'a>(groups: &'a [GroupStat], value: &str) -> &'a GroupStat {
    groups
        .iter()
        .find(|g| g.value == value)
        .unwrap_or_else(|| panic!("missing group {value}"))
}

#[tokio::test]
async fn null_valuations_count_but_do_not_average() {
    let catalog = TestCatalog::with_records(&[
        SeedRecord::new(1, "A").pattern("Mesh").value(100.0),
        SeedRecord::new(2, "B").pattern("Mesh"),
        SeedRecord::new(3, "C").pattern("Mesh").value(300.0),
    ])
    .await
    .expect("seed");

    let stats = catalog.statistics().catalog_stats().await.unwrap();
    let mesh = group(&stats.by_pattern, "Mesh");
    assert_eq!(mesh.count, 3);
    assert_eq!(mesh.average_value_estimate, Some(200.0));
}

#[tokio::test]
async fn all_null_group_has_no_average() {
    let catalog = TestCatalog::with_records(&[
        SeedRecord::new(1, "A").country("Wales"),
        SeedRecord::new(2, "B").country("Wales"),
    ])
    .await
    .expect("seed");

    let stats = catalog.statistics().catalog_stats().await.unwrap();
    let wales = group(&stats.by_country, "Wales");
    assert_eq!(wales.count, 2);
    assert_eq!(wales.average_value_estimate, None);
}

#[tokio::test]
async fn breakdowns_exclude_null_groups_and_follow_their_ordering() {
    let catalog = sample_catalog().await;
    let stats = catalog.statistics().catalog_stats().await.unwrap();

    // Count descending, ties by value.
    assert_eq!(
        values(&stats.by_pattern),
        vec!["Mesh", "Smooth", "Bramble", "Dimple", "Hand Hammered"]
    );
    assert_eq!(values(&stats.by_country), vec!["Scotland", "England", "USA"]);
    assert_eq!(group(&stats.by_country, "Scotland").count, 4);

    // Chronological, record 8 has no era and is excluded.
    assert_eq!(
        values(&stats.by_era),
        vec!["Featherie", "Gutty", "Rubber Core", "Dimple"]
    );
    let rubber = group(&stats.by_era, "Rubber Core");
    assert_eq!(rubber.count, 3);
    assert_eq!(rubber.average_value_estimate, Some(550.0));

    assert_eq!(
        values(&stats.by_condition),
        vec!["Excellent", "Fair", "Good", "Very Good"]
    );
    assert_eq!(group(&stats.by_condition, "Good").count, 4);
}

#[tokio::test]
async fn top_valuable_puts_unvalued_records_last() {
    let catalog = sample_catalog().await;
    let stats = catalog.statistics().catalog_stats().await.unwrap();

    let ids: Vec<_> = stats.top_valuable.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 8, 7, 6]);
    assert_eq!(stats.top_valuable[0].name, "Gourlay Featherie");
    assert_eq!(stats.top_valuable[0].manufacturer, "Gourlay");
}

#[tokio::test]
async fn top_valuable_is_capped_at_twenty() {
    let records: Vec<_> = (1..=25)
        .map(|id| SeedRecord::new(id, format!("Ball {id}")).value(id as f64))
        .collect();
    let catalog = TestCatalog::with_records(&records).await.expect("seed");

    let stats = catalog.statistics().catalog_stats().await.unwrap();
    assert_eq!(stats.top_valuable.len(), 20);
    assert_eq!(stats.top_valuable[0].id, 25);
    assert_eq!(stats.top_valuable[19].id, 6);
}

#[tokio::test]
async fn filter_options_reflect_current_data() {
    let catalog = sample_catalog().await;
    let repo = catalog.catalog();

    let options = repo.filter_options().await.unwrap();
    assert_eq!(options.eras, vec!["Featherie", "Gutty", "Rubber Core", "Dimple"]);
    assert_eq!(
        options.patterns,
        vec!["Bramble", "Dimple", "Hand Hammered", "Mesh", "Smooth"]
    );
    assert_eq!(options.countries, vec!["England", "Scotland", "USA"]);
    assert_eq!(
        options.conditions,
        vec!["Excellent", "Fair", "Good", "Very Good"]
    );

    gutty_core::testing::insert_records(
        catalog.pool(),
        &[SeedRecord::new(9, "Newcomer").country("Wales")],
    )
    .await
    .unwrap();
    let refreshed = repo.filter_options().await.unwrap();
    assert_eq!(refreshed.countries, vec!["England", "Scotland", "USA", "Wales"]);
}

#[tokio::test]
async fn summary_covers_the_whole_store() {
    let catalog = sample_catalog().await;
    let summary = catalog.catalog().summary().await.unwrap();

    assert_eq!(summary.total, 8);
    assert_eq!(summary.max_value, Some(12_000.0));
    assert_eq!(summary.min_value, Some(100.0));
    let average = summary.average_value.unwrap();
    assert!((average - 18_000.0 / 7.0).abs() < 1e-9, "{average}");
}

#[tokio::test]
async fn empty_store_yields_empty_stats() {
    let catalog = TestCatalog::empty().await.expect("empty catalog");

    let stats = catalog.statistics().catalog_stats().await.unwrap();
    assert!(stats.by_pattern.is_empty());
    assert!(stats.top_valuable.is_empty());

    let summary = catalog.catalog().summary().await.unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average_value, None);

    let report = catalog.database.preflight().await.unwrap();
    assert_eq!(report.record_count, 0);
}
