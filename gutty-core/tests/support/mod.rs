#![allow(dead_code)]

use gutty_core::{
    RecordId,
    database::CatalogRepository,
    query::{SearchPage, SearchQuery},
    testing::TestCatalog,
};

pub async fn sample_catalog() -> TestCatalog {
    TestCatalog::sample().await.expect("seed sample catalog")
}

pub async fn search(catalog: &TestCatalog, query: &SearchQuery) -> SearchPage {
    catalog.catalog().search(query).await.expect("search")
}

pub fn ids(page: &SearchPage) -> Vec<RecordId> {
    page.results.iter().map(|record| record.id).collect()
}
