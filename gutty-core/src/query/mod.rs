pub mod builder;
pub mod filtering;
pub mod params;
pub mod sorting;
pub mod types;

pub use builder::SearchQueryBuilder;
pub use filtering::{CategoryField, Predicate};
pub use params::SearchParams;
pub use types::*;
