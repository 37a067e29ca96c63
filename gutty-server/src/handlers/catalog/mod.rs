pub mod handle_filters;
pub mod handle_item;
pub mod handle_search;

pub use handle_filters::{filter_options_handler, summary_handler};
pub use handle_item::item_detail_handler;
pub use handle_search::search_handler;
