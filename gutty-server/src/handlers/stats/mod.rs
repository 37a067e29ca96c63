pub mod handle_stats;

pub use handle_stats::stats_handler;
