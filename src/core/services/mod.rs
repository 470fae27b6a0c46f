pub mod pagination;
pub mod summary_service;

pub use pagination::{paginate, total_pages, Pager, RecentPage};
pub use summary_service::{CategorySlice, SummaryService};
